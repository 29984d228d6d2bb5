//! Toggleable synthetic load generator.
//!
//! While running, every `period` the generator synthesises one record per
//! telemetry family and submits all five concurrently through a
//! [`StatSubmitter`]. A tick counts only when every submission succeeds;
//! failures are logged and the schedule carries on.
//!
//! Each tick runs in its own task. Stopping aborts the scheduling loop, so no
//! new ticks start, but a tick already in flight runs to completion and may
//! still bump the count.

mod synth;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::future::join_all;
use mockable::Clock;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

pub use self::synth::{
    HOURS_PER_DAY, MATERIAL_NAMES, NOTIONAL_STOCK_KG, PRODUCT_TYPES, SHIFTS, SyntheticBatch,
};
use crate::domain::StatDate;
use crate::domain::ports::{LoadControl, LoadSnapshot, LoadStatus, StatSubmitter};

/// Default interval between ticks.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(3);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct TickContext {
    submitter: Arc<dyn StatSubmitter>,
    clock: Arc<dyn Clock>,
    rng: Mutex<SmallRng>,
    count: AtomicU64,
}

impl TickContext {
    async fn tick(&self) -> bool {
        let date = StatDate::from_instant(self.clock.utc());
        let batch = SyntheticBatch::generate(&mut *lock(&self.rng), &date);
        let submissions = match batch.into_submissions() {
            Ok(submissions) => submissions,
            Err(error) => {
                warn!(%error, "failed to encode synthetic telemetry");
                return false;
            }
        };

        let results = join_all(
            submissions
                .iter()
                .map(|submission| self.submitter.submit(submission)),
        )
        .await;

        let mut failed = 0_usize;
        for (submission, result) in submissions.iter().zip(results) {
            if let Err(error) = result {
                failed += 1;
                warn!(kind = %submission.kind, %error, "synthetic submission failed");
            }
        }
        if failed > 0 {
            warn!(failed, "load tick not counted");
            return false;
        }

        let count = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(count, "load tick succeeded");
        true
    }
}

/// Owned load-generator state: run flag, tick counter, and timer handle.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use factory_backend::domain::LoadGenerator;
/// use factory_backend::domain::ports::{LoadControl, LoadStatus};
/// # fn submitter() -> Arc<dyn factory_backend::domain::ports::StatSubmitter> { todo!() }
///
/// # #[tokio::main] async fn main() {
/// let generator = LoadGenerator::new(
///     submitter(),
///     Arc::new(mockable::DefaultClock),
///     Duration::from_secs(3),
/// );
/// assert_eq!(generator.toggle(), LoadStatus::Started);
/// assert_eq!(generator.toggle(), LoadStatus::Stopped);
/// # }
/// ```
pub struct LoadGenerator {
    context: Arc<TickContext>,
    period: Duration,
    timer: Mutex<Option<JoinHandle<()>>>,
    runtime: Handle,
}

impl LoadGenerator {
    /// Create a stopped generator.
    ///
    /// Ticks are spawned on the Tokio runtime that is current at construction.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn new(submitter: Arc<dyn StatSubmitter>, clock: Arc<dyn Clock>, period: Duration) -> Self {
        Self {
            context: Arc::new(TickContext {
                submitter,
                clock,
                rng: Mutex::new(SmallRng::from_entropy()),
                count: AtomicU64::new(0),
            }),
            period,
            timer: Mutex::new(None),
            runtime: Handle::current(),
        }
    }

    /// Seed the random source, for reproducible runs.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        *lock(&self.context.rng) = SmallRng::seed_from_u64(seed);
        self
    }

    /// Start ticking. Resets the count. No-op when already running.
    pub fn start(&self) {
        let mut timer = lock(&self.timer);
        if timer.is_none() {
            *timer = Some(self.spawn_loop());
        }
    }

    /// Stop scheduling ticks. Keeps the count. No-op when stopped.
    pub fn stop(&self) {
        if let Some(handle) = lock(&self.timer).take() {
            handle.abort();
            info!(count = self.count(), "load generator stopped");
        }
    }

    /// Fully successful ticks since the last start.
    pub fn count(&self) -> u64 {
        self.context.count.load(Ordering::SeqCst)
    }

    /// Whether ticks are scheduled.
    pub fn is_running(&self) -> bool {
        lock(&self.timer).is_some()
    }

    fn spawn_loop(&self) -> JoinHandle<()> {
        self.context.count.store(0, Ordering::SeqCst);
        let context = Arc::clone(&self.context);
        let runtime = self.runtime.clone();
        let period = self.period;
        info!(period_ms = period.as_millis(), "load generator started");
        self.runtime.spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let context = Arc::clone(&context);
                runtime.spawn(async move {
                    context.tick().await;
                });
            }
        })
    }
}

impl LoadControl for LoadGenerator {
    fn toggle(&self) -> LoadStatus {
        let mut timer = lock(&self.timer);
        if let Some(handle) = timer.take() {
            handle.abort();
            info!(count = self.count(), "load generator stopped");
            LoadStatus::Stopped
        } else {
            *timer = Some(self.spawn_loop());
            LoadStatus::Started
        }
    }

    fn snapshot(&self) -> LoadSnapshot {
        LoadSnapshot {
            running: self.is_running(),
            count: self.count(),
        }
    }
}

impl Drop for LoadGenerator {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.timer).take() {
            handle.abort();
        }
    }
}
