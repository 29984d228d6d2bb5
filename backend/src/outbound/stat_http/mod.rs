//! Outbound HTTP delivery of synthetic telemetry.
//!
//! Implements the `StatSubmitter` port used by the load generator.

mod http_submitter;

pub use http_submitter::{DEFAULT_SUBMIT_TIMEOUT, HttpStatSubmitter};
