//! Driven port used by the load generator to post synthetic telemetry.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{StatDraft, StatFields, StatKind};

use super::define_port_error;

define_port_error! {
    /// Failures while submitting a telemetry record.
    pub enum StatSubmitError {
        /// The request could not be sent or timed out.
        Transport { message: String } => "stat submission transport failed: {message}",
        /// The endpoint answered with a non-success status.
        Rejected { status: u16 } => "stat submission rejected with status {status}",
        /// The record could not be encoded.
        Encode { message: String } => "stat submission encoding failed: {message}",
    }
}

/// A type-erased telemetry record ready to post.
#[derive(Debug, Clone, PartialEq)]
pub struct StatSubmission {
    /// Target family.
    pub kind: StatKind,
    /// JSON request body.
    pub body: Value,
}

impl StatSubmission {
    /// Encode `draft` as the JSON body its endpoint accepts.
    pub fn from_draft<F: StatFields>(draft: &StatDraft<F>) -> Result<Self, StatSubmitError> {
        let body =
            serde_json::to_value(draft).map_err(|err| StatSubmitError::encode(err.to_string()))?;
        Ok(Self {
            kind: F::KIND,
            body,
        })
    }
}

/// Sink for synthetic telemetry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatSubmitter: Send + Sync {
    /// Deliver one record. Success means the endpoint accepted it.
    async fn submit(&self, submission: &StatSubmission) -> Result<(), StatSubmitError>;
}
