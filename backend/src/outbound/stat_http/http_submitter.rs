//! Reqwest-backed telemetry submitter.
//!
//! Posts each synthetic record to the record endpoint of its family on a
//! configured base URL, normally this server's own address.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::domain::StatKind;
use crate::domain::ports::{StatSubmission, StatSubmitError, StatSubmitter};

/// Default bound on one outbound submission.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Submitter that POSTs JSON bodies to `{base}{record_path}`.
#[derive(Debug, Clone)]
pub struct HttpStatSubmitter {
    client: Client,
    base: Url,
}

impl HttpStatSubmitter {
    /// Build a submitter against `base` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, kind: StatKind) -> Result<Url, StatSubmitError> {
        self.base
            .join(kind.record_path())
            .map_err(|err| StatSubmitError::encode(format!("invalid endpoint: {err}")))
    }
}

#[async_trait]
impl StatSubmitter for HttpStatSubmitter {
    async fn submit(&self, submission: &StatSubmission) -> Result<(), StatSubmitError> {
        let endpoint = self.endpoint(submission.kind)?;
        let response = self
            .client
            .post(endpoint)
            .json(&submission.body)
            .send()
            .await
            .map_err(map_transport_error)?;

        check_status(response.status())
    }
}

fn map_transport_error(error: reqwest::Error) -> StatSubmitError {
    if error.is_timeout() {
        StatSubmitError::transport(format!("timed out: {error}"))
    } else {
        StatSubmitError::transport(error.to_string())
    }
}

fn check_status(status: StatusCode) -> Result<(), StatSubmitError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(StatSubmitError::rejected(status.as_u16()))
    }
}
