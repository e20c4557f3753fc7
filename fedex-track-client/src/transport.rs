//! Injected transport capabilities
//!
//! The library never performs network IO itself. Callers inject these
//! capabilities (an authenticated HTTP implementation lives in the CLI
//! crate), which keeps the core deterministic and testable without live
//! credentials.

use crate::types::Result;
use serde_json::Value;
use std::path::Path;

/// Authenticated access to the carrier's tracking endpoint
pub trait TrackTransport {
    /// Submit one tracking query and return the raw JSON payload
    ///
    /// A network or HTTP-status failure is reported as an error; the
    /// orchestrator maps it to an invalid outcome.
    fn submit_tracking_query(&self, tracking_number: &str) -> Result<Value>;

    /// True if an otherwise-successful response embeds a carrier-reported
    /// logical error
    fn is_application_error(&self, response: &Value) -> bool;
}

impl<T: TrackTransport + ?Sized> TrackTransport for &T {
    fn submit_tracking_query(&self, tracking_number: &str) -> Result<Value> {
        (**self).submit_tracking_query(tracking_number)
    }

    fn is_application_error(&self, response: &Value) -> bool {
        (**self).is_application_error(response)
    }
}

/// Byte transfer for document retrieval
pub trait DocumentFetcher {
    /// Fetch the resource at `url` and persist it to `dest`
    ///
    /// Failures propagate to the caller; they are never coerced into an
    /// invalid outcome.
    fn fetch_and_persist(&self, url: &str, dest: &Path) -> Result<()>;
}
