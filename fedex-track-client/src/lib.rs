//! FedEx Tracking Client Library
//!
//! A stateless, reusable client for the FedEx tracking API: it normalizes the
//! carrier's heterogeneous event history into a small typed result and can
//! build proof-of-delivery document requests.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on the hard logic:
//! - Decodes raw tracking payloads into typed result blocks
//! - Derives shipped/delivered state, ship and delivery dates, and the
//!   single latest event from each block's events
//! - Resolves multi-block responses (multi-piece or reissued shipments) to
//!   the block with the most recent activity
//!
//! The library does NOT:
//! - Perform HTTP transport or credential acquisition
//! - Retry, rate-limit, or time out requests
//! - Write downloaded documents to disk itself
//!
//! All IO is behind the [`TrackTransport`] and [`DocumentFetcher`]
//! capabilities, supplied by the application layer (fedex-track-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use fedex_track_client::{Tracker, TrackTransport};
//!
//! # fn run(transport: impl TrackTransport) -> fedex_track_client::Result<()> {
//! let tracker = Tracker::new(transport);
//! let outcome = tracker.track_by_number("794843185271")?;
//!
//! if outcome.valid {
//!     println!("shipped: {}, delivered: {}", outcome.is_shipped, outcome.is_delivered);
//!     if let Some(latest) = outcome.latest_event {
//!         println!("latest: {}", latest);
//!     }
//! } else {
//!     println!("tracking number not recognized by the carrier");
//! }
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod normalizer;
pub mod resolver;
pub mod tracker;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use normalizer::normalize;
pub use resolver::resolve;
pub use tracker::{spod_url, Tracker};
pub use transport::{DocumentFetcher, TrackTransport};
pub use types::{
    EventKind, PackageInfo, PackageType, Result, ResultBlock, TimestampedEvent, Timestamp,
    TrackError, TrackingOutcome,
};

// Internal modules (not exposed in public API)
mod response;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an invalid outcome carries nothing trustworthy
        let outcome = TrackingOutcome::invalid();
        assert!(!outcome.valid);
        assert!(outcome.events.is_empty());
    }
}
