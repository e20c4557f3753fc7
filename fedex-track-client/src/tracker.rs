//! Tracking query orchestration
//!
//! This module provides the primary interface of the library. The `Tracker`
//! composes response decoding, event normalization and multi-result
//! resolution against an injected transport, and hosts proof-of-delivery
//! retrieval on top of the same query path.

use crate::normalizer::normalize;
use crate::resolver::resolve;
use crate::response::{decode_response, DecodedResponse};
use crate::transport::{DocumentFetcher, TrackTransport};
use crate::types::{Result, TrackError, TrackingOutcome};
use std::path::Path;

/// Base URL for the carrier's proof-of-delivery document endpoint
const SPOD_AUTHORITY: &str = "https://www.fedex.com/trackingCal/retrievePDF.jsp";

/// Build the proof-of-delivery document URL for one shipment
///
/// `qualifier` and `tracking_number` are the two leading segments of the
/// carrier's `qualifier~number` unique id.
pub fn spod_url(qualifier: &str, tracking_number: &str) -> String {
    format!(
        "{}?accountNbr=&anon=true&appType=&destCountry=&locale=en_US&shipDate=\
         &trackingCarrier=FDXA&trackingNumber={}&trackingQualifier={}&type=SPOD",
        SPOD_AUTHORITY, tracking_number, qualifier
    )
}

/// The main entry point for tracking queries
///
/// Holds the injected transport capability; carries no other state, so one
/// `Tracker` can serve any number of independent queries.
pub struct Tracker<T> {
    transport: T,
}

impl<T: TrackTransport> Tracker<T> {
    /// Create a tracker over an authenticated transport
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Query the carrier for one tracking number and normalize the answer
    ///
    /// Expected failures - a transport error, a carrier-reported logical
    /// error, or a payload missing its events substructure - come back as
    /// `TrackingOutcome { valid: false, .. }`; callers branch on `valid`.
    /// Unknown event or packaging tags are schema drift and fail hard
    /// instead, since they mean this crate's enumerations are stale.
    ///
    /// # Example
    /// ```no_run
    /// use fedex_track_client::Tracker;
    /// # fn run(transport: impl fedex_track_client::TrackTransport) -> fedex_track_client::Result<()> {
    /// let tracker = Tracker::new(transport);
    /// let outcome = tracker.track_by_number("794843185271")?;
    /// if outcome.valid {
    ///     println!("delivered: {}", outcome.is_delivered);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn track_by_number(&self, tracking_number: &str) -> Result<TrackingOutcome> {
        log::info!("Submitting tracking query for {}", tracking_number);

        let raw = match self.transport.submit_tracking_query(tracking_number) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("Transport failed for {}: {}", tracking_number, err);
                return Ok(TrackingOutcome::invalid());
            }
        };

        if self.transport.is_application_error(&raw) {
            log::warn!("Carrier reported an error for {}", tracking_number);
            return Ok(TrackingOutcome::invalid());
        }

        let blocks = match decode_response(raw)? {
            DecodedResponse::Blocks(blocks) => blocks,
            DecodedResponse::Unusable => {
                log::warn!("Unusable tracking payload for {}", tracking_number);
                return Ok(TrackingOutcome::invalid());
            }
        };

        log::debug!(
            "Decoded {} result block(s) for {}",
            blocks.len(),
            tracking_number
        );

        let outcomes = blocks
            .into_iter()
            .map(normalize)
            .collect::<Result<Vec<_>>>()?;
        resolve(outcomes)
    }

    /// Download the proof-of-delivery document for a shipment
    ///
    /// `id` is either a raw `qualifier~number` unique id or a bare tracking
    /// number; a bare number is resolved through [`Self::track_by_number`]
    /// first. Fails with [`TrackError::InvalidIdentifier`] when resolution
    /// yields an invalid outcome - the fetch is never attempted in that
    /// case. Fetch failures propagate from the injected fetcher.
    pub fn download_pod<F: DocumentFetcher>(
        &self,
        id: &str,
        dest: &Path,
        fetcher: &F,
    ) -> Result<()> {
        let unique_id = if id.contains('~') {
            id.to_string()
        } else {
            let outcome = self.track_by_number(id)?;
            if !outcome.valid {
                return Err(TrackError::InvalidIdentifier(id.to_string()));
            }
            outcome.unique_id
        };

        let mut segments = unique_id.split('~');
        let (qualifier, tracking_number) = match (segments.next(), segments.next()) {
            (Some(qualifier), Some(number)) if !qualifier.is_empty() && !number.is_empty() => {
                (qualifier, number)
            }
            _ => return Err(TrackError::InvalidIdentifier(unique_id)),
        };

        let url = spod_url(qualifier, tracking_number);
        log::info!("Fetching proof of delivery for {} to {:?}", tracking_number, dest);
        fetcher.fetch_and_persist(&url, dest)
    }
}
