//! Raw carrier response decoding
//!
//! Turns the JSON payload handed over by the transport into typed result
//! blocks. Two failure modes are kept strictly apart:
//! - a payload missing its expected substructure is *unusable* - the query
//!   outcome is simply invalid, which callers handle by branching;
//! - a payload carrying an event or packaging tag this crate does not know
//!   is *schema drift* - a hard fault, because silently skipping the tag
//!   would corrupt the shipped/delivered/date derivation.

use crate::types::{EventKind, PackageInfo, Result, ResultBlock, TimestampedEvent, TrackError};
use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

/// Outcome of decoding one raw tracking response
#[derive(Debug)]
pub(crate) enum DecodedResponse {
    /// Every result block carried events and decoded cleanly
    Blocks(Vec<ResultBlock>),
    /// The payload lacked the expected substructure; the query outcome is
    /// invalid but this is expected data, not a fault
    Unusable,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    output: Option<RawOutput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOutput {
    #[serde(default)]
    complete_track_results: Vec<RawCompleteTrackResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompleteTrackResult {
    #[serde(default)]
    track_results: Vec<RawTrackResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrackResult {
    tracking_number_info: RawTrackingNumberInfo,
    #[serde(default)]
    date_and_times: Option<Vec<RawDateAndTime>>,
    #[serde(default)]
    package_details: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrackingNumberInfo {
    tracking_number: String,
    tracking_number_unique_id: String,
    carrier_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDateAndTime {
    #[serde(rename = "type")]
    kind: String,
    date_time: String,
}

// Carrier payloads are inconsistent about this substructure, so it is decoded
// leniently and validated field by field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPackageDetails {
    physical_packaging_type: Option<String>,
    count: Option<Value>,
}

/// Decode a raw tracking response into result blocks
///
/// Returns `Unusable` when the payload cannot answer the query: no `output`
/// mapping, no result blocks at all, or any block missing (or carrying an
/// empty) `dateAndTimes` list. Unknown tags and unparseable timestamps fail
/// hard instead.
pub(crate) fn decode_response(raw: Value) -> Result<DecodedResponse> {
    let response: RawResponse = match serde_json::from_value(raw) {
        Ok(response) => response,
        Err(err) => {
            log::debug!("Tracking payload did not match expected shape: {}", err);
            return Ok(DecodedResponse::Unusable);
        }
    };

    let output = match response.output {
        Some(output) => output,
        None => return Ok(DecodedResponse::Unusable),
    };

    let mut blocks = Vec::new();
    for complete in output.complete_track_results {
        for result in complete.track_results {
            let raw_events = match result.date_and_times {
                Some(events) if !events.is_empty() => events,
                // No events for this block means the carrier payload cannot
                // support latest-event resolution for the whole query.
                _ => return Ok(DecodedResponse::Unusable),
            };

            let mut events = Vec::with_capacity(raw_events.len());
            for raw_event in raw_events {
                let kind: EventKind = raw_event.kind.parse()?;
                let timestamp = DateTime::parse_from_rfc3339(&raw_event.date_time)
                    .map_err(|e| TrackError::Timestamp(format!("{:?}: {}", raw_event.date_time, e)))?;
                events.push(TimestampedEvent::new(timestamp, kind));
            }

            blocks.push(ResultBlock {
                tracking_number: result.tracking_number_info.tracking_number,
                unique_id: result.tracking_number_info.tracking_number_unique_id,
                carrier_code: result.tracking_number_info.carrier_code,
                events,
                package: decode_package(result.package_details)?,
            });
        }
    }

    if blocks.is_empty() {
        return Ok(DecodedResponse::Unusable);
    }
    Ok(DecodedResponse::Blocks(blocks))
}

/// Best-effort decode of the packaging substructure
///
/// Absent or shape-mismatched details yield `None` without failing the
/// block. A well-shaped detail carrying an unknown packaging tag is schema
/// drift and fails hard, same contract as event kinds.
fn decode_package(details: Option<Value>) -> Result<Option<PackageInfo>> {
    let details = match details {
        Some(details) => details,
        None => return Ok(None),
    };

    let details: RawPackageDetails = match serde_json::from_value(details) {
        Ok(details) => details,
        Err(err) => {
            log::debug!("Ignoring misshapen packageDetails: {}", err);
            return Ok(None);
        }
    };

    let tag = match details.physical_packaging_type {
        Some(tag) => tag,
        None => return Ok(None),
    };
    let package_type = tag.parse()?;

    // The count arrives as a number or a numeric string depending on the
    // endpoint; anything non-positive is treated as absent.
    let count = details.count.as_ref().and_then(|value| match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    });

    match count {
        Some(count) if count > 0 => Ok(Some(PackageInfo {
            package_type,
            count: count as u32,
        })),
        _ => Ok(None),
    }
}
