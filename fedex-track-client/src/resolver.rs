//! Multi-result resolution
//!
//! A carrier may answer one tracking-number query with several result blocks
//! (multi-piece shipments, reissued numbers). Callers asking "what is the
//! status" want one answer: the leg with the most recent activity.

use crate::types::{Result, TrackError, TrackingOutcome};

/// Pick the authoritative outcome from one query's normalized results
///
/// Returns the outcome whose latest event has the maximum timestamp. The
/// comparison is strictly greater-than, so on ties the first-seen outcome
/// wins - the same tie-break the normalizer applies to events. An empty
/// input is a contract violation and fails with [`TrackError::NoResults`].
pub fn resolve(outcomes: Vec<TrackingOutcome>) -> Result<TrackingOutcome> {
    let mut best: Option<TrackingOutcome> = None;

    for outcome in outcomes {
        let supersedes = match (&best, outcome.latest_event) {
            (None, _) => true,
            (Some(current), Some(candidate)) => current
                .latest_event
                .map_or(true, |held| candidate.timestamp > held.timestamp),
            (Some(_), None) => false,
        };
        if supersedes {
            best = Some(outcome);
        }
    }

    best.ok_or(TrackError::NoResults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EventKind, TimestampedEvent, Timestamp};

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn outcome_with_latest(tracking_number: &str, latest: &str) -> TrackingOutcome {
        let event = TimestampedEvent::new(ts(latest), EventKind::Commitment);
        TrackingOutcome {
            valid: true,
            tracking_number: tracking_number.to_string(),
            unique_id: format!("245~{}~FX", tracking_number),
            carrier_code: "FDXE".to_string(),
            is_shipped: true,
            is_delivered: false,
            ship_date: None,
            delivery_date: None,
            latest_event: Some(event),
            events: vec![event],
            package: None,
        }
    }

    #[test]
    fn test_resolves_most_recent_leg() {
        let picked = resolve(vec![
            outcome_with_latest("A", "2022-01-01T00:00:00+00:00"),
            outcome_with_latest("B", "2022-01-03T00:00:00+00:00"),
            outcome_with_latest("C", "2022-01-02T00:00:00+00:00"),
        ])
        .unwrap();

        assert_eq!(picked.tracking_number, "B");
    }

    #[test]
    fn test_empty_input_is_no_results() {
        let err = resolve(vec![]).unwrap_err();
        assert!(matches!(err, TrackError::NoResults));
    }

    #[test]
    fn test_single_result_passes_through() {
        let picked = resolve(vec![outcome_with_latest("A", "2022-01-01T00:00:00+00:00")]).unwrap();
        assert_eq!(picked.tracking_number, "A");
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let picked = resolve(vec![
            outcome_with_latest("A", "2022-01-03T00:00:00+00:00"),
            outcome_with_latest("B", "2022-01-03T00:00:00+00:00"),
        ])
        .unwrap();

        assert_eq!(picked.tracking_number, "A");
    }
}
