//! Event normalization
//!
//! Derives the shipped/delivered booleans, ship and delivery dates, and the
//! single latest event from one carrier result block. One pass over the
//! events in the order the carrier sent them, no sorting.

use crate::types::{EventKind, Result, ResultBlock, TimestampedEvent, TrackError, TrackingOutcome};

/// Normalize one result block into a valid `TrackingOutcome`
///
/// The event sequence must be non-empty; an empty block is a contract
/// violation by the caller and fails with [`TrackError::EmptyEvents`].
///
/// Derivation rules, applied in input order:
/// - SHIP sets `is_shipped` and `ship_date`; the last SHIP wins.
/// - ACTUAL_DELIVERY sets `is_delivered` and `delivery_date`, and takes
///   precedence over any ESTIMATED_DELIVERY no matter where either appears
///   in the sequence.
/// - ESTIMATED_DELIVERY sets `delivery_date` only while no actual delivery
///   has been seen; a later estimate overwrites an earlier one.
/// - The latest event is the one with the maximum timestamp; on equal
///   timestamps the earliest-positioned event is kept (strict `>`
///   comparison), which callers rely on as a stable tie-break.
pub fn normalize(block: ResultBlock) -> Result<TrackingOutcome> {
    if block.events.is_empty() {
        return Err(TrackError::EmptyEvents);
    }

    let mut shipped = false;
    let mut delivered = false;
    let mut ship_date = None;
    let mut delivery_date = None;
    let mut latest: Option<TimestampedEvent> = None;

    for event in &block.events {
        match event.kind {
            EventKind::Ship => {
                shipped = true;
                ship_date = Some(event.timestamp);
            }
            EventKind::ActualDelivery => {
                delivered = true;
                delivery_date = Some(event.timestamp);
            }
            EventKind::EstimatedDelivery if !delivered => {
                delivery_date = Some(event.timestamp);
            }
            _ => {}
        }

        // Strict `>` keeps the first-seen event on timestamp ties.
        match latest {
            Some(current) if event.timestamp <= current.timestamp => {}
            _ => latest = Some(*event),
        }
    }

    log::debug!(
        "Normalized {} events for {}: shipped={}, delivered={}",
        block.events.len(),
        block.tracking_number,
        shipped,
        delivered
    );

    Ok(TrackingOutcome {
        valid: true,
        tracking_number: block.tracking_number,
        unique_id: block.unique_id,
        carrier_code: block.carrier_code,
        is_shipped: shipped,
        is_delivered: delivered,
        ship_date,
        delivery_date,
        latest_event: latest,
        events: block.events,
        package: block.package,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn block(events: Vec<TimestampedEvent>) -> ResultBlock {
        ResultBlock {
            tracking_number: "794843185271".to_string(),
            unique_id: "2460395000~794843185271~FX".to_string(),
            carrier_code: "FDXE".to_string(),
            events,
            package: None,
        }
    }

    #[test]
    fn test_empty_events_is_malformed_payload() {
        let err = normalize(block(vec![])).unwrap_err();
        assert!(matches!(err, TrackError::EmptyEvents));
    }

    #[test]
    fn test_ship_and_actual_delivery_derivation() {
        let outcome = normalize(block(vec![
            TimestampedEvent::new(ts("2022-02-01T08:00:00+00:00"), EventKind::Ship),
            TimestampedEvent::new(ts("2022-02-05T14:30:00+00:00"), EventKind::ActualDelivery),
        ]))
        .unwrap();

        assert!(outcome.valid);
        assert!(outcome.is_shipped);
        assert!(outcome.is_delivered);
        assert_eq!(outcome.ship_date, Some(ts("2022-02-01T08:00:00+00:00")));
        assert_eq!(outcome.delivery_date, Some(ts("2022-02-05T14:30:00+00:00")));
        assert_eq!(outcome.latest_event.unwrap().kind, EventKind::ActualDelivery);
    }

    #[test]
    fn test_latest_event_tie_break_keeps_first_seen() {
        // Two events share the maximum timestamp; the earlier-positioned one
        // must win because the comparison is strictly greater-than.
        let outcome = normalize(block(vec![
            TimestampedEvent::new(ts("2022-03-05T00:00:00+00:00"), EventKind::Commitment),
            TimestampedEvent::new(ts("2022-03-09T00:00:00+00:00"), EventKind::Ship),
            TimestampedEvent::new(ts("2022-03-09T00:00:00+00:00"), EventKind::ActualDelivery),
        ]))
        .unwrap();

        let latest = outcome.latest_event.unwrap();
        assert_eq!(latest.kind, EventKind::Ship);
        assert_eq!(latest.timestamp, ts("2022-03-09T00:00:00+00:00"));
    }

    #[test]
    fn test_actual_delivery_beats_later_estimate() {
        let outcome = normalize(block(vec![
            TimestampedEvent::new(ts("2022-04-02T10:00:00+00:00"), EventKind::ActualDelivery),
            TimestampedEvent::new(ts("2022-04-03T10:00:00+00:00"), EventKind::EstimatedDelivery),
        ]))
        .unwrap();

        assert!(outcome.is_delivered);
        assert_eq!(outcome.delivery_date, Some(ts("2022-04-02T10:00:00+00:00")));
    }

    #[test]
    fn test_actual_delivery_beats_earlier_estimate() {
        let outcome = normalize(block(vec![
            TimestampedEvent::new(ts("2022-04-03T10:00:00+00:00"), EventKind::EstimatedDelivery),
            TimestampedEvent::new(ts("2022-04-02T10:00:00+00:00"), EventKind::ActualDelivery),
        ]))
        .unwrap();

        assert!(outcome.is_delivered);
        assert_eq!(outcome.delivery_date, Some(ts("2022-04-02T10:00:00+00:00")));
    }

    #[test]
    fn test_estimate_only_is_not_delivered() {
        let outcome = normalize(block(vec![
            TimestampedEvent::new(ts("2022-05-01T00:00:00+00:00"), EventKind::Ship),
            TimestampedEvent::new(ts("2022-05-04T12:00:00+00:00"), EventKind::EstimatedDelivery),
        ]))
        .unwrap();

        assert!(!outcome.is_delivered);
        assert_eq!(outcome.delivery_date, Some(ts("2022-05-04T12:00:00+00:00")));
    }

    #[test]
    fn test_later_estimate_overwrites_earlier() {
        let outcome = normalize(block(vec![
            TimestampedEvent::new(ts("2022-05-04T12:00:00+00:00"), EventKind::EstimatedDelivery),
            TimestampedEvent::new(ts("2022-05-06T12:00:00+00:00"), EventKind::EstimatedDelivery),
        ]))
        .unwrap();

        assert_eq!(outcome.delivery_date, Some(ts("2022-05-06T12:00:00+00:00")));
    }

    #[test]
    fn test_last_ship_event_wins() {
        let outcome = normalize(block(vec![
            TimestampedEvent::new(ts("2022-06-01T00:00:00+00:00"), EventKind::Ship),
            TimestampedEvent::new(ts("2022-06-02T00:00:00+00:00"), EventKind::Ship),
        ]))
        .unwrap();

        assert_eq!(outcome.ship_date, Some(ts("2022-06-02T00:00:00+00:00")));
    }

    #[test]
    fn test_events_preserved_in_input_order() {
        // Input is deliberately not chronological; the outcome must keep it
        // verbatim, duplicates included.
        let events = vec![
            TimestampedEvent::new(ts("2022-07-09T00:00:00+00:00"), EventKind::Commitment),
            TimestampedEvent::new(ts("2022-07-01T00:00:00+00:00"), EventKind::Ship),
            TimestampedEvent::new(ts("2022-07-01T00:00:00+00:00"), EventKind::Ship),
        ];
        let outcome = normalize(block(events.clone())).unwrap();

        assert_eq!(outcome.events, events);
        assert_eq!(outcome.latest_event.unwrap().kind, EventKind::Commitment);
    }

    #[test]
    fn test_non_derivation_kinds_still_drive_latest() {
        let outcome = normalize(block(vec![
            TimestampedEvent::new(ts("2022-08-01T00:00:00+00:00"), EventKind::Ship),
            TimestampedEvent::new(ts("2022-08-09T00:00:00+00:00"), EventKind::Commitment),
        ]))
        .unwrap();

        assert_eq!(outcome.latest_event.unwrap().kind, EventKind::Commitment);
    }

    #[test]
    fn test_latest_honors_timezone_offsets() {
        // 10:00+02:00 is 08:00Z; 09:30Z is later in absolute terms.
        let outcome = normalize(block(vec![
            TimestampedEvent::new(ts("2022-09-01T10:00:00+02:00"), EventKind::Ship),
            TimestampedEvent::new(ts("2022-09-01T09:30:00+00:00"), EventKind::Commitment),
        ]))
        .unwrap();

        assert_eq!(outcome.latest_event.unwrap().kind, EventKind::Commitment);
    }
}
