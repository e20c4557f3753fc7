//! Core types for the tracking client library
//!
//! This module defines the vocabulary the client emits when answering a tracking
//! query: event kinds, packaging kinds, timestamped events and the final
//! `TrackingOutcome`. The enumerations are closed - parsing a tag the carrier
//! introduced after this crate was built is a hard `TrackError`, never a silent
//! coercion, so schema drift in the upstream API is detectable.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamp type used throughout the client
///
/// The carrier reports event times as ISO-8601 with a UTC offset, so the
/// offset is preserved rather than normalized away.
pub type Timestamp = DateTime<FixedOffset>;

/// Result type for tracking operations
pub type Result<T> = std::result::Result<T, TrackError>;

/// Errors that can occur while querying and decoding tracking data
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// The carrier reported an event type this crate does not know (schema drift)
    #[error("Unknown event kind tag: {0:?}")]
    UnknownEventKind(String),

    /// The carrier reported a packaging type this crate does not know (schema drift)
    #[error("Unknown package type tag: {0:?}")]
    UnknownPackageType(String),

    /// An event timestamp could not be parsed as ISO-8601 with offset
    #[error("Invalid event timestamp: {0}")]
    Timestamp(String),

    /// The normalizer was handed a result block with no events
    #[error("Malformed payload: result block contains no events")]
    EmptyEvents,

    /// The resolver was handed zero normalized results
    #[error("No tracking results to resolve")]
    NoResults,

    /// A proof-of-delivery identifier could not be resolved to qualifier~number
    #[error("Invalid identifier for document retrieval: {0}")]
    InvalidIdentifier(String),

    /// The transport collaborator failed at the HTTP level
    #[error("Transport error: {0}")]
    Transport(String),

    /// Authentication against the carrier API failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Document download failed
    #[error("Download error: {0}")]
    Download(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Closed enumeration of carrier event semantics
///
/// Values are opaque tags; enumeration order does NOT imply chronology -
/// only event timestamps order events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    ActualDelivery,
    ActualPickup,
    ActualTender,
    AnticipatedTender,
    AppointmentDelivery,
    AttemptedDelivery,
    Commitment,
    EstimatedArrivalAtGateway,
    EstimatedDelivery,
    EstimatedPickup,
    EstimatedReturnToStation,
    Ship,
    ShipmentDataReceived,
}

impl EventKind {
    /// The carrier's wire tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ActualDelivery => "ACTUAL_DELIVERY",
            EventKind::ActualPickup => "ACTUAL_PICKUP",
            EventKind::ActualTender => "ACTUAL_TENDER",
            EventKind::AnticipatedTender => "ANTICIPATED_TENDER",
            EventKind::AppointmentDelivery => "APPOINTMENT_DELIVERY",
            EventKind::AttemptedDelivery => "ATTEMPTED_DELIVERY",
            EventKind::Commitment => "COMMITMENT",
            EventKind::EstimatedArrivalAtGateway => "ESTIMATED_ARRIVAL_AT_GATEWAY",
            EventKind::EstimatedDelivery => "ESTIMATED_DELIVERY",
            EventKind::EstimatedPickup => "ESTIMATED_PICKUP",
            EventKind::EstimatedReturnToStation => "ESTIMATED_RETURN_TO_STATION",
            EventKind::Ship => "SHIP",
            EventKind::ShipmentDataReceived => "SHIPMENT_DATA_RECEIVED",
        }
    }
}

impl FromStr for EventKind {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ACTUAL_DELIVERY" => Ok(EventKind::ActualDelivery),
            "ACTUAL_PICKUP" => Ok(EventKind::ActualPickup),
            "ACTUAL_TENDER" => Ok(EventKind::ActualTender),
            "ANTICIPATED_TENDER" => Ok(EventKind::AnticipatedTender),
            "APPOINTMENT_DELIVERY" => Ok(EventKind::AppointmentDelivery),
            "ATTEMPTED_DELIVERY" => Ok(EventKind::AttemptedDelivery),
            "COMMITMENT" => Ok(EventKind::Commitment),
            "ESTIMATED_ARRIVAL_AT_GATEWAY" => Ok(EventKind::EstimatedArrivalAtGateway),
            "ESTIMATED_DELIVERY" => Ok(EventKind::EstimatedDelivery),
            "ESTIMATED_PICKUP" => Ok(EventKind::EstimatedPickup),
            "ESTIMATED_RETURN_TO_STATION" => Ok(EventKind::EstimatedReturnToStation),
            "SHIP" => Ok(EventKind::Ship),
            "SHIPMENT_DATA_RECEIVED" => Ok(EventKind::ShipmentDataReceived),
            other => Err(TrackError::UnknownEventKind(other.to_string())),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed enumeration of physical packaging types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageType {
    Bag,
    Barrel,
    Basket,
    Box,
    Bucket,
    Bundle,
    Cage,
    Carton,
    Case,
    Chest,
    Container,
    Crate,
    Cylinder,
    Drum,
    Envelope,
    Hamper,
    Other,
    Package,
    Pail,
    Pallet,
    Parcel,
    Piece,
    Reel,
    Roll,
    Sack,
    ShrinkWrapped,
    Skid,
    Tank,
    ToteBin,
    Tube,
    Unit,
}

impl PackageType {
    /// The carrier's wire tag for this packaging type
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Bag => "BAG",
            PackageType::Barrel => "BARREL",
            PackageType::Basket => "BASKET",
            PackageType::Box => "BOX",
            PackageType::Bucket => "BUCKET",
            PackageType::Bundle => "BUNDLE",
            PackageType::Cage => "CAGE",
            PackageType::Carton => "CARTON",
            PackageType::Case => "CASE",
            PackageType::Chest => "CHEST",
            PackageType::Container => "CONTAINER",
            PackageType::Crate => "CRATE",
            PackageType::Cylinder => "CYLINDER",
            PackageType::Drum => "DRUM",
            PackageType::Envelope => "ENVELOPE",
            PackageType::Hamper => "HAMPER",
            PackageType::Other => "OTHER",
            PackageType::Package => "PACKAGE",
            PackageType::Pail => "PAIL",
            PackageType::Pallet => "PALLET",
            PackageType::Parcel => "PARCEL",
            PackageType::Piece => "PIECE",
            PackageType::Reel => "REEL",
            PackageType::Roll => "ROLL",
            PackageType::Sack => "SACK",
            PackageType::ShrinkWrapped => "SHRINK_WRAPPED",
            PackageType::Skid => "SKID",
            PackageType::Tank => "TANK",
            PackageType::ToteBin => "TOTE_BIN",
            PackageType::Tube => "TUBE",
            PackageType::Unit => "UNIT",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BAG" => Ok(PackageType::Bag),
            "BARREL" => Ok(PackageType::Barrel),
            "BASKET" => Ok(PackageType::Basket),
            "BOX" => Ok(PackageType::Box),
            "BUCKET" => Ok(PackageType::Bucket),
            "BUNDLE" => Ok(PackageType::Bundle),
            "CAGE" => Ok(PackageType::Cage),
            "CARTON" => Ok(PackageType::Carton),
            "CASE" => Ok(PackageType::Case),
            "CHEST" => Ok(PackageType::Chest),
            "CONTAINER" => Ok(PackageType::Container),
            "CRATE" => Ok(PackageType::Crate),
            "CYLINDER" => Ok(PackageType::Cylinder),
            "DRUM" => Ok(PackageType::Drum),
            "ENVELOPE" => Ok(PackageType::Envelope),
            "HAMPER" => Ok(PackageType::Hamper),
            "OTHER" => Ok(PackageType::Other),
            "PACKAGE" => Ok(PackageType::Package),
            "PAIL" => Ok(PackageType::Pail),
            "PALLET" => Ok(PackageType::Pallet),
            "PARCEL" => Ok(PackageType::Parcel),
            "PIECE" => Ok(PackageType::Piece),
            "REEL" => Ok(PackageType::Reel),
            "ROLL" => Ok(PackageType::Roll),
            "SACK" => Ok(PackageType::Sack),
            "SHRINK_WRAPPED" => Ok(PackageType::ShrinkWrapped),
            "SKID" => Ok(PackageType::Skid),
            "TANK" => Ok(PackageType::Tank),
            "TOTE_BIN" => Ok(PackageType::ToteBin),
            "TUBE" => Ok(PackageType::Tube),
            "UNIT" => Ok(PackageType::Unit),
            other => Err(TrackError::UnknownPackageType(other.to_string())),
        }
    }
}

/// A single timestamped milestone in a shipment's life
///
/// No identity beyond its fields; duplicates in a carrier payload are
/// preserved verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampedEvent {
    /// When the event occurred (or is estimated to occur)
    pub timestamp: Timestamp,
    /// What the event means
    pub kind: EventKind,
}

impl TimestampedEvent {
    pub fn new(timestamp: Timestamp, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }
}

impl fmt::Display for TimestampedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.timestamp.to_rfc3339())
    }
}

/// Physical packaging details for a shipment
///
/// The carrier populates this inconsistently, so callers must treat it as
/// best-effort optional data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Kind of packaging (box, pallet, drum, ...)
    pub package_type: PackageType,
    /// Number of physical pieces, always positive
    pub count: u32,
}

/// One carrier-returned group of identifiers and events, before normalization
///
/// A single tracking-number query may produce several of these (multi-piece
/// or reissued shipments).
#[derive(Debug, Clone, PartialEq)]
pub struct ResultBlock {
    /// Tracking number echoed from the query
    pub tracking_number: String,
    /// Carrier-assigned unique id in `qualifier~number` form
    pub unique_id: String,
    /// Carrier code (e.g. "FDXE")
    pub carrier_code: String,
    /// Events in the order the carrier returned them
    pub events: Vec<TimestampedEvent>,
    /// Best-effort packaging details
    pub package: Option<PackageInfo>,
}

/// The normalized, immutable answer to one tracking query
///
/// Constructed once per query response. When `valid` is false the query
/// failed or the payload was unusable and no other field is trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingOutcome {
    /// False means the query failed or the payload was unusable
    pub valid: bool,
    /// Tracking number echoed from the query
    pub tracking_number: String,
    /// Carrier-assigned unique id in `qualifier~number` form
    pub unique_id: String,
    /// Carrier code (e.g. "FDXE")
    pub carrier_code: String,
    /// True if a SHIP event was seen
    pub is_shipped: bool,
    /// True if an ACTUAL_DELIVERY event was seen
    pub is_delivered: bool,
    /// Timestamp of the SHIP event, if present
    pub ship_date: Option<Timestamp>,
    /// ACTUAL_DELIVERY timestamp if delivered, else the most recent
    /// ESTIMATED_DELIVERY if present
    pub delivery_date: Option<Timestamp>,
    /// The chronologically latest event among `events`
    pub latest_event: Option<TimestampedEvent>,
    /// All events, in the order the carrier returned them (not necessarily
    /// chronological, not deduplicated)
    pub events: Vec<TimestampedEvent>,
    /// Physical packaging details, when the carrier supplied them
    pub package: Option<PackageInfo>,
}

impl TrackingOutcome {
    /// An invalid outcome - the expected, recoverable answer to a bad
    /// tracking number, a carrier-side logical error, or a payload missing
    /// its events substructure
    pub fn invalid() -> Self {
        Self {
            valid: false,
            tracking_number: String::new(),
            unique_id: String::new(),
            carrier_code: String::new(),
            is_shipped: false,
            is_delivered: false,
            ship_date: None,
            delivery_date: None,
            latest_event: None,
            events: Vec::new(),
            package: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_round_trip() {
        let kinds = [
            EventKind::ActualDelivery,
            EventKind::Commitment,
            EventKind::Ship,
            EventKind::EstimatedArrivalAtGateway,
        ];
        for kind in kinds {
            assert_eq!(kind.as_str().parse::<EventKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_event_kind_is_schema_drift() {
        let err = "TELEPORTED".parse::<EventKind>().unwrap_err();
        assert!(matches!(err, TrackError::UnknownEventKind(tag) if tag == "TELEPORTED"));
    }

    #[test]
    fn test_unknown_package_type_is_schema_drift() {
        let err = "HOVERBOARD".parse::<PackageType>().unwrap_err();
        assert!(matches!(err, TrackError::UnknownPackageType(tag) if tag == "HOVERBOARD"));
    }

    #[test]
    fn test_package_type_parsing() {
        assert_eq!("PALLET".parse::<PackageType>().unwrap(), PackageType::Pallet);
        assert_eq!(
            "SHRINK_WRAPPED".parse::<PackageType>().unwrap(),
            PackageType::ShrinkWrapped
        );
        assert_eq!("TOTE_BIN".parse::<PackageType>().unwrap(), PackageType::ToteBin);
    }

    #[test]
    fn test_package_type_round_trip() {
        let types = [
            PackageType::Box,
            PackageType::ShrinkWrapped,
            PackageType::ToteBin,
            PackageType::Other,
        ];
        for package_type in types {
            assert_eq!(
                package_type.as_str().parse::<PackageType>().unwrap(),
                package_type
            );
        }
    }

    #[test]
    fn test_package_type_display_matches_wire_tag() {
        assert_eq!(format!("{}", PackageType::ShrinkWrapped), "SHRINK_WRAPPED");
        assert_eq!(format!("{}", PackageType::Pallet), "PALLET");
        assert_eq!(format!("{}", PackageType::ToteBin), "TOTE_BIN");
    }

    #[test]
    fn test_invalid_outcome_has_no_trusted_fields() {
        let outcome = TrackingOutcome::invalid();
        assert!(!outcome.valid);
        assert!(outcome.events.is_empty());
        assert!(outcome.latest_event.is_none());
        assert!(outcome.package.is_none());
    }

    #[test]
    fn test_event_kind_display_matches_wire_tag() {
        assert_eq!(format!("{}", EventKind::ActualDelivery), "ACTUAL_DELIVERY");
        assert_eq!(format!("{}", EventKind::Ship), "SHIP");
    }
}
