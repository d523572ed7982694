// Marker Domain Model
//
// A marker is an identifying feature of a job (its id, its batch id or its
// class name) stored in a target set as "<type>:<value>".

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between marker type and value in the encoded form
pub const MARKER_SEPARATOR: char = ':';

/// Marker type (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerType {
    /// Job id, unique per job instance
    Jid,
    /// Batch id, shared by jobs of one batch
    Bid,
    /// Job class name, shared by all jobs of that type
    Class,
}

impl MarkerType {
    /// All marker types, in the order candidate markers are derived from a job
    pub const ALL: [MarkerType; 3] = [MarkerType::Jid, MarkerType::Bid, MarkerType::Class];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerType::Jid => "jid",
            MarkerType::Bid => "bid",
            MarkerType::Class => "class",
        }
    }
}

impl fmt::Display for MarkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkerType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jid" => Ok(MarkerType::Jid),
            "bid" => Ok(MarkerType::Bid),
            "class" => Ok(MarkerType::Class),
            other => Err(DomainError::InvalidMarkerType(other.to_string())),
        }
    }
}

/// A (type, value) pair identifying jobs for disposal matching
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marker {
    pub marker_type: MarkerType,
    pub value: String,
}

impl Marker {
    pub fn new(marker_type: MarkerType, value: impl Into<String>) -> Self {
        Self {
            marker_type,
            value: value.into(),
        }
    }

    /// Encode as stored in a target set: `<type>:<value>`
    ///
    /// Injective: the type never contains the separator, so the first
    /// separator always ends the type even when the value contains one.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.marker_type, MARKER_SEPARATOR, self.value)
    }

    /// Decode a stored marker, splitting on the first separator
    ///
    /// # Errors
    /// - DomainError::InvalidMarkerType if the type prefix is unknown or missing
    pub fn decode(encoded: &str) -> Result<Self> {
        let (marker_type, value) = encoded
            .split_once(MARKER_SEPARATOR)
            .ok_or_else(|| DomainError::InvalidMarkerType(encoded.to_string()))?;

        Ok(Self::new(marker_type.parse()?, value))
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.marker_type, MARKER_SEPARATOR, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uses_type_prefix() {
        assert_eq!(Marker::new(MarkerType::Jid, "abc123").encode(), "jid:abc123");
        assert_eq!(Marker::new(MarkerType::Bid, "batch42").encode(), "bid:batch42");
        assert_eq!(
            Marker::new(MarkerType::Class, "NightlyReportJob").encode(),
            "class:NightlyReportJob"
        );
    }

    #[test]
    fn test_decode_splits_on_first_separator() {
        let marker = Marker::decode("class:Reports::NightlyJob").unwrap();
        assert_eq!(marker.marker_type, MarkerType::Class);
        assert_eq!(marker.value, "Reports::NightlyJob");
    }

    #[test]
    fn test_encoding_is_injective_for_values_with_separator() {
        let a = Marker::new(MarkerType::Jid, "bid:x");
        let b = Marker::new(MarkerType::Bid, "x");
        assert_ne!(a.encode(), b.encode());
        assert_eq!(Marker::decode(&a.encode()).unwrap(), a);
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let err = Marker::decode("queue:default").unwrap_err();
        assert_eq!(err, DomainError::InvalidMarkerType("queue".to_string()));

        assert!(Marker::decode("no-separator").is_err());
    }

    #[test]
    fn test_marker_type_parsing() {
        assert_eq!("jid".parse::<MarkerType>().unwrap(), MarkerType::Jid);
        assert_eq!("bid".parse::<MarkerType>().unwrap(), MarkerType::Bid);
        assert_eq!("class".parse::<MarkerType>().unwrap(), MarkerType::Class);

        // Case-sensitive, and class_name is not an alias
        assert!("JID".parse::<MarkerType>().is_err());
        assert!("class_name".parse::<MarkerType>().is_err());
    }
}
