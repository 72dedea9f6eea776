// ── Record identity ──
//
// Every mutable fixture record (alerts, reports) is keyed by a small
// positive integer assigned by the store. Serialized as a bare number
// under the `Id` key, matching the fixture wire shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Integer identifier for an alert or report.
///
/// Assigned as `max(existing) + 1` at creation time, `1` for an empty
/// collection. Never changes once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u32);

impl RecordId {
    /// The Id handed out when a collection is empty.
    pub const FIRST: Self = Self(1);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// The Id following this one, or `None` on overflow.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u32> for RecordId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_strings() {
        let id: RecordId = " 42 ".parse().unwrap();
        assert_eq!(id, RecordId::new(42));
    }

    #[test]
    fn rejects_non_numeric() {
        assert!("abc".parse::<RecordId>().is_err());
        assert!("-1".parse::<RecordId>().is_err());
    }

    #[test]
    fn next_stops_at_overflow() {
        assert_eq!(RecordId::new(7).next(), Some(RecordId::new(8)));
        assert_eq!(RecordId::new(u32::MAX).next(), None);
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&RecordId::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}
