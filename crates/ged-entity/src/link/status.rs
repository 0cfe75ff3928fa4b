//! Link status enumeration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Whether a user–business link is in effect.
///
/// Serialized as the API's integer codes: `1` active, `0` inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinkStatus {
    /// The linked user may work in the company.
    #[default]
    Active,
    /// The link is suspended.
    Inactive,
}

impl LinkStatus {
    /// Return the API integer code.
    pub fn code(&self) -> u8 {
        match self {
            Self::Active => 1,
            Self::Inactive => 0,
        }
    }

    /// Check if the link is active.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

impl Serialize for LinkStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for LinkStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match i64::deserialize(deserializer)? {
            0 => Ok(Self::Inactive),
            _ => Ok(Self::Active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_codes() {
        assert_eq!(serde_json::to_string(&LinkStatus::Inactive).unwrap(), "0");
        let status: LinkStatus = serde_json::from_str("1").unwrap();
        assert!(status.is_active());
    }
}
