//! Newtype wrappers around the API's numeric identifiers.
//!
//! Using distinct types prevents accidentally passing a `UserId` where a
//! `NodeId` is expected. The API and the persisted session emit ids either
//! as JSON numbers or as numeric strings, so deserialization accepts both.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericOrString {
    Number(i64),
    Text(String),
}

/// Deserialize an `i64` written either as a number or as a numeric string.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumericOrString::deserialize(deserializer)? {
        NumericOrString::Number(n) => Ok(n),
        NumericOrString::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid numeric id: '{s}'"))),
    }
}

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Return the inner numeric value.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserialize_lenient_i64(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a user account (individual, organization, or freelancer).
    UserId
);

define_id!(
    /// Identifier of a company/business scope.
    CompanyId
);

define_id!(
    /// Identifier of a file or folder.
    NodeId
);

define_id!(
    /// Identifier of a collaborator account.
    CollaboratorId
);

define_id!(
    /// Identifier of a user–business link.
    LinkId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_number_and_string() {
        let a: NodeId = serde_json::from_str("42").unwrap();
        let b: NodeId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_str::<NodeId>("\"abc\"").is_err());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&UserId(9)).unwrap(), "9");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(" 12 ".parse::<CompanyId>().unwrap(), CompanyId(12));
        assert!("own".parse::<CompanyId>().is_err());
    }
}
