//! The company/tenant scope a principal is acting within.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::CompanyId;
use crate::error::AppError;

/// Wire form of the principal's personal space.
pub const OWN_SCOPE: &str = "own";

/// Either the principal's own space or a linked company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompanyScope {
    /// The principal's personal space (full, unscoped access).
    #[default]
    Own,
    /// A linked company.
    Company(CompanyId),
}

impl CompanyScope {
    /// The company id when scoped to a company.
    pub fn company_id(&self) -> Option<CompanyId> {
        match self {
            Self::Own => None,
            Self::Company(id) => Some(*id),
        }
    }

    /// Whether this is the personal space.
    pub fn is_own(&self) -> bool {
        matches!(self, Self::Own)
    }
}

impl fmt::Display for CompanyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Own => write!(f, "{OWN_SCOPE}"),
            Self::Company(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for CompanyScope {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(OWN_SCOPE) {
            return Ok(Self::Own);
        }
        s.parse::<CompanyId>().map(Self::Company).map_err(|_| {
            AppError::validation(format!(
                "Invalid company scope: '{s}'. Expected '{OWN_SCOPE}' or a company id"
            ))
        })
    }
}

impl Serialize for CompanyScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CompanyScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(|id| Self::Company(CompanyId(id)))
                .ok_or_else(|| serde::de::Error::custom("company id out of range")),
            serde_json::Value::String(s) => s.parse().map_err(serde::de::Error::custom),
            other => Err(serde::de::Error::custom(format!(
                "invalid company scope: {other}"
            ))),
        }
    }
}
