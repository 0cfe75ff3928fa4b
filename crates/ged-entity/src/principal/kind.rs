//! Account kind enumeration.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use tracing::warn;

/// The kind of account a principal (or a company scope) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccountKind {
    /// A natural person (`pf`).
    #[serde(rename = "pf")]
    Individual,
    /// A legal entity (`pj`).
    #[serde(rename = "pj")]
    Organization,
    /// A freelancer, possibly linked to several companies.
    #[serde(rename = "freelancer")]
    Freelancer,
}

impl AccountKind {
    /// Return the API wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "pf",
            Self::Organization => "pj",
            Self::Freelancer => "freelancer",
        }
    }

    /// Strictly recognise one of the known spellings.
    pub fn recognise(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pf" | "pessoa física" | "pessoa fisica" => Some(Self::Individual),
            "pj" | "pessoa jurídica" | "pessoa juridica" => Some(Self::Organization),
            "freelancer" | "free lancer" => Some(Self::Freelancer),
            _ => None,
        }
    }

    /// Normalise any spelling the API or old sessions used.
    ///
    /// Unrecognised values fall back to [`AccountKind::Freelancer`].
    pub fn normalize(raw: &str) -> Self {
        Self::recognise(raw).unwrap_or_else(|| {
            warn!(value = raw, "Unrecognised account kind, using freelancer");
            Self::Freelancer
        })
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = ged_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::recognise(s).ok_or_else(|| {
            ged_core::AppError::validation(format!(
                "Invalid account kind: '{s}'. Expected one of: pf, pj, freelancer"
            ))
        })
    }
}

impl<'de> Deserialize<'de> for AccountKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::normalize(&raw))
    }
}
