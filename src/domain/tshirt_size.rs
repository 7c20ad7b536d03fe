//! T-shirt sizes for race kits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GatewayError;

/// Race kit t-shirt size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TShirtSize {
    /// Extra small.
    Xs,
    /// Small.
    S,
    /// Medium.
    M,
    /// Large.
    L,
    /// Extra large.
    Xl,
    /// Double extra large.
    Xxl,
}

impl TShirtSize {
    /// Every size, smallest first.
    pub const ALL: [Self; 6] = [Self::Xs, Self::S, Self::M, Self::L, Self::Xl, Self::Xxl];

    /// Returns the size label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
            Self::Xxl => "XXL",
        }
    }

    /// Parses an admin edit value: a size label, or blank to clear.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for any other value.
    pub fn parse_optional(raw: &str) -> Result<Option<Self>, GatewayError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some)
    }

    fn allowed_labels() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl fmt::Display for TShirtSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TShirtSize {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| {
                GatewayError::InvalidRequest(format!(
                    "Invalid T-shirt size. Use one of: {}, or empty to clear",
                    Self::allowed_labels()
                ))
            })
    }
}
