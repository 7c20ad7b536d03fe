//! Race categories offered at registration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GatewayError;

/// Race category chosen by a registrant.
///
/// [`RaceCategory::Team`] selects the team-of-four registration flow;
/// every other category registers a single participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RaceCategory {
    /// Junior runners.
    #[serde(rename = "Youth Category")]
    Youth,
    /// Open individual entry.
    #[serde(rename = "Individual")]
    Individual,
    /// Four runners registered together under one team id.
    #[serde(rename = "Team Category")]
    Team,
    /// Competitive athletes.
    #[serde(rename = "Athletes Category")]
    Athletes,
    /// Invited advocates and influencers.
    #[serde(rename = "Advocate / Influencer")]
    Advocate,
    /// Supporters.
    #[serde(rename = "Patron")]
    Patron,
}

impl RaceCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 6] = [
        Self::Youth,
        Self::Individual,
        Self::Team,
        Self::Athletes,
        Self::Advocate,
        Self::Patron,
    ];

    /// Returns the display name stored with each record.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Youth => "Youth Category",
            Self::Individual => "Individual",
            Self::Team => "Team Category",
            Self::Athletes => "Athletes Category",
            Self::Advocate => "Advocate / Influencer",
            Self::Patron => "Patron",
        }
    }

    /// Returns `true` for the team-of-four category.
    #[must_use]
    pub const fn is_team(self) -> bool {
        matches!(self, Self::Team)
    }
}

impl fmt::Display for RaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RaceCategory {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| GatewayError::InvalidRequest(format!("Unknown race category: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_round_trip() {
        for category in RaceCategory::ALL {
            assert_eq!(category.as_str().parse::<RaceCategory>().ok(), Some(category));
        }
    }

    #[test]
    fn only_team_category_is_team() {
        let teams: Vec<_> = RaceCategory::ALL.into_iter().filter(|c| c.is_team()).collect();
        assert_eq!(teams, vec![RaceCategory::Team]);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("Marathon".parse::<RaceCategory>().is_err());
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&RaceCategory::Advocate).ok();
        assert_eq!(json.as_deref(), Some("\"Advocate / Influencer\""));
    }
}
