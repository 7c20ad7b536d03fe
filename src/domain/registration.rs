//! Stored registration records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{RaceCategory, RegistrationId, TShirtSize, TeamId};

/// Participant data for a record that has not been stored yet.
///
/// The store assigns the id and timestamps when it turns a
/// `NewRegistration` into a [`Registration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRegistration {
    /// Participant name.
    pub name: String,
    /// Contact email. Shared by all four members of a team.
    pub email: String,
    /// Phone number.
    pub contact: String,
    /// Gender as entered.
    pub gender: String,
    /// Birthday as entered (`YYYY-MM-DD` from the form).
    pub birthday: String,
    /// Chosen race category.
    pub race_category: RaceCategory,
    /// Club or organization; the team name for team registrations.
    pub affiliations: String,
    /// Opted in to promotional email.
    pub promotional: bool,
    /// Race kit size, cleared by an admin edit.
    pub tshirt_size: Option<TShirtSize>,
    /// Team the record belongs to.
    pub team_id: Option<TeamId>,
    /// 1-based position within the team.
    pub team_member_index: Option<u8>,
}

/// A stored registration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Store-assigned identifier.
    pub id: RegistrationId,
    /// Participant data.
    pub details: NewRegistration,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last admin edit (equals `created_at` until then).
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// Stamps a new record with an id and the given insert time.
    #[must_use]
    pub fn stamp(details: NewRegistration, id: RegistrationId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            details,
            created_at: now,
            updated_at: now,
        }
    }
}
