//! Database row models for the `registrations` table.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::StoreError;
use crate::domain::{
    NewRegistration, RaceCategory, Registration, RegistrationId, TShirtSize, TeamId,
};

/// Column list shared by every `SELECT` / `RETURNING` clause.
pub const REGISTRATION_COLUMNS: &str = "id, name, email, contact, gender, birthday, \
     race_category, affiliations, promotional, tshirt_size, team_id, team_member_index, \
     created_at, updated_at";

/// A row from the `registrations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RegistrationRow {
    /// Primary key.
    pub id: Uuid,
    /// Participant name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Phone number.
    pub contact: String,
    /// Gender.
    pub gender: String,
    /// Birthday.
    pub birthday: String,
    /// Race category display name.
    pub race_category: String,
    /// Club or team name.
    pub affiliations: String,
    /// Promotional opt-in.
    pub promotional: bool,
    /// T-shirt size label, `NULL` when cleared.
    pub tshirt_size: Option<String>,
    /// Team id for team records.
    pub team_id: Option<Uuid>,
    /// 1-based member index for team records.
    pub team_member_index: Option<i16>,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = StoreError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        let race_category: RaceCategory = row
            .race_category
            .parse()
            .map_err(|_| StoreError::Backend(format!("unknown race category in row {}", row.id)))?;
        let tshirt_size = row
            .tshirt_size
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<TShirtSize>)
            .transpose()
            .map_err(|_| StoreError::Backend(format!("unknown t-shirt size in row {}", row.id)))?;
        let team_member_index = row
            .team_member_index
            .map(u8::try_from)
            .transpose()
            .map_err(|_| StoreError::Backend(format!("bad team member index in row {}", row.id)))?;

        Ok(Self {
            id: RegistrationId::from_uuid(row.id),
            details: NewRegistration {
                name: row.name,
                email: row.email,
                contact: row.contact,
                gender: row.gender,
                birthday: row.birthday,
                race_category,
                affiliations: row.affiliations,
                promotional: row.promotional,
                tshirt_size,
                team_id: row.team_id.map(TeamId::from),
                team_member_index,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
