//! Admin dashboard DTOs: listing, t-shirt edits, deletion, config.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::filter::{end_of_day, start_of_day};
use crate::domain::submission::non_blank;
use crate::domain::{Page, Registration, RegistrationFilter, RegistrationId, TeamId};
use crate::error::GatewayError;

/// Query parameters of `GET /api/users` and `GET /api/users/export`.
///
/// Blank values are ignored.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Case-insensitive substring of the email.
    pub email: Option<String>,
    /// Exact gender.
    pub gender: Option<String>,
    /// Exact race category.
    pub race_category: Option<String>,
    /// Case-insensitive substring of the club/organization.
    pub club: Option<String>,
    /// Earliest registration day (`YYYY-MM-DD`, inclusive).
    pub date_from: Option<String>,
    /// Latest registration day (`YYYY-MM-DD`, inclusive).
    pub date_to: Option<String>,
    /// Page number (1-indexed). Defaults to 1.
    pub page: Option<u32>,
    /// Items per page (max 10000). Defaults to 20.
    pub limit: Option<u32>,
}

impl ListUsersQuery {
    /// Converts the query into a store filter and a clamped page.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] on an unparseable date.
    pub fn to_criteria(&self) -> Result<(RegistrationFilter, Page), GatewayError> {
        let created_from = non_blank(self.date_from.as_deref())
            .map(|d| start_of_day(&d))
            .transpose()?;
        let created_to = non_blank(self.date_to.as_deref())
            .map(|d| end_of_day(&d))
            .transpose()?;

        let filter = RegistrationFilter {
            name: non_blank(self.name.as_deref()),
            email: non_blank(self.email.as_deref()),
            gender: non_blank(self.gender.as_deref()),
            race_category: non_blank(self.race_category.as_deref()),
            club: non_blank(self.club.as_deref()),
            created_from,
            created_to,
        };
        let page = Page::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(Page::DEFAULT_LIMIT),
        );
        Ok((filter, page))
    }
}

/// A registration record as shown on the dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Record id.
    pub id: RegistrationId,
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
    /// Club or organization.
    pub affiliations: String,
    /// Promotional email opt-in.
    pub promotional: bool,
    /// T-shirt size, empty when cleared.
    pub t_shirt_size: String,
    /// Shared team id (team records).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    /// 1-based member position (team records).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_member_index: Option<u8>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

impl From<Registration> for UserDto {
    fn from(record: Registration) -> Self {
        let d = record.details;
        Self {
            id: record.id,
            name: d.name,
            email: d.email,
            contact: d.contact,
            gender: d.gender,
            birthday: d.birthday,
            race_category: d.race_category.as_str().to_string(),
            affiliations: d.affiliations,
            promotional: d.promotional,
            t_shirt_size: d.tshirt_size.map(|s| s.as_str().to_string()).unwrap_or_default(),
            team_id: d.team_id,
            team_member_index: d.team_member_index,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Response body of `GET /api/users`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    /// Records on this page, newest first.
    pub users: Vec<UserDto>,
    /// Number of records on this page.
    pub count: usize,
    /// Number of matching records across all pages.
    pub total: u64,
    /// Current page.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Number of pages (at least 1).
    pub total_pages: u64,
}

/// Request body of `PATCH /api/users/{id}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// New size (`XS`..`XXL`); empty or `null` clears it.
    #[serde(default)]
    pub t_shirt_size: Option<String>,
}

/// Response body of `PATCH /api/users/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserResponse {
    /// Always `true`.
    pub success: bool,
    /// Stored size, empty when cleared.
    pub t_shirt_size: String,
}

/// Request body of `DELETE /api/users/delete`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRequest {
    /// Id of the record to delete.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response body of `GET /api/users/config`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminConfigResponse {
    /// Whether `DELETE /api/users/delete` is enabled.
    pub delete_user_enabled: bool,
}
