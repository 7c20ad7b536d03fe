//! Registration intake DTOs and their validation into a [`Submission`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::submission::check_email;
use crate::domain::{
    IndividualEntry, RaceCategory, RegistrationId, RequiredFields, Submission, TEAM_SIZE,
    TShirtSize, TeamEntry, TeamId, TeamMember,
};
use crate::error::GatewayError;

/// Request body for `POST /api/register`.
///
/// `raceCategory: "Team Category"` selects a team registration, which
/// needs `email`, `affiliations` and exactly four `teamMembers`. Any
/// other category is an individual registration.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Participant name (individual).
    #[serde(default)]
    pub name: Option<String>,
    /// Participant or team contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number (individual).
    #[serde(default)]
    pub contact: Option<String>,
    /// Gender (individual).
    #[serde(default)]
    pub gender: Option<String>,
    /// Birthday, `YYYY-MM-DD` (individual).
    #[serde(default)]
    pub birthday: Option<String>,
    /// Race category display name.
    #[serde(default)]
    pub race_category: Option<String>,
    /// Club or organization; the team name for teams.
    #[serde(default)]
    pub affiliations: Option<String>,
    /// Promotional email opt-in.
    #[serde(default)]
    pub promotional: Option<bool>,
    /// T-shirt size (individual).
    #[serde(default)]
    pub t_shirt_size: Option<String>,
    /// Team members (team).
    #[serde(default)]
    pub team_members: Option<Vec<TeamMemberRequest>>,
}

/// One entry of [`RegisterRequest::team_members`].
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberRequest {
    /// Member name.
    #[serde(default)]
    pub name: Option<String>,
    /// Birthday.
    #[serde(default)]
    pub birthday: Option<String>,
    /// Gender.
    #[serde(default)]
    pub gender: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub contact: Option<String>,
    /// T-shirt size.
    #[serde(default)]
    pub t_shirt_size: Option<String>,
}

/// Response body for a stored registration.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Id of the first (or only) record.
    pub id: RegistrationId,
    /// Shared team id (team registrations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    /// Ids of the four member records (team registrations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_ids: Option<Vec<RegistrationId>>,
}

impl TryFrom<RegisterRequest> for Submission {
    type Error = GatewayError;

    fn try_from(req: RegisterRequest) -> Result<Self, Self::Error> {
        let category = req
            .race_category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::parse::<RaceCategory>)
            .transpose()?;

        match category {
            Some(RaceCategory::Team) => team_submission(req),
            other => individual_submission(req, other),
        }
    }
}

fn individual_submission(
    req: RegisterRequest,
    category: Option<RaceCategory>,
) -> Result<Submission, GatewayError> {
    let mut required = RequiredFields::default();
    let name = required.take("name", req.name.as_deref());
    let email = required.take("email", req.email.as_deref());
    let contact = required.take("contact", req.contact.as_deref());
    let gender = required.take("gender", req.gender.as_deref());
    let birthday = required.take("birthday", req.birthday.as_deref());
    if category.is_none() {
        required.mark_missing("raceCategory");
    }
    let size = required.take("tShirtSize", req.t_shirt_size.as_deref());
    required.finish()?;

    let race_category = category.ok_or_else(|| {
        GatewayError::InvalidRequest("Missing required fields: raceCategory".into())
    })?;
    check_email(&email)?;

    Ok(Submission::Individual(IndividualEntry {
        name,
        email,
        contact,
        gender,
        birthday,
        race_category,
        affiliations: req.affiliations.map(|a| a.trim().to_string()).unwrap_or_default(),
        promotional: req.promotional.unwrap_or(false),
        tshirt_size: size.parse::<TShirtSize>()?,
    }))
}

fn team_submission(req: RegisterRequest) -> Result<Submission, GatewayError> {
    let mut required = RequiredFields::default();
    let email = required.take("email", req.email.as_deref());
    let affiliations = required.take("affiliations", req.affiliations.as_deref());
    required.finish()?;
    check_email(&email)?;

    let members = req.team_members.unwrap_or_default();
    if members.len() != TEAM_SIZE {
        return Err(GatewayError::InvalidRequest(format!(
            "Team registration requires exactly {TEAM_SIZE} members, got {}",
            members.len()
        )));
    }

    let members = members
        .into_iter()
        .enumerate()
        .map(|(i, member)| team_member(i + 1, member))
        .collect::<Result<Vec<_>, _>>()?;
    let members: [TeamMember; TEAM_SIZE] = members.try_into().map_err(|_| {
        GatewayError::InvalidRequest(format!(
            "Team registration requires exactly {TEAM_SIZE} members"
        ))
    })?;

    Ok(Submission::Team(TeamEntry {
        email,
        affiliations,
        promotional: req.promotional.unwrap_or(false),
        members,
    }))
}

fn team_member(position: usize, member: TeamMemberRequest) -> Result<TeamMember, GatewayError> {
    let key = |field: &str| format!("teamMembers[{position}].{field}");
    let mut required = RequiredFields::default();
    let name = required.take(key("name"), member.name.as_deref());
    let birthday = required.take(key("birthday"), member.birthday.as_deref());
    let gender = required.take(key("gender"), member.gender.as_deref());
    let contact = required.take(key("contact"), member.contact.as_deref());
    let size = required.take(key("tShirtSize"), member.t_shirt_size.as_deref());
    required.finish()?;

    Ok(TeamMember {
        name,
        birthday,
        gender,
        contact,
        tshirt_size: size.parse::<TShirtSize>()?,
    })
}
