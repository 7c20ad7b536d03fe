//! Validated registration submissions.
//!
//! A raw request body is turned into a [`Submission`] at the HTTP
//! boundary. Everything past that point works with trimmed, non-blank
//! fields and a team that has exactly [`TEAM_SIZE`] members.

use super::{NewRegistration, RaceCategory, TShirtSize, TeamId};
use crate::error::GatewayError;

/// Number of members in a team registration.
pub const TEAM_SIZE: usize = 4;

/// A registration request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// One participant.
    Individual(IndividualEntry),
    /// Four participants registered under one team id.
    Team(TeamEntry),
}

/// A single-participant registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndividualEntry {
    /// Participant name.
    pub name: String,
    /// Participant email.
    pub email: String,
    /// Phone number.
    pub contact: String,
    /// Gender.
    pub gender: String,
    /// Birthday.
    pub birthday: String,
    /// Any category except [`RaceCategory::Team`].
    pub race_category: RaceCategory,
    /// Club or organization, possibly empty.
    pub affiliations: String,
    /// Promotional email opt-in.
    pub promotional: bool,
    /// Race kit size.
    pub tshirt_size: TShirtSize,
}

/// A team-of-four registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntry {
    /// Contact email shared by every member record.
    pub email: String,
    /// Team or club name. Required for teams.
    pub affiliations: String,
    /// Promotional email opt-in.
    pub promotional: bool,
    /// Members in submission order.
    pub members: [TeamMember; TEAM_SIZE],
}

/// One member of a [`TeamEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    /// Member name.
    pub name: String,
    /// Birthday.
    pub birthday: String,
    /// Gender.
    pub gender: String,
    /// Phone number.
    pub contact: String,
    /// Race kit size.
    pub tshirt_size: TShirtSize,
}

impl Submission {
    /// Email used for the duplicate check and the confirmation email.
    #[must_use]
    pub fn contact_email(&self) -> &str {
        match self {
            Self::Individual(entry) => &entry.email,
            Self::Team(team) => &team.email,
        }
    }

    /// Number of records this submission will create.
    #[must_use]
    pub const fn record_count(&self) -> usize {
        match self {
            Self::Individual(_) => 1,
            Self::Team(_) => TEAM_SIZE,
        }
    }

    /// Expands the submission into unsaved records.
    ///
    /// Team submissions get a freshly generated [`TeamId`] and member
    /// indices `1..=4` in submission order.
    #[must_use]
    pub fn into_records(self) -> Vec<NewRegistration> {
        match self {
            Self::Individual(entry) => vec![NewRegistration {
                name: entry.name,
                email: entry.email,
                contact: entry.contact,
                gender: entry.gender,
                birthday: entry.birthday,
                race_category: entry.race_category,
                affiliations: entry.affiliations,
                promotional: entry.promotional,
                tshirt_size: Some(entry.tshirt_size),
                team_id: None,
                team_member_index: None,
            }],
            Self::Team(team) => {
                let team_id = TeamId::new();
                let TeamEntry {
                    email,
                    affiliations,
                    promotional,
                    members,
                } = team;
                (1u8..)
                    .zip(members)
                    .map(|(index, member)| NewRegistration {
                        name: member.name,
                        email: email.clone(),
                        contact: member.contact,
                        gender: member.gender,
                        birthday: member.birthday,
                        race_category: RaceCategory::Team,
                        affiliations: affiliations.clone(),
                        promotional,
                        tshirt_size: Some(member.tshirt_size),
                        team_id: Some(team_id),
                        team_member_index: Some(index),
                    })
                    .collect()
            }
        }
    }
}

/// Collects the names of required fields that are absent or blank.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<String>,
}

impl RequiredFields {
    /// Returns the trimmed value of a required field, recording `key` as
    /// missing (and returning an empty string) when it is absent or blank.
    pub fn take(&mut self, key: impl Into<String>, value: Option<&str>) -> String {
        non_blank(value).unwrap_or_else(|| {
            self.missing.push(key.into());
            String::new()
        })
    }

    /// Records `key` as missing.
    pub fn mark_missing(&mut self, key: impl Into<String>) {
        self.missing.push(key.into());
    }

    /// Fails with every missing field named in one message.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] when any field is missing.
    pub fn finish(self) -> Result<(), GatewayError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(GatewayError::InvalidRequest(format!(
                "Missing required fields: {}",
                self.missing.join(", ")
            )))
        }
    }
}

/// Returns the trimmed value, or `None` when absent or blank.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Checks the minimal `local@domain` shape of an email address.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when the address has no `@`
/// or an empty local or domain part.
pub fn check_email(email: &str) -> Result<(), GatewayError> {
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(GatewayError::InvalidRequest(format!(
            "Invalid email address: {email}"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn member(name: &str, size: TShirtSize) -> TeamMember {
        TeamMember {
            name: name.to_string(),
            birthday: "1990-05-05".to_string(),
            gender: "Female".to_string(),
            contact: "0917".to_string(),
            tshirt_size: size,
        }
    }

    #[test]
    fn individual_expands_to_one_record() {
        let submission = Submission::Individual(IndividualEntry {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            contact: "123".to_string(),
            gender: "Male".to_string(),
            birthday: "2000-01-01".to_string(),
            race_category: RaceCategory::Individual,
            affiliations: String::new(),
            promotional: false,
            tshirt_size: TShirtSize::M,
        });
        assert_eq!(submission.record_count(), 1);

        let records = submission.into_records();
        assert_eq!(records.len(), 1);
        let Some(record) = records.first() else {
            panic!("expected one record");
        };
        assert_eq!(record.team_id, None);
        assert_eq!(record.tshirt_size, Some(TShirtSize::M));
    }

    #[test]
    fn team_expands_to_four_indexed_records() {
        let submission = Submission::Team(TeamEntry {
            email: "team@x.com".to_string(),
            affiliations: "Road Runners".to_string(),
            promotional: true,
            members: [
                member("One", TShirtSize::S),
                member("Two", TShirtSize::M),
                member("Three", TShirtSize::L),
                member("Four", TShirtSize::Xl),
            ],
        });
        let records = submission.into_records();
        assert_eq!(records.len(), TEAM_SIZE);

        let indices: Vec<_> = records.iter().filter_map(|r| r.team_member_index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);

        let Some(team_id) = records.first().and_then(|r| r.team_id) else {
            panic!("team records carry a team id");
        };
        assert!(records.iter().all(|r| r.team_id == Some(team_id)));
        assert!(records.iter().all(|r| r.email == "team@x.com"));
        assert!(records.iter().all(|r| r.race_category == RaceCategory::Team));
    }

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some("  A  ")).as_deref(), Some("A"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn required_fields_lists_every_missing_key() {
        let mut required = RequiredFields::default();
        let name = required.take("name", Some(" A "));
        let _ = required.take("email", None);
        let _ = required.take("contact", Some(""));
        assert_eq!(name, "A");

        let Err(GatewayError::InvalidRequest(message)) = required.finish() else {
            panic!("expected a validation error");
        };
        assert_eq!(message, "Missing required fields: email, contact");
        assert!(RequiredFields::default().finish().is_ok());
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(check_email("a@x.com").is_ok());
        assert!(check_email("ax.com").is_err());
        assert!(check_email("@x.com").is_err());
        assert!(check_email("a@").is_err());
        assert!(check_email("a@b@c").is_err());
    }
}
