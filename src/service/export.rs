//! CSV export of registration listings.

use chrono::NaiveDate;

use crate::domain::Registration;
use crate::error::GatewayError;

/// Column headers of the export, in order.
pub const EXPORT_HEADERS: [&str; 12] = [
    "Name",
    "Email",
    "Contact",
    "Gender",
    "Birthday",
    "Race Category",
    "T-shirt Size",
    "Club/Organization",
    "Team ID",
    "Team Member #",
    "Promotional Emails",
    "Registration Date",
];

/// Download filename for an export taken on `date`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("registered-users-{}.csv", date.format("%Y-%m-%d"))
}

/// Renders records as CSV with a header row.
///
/// # Errors
///
/// Returns [`GatewayError::Internal`] if the writer fails.
pub fn registrations_csv(records: &[Registration]) -> Result<Vec<u8>, GatewayError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS).map_err(csv_error)?;

    for record in records {
        let d = &record.details;
        let team_id = d.team_id.map(|t| t.to_string()).unwrap_or_default();
        let member = d.team_member_index.map(|i| i.to_string()).unwrap_or_default();
        let created = record.created_at.format("%m/%d/%Y %H:%M").to_string();
        writer
            .write_record([
                d.name.as_str(),
                d.email.as_str(),
                d.contact.as_str(),
                d.gender.as_str(),
                d.birthday.as_str(),
                d.race_category.as_str(),
                d.tshirt_size.map_or("", |s| s.as_str()),
                d.affiliations.as_str(),
                team_id.as_str(),
                member.as_str(),
                if d.promotional { "Yes" } else { "No" },
                created.as_str(),
            ])
            .map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|err| GatewayError::Internal(format!("csv flush failed: {err}")))
}

fn csv_error(err: csv::Error) -> GatewayError {
    GatewayError::Internal(format!("csv write failed: {err}"))
}
