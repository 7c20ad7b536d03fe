//! Registration service: intake, listing and admin edits.

use std::sync::Arc;

use crate::domain::{
    Page, Registration, RegistrationFilter, RegistrationId, Submission, TShirtSize, TeamId,
};
use crate::error::GatewayError;
use crate::notify::{DispatchReport, Mailer, RegistrationNotice};
use crate::persistence::{ListPage, RegistrationStore};

/// Ids assigned to a stored submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    /// Id of the first (or only) record.
    pub id: RegistrationId,
    /// Shared team id, for team submissions.
    pub team_id: Option<TeamId>,
    /// Ids of every member record in member order, for team submissions.
    pub team_ids: Option<Vec<RegistrationId>>,
    /// What happened to the two registration emails.
    pub emails: DispatchReport,
}

/// Orchestration layer for registration records.
///
/// Owns the [`RegistrationStore`] for state and the [`Mailer`] for the
/// best-effort emails that follow a successful insert.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    store: Arc<dyn RegistrationStore>,
    mailer: Arc<Mailer>,
}

impl RegistrationService {
    /// Creates a new `RegistrationService`.
    #[must_use]
    pub fn new(store: Arc<dyn RegistrationStore>, mailer: Arc<Mailer>) -> Self {
        Self { store, mailer }
    }

    /// Stores a validated submission and sends the registration emails.
    ///
    /// Email delivery never fails the call; its outcome is reported in
    /// [`RegistrationOutcome::emails`].
    ///
    /// # Errors
    ///
    /// - [`GatewayError::EmailTaken`] if a record with the contact email
    ///   already exists.
    /// - [`GatewayError::Store`] if the store is unavailable or fails.
    pub async fn register(
        &self,
        submission: Submission,
    ) -> Result<RegistrationOutcome, GatewayError> {
        let email = submission.contact_email().to_string();
        if self.store.find_by_email(&email).await?.is_some() {
            tracing::info!(email = %email, "registration rejected: email already registered");
            return Err(GatewayError::EmailTaken);
        }

        let expected = submission.record_count();
        let records = self.store.insert_many(submission.into_records()).await?;
        if records.len() != expected {
            return Err(GatewayError::Internal(format!(
                "store returned {} records, expected {expected}",
                records.len()
            )));
        }
        let Some(notice) = RegistrationNotice::from_records(&records) else {
            return Err(GatewayError::Internal("store returned no records".to_string()));
        };
        let (id, team_id, team_ids) = assigned_ids(&records)?;

        tracing::info!(
            id = %id,
            category = %notice.race_category,
            records = records.len(),
            "registration stored"
        );

        let emails = self.mailer.send_registration_emails(&notice).await;
        tracing::debug!(?emails, id = %id, "registration emails dispatched");

        Ok(RegistrationOutcome {
            id,
            team_id,
            team_ids,
            emails,
        })
    }

    /// Lists records matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Store`] if the store is unavailable or fails.
    pub async fn list(
        &self,
        filter: &RegistrationFilter,
        page: Page,
    ) -> Result<ListPage, GatewayError> {
        Ok(self.store.list(filter, page).await?)
    }

    /// Sets or clears the t-shirt size of one record.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::NotFound`] if no record has this id.
    /// - [`GatewayError::Store`] if the store is unavailable or fails.
    pub async fn update_tshirt_size(
        &self,
        id: RegistrationId,
        size: Option<TShirtSize>,
    ) -> Result<Registration, GatewayError> {
        let updated = self
            .store
            .update_tshirt_size(id, size)
            .await?
            .ok_or(GatewayError::NotFound)?;
        tracing::info!(
            id = %id,
            size = size.map_or("", TShirtSize::as_str),
            "t-shirt size updated"
        );
        Ok(updated)
    }

    /// Deletes one record.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::NotFound`] if no record has this id.
    /// - [`GatewayError::Store`] if the store is unavailable or fails.
    pub async fn delete(&self, id: RegistrationId) -> Result<(), GatewayError> {
        if !self.store.delete(id).await? {
            return Err(GatewayError::NotFound);
        }
        tracing::info!(id = %id, "registration deleted");
        Ok(())
    }
}

type AssignedIds = (RegistrationId, Option<TeamId>, Option<Vec<RegistrationId>>);

fn assigned_ids(records: &[Registration]) -> Result<AssignedIds, GatewayError> {
    let Some(first) = records.first() else {
        return Err(GatewayError::Internal("store returned no records".to_string()));
    };
    let team_id = first.details.team_id;
    let team_ids = team_id.map(|_| records.iter().map(|r| r.id).collect());
    Ok((first.id, team_id, team_ids))
}
