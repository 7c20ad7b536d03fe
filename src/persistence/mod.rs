//! Persistence layer: the registration store.
//!
//! [`RegistrationStore`] is the seam between the service layer and
//! storage. [`postgres::PostgresStore`] keeps records in PostgreSQL via
//! `sqlx::PgPool`; [`memory::MemoryStore`] keeps them in process memory
//! for tests and for running with persistence switched off.
//!
//! The store does not enforce email uniqueness. The registration service
//! checks for an existing email before inserting, and two concurrent
//! submissions with the same email can both pass that check.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{
    NewRegistration, Page, Registration, RegistrationFilter, RegistrationId, TShirtSize,
};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store is not configured or cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// One page of listing results plus the unpaginated match count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Records on the requested page, newest first.
    pub records: Vec<Registration>,
    /// Number of records matching the filter across all pages.
    pub total: u64,
}

/// Durable storage for registration records.
#[async_trait]
pub trait RegistrationStore: Send + Sync + std::fmt::Debug {
    /// Returns any record with exactly this email.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, StoreError>;

    /// Inserts all records atomically, assigning ids and a shared
    /// creation timestamp. Returned records keep the input order.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure; nothing is stored.
    async fn insert_many(
        &self,
        records: Vec<NewRegistration>,
    ) -> Result<Vec<Registration>, StoreError>;

    /// Lists matching records, newest first (team members in index
    /// order within one submission).
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn list(&self, filter: &RegistrationFilter, page: Page)
    -> Result<ListPage, StoreError>;

    /// Sets or clears the t-shirt size and bumps `updated_at`.
    /// Returns `None` when no record has this id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn update_tshirt_size(
        &self,
        id: RegistrationId,
        size: Option<TShirtSize>,
    ) -> Result<Option<Registration>, StoreError>;

    /// Deletes a record. Returns `false` when no record has this id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn delete(&self, id: RegistrationId) -> Result<bool, StoreError>;
}
