//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::notify::Mailer;
use crate::persistence::RegistrationStore;
use crate::service::{PartnerService, RegistrationService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration loaded at startup.
    pub config: Arc<AppConfig>,
    /// Registration intake and admin operations.
    pub registrations: Arc<RegistrationService>,
    /// Partner inquiry forwarding.
    pub partners: Arc<PartnerService>,
}

impl AppState {
    /// Wires the services over a store and a mailer.
    #[must_use]
    pub fn new(config: AppConfig, store: Arc<dyn RegistrationStore>, mailer: Mailer) -> Self {
        let mailer = Arc::new(mailer);
        Self {
            config: Arc::new(config),
            registrations: Arc::new(RegistrationService::new(store, Arc::clone(&mailer))),
            partners: Arc::new(PartnerService::new(mailer)),
        }
    }
}
