//! # race-registration
//!
//! HTTP backend for the Speed Series race registration site.
//!
//! Runners register individually or as a team of four; each submission is
//! stored, answered with a pending-payment confirmation email, and
//! announced to the operations inbox. Organizers log into a small admin
//! API to list, filter, export and correct registrations. Partner
//! inquiries from the marketing site are forwarded by email.
//!
//! ## Architecture
//!
//! ```text
//! Clients (registration form, admin dashboard)
//!     │
//!     ├── REST Handlers + AdminSession (api/)
//!     │
//!     ├── RegistrationService, PartnerService (service/)
//!     │       │
//!     │       ├── Mailer → SMTP confirmation, email API notification (notify/)
//!     │       │
//!     │       └── RegistrationStore → PostgreSQL or memory (persistence/)
//!     │
//!     └── Submission, RegistrationFilter, Page (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod notify;
pub mod persistence;
pub mod service;
