//! Domain layer: registration records, submissions, and listing filters.
//!
//! This module contains the server-side model: typed identifiers, the
//! enumerated race categories and t-shirt sizes, the validated
//! [`Submission`] union produced at the HTTP boundary, stored
//! [`Registration`] records, and the admin [`RegistrationFilter`].

pub mod filter;
pub mod race_category;
pub mod registration;
pub mod registration_id;
pub mod submission;
pub mod tshirt_size;

pub use filter::{Page, RegistrationFilter};
pub use race_category::RaceCategory;
pub use registration::{NewRegistration, Registration};
pub use registration_id::{RegistrationId, TeamId};
pub use submission::{
    IndividualEntry, RequiredFields, Submission, TEAM_SIZE, TeamEntry, TeamMember,
};
pub use tshirt_size::TShirtSize;
