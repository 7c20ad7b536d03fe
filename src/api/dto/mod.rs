//! Data Transfer Objects for REST request/response serialization.
//!
//! Request bodies keep every field optional so that a missing field is
//! reported as a validation error with the field's name instead of a
//! generic deserialization failure. All bodies use camelCase keys.

pub mod auth_dto;
pub mod common_dto;
pub mod partner_dto;
pub mod registration_dto;
pub mod user_dto;

pub use auth_dto::*;
pub use common_dto::*;
pub use partner_dto::*;
pub use registration_dto::*;
pub use user_dto::*;
