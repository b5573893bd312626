//! Account data models and DTOs.
//!
//! # Core Types
//!
//! - [`Account`] - account entity as exposed through the profile API
//! - [`NewAccount`] - parameters for inserting an account with its first
//!   confirmation code
//!
//! # Request DTOs
//!
//! - [`UpdateProfileDto`] - full profile replacement for the signed-in account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// An account in the system.
///
/// The stored bcrypt digest and code slots are never part of this struct;
/// they stay inside the store layer.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Account {
    pub id: i64,
    pub login: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: Option<String>,
    pub position: Option<String>,
    pub is_confirmed: bool,
}

/// Insert parameters for a new account.
///
/// Carries the already-hashed password and the initial confirmation code so
/// the account row and its code slot land in one transaction.
#[derive(Debug)]
pub struct NewAccount<'a> {
    pub login: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub patronymic: Option<&'a str>,
    pub position: Option<&'a str>,
    pub password_hash: &'a str,
    pub confirmation_code: &'a str,
    pub code_expires_at: DateTime<Utc>,
}

/// DTO for updating the signed-in account's profile.
///
/// Covers only the mutable profile fields; login and email are fixed at
/// registration. `patronymic` and `position` may be cleared by sending null.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 2, max = 25))]
    pub first_name: String,
    #[validate(length(min = 2, max = 25))]
    pub last_name: String,
    #[validate(length(min = 2, max = 25))]
    pub patronymic: Option<String>,
    #[validate(length(min = 2, max = 50))]
    pub position: Option<String>,
}
