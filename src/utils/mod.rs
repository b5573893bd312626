//! Shared utilities for the Taskdesk API.
//!
//! - [`code`]: six-digit confirmation/reset code generation
//! - [`email`]: outbound mail seam and SMTP implementation
//! - [`errors`]: application error type and HTTP mapping
//! - [`jwt`]: session token creation and verification
//! - [`password`]: password hashing and verification

pub mod code;
pub mod email;
pub mod errors;
pub mod jwt;
pub mod password;
