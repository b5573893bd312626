//! Configuration for the Taskdesk API.
//!
//! Each submodule owns one aspect of configuration, loaded from environment
//! variables with development-friendly defaults:
//!
//! - [`cors`]: allowed browser origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`email`]: SMTP settings for confirmation and reset code delivery
//! - [`jwt`]: session token signing key and lifetimes

pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
