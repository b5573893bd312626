//! Request middleware and extractors.
//!
//! - [`auth`]: bearer-token authentication for the profile endpoints

pub mod auth;
