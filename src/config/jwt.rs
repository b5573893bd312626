use std::env;

/// Session token signing key and lifetimes.
///
/// Lifetimes are expressed in hours. `remember_me_hours` applies when a
/// login asks for a long-lived session.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub session_hours: i64,
    pub remember_me_hours: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let hours = |var: &str, default: i64| {
            env::var(var)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        };

        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "taskdesk-dev-secret-change-me".to_string()),
            session_hours: hours("JWT_SESSION_HOURS", 8),
            remember_me_hours: hours("JWT_REMEMBER_ME_HOURS", 168), // 7 days
        }
    }
}
