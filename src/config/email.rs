use std::env;

/// SMTP settings for outbound mail.
///
/// With `SMTP_ENABLED` unset the mailer logs and drops messages instead of
/// connecting anywhere. The host/port defaults point at a local Mailpit
/// instance.
#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
}

impl EmailConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("SMTP_ENABLED")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        let port = env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1025);

        Self {
            enabled,
            host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port,
            username: env::var("SMTP_USERNAME").unwrap_or_default(),
            password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_email: env::var("SMTP_FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@taskdesk.dev".to_string()),
            from_name: env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "Taskdesk".to_string()),
        }
    }
}
