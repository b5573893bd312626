use std::fmt::Debug;
use std::sync::Arc;

use anyhow::anyhow;
use lettre::message::{SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::config::email::EmailConfig;
use crate::utils::errors::AppError;

/// Outbound mail seam.
///
/// The production implementation speaks SMTP; tests substitute a recording
/// mock so code delivery can be asserted without a mail server.
pub trait Mailer: Send + Sync + Debug {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}

#[derive(Debug)]
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        if !self.config.enabled {
            info!(to, subject, "email delivery disabled, skipping send");
            return Ok(());
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal(anyhow!("invalid from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::internal(anyhow!("invalid recipient address: {}", e)))?)
            .subject(subject)
            .singlepart(
                SinglePart::builder()
                    .header(header::ContentType::TEXT_PLAIN)
                    .body(body.to_string()),
            )
            .map_err(|e| AppError::internal(anyhow!("failed to build email: {}", e)))?;

        let transport = if self.config.username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.host)
                .port(self.config.port)
                .build()
        } else {
            let creds =
                Credentials::new(self.config.username.clone(), self.config.password.clone());

            SmtpTransport::relay(&self.config.host)
                .map_err(|e| AppError::internal(anyhow!("failed to create SMTP relay: {}", e)))?
                .port(self.config.port)
                .credentials(creds)
                .build()
        };

        transport
            .send(&email)
            .map_err(|e| AppError::internal(anyhow!("failed to send email: {}", e)))?;

        Ok(())
    }
}

pub async fn send_confirmation_code(
    mailer: &Arc<dyn Mailer>,
    to_email: &str,
    code: &str,
) -> Result<(), AppError> {
    let body = format!(
        "Your Taskdesk confirmation code is: {}\n\n\
         The code expires in 15 minutes.\n\n\
         If you didn't create a Taskdesk account, please ignore this email.\n\n\
         Best regards,\n\
         Taskdesk Team",
        code
    );

    send_blocking(mailer, to_email, "Confirm your email", body).await
}

pub async fn send_reset_code(
    mailer: &Arc<dyn Mailer>,
    to_email: &str,
    code: &str,
) -> Result<(), AppError> {
    let body = format!(
        "Your Taskdesk password reset code is: {}\n\n\
         The code expires in 15 minutes.\n\n\
         If you didn't request a password reset, please ignore this email.\n\n\
         Best regards,\n\
         Taskdesk Team",
        code
    );

    send_blocking(mailer, to_email, "Password reset code", body).await
}

// SMTP transports in lettre's sync API block the thread, so sends run on the
// blocking pool.
async fn send_blocking(
    mailer: &Arc<dyn Mailer>,
    to_email: &str,
    subject: &'static str,
    body: String,
) -> Result<(), AppError> {
    let mailer = Arc::clone(mailer);
    let to = to_email.to_string();

    tokio::task::spawn_blocking(move || mailer.send(&to, subject, &body))
        .await
        .map_err(|e| AppError::internal(anyhow!("task join error: {}", e)))?
}
