use std::sync::Arc;

use anyhow::anyhow;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::config::jwt::JwtConfig;
use crate::modules::accounts::model::NewAccount;
use crate::modules::accounts::repo::AccountStore;
use crate::utils::code::generate_code;
use crate::utils::email::{Mailer, send_confirmation_code, send_reset_code};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_session_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{
    ConfirmEmailRequest, EmailResponse, ForgotPasswordRequest, LoginRequest,
    RegisterRequestDto, ResendConfirmationRequest, ResetPasswordRequest, TokenResponse,
    VerifyResetCodeRequest,
};

/// How long an emailed confirmation or reset code stays redeemable.
const CODE_TTL_MINUTES: i64 = 15;

// Lookup, password and code failures all collapse into two fixed messages so
// responses never reveal whether an account exists or why a code was refused.
fn invalid_credentials() -> AppError {
    AppError::unauthorized(anyhow!("invalid login or password"))
}

fn invalid_code() -> AppError {
    AppError::unauthorized(anyhow!("invalid or expired code"))
}

pub struct AuthService;

impl AuthService {
    /// Creates the account unconfirmed and emails the first confirmation
    /// code. Duplicate login/email surfaces as a 409 from the store.
    #[instrument(skip(db, mailer, dto), fields(login = %dto.login, email = %dto.email))]
    pub async fn register(
        db: &PgPool,
        mailer: &Arc<dyn Mailer>,
        dto: RegisterRequestDto,
    ) -> Result<(), AppError> {
        let code = generate_code()?;
        let password_hash = hash_password(&dto.password)?;
        let expires_at = Utc::now() + Duration::minutes(CODE_TTL_MINUTES);

        let account_id = AccountStore::create_account(
            db,
            NewAccount {
                login: &dto.login,
                email: &dto.email,
                first_name: &dto.first_name,
                last_name: &dto.last_name,
                patronymic: dto.patronymic.as_deref(),
                position: dto.position.as_deref(),
                password_hash: &password_hash,
                confirmation_code: &code,
                code_expires_at: expires_at,
            },
        )
        .await?;

        send_confirmation_code(mailer, &dto.email, &code).await?;

        info!(account_id, "account registered, confirmation code sent");
        Ok(())
    }

    /// Redeems a confirmation code. Wrong code, expired code, unknown email
    /// and already-confirmed account are indistinguishable to the caller.
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn confirm_email(db: &PgPool, dto: ConfirmEmailRequest) -> Result<(), AppError> {
        let confirmed = AccountStore::redeem_confirmation_code(db, &dto.email, &dto.code).await?;

        if !confirmed {
            return Err(invalid_code());
        }

        Ok(())
    }

    /// Issues a fresh confirmation code after re-authenticating the caller.
    /// The new code replaces the previous one.
    #[instrument(skip(db, mailer, dto), fields(login_email = %dto.login_email))]
    pub async fn resend_confirmation_code(
        db: &PgPool,
        mailer: &Arc<dyn Mailer>,
        dto: ResendConfirmationRequest,
    ) -> Result<(), AppError> {
        let creds = AccountStore::find_credentials(db, &dto.login_email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&dto.password, &creds.password) {
            return Err(invalid_credentials());
        }

        let code = generate_code()?;
        let expires_at = Utc::now() + Duration::minutes(CODE_TTL_MINUTES);

        let issued =
            AccountStore::issue_confirmation_code(db, creds.id, &code, expires_at).await?;
        if !issued {
            return Err(invalid_credentials());
        }

        send_confirmation_code(mailer, &creds.email, &code).await?;

        Ok(())
    }

    /// Verifies the password and confirmation state, then signs a session
    /// token. `remember_me` stretches the lifetime from 8 hours to 7 days.
    #[instrument(skip(db, dto, jwt_config), fields(login_email = %dto.login_email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let password_hash = AccountStore::find_password_hash(db, &dto.login_email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&dto.password, &password_hash) {
            return Err(invalid_credentials());
        }

        let (account_id, is_confirmed) =
            AccountStore::get_account_for_login(db, &dto.login_email, &password_hash)
                .await?
                .ok_or_else(invalid_credentials)?;

        if !is_confirmed {
            return Err(AppError::forbidden(anyhow!("email address not confirmed")));
        }

        let lifetime_hours = if dto.remember_me {
            jwt_config.remember_me_hours
        } else {
            jwt_config.session_hours
        };

        let token = create_session_token(account_id, lifetime_hours, jwt_config)?;

        Ok(TokenResponse { token })
    }

    /// Issues a reset code to the account's email address and returns that
    /// address so the client can show where the code went.
    #[instrument(skip(db, mailer, dto), fields(login_email = %dto.login_email))]
    pub async fn forgot_password(
        db: &PgPool,
        mailer: &Arc<dyn Mailer>,
        dto: ForgotPasswordRequest,
    ) -> Result<EmailResponse, AppError> {
        let email = AccountStore::find_account_email(db, &dto.login_email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let code = generate_code()?;
        let expires_at = Utc::now() + Duration::minutes(CODE_TTL_MINUTES);

        let issued = AccountStore::issue_reset_code(db, &email, &code, expires_at).await?;
        if !issued {
            return Err(invalid_credentials());
        }

        send_reset_code(mailer, &email, &code).await?;

        info!("password reset code issued");
        Ok(EmailResponse { email })
    }

    /// Checks a reset code without consuming it.
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn verify_reset_code(
        db: &PgPool,
        dto: VerifyResetCodeRequest,
    ) -> Result<(), AppError> {
        let valid = AccountStore::check_reset_code(db, &dto.email, &dto.code).await?;

        if !valid {
            return Err(invalid_code());
        }

        Ok(())
    }

    /// Consumes the reset code and installs the new password in one guarded
    /// statement; a second submission of the same code fails.
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn reset_password(db: &PgPool, dto: ResetPasswordRequest) -> Result<(), AppError> {
        let password_hash = hash_password(&dto.new_password)?;

        let reset =
            AccountStore::redeem_reset_code(db, &dto.email, &dto.code, &password_hash).await?;

        if !reset {
            return Err(invalid_code());
        }

        info!("password reset completed");
        Ok(())
    }
}
