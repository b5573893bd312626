//! SQL access for accounts and their credential code slots.
//!
//! Every statement that consumes a code or flips account state is a single
//! guarded UPDATE, so concurrent submissions of the same code can produce at
//! most one winner. Duplicate login/email detection relies on the unique
//! constraints from the migration, not on pre-checks.

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::accounts::model::{Account, NewAccount, UpdateProfileDto};
use crate::utils::errors::AppError;

/// Credentials needed to re-authenticate an account during the
/// resend-confirmation flow.
#[derive(Debug, sqlx::FromRow)]
pub struct AccountCredentials {
    pub id: i64,
    pub email: String,
    pub password: String,
}

/// Maps unique-constraint violations to 409 responses naming the offending
/// field; everything else stays a server error.
fn map_unique_violation(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("accounts_login_key") => {
                    AppError::conflict(anyhow!("login is already taken"))
                }
                Some("accounts_email_key") => {
                    AppError::conflict(anyhow!("email is already registered"))
                }
                _ => AppError::conflict(anyhow!("duplicate value")),
            };
        }
    }

    AppError::database(err)
}

pub struct AccountStore;

impl AccountStore {
    /// Inserts the account row and its code slot in one transaction and
    /// returns the new account id.
    #[instrument(skip(db, new), fields(login = new.login, email = new.email))]
    pub async fn create_account(db: &PgPool, new: NewAccount<'_>) -> Result<i64, AppError> {
        let mut tx = db.begin().await?;

        let (account_id,): (i64,) = sqlx::query_as(
            "INSERT INTO accounts (login, email, first_name, last_name, patronymic, position, password)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(new.login)
        .bind(new.email)
        .bind(new.first_name)
        .bind(new.last_name)
        .bind(new.patronymic)
        .bind(new.position)
        .bind(new.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        sqlx::query(
            "INSERT INTO account_codes (account_id, confirmation_code, confirmation_expires_at)
             VALUES ($1, $2, $3)",
        )
        .bind(account_id)
        .bind(new.confirmation_code)
        .bind(new.code_expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(account_id)
    }

    /// Looks up the stored password digest by login or email.
    #[instrument(skip(db))]
    pub async fn find_password_hash(
        db: &PgPool,
        login_or_email: &str,
    ) -> Result<Option<String>, AppError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT password FROM accounts WHERE login = $1 OR email = $1")
                .bind(login_or_email)
                .fetch_optional(db)
                .await?;

        Ok(row.map(|(hash,)| hash))
    }

    /// Resolves the email address behind a login or email identifier.
    #[instrument(skip(db))]
    pub async fn find_account_email(
        db: &PgPool,
        login_or_email: &str,
    ) -> Result<Option<String>, AppError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT email FROM accounts WHERE login = $1 OR email = $1")
                .bind(login_or_email)
                .fetch_optional(db)
                .await?;

        Ok(row.map(|(email,)| email))
    }

    /// Fetches id, email and password digest in one read for flows that
    /// re-authenticate before acting.
    #[instrument(skip(db))]
    pub async fn find_credentials(
        db: &PgPool,
        login_or_email: &str,
    ) -> Result<Option<AccountCredentials>, AppError> {
        let creds = sqlx::query_as::<_, AccountCredentials>(
            "SELECT id, email, password FROM accounts WHERE login = $1 OR email = $1",
        )
        .bind(login_or_email)
        .fetch_optional(db)
        .await?;

        Ok(creds)
    }

    /// Overwrites the confirmation code slot for one account.
    #[instrument(skip(db, code))]
    pub async fn issue_confirmation_code(
        db: &PgPool,
        account_id: i64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE account_codes
             SET confirmation_code = $2, confirmation_expires_at = $3
             WHERE account_id = $1",
        )
        .bind(account_id)
        .bind(code)
        .bind(expires_at)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Confirms the account if the code matches, is not expired and the
    /// account is still unconfirmed. The `is_confirmed = FALSE` guard makes
    /// the statement single-use under concurrent submissions.
    #[instrument(skip(db, code))]
    pub async fn redeem_confirmation_code(
        db: &PgPool,
        email: &str,
        code: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE accounts a
             SET is_confirmed = TRUE
             FROM account_codes c
             WHERE c.account_id = a.id
               AND a.email = $1
               AND c.confirmation_code = $2
               AND c.confirmation_expires_at > NOW()
               AND a.is_confirmed = FALSE",
        )
        .bind(email)
        .bind(code)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Writes a fresh reset code into the account's slot.
    #[instrument(skip(db, code))]
    pub async fn issue_reset_code(
        db: &PgPool,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE account_codes c
             SET reset_code = $2, reset_expires_at = $3
             FROM accounts a
             WHERE a.id = c.account_id AND a.email = $1",
        )
        .bind(email)
        .bind(code)
        .bind(expires_at)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Non-consuming check that a live reset code exists for this email.
    #[instrument(skip(db, code))]
    pub async fn check_reset_code(db: &PgPool, email: &str, code: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                 SELECT 1
                 FROM accounts a
                 JOIN account_codes c ON c.account_id = a.id
                 WHERE a.email = $1
                   AND c.reset_code = $2
                   AND c.reset_expires_at > NOW()
             )",
        )
        .bind(email)
        .bind(code)
        .fetch_one(db)
        .await?;

        Ok(exists)
    }

    /// Consumes a live reset code and installs the new password digest in one
    /// statement. The CTE nulls the code while updating the password, so a
    /// concurrent redeemer re-evaluating the row after this commit finds no
    /// matching code and affects zero rows.
    #[instrument(skip(db, code, password_hash))]
    pub async fn redeem_reset_code(
        db: &PgPool,
        email: &str,
        code: &str,
        password_hash: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "WITH consumed AS (
                 UPDATE account_codes c
                 SET reset_code = NULL, reset_expires_at = NOW()
                 FROM accounts a
                 WHERE a.id = c.account_id
                   AND a.email = $1
                   AND c.reset_code = $2
                   AND c.reset_expires_at > NOW()
                 RETURNING c.account_id
             )
             UPDATE accounts
             SET password = $3
             WHERE id IN (SELECT account_id FROM consumed)",
        )
        .bind(email)
        .bind(code)
        .bind(password_hash)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetches id and confirmation state for an identifier whose password
    /// digest already matched.
    #[instrument(skip(db, password_hash))]
    pub async fn get_account_for_login(
        db: &PgPool,
        login_or_email: &str,
        password_hash: &str,
    ) -> Result<Option<(i64, bool)>, AppError> {
        let row = sqlx::query_as::<_, (i64, bool)>(
            "SELECT id, is_confirmed FROM accounts
             WHERE (login = $1 OR email = $1) AND password = $2",
        )
        .bind(login_or_email)
        .bind(password_hash)
        .fetch_optional(db)
        .await?;

        Ok(row)
    }

    /// Replaces the mutable profile fields. Login and email are not touched
    /// here. Returns false when the account no longer exists.
    #[instrument(skip(db, dto))]
    pub async fn update_profile(
        db: &PgPool,
        account_id: i64,
        dto: &UpdateProfileDto,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE accounts
             SET first_name = $2, last_name = $3, patronymic = $4, position = $5
             WHERE id = $1",
        )
        .bind(account_id)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.patronymic)
        .bind(&dto.position)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, account_id: i64) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, login, email, first_name, last_name, patronymic, position, is_confirmed
             FROM accounts
             WHERE id = $1",
        )
        .bind(account_id)
        .fetch_optional(db)
        .await?;

        Ok(account)
    }
}
