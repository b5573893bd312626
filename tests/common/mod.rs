use std::sync::{Arc, Mutex};

use sqlx::PgPool;
use taskdesk::config::cors::CorsConfig;
use taskdesk::config::jwt::JwtConfig;
use taskdesk::router::init_router;
use taskdesk::state::AppState;
use taskdesk::utils::email::Mailer;
use taskdesk::utils::errors::AppError;
use taskdesk::utils::password::hash_password;
use uuid::Uuid;

/// An outbound email captured by [`RecordingMailer`].
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mailer that records messages instead of delivering them.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

#[allow(dead_code)]
impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    let (app, _) = setup_test_app_with_mailer(pool).await;
    app
}

#[allow(dead_code)]
pub async fn setup_test_app_with_mailer(pool: PgPool) -> (axum::Router, Arc<RecordingMailer>) {
    dotenvy::dotenv().ok();
    let mailer = Arc::new(RecordingMailer::default());
    let mailer_dyn: Arc<dyn Mailer> = mailer.clone();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        mailer: mailer_dyn,
    };
    (init_router(state), mailer)
}

#[allow(dead_code)]
pub struct TestAccount {
    pub id: i64,
    pub login: String,
    pub email: String,
    pub password: String,
}

/// Insert an account directly, bypassing the registration endpoint.
///
/// The code slot row is seeded with the placeholder code `111111`, valid for
/// fifteen minutes, so unconfirmed accounts can be confirmed with it.
pub async fn create_test_account(
    pool: &PgPool,
    login: &str,
    email: &str,
    password: &str,
    confirmed: bool,
) -> TestAccount {
    let hashed = hash_password(password).unwrap();

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO accounts (login, email, first_name, last_name, password, is_confirmed)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(login)
    .bind(email)
    .bind("Test")
    .bind("Account")
    .bind(&hashed)
    .bind(confirmed)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query(
        r#"
        INSERT INTO account_codes (account_id, confirmation_code, confirmation_expires_at)
        VALUES ($1, '111111', NOW() + INTERVAL '15 minutes')
        "#,
    )
    .bind(id)
    .execute(pool)
    .await
    .unwrap();

    TestAccount {
        id,
        login: login.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn fetch_confirmation_code(pool: &PgPool, email: &str) -> String {
    sqlx::query_scalar(
        r#"
        SELECT c.confirmation_code
        FROM account_codes c
        JOIN accounts a ON a.id = c.account_id
        WHERE a.email = $1
        "#,
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn fetch_reset_code(pool: &PgPool, email: &str) -> Option<String> {
    sqlx::query_scalar(
        r#"
        SELECT c.reset_code
        FROM account_codes c
        JOIN accounts a ON a.id = c.account_id
        WHERE a.email = $1
        "#,
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn expire_confirmation_code(pool: &PgPool, email: &str) {
    sqlx::query(
        r#"
        UPDATE account_codes c
        SET confirmation_expires_at = NOW() - INTERVAL '1 minute'
        FROM accounts a
        WHERE a.id = c.account_id AND a.email = $1
        "#,
    )
    .bind(email)
    .execute(pool)
    .await
    .unwrap();
}

#[allow(dead_code)]
pub async fn expire_reset_code(pool: &PgPool, email: &str) {
    sqlx::query(
        r#"
        UPDATE account_codes c
        SET reset_expires_at = NOW() - INTERVAL '1 minute'
        FROM accounts a
        WHERE a.id = c.account_id AND a.email = $1
        "#,
    )
    .bind(email)
    .execute(pool)
    .await
    .unwrap();
}

/// Short unique email that fits the 30-character limit on email fields.
pub fn generate_unique_email() -> String {
    let tag = Uuid::new_v4().simple().to_string();
    format!("{}@test.com", &tag[..12])
}

pub fn generate_unique_login() -> String {
    let tag = Uuid::new_v4().simple().to_string();
    format!("user{}", &tag[..10])
}
