use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    ConfirmEmailRequest, EmailResponse, ForgotPasswordRequest, LoginRequest,
    RegisterRequestDto, ResendConfirmationRequest, ResetPasswordRequest, TokenResponse,
    VerifyResetCodeRequest,
};
use super::service::AuthService;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Account created, confirmation code emailed"),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Login or email already in use", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<StatusCode, AppError> {
    AuthService::register(&state.db, &state.mailer, dto).await?;
    Ok(StatusCode::CREATED)
}

/// Confirm an email address with the emailed code
#[utoipa::path(
    post,
    path = "/api/auth/confirm-email",
    request_body = ConfirmEmailRequest,
    responses(
        (status = 200, description = "Email confirmed"),
        (status = 401, description = "Invalid or expired code", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn confirm_email(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ConfirmEmailRequest>,
) -> Result<StatusCode, AppError> {
    AuthService::confirm_email(&state.db, dto).await?;
    Ok(StatusCode::OK)
}

/// Re-issue the confirmation code
#[utoipa::path(
    post,
    path = "/api/auth/confirm-email/resend",
    request_body = ResendConfirmationRequest,
    responses(
        (status = 200, description = "New confirmation code emailed"),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn resend_confirmation_code(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResendConfirmationRequest>,
) -> Result<StatusCode, AppError> {
    AuthService::resend_confirmation_code(&state.db, &state.mailer, dto).await?;
    Ok(StatusCode::OK)
}

/// Log in and receive a session token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Email address not confirmed", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Request a password reset code
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset code emailed", body = EmailResponse),
        (status = 401, description = "Unknown login or email", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Json<EmailResponse>, AppError> {
    let response = AuthService::forgot_password(&state.db, &state.mailer, dto).await?;
    Ok(Json(response))
}

/// Check a reset code without consuming it
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password/verify-code",
    request_body = VerifyResetCodeRequest,
    responses(
        (status = 200, description = "Code is valid"),
        (status = 401, description = "Invalid or expired code", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn verify_reset_code(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<VerifyResetCodeRequest>,
) -> Result<StatusCode, AppError> {
    AuthService::verify_reset_code(&state.db, dto).await?;
    Ok(StatusCode::OK)
}

/// Set a new password using a reset code
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 401, description = "Invalid or expired code", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    AuthService::reset_password(&state.db, dto).await?;
    Ok(StatusCode::OK)
}
