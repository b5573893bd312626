use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::accounts::model::{Account, UpdateProfileDto};
use crate::modules::accounts::service::AccountService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Get the signed-in account's profile
#[utoipa::path(
    get,
    path = "/api/accounts/profile",
    responses(
        (status = 200, description = "Account profile", body = Account),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Accounts"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Account>, AppError> {
    let account = AccountService::get_profile(&state.db, auth_user.user_id()).await?;
    Ok(Json(account))
}

/// Replace the signed-in account's profile
#[utoipa::path(
    put,
    path = "/api/accounts/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Accounts"
)]
#[instrument(skip(state, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<StatusCode, AppError> {
    AccountService::update_profile(&state.db, auth_user.user_id(), dto).await?;
    Ok(StatusCode::OK)
}
