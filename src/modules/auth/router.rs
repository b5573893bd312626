use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{
    confirm_email, forgot_password, login, register, resend_confirmation_code, reset_password,
    verify_reset_code,
};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/confirm-email", post(confirm_email))
        .route("/confirm-email/resend", post(resend_confirmation_code))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/forgot-password/verify-code", post(verify_reset_code))
        .route("/reset-password", post(reset_password))
}
