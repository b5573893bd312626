use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::accounts::model::{Account, UpdateProfileDto};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    ConfirmEmailRequest, EmailResponse, ForgotPasswordRequest, LoginRequest, RegisterRequestDto,
    ResendConfirmationRequest, ResetPasswordRequest, TokenResponse, VerifyResetCodeRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::confirm_email,
        crate::modules::auth::controller::resend_confirmation_code,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::forgot_password,
        crate::modules::auth::controller::verify_reset_code,
        crate::modules::auth::controller::reset_password,
        crate::modules::accounts::controller::get_profile,
        crate::modules::accounts::controller::update_profile,
    ),
    components(
        schemas(
            RegisterRequestDto,
            ConfirmEmailRequest,
            ResendConfirmationRequest,
            LoginRequest,
            TokenResponse,
            ForgotPasswordRequest,
            VerifyResetCodeRequest,
            ResetPasswordRequest,
            EmailResponse,
            Account,
            UpdateProfileDto,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, email confirmation, login and password recovery"),
        (name = "Accounts", description = "Account profile endpoints")
    ),
    info(
        title = "Taskdesk API",
        version = "0.1.0",
        description = "A REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication with email confirmation.",
        contact(
            name = "API Support",
            email = "support@taskdesk.dev"
        ),
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
