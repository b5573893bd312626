use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub exp: i64,
    pub iat: i64,
}

// Passwords are restricted to ASCII letters and digits
fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 6, max = 20))]
    pub login: String,
    #[validate(length(min = 2, max = 25))]
    pub first_name: String,
    #[validate(length(min = 2, max = 25))]
    pub last_name: String,
    #[validate(length(min = 2, max = 25))]
    pub patronymic: Option<String>,
    #[validate(length(min = 2, max = 50))]
    pub position: Option<String>,
    #[validate(length(min = 8, max = 20), custom(function = validate_alphanumeric))]
    #[schema(example = "password123")]
    pub password: String,
    #[validate(length(min = 4, max = 30), email)]
    #[schema(example = "user@example.com")]
    pub email: String,
}

// Email confirmation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ConfirmEmailRequest {
    #[validate(length(min = 4, max = 30), email)]
    pub email: String,
    #[validate(length(equal = 6))]
    #[schema(example = "483920")]
    pub code: String,
}

// Resend-confirmation request; requires re-authentication
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResendConfirmationRequest {
    #[validate(length(min = 4, max = 30))]
    pub login_email: String,
    #[validate(length(min = 8, max = 20), custom(function = validate_alphanumeric))]
    pub password: String,
}

// Login request; `login_email` accepts either identifier
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 4, max = 30))]
    pub login_email: String,
    #[validate(length(min = 8, max = 20), custom(function = validate_alphanumeric))]
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

// Password reset request (step 1: ask for a code)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(length(min = 4, max = 30))]
    pub login_email: String,
}

// Reset code probe (step 2: client-side check before the form)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyResetCodeRequest {
    #[validate(length(min = 4, max = 30), email)]
    pub email: String,
    #[validate(length(equal = 6))]
    pub code: String,
}

// Password reset completion (step 3: consume the code)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 4, max = 30), email)]
    pub email: String,
    #[validate(length(equal = 6))]
    pub code: String,
    #[validate(length(min = 8, max = 20), custom(function = validate_alphanumeric))]
    pub new_password: String,
}

// Login response
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

// Forgot-password response: where the code went
#[derive(Debug, Serialize, ToSchema)]
pub struct EmailResponse {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_dto() -> RegisterRequestDto {
        RegisterRequestDto {
            login: "ivanov7".to_string(),
            first_name: "Ivan".to_string(),
            last_name: "Ivanov".to_string(),
            patronymic: None,
            position: None,
            password: "password123".to_string(),
            email: "ivanov@example.com".to_string(),
        }
    }

    #[test]
    fn test_register_dto_accepts_valid_input() {
        assert!(register_dto().validate().is_ok());
    }

    #[test]
    fn test_register_dto_rejects_short_login() {
        let dto = RegisterRequestDto {
            login: "abc".to_string(),
            ..register_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_register_dto_rejects_non_alphanumeric_password() {
        let dto = RegisterRequestDto {
            password: "pass word 123".to_string(),
            ..register_dto()
        };
        assert!(dto.validate().is_err());

        let dto = RegisterRequestDto {
            password: "p@ssword123".to_string(),
            ..register_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_confirm_request_requires_six_digit_code() {
        let ok = ConfirmEmailRequest {
            email: "ivanov@example.com".to_string(),
            code: "123456".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = ConfirmEmailRequest {
            email: "ivanov@example.com".to_string(),
            code: "12345".to_string(),
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_login_request_remember_me_defaults_to_false() {
        let json = r#"{"login_email":"ivanov7","password":"password123"}"#;
        let dto: LoginRequest = serde_json::from_str(json).unwrap();
        assert!(!dto.remember_me);
        assert!(dto.validate().is_ok());
    }
}
