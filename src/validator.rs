use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

// Sorted so the combined message is deterministic regardless of field order.
fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{} failed {} validation", field, error.code),
            })
        })
        .collect();

    messages.sort();
    messages.join(", ")
}

/// JSON extractor that runs `validator` rules after deserializing.
///
/// Malformed bodies are 400s; bodies that parse but break a validation rule
/// are 422s with one combined message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let message = match &rejection {
                    JsonRejection::MissingJsonContentType(_) => {
                        "expected 'Content-Type: application/json'"
                    }
                    JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON",
                    JsonRejection::JsonDataError(_) => {
                        "request body does not match the expected shape"
                    }
                    _ => "invalid request body",
                };

                AppError::bad_request(anyhow!(message))
            })?;

        value.validate().map_err(|errors| {
            AppError::unprocessable(anyhow!("{}", format_errors(&errors)))
        })?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 6, max = 20))]
        login: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_format_errors_is_deterministic() {
        let probe = Probe {
            login: "abc".to_string(),
            email: "nope".to_string(),
        };

        let errors = probe.validate().unwrap_err();
        let first = format_errors(&errors);
        let second = format_errors(&errors);

        assert_eq!(first, second);
        assert!(first.contains("login"));
        assert!(first.contains("email"));
    }
}
