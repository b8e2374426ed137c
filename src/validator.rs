use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

/// JSON extractor for request DTOs: deserializes the body, then runs the
/// DTO's `validator` rules. Malformed bodies reject with 400, rule
/// violations with 422, both through the `{"error": ...}` envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(dto) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(anyhow!("{}", rejection_message(&rejection))))?;

        dto.validate()
            .map_err(|errors| AppError::unprocessable(anyhow!("{}", rule_violations(&errors))))?;

        Ok(ValidatedJson(dto))
    }
}

/// Caller-facing text for a JSON rejection. Serde's own messages leak type
/// and position details, so only the missing-field case passes the field
/// name through.
fn rejection_message(rejection: &JsonRejection) -> String {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return "Expected 'Content-Type: application/json'".to_string();
    }

    let detail = rejection.body_text();
    match detail
        .split_once("missing field `")
        .and_then(|(_, rest)| rest.split('`').next())
    {
        Some(field) => format!("{field} is required"),
        None => "Invalid request body".to_string(),
    }
}

/// Flattens `ValidationErrors` into one line per offending field, keeping
/// the field name so callers can map the message back to their form.
fn rule_violations(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, serde::Deserialize, Validate)]
    struct Dto {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn violations_are_reported_per_field() {
        let dto = Dto {
            name: "ab".to_string(),
            email: "not-an-email".to_string(),
        };

        let message = rule_violations(&dto.validate().unwrap_err());
        assert_eq!(message, "email is invalid; name: too short");
    }

    #[test]
    fn valid_dto_produces_no_violations() {
        let dto = Dto {
            name: "Ana Lima".to_string(),
            email: "ana@escola.edu".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
