//! JSON extractor that runs declarative validation.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use gatehouse_core::error::AppError;

use crate::error::ApiError;

/// Deserializes the JSON body and validates it before the handler runs.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError(AppError::validation(format!("Invalid request body: {e}"))))?;

        value
            .validate()
            .map_err(|e| ApiError(validation_error(e)))?;

        Ok(Self(value))
    }
}

/// Flattens `validator` errors into per-field messages.
fn validation_error(errors: ValidationErrors) -> AppError {
    let mut details: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| match &e.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: invalid value"),
            })
        })
        .collect();
    details.sort();

    AppError::validation_fields("Validation failed", details)
}
