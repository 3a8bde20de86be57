use axum::extract::{FromRequest, Request};
use axum::Json;
use garde::Validate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::HttpError;

/// A field-level validation error.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// Container for validation errors, used as the payload of `HttpError::Validation`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

impl ValidationErrorResponse {
    pub fn from_report(report: &garde::Report) -> Self {
        let errors = report
            .iter()
            .map(|(path, error)| {
                let field = path.to_string();
                FieldError {
                    field: if field.is_empty() { "value".into() } else { field },
                    message: error.message().to_string(),
                    code: "validation".into(),
                }
            })
            .collect();
        Self { errors }
    }
}

/// JSON body extractor that runs `garde` validation before the handler sees it.
///
/// Malformed JSON is rejected with 400 and the parser message; constraint
/// violations are rejected with 400 and per-field details.
#[derive(Debug, Clone)]
pub struct Valid<T>(pub T);

impl<S, T> FromRequest<S> for Valid<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    T::Context: Default,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|report| HttpError::Validation(ValidationErrorResponse::from_report(&report)))?;

        Ok(Valid(value))
    }
}
