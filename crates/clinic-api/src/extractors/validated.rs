//! JSON body extractor that runs `validator` rules before the handler sees it.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use clinic_core::error::AppError;

/// A deserialized and validated JSON body.
///
/// Malformed JSON and failed rules both surface as `Validation` errors, so
/// the response uses the standard error envelope.
#[derive(Debug, Clone)]
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
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        value.validate().map_err(|errors| AppError::validation(describe(&errors)))?;
        Ok(Self(value))
    }
}

/// Flattens field errors into one message, sorted by field for stable output.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field}: invalid value"))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
