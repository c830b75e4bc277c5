use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use lemon_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

fn reject(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    let body = rejection.body_text();
    if let Some(field) = body
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
    {
        return AppError::bad_request(anyhow!("{field} is required"));
    }
    if body.contains("invalid type") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }
    AppError::bad_request(anyhow!("Invalid request body"))
}

/// JSON body extractor that also runs `validator` rules.
///
/// Parse failures become 400, rule violations 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(reject)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow!("{}", describe(&errors))))?;

        Ok(ValidatedJson(value))
    }
}
