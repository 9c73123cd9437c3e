//! JSON body extractor that runs `validator` rules before the handler.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

/// Deserialized and validated request body.
///
/// Unparseable bodies and rule violations both reject with
/// `VALIDATION_ERROR`, so handlers only ever see checked payloads.
///
/// ```rust,ignore
/// async fn add_to_cart(ValidatedJson(payload): ValidatedJson<AddCartItemRequest>) {
///     // payload.email is a well-formed address here
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = match Json::<T>::from_request(req, state).await {
            Ok(Json(payload)) => payload,
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "Rejected request body");
                return Err(AppError::validation(rejection.body_text()));
            }
        };

        payload.validate().map_err(|errors| AppError::validation(describe(&errors)))?;
        Ok(Self(payload))
    }
}

/// One `field: message` entry per violation, ordered by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, violations)| {
            violations.iter().map(move |violation| match &violation.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: invalid value"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Validate)]
    struct Signup {
        #[validate(email(message = "Invalid email format"))]
        email: String,
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn test_describe_orders_fields() {
        let signup = Signup {
            email: "not-an-email".to_string(),
            name: String::new(),
        };
        let errors = signup.validate().unwrap_err();

        assert_eq!(
            describe(&errors),
            "email: Invalid email format; name: invalid value"
        );
    }

    #[test]
    fn test_valid_payload_passes() {
        let signup = Signup {
            email: "a@x.com".to_string(),
            name: "Ada".to_string(),
        };
        assert!(signup.validate().is_ok());
    }
}
