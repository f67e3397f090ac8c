//! Body extractors.
//!
//! - [`ValidatedJson`] for create payloads: deserializes leniently, runs every
//!   field rule and rejects with all broken rules at once.
//! - [`PartialJson`] for update payloads: no rules, wrong JSON types are a 400.
//!
//! A body that is not JSON at all is answered with the generic `{"error": ...}` shape.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use schoolhub_core::{AppError, FieldError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;
use validator::{Validate, ValidationErrors};

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Flattens validator output into wire errors, ordered by field name.
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            let field = to_camel_case(&field);
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

fn malformed_body(rejection: JsonRejection) -> AppError {
    debug!(error = %rejection.body_text(), "Rejected request body");
    AppError::fallback(StatusCode::BAD_REQUEST, anyhow!(rejection.body_text()))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => value,
            // No JSON body: every rule runs against an empty object.
            Err(JsonRejection::MissingJsonContentType(_)) => {
                serde_json::from_value(Value::Object(Map::new()))
                    .map_err(|e| AppError::fallback(StatusCode::BAD_REQUEST, e))?
            }
            Err(rejection) => return Err(malformed_body(rejection)),
        };

        value
            .validate()
            .map_err(|errors| AppError::validation(collect_field_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PartialJson<T>(pub T);

impl<T, S> FromRequest<S> for PartialJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(PartialJson(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(PartialJson(T::default())),
            Err(JsonRejection::JsonDataError(rejection)) => {
                Err(AppError::bad_request(anyhow!(rejection.body_text())))
            }
            Err(rejection) => Err(malformed_body(rejection)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header;
    use schoolhub_models::{CreateStudentDto, UpdateStudentDto};
    use uuid::Uuid;

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("first_name"), "firstName");
        assert_eq!(to_camel_case("age"), "age");
    }

    #[tokio::test]
    async fn test_errors_are_camel_case_and_sorted() {
        let err = ValidatedJson::<CreateStudentDto>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();
        let fields: Vec<&str> = err.field_errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["age", "classroom", "firstName", "lastName"]);
    }

    #[tokio::test]
    async fn test_missing_content_type_validates_empty_object() {
        let req = Request::builder().method("POST").body(Body::empty()).unwrap();
        let err = ValidatedJson::<CreateStudentDto>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.field_errors.len(), 4);
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let body = format!(
            r#"{{"firstName":" Ada ","lastName":"Lovelace","age":12,"classroom":"{}"}}"#,
            Uuid::now_v7()
        );
        let ValidatedJson(dto) = ValidatedJson::<CreateStudentDto>::from_request(
            json_request(&body),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(dto.first_name, "Ada");
    }

    #[tokio::test]
    async fn test_syntax_error_is_fallback() {
        let err = ValidatedJson::<CreateStudentDto>::from_request(json_request("{oops"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.field_errors.is_empty());
    }

    #[tokio::test]
    async fn test_partial_wrong_type_is_bad_request() {
        let err = PartialJson::<UpdateStudentDto>::from_request(json_request(r#"{"age":"old"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_partial_without_body_is_empty() {
        let req = Request::builder().method("PUT").body(Body::empty()).unwrap();
        let PartialJson(dto) = PartialJson::<UpdateStudentDto>::from_request(req, &())
            .await
            .unwrap();
        assert!(dto.first_name.is_none() && dto.age.is_none());
    }
}
