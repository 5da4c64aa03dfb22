use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ApiError;
use crate::services::DepartmentInput;

pub const DEPARTMENT_FIELDS_REQUIRED: &str = "Department name and code are required";

pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ApiError>;
}

/// Department body as sent by the client. Either field may be missing, and any JSON value
/// is accepted in place of a string.
#[derive(Debug, Default, Deserialize)]
pub struct DepartmentPayload {
    pub department_name: Option<Value>,
    pub department_code: Option<Value>,
}

impl Validate for DepartmentPayload {
    type Output = DepartmentInput;

    fn validate(self) -> Result<DepartmentInput, ApiError> {
        match (present(self.department_name), present(self.department_code)) {
            (Some(department_name), Some(department_code)) => Ok(DepartmentInput {
                department_name,
                department_code,
            }),
            _ => Err(ApiError::MissingRequiredField(DEPARTMENT_FIELDS_REQUIRED)),
        }
    }
}

/// Null, `false`, zero and the empty string count as absent. Anything else is stored as text.
fn present(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Extracts a JSON or urlencoded body and validates it.
///
/// A request with neither content type is treated as an empty body, so it fails
/// validation rather than content negotiation.
pub struct Validated<T: Validate>(pub T::Output);

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned + Default + Send,
    T::Output: Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let payload = if content_type.starts_with("application/json") {
            let Json(payload) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
            payload
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(payload) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
            payload
        } else {
            T::default()
        };

        payload.validate().map(Validated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, code: Option<&str>) -> DepartmentPayload {
        DepartmentPayload {
            department_name: name.map(Value::from),
            department_code: code.map(Value::from),
        }
    }

    #[test]
    fn test_both_fields_required() {
        let input = payload(Some("Finance"), Some("FIN")).validate().unwrap();
        assert_eq!(input.department_name, "Finance");
        assert_eq!(input.department_code, "FIN");

        assert!(payload(Some("Finance"), None).validate().is_err());
        assert!(payload(None, Some("FIN")).validate().is_err());
        assert!(payload(None, None).validate().is_err());
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let err = payload(Some(""), Some("FIN")).validate().unwrap_err();
        assert_eq!(err.public_message(), DEPARTMENT_FIELDS_REQUIRED);
    }

    #[test]
    fn test_whitespace_is_kept_verbatim() {
        let input = payload(Some(" HR "), Some("H")).validate().unwrap();
        assert_eq!(input.department_name, " HR ");
    }

    #[test]
    fn test_non_string_values_are_rendered_as_text() {
        let input = DepartmentPayload {
            department_name: Some(Value::from(5)),
            department_code: Some(Value::from(101)),
        }
        .validate()
        .unwrap();

        assert_eq!(input.department_name, "5");
        assert_eq!(input.department_code, "101");

        let input = DepartmentPayload {
            department_name: Some(Value::from(true)),
            department_code: Some(Value::from(2.5)),
        }
        .validate()
        .unwrap();
        assert_eq!(input.department_name, "true");
        assert_eq!(input.department_code, "2.5");
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        for value in [Value::Null, Value::from(false), Value::from(0), Value::from("")] {
            let err = DepartmentPayload {
                department_name: Some(value),
                department_code: Some(Value::from("FIN")),
            }
            .validate()
            .unwrap_err();
            assert_eq!(err.public_message(), DEPARTMENT_FIELDS_REQUIRED);
        }
    }
}
