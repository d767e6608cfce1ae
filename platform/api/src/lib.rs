//! HTTP error envelope shared by every REST surface.
//!
//! Errors render as RFC 7807 problem details (`application/problem+json`).
//! Internal failures are logged and masked so database messages never reach
//! the client.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Shared REST result type.
pub type ApiResult<T> = Result<T, ApiError>;

pub const PROBLEM_TYPE: &str = "/api/errors/common";
pub const BASIC_REALM: &str = "Basic realm=\"employees\"";

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Validation failed")]
    Validation(BTreeMap<String, String>),
    #[error("Full authentication is required to access this resource")]
    Unauthorized,
    #[error("You are not authorized to access this resource.")]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetail {
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub kind: &'static str,
    #[schema(value_type = String)]
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Builds the problem-detail body for this error.
    pub fn problem(&self) -> ProblemDetail {
        let status = self.status();
        let errors = match self {
            ApiError::Validation(fields) => Some(fields.clone()),
            _ => None,
        };
        ProblemDetail {
            kind: PROBLEM_TYPE,
            title: status.canonical_reason().unwrap_or("Error"),
            status: status.as_u16(),
            detail: self.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            errors,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(flatten_validation(&value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

/// Collapses validator output into `field -> first message`, keyed by the
/// camelCase wire name.
pub fn flatten_validation(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .iter()
                .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Invalid value".to_string());
            (camel_case(&field), message)
        })
        .collect()
}

fn camel_case(field: &str) -> String {
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

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!(error = ?err, "request failed");
        }
        let status = self.status();
        let mut response = (status, Json(self.problem())).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        if status == StatusCode::UNAUTHORIZED {
            headers.insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_REALM),
            );
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use validator::Validate;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 2, message = "too short"))]
        name: String,
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_errors_are_masked() {
        let response = ApiError::internal(anyhow::anyhow!("relation does not exist")).into_response();
        let body = body_json(response).await;
        assert_eq!(body["detail"], "internal server error");
        assert_eq!(body["status"], 500);
    }

    #[tokio::test]
    async fn unauthorized_carries_basic_challenge() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            BASIC_REALM
        );
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
        let body = body_json(response).await;
        assert_eq!(body["title"], "Unauthorized");
    }

    #[tokio::test]
    async fn validation_errors_list_fields() {
        let err: ApiError = Named { name: "a".into() }.validate().unwrap_err().into();
        let body = body_json(err.into_response()).await;
        assert_eq!(body["status"], 400);
        assert_eq!(body["detail"], "Validation failed");
        assert_eq!(body["errors"]["name"], "too short");
    }

    #[tokio::test]
    async fn malformed_json_body_becomes_bad_request() {
        use axum::{body::Body, extract::FromRequest, http::Request};

        #[derive(Debug, serde::Deserialize)]
        struct Payload {
            #[allow(dead_code)]
            salary: i64,
        }

        let request = Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"salary":"lots"}"#))
            .unwrap();
        let rejection = Json::<Payload>::from_request(request, &()).await.unwrap_err();
        let err = ApiError::from(rejection);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let response = err.into_response();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("salary"));
    }

    #[test]
    fn field_keys_use_wire_names() {
        assert_eq!(camel_case("hire_date"), "hireDate");
        assert_eq!(camel_case("email"), "email");
    }
}
