use std::collections::BTreeMap;

use platform_api::{ApiError, flatten_validation};
use platform_authn::{AuthnError, PasswordPolicyError};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use validator::ValidationErrors;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Validation failed")]
    Validation(BTreeMap<String, String>),
    #[error(transparent)]
    InvalidPassword(#[from] PasswordPolicyError),
    #[error(transparent)]
    Authn(#[from] AuthnError),
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HrError {
    pub fn employee_not_found(employee_id: &str) -> Self {
        Self::NotFound(format!("Employee not found with id: {employee_id}"))
    }

    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::Validation(
            fields
                .iter()
                .map(|field| (field.to_string(), "must not be null".to_string()))
                .collect(),
        )
    }
}

impl From<ValidationErrors> for HrError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(flatten_validation(&value))
    }
}

impl From<HrError> for ApiError {
    fn from(value: HrError) -> Self {
        match value {
            HrError::NotFound(message) => ApiError::NotFound(message),
            HrError::Conflict(message) => ApiError::Conflict(message),
            HrError::BadRequest(message) => ApiError::BadRequest(message),
            HrError::Validation(fields) => ApiError::Validation(fields),
            HrError::InvalidPassword(err) => ApiError::BadRequest(err.to_string()),
            HrError::Db(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                ApiError::conflict("A database constraint was violated.")
            }
            other => ApiError::internal(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_http_statuses() {
        let cases: Vec<(HrError, u16)> = vec![
            (HrError::employee_not_found("EMP-1"), 404),
            (HrError::Conflict("Email already exists.".into()), 409),
            (HrError::BadRequest("bad sort".into()), 400),
            (HrError::missing_fields(&["email"]), 400),
            (
                HrError::InvalidPassword(platform_authn::check_password_policy("x").unwrap_err()),
                400,
            ),
            (HrError::Db(DbErr::Custom("boom".into())), 500),
        ];
        for (err, expected) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status().as_u16(), expected);
        }
    }

    #[test]
    fn missing_fields_are_listed() {
        let HrError::Validation(fields) = HrError::missing_fields(&["email", "salary"]) else {
            panic!("expected validation error");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["salary"], "must not be null");
    }
}
