use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use platform_api::{ApiError, ApiResult};
use platform_authz::{Policy, Principal};
use products_hr::AccountService;
use tracing::warn;

use super::AppState;

/// Caller authenticated with HTTP Basic against `system_users`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn require(&self, policy: Policy<'_>) -> ApiResult<()> {
        policy.check(&self.0).map_err(|_| ApiError::Forbidden)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let TypedHeader(Authorization(credentials)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    warn!(%path, "missing or malformed Basic credentials");
                    ApiError::Unauthorized
                })?;

        let principal = AccountService::new(&state.pool)
            .authenticate(credentials.username(), credentials.password())
            .await?;
        match principal {
            Some(principal) => Ok(AuthUser(principal)),
            None => {
                warn!(%path, user_id = credentials.username(), "unauthorized access attempt");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
