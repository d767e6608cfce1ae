use axum::extract::State;
use platform_api::{ApiResult, ProblemDetail};
use platform_authz::Policy;
use products_hr::AccountService;
use serde::Deserialize;
use utoipa::IntoParams;

use super::{AppState, auth::AuthUser, extract::QueryParams};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AssignRoleQuery {
    user_id: String,
    /// `ROLE_MANAGER` or just `MANAGER`.
    role: String,
}

#[utoipa::path(
    post,
    path = "/api/admin/assign-role",
    tag = "admin",
    params(AssignRoleQuery),
    responses(
        (status = 200, description = "Role granted", body = String, content_type = "text/plain"),
        (status = 400, description = "Unknown role", body = ProblemDetail),
        (status = 404, description = "No such user", body = ProblemDetail),
        (status = 409, description = "User already holds the role", body = ProblemDetail)
    ),
    security(("basicAuth" = []))
)]
pub async fn assign_role(
    State(state): State<AppState>,
    user: AuthUser,
    QueryParams(query): QueryParams<AssignRoleQuery>,
) -> ApiResult<String> {
    user.require(Policy::Admin)?;
    let role = AccountService::new(&state.pool)
        .assign_role(&query.user_id, &query.role)
        .await?;
    Ok(format!("Role {role} assigned to user {}", query.user_id))
}
