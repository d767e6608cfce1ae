use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use platform_api::{ApiResult, ProblemDetail};
use platform_authz::Policy;
use products_hr::{
    EmployeeFilter, EmployeePage, EmployeeRequest, EmployeeResponse, EmployeeService, PageRequest,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{
    AppState,
    auth::AuthUser,
    extract::{JsonBody, QueryParams},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Zero-based page number.
    page: Option<i64>,
    /// Page size, 1 to 100.
    size: Option<i64>,
    /// firstName, lastName, email, department, position, salary or hireDate.
    sort_by: Option<String>,
    direction: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeEnvelope {
    employee: EmployeeResponse,
    #[schema(value_type = String)]
    detail: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct SearchResult {
    employees: Vec<EmployeeResponse>,
    count: usize,
}

#[derive(Serialize, ToSchema)]
pub struct UpdateEnvelope {
    old_employee: EmployeeResponse,
    updated_employee: EmployeeResponse,
    #[schema(value_type = String)]
    detail: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct DeleteEnvelope {
    deleted_employee: EmployeeResponse,
    #[schema(value_type = String)]
    detail: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "employees",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of employees", body = EmployeePage),
        (status = 400, description = "Invalid paging or sort parameters", body = ProblemDetail),
        (status = 401, description = "Missing or invalid credentials", body = ProblemDetail),
        (status = 403, description = "Requires admin or manager", body = ProblemDetail)
    ),
    security(("basicAuth" = []))
)]
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Json<EmployeePage>> {
    user.require(Policy::AdminOrManager)?;
    let request = PageRequest::parse(
        query.page,
        query.size,
        query.sort_by.as_deref(),
        query.direction.as_deref(),
    )?;
    let page = EmployeeService::new(&state.pool).find_page(request).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/employees/id/{employee_id}",
    tag = "employees",
    params(("employee_id" = String, Path, description = "User id of the employee")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeEnvelope),
        (status = 403, description = "Not admin, manager or the employee", body = ProblemDetail),
        (status = 404, description = "No such employee", body = ProblemDetail)
    ),
    security(("basicAuth" = []))
)]
pub async fn get_one(
    State(state): State<AppState>,
    user: AuthUser,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<EmployeeEnvelope>> {
    user.require(Policy::AdminOrManagerOrSelf(&employee_id))?;
    let employee = EmployeeService::new(&state.pool)
        .find_by_employee_id(&employee_id)
        .await?;
    Ok(Json(EmployeeEnvelope {
        employee,
        detail: "Employee found successfully",
    }))
}

#[utoipa::path(
    get,
    path = "/api/employees/search",
    tag = "employees",
    params(EmployeeFilter),
    responses(
        (status = 200, description = "Matching employees", body = SearchResult),
        (status = 403, description = "Requires admin or manager", body = ProblemDetail)
    ),
    security(("basicAuth" = []))
)]
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    QueryParams(filter): QueryParams<EmployeeFilter>,
) -> ApiResult<Json<SearchResult>> {
    user.require(Policy::AdminOrManager)?;
    let employees = EmployeeService::new(&state.pool).filter(&filter).await?;
    Ok(Json(SearchResult {
        count: employees.len(),
        employees,
    }))
}

#[utoipa::path(
    get,
    path = "/api/employees/download",
    tag = "employees",
    params(EmployeeFilter),
    responses(
        (status = 200, description = "Matching employees as a JSON attachment", body = [EmployeeResponse]),
        (status = 403, description = "Requires admin or manager", body = ProblemDetail)
    ),
    security(("basicAuth" = []))
)]
pub async fn download(
    State(state): State<AppState>,
    user: AuthUser,
    QueryParams(filter): QueryParams<EmployeeFilter>,
) -> ApiResult<Response> {
    user.require(Policy::AdminOrManager)?;
    let body = EmployeeService::new(&state.pool).export(&filter).await?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_static("attachment; filename=\"employees.json\""),
            ),
        ],
        body,
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/employees/id/{employee_id}",
    tag = "employees",
    params(("employee_id" = String, Path, description = "User id of the employee")),
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Record before and after the update", body = UpdateEnvelope),
        (status = 400, description = "Invalid fields", body = ProblemDetail),
        (status = 404, description = "No such employee", body = ProblemDetail),
        (status = 409, description = "Email or phone number taken", body = ProblemDetail)
    ),
    security(("basicAuth" = []))
)]
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(employee_id): Path<String>,
    JsonBody(request): JsonBody<EmployeeRequest>,
) -> ApiResult<Json<UpdateEnvelope>> {
    user.require(Policy::AdminOrManagerOrSelf(&employee_id))?;
    let (old_employee, updated_employee) = EmployeeService::new(&state.pool)
        .update(&employee_id, request)
        .await?;
    Ok(Json(UpdateEnvelope {
        old_employee,
        updated_employee,
        detail: "Employee updated successfully",
    }))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "employees",
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Employee and login created", body = EmployeeEnvelope),
        (status = 400, description = "Invalid or missing fields", body = ProblemDetail),
        (status = 403, description = "Requires admin", body = ProblemDetail),
        (status = 409, description = "Email or phone number taken", body = ProblemDetail)
    ),
    security(("basicAuth" = []))
)]
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<EmployeeRequest>,
) -> ApiResult<(StatusCode, Json<EmployeeEnvelope>)> {
    user.require(Policy::Admin)?;
    let employee = EmployeeService::new(&state.pool).register(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(EmployeeEnvelope {
            employee,
            detail: "Employee created successfully",
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/employees/id/{employee_id}",
    tag = "employees",
    params(("employee_id" = String, Path, description = "User id of the employee")),
    responses(
        (status = 200, description = "Deleted record", body = DeleteEnvelope),
        (status = 403, description = "Requires admin", body = ProblemDetail),
        (status = 404, description = "No such employee", body = ProblemDetail)
    ),
    security(("basicAuth" = []))
)]
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<DeleteEnvelope>> {
    user.require(Policy::Admin)?;
    let deleted_employee = EmployeeService::new(&state.pool)
        .delete(&employee_id)
        .await?;
    Ok(Json(DeleteEnvelope {
        deleted_employee,
        detail: "Employee deleted successfully",
    }))
}
