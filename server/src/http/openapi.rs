use axum::Json;
use platform_api::ProblemDetail;
use products_hr::{EmployeePage, EmployeeRequest, EmployeeResponse};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

use super::{HealthResponse, admin, employees};

#[derive(OpenApi)]
#[openapi(
    info(title = "Employees API", description = "Employee records, roles and access control"),
    paths(
        super::health_handler,
        employees::list,
        employees::get_one,
        employees::search,
        employees::download,
        employees::create,
        employees::update,
        employees::delete,
        admin::assign_role,
    ),
    components(schemas(
        EmployeeRequest,
        EmployeeResponse,
        EmployeePage,
        employees::EmployeeEnvelope,
        employees::SearchResult,
        employees::UpdateEnvelope,
        employees::DeleteEnvelope,
        HealthResponse,
        ProblemDetail,
    )),
    modifiers(&BasicAuth),
    tags(
        (name = "employees", description = "Employee records"),
        (name = "admin", description = "Role administration"),
    )
)]
pub struct ApiDoc;

struct BasicAuth;

impl Modify for BasicAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .components
            .get_or_insert_with(Default::default)
            .add_security_scheme(
                "basicAuth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
    }
}

pub async fn api_docs() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
