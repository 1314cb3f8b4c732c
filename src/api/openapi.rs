use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use actix_web::{get, HttpResponse, Responder};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

// Admin
use crate::modules::admin::adapter::incoming::web::routes::{
    ChangePasswordRequest, SessionInfo, SignInRequest, SignInResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio CMS API",
        version = "1.0.0",
        description = "Public portfolio page and the admin content console",
    ),
    paths(
        // Admin session endpoints
        crate::modules::admin::adapter::incoming::web::routes::sign_in_handler,
        crate::modules::admin::adapter::incoming::web::routes::get_session_handler,
        crate::modules::admin::adapter::incoming::web::routes::sign_out_handler,
        crate::modules::admin::adapter::incoming::web::routes::change_password_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<SignInResponse>,
            ErrorResponse,
            ErrorDetail,

            // Admin DTOs
            SignInRequest,
            SignInResponse,
            SessionInfo,
            ChangePasswordRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "admin", description = "Admin session endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from POST /admin/session"))
                        .build(),
                ),
            )
        }
    }
}

#[get("/api-docs/openapi.json")]
pub async fn openapi_json_handler() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
