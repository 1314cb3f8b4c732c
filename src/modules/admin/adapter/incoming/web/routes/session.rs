use actix_web::{delete, get, post, web, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use super::console_error_response;
use crate::modules::admin::adapter::incoming::web::extractors::{
    resolve_console_or_response, AdminToken,
};
use crate::modules::admin::application::domain::session::AdminView;
use crate::modules::content::application::domain::entities::Collection;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Admin sign-in form
#[derive(Deserialize, ToSchema)]
pub struct SignInRequest {
    #[serde(default)]
    #[schema(example = "admin@example.com")]
    pub email: String,

    #[serde(default)]
    #[schema(example = "correct-horse")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct SignInResponse {
    /// Bearer token for every `/admin` request
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    access_token: String,
    #[schema(value_type = String, example = "Bearer")]
    token_type: &'static str,
    expires_at: DateTime<Utc>,
    email: String,
    #[schema(value_type = String, example = "console")]
    view: AdminView,
    /// Collections whose initial load failed and show as empty.
    #[schema(value_type = Vec<String>, example = json!(["projects"]))]
    failed_collections: Vec<Collection>,
}

#[derive(Serialize, ToSchema)]
pub struct SessionInfo {
    email: String,
    expires_at: DateTime<Utc>,
    #[schema(value_type = String, example = "console")]
    view: AdminView,
}

#[utoipa::path(
    post,
    path = "/admin/session",
    tag = "admin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in, collections loaded", body = inline(SuccessResponse<SignInResponse>)),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Malformed email or short password", body = ErrorResponse),
        (status = 502, description = "Identity provider unavailable", body = ErrorResponse),
    )
)]
#[post("/admin/session")]
pub async fn sign_in_handler(
    req: web::Json<SignInRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.admin.sign_in(&req.email, &req.password).await {
        Ok(signed_in) => {
            if !signed_in.failed.is_empty() {
                warn!(
                    "Admin {} signed in with unloaded collections: {:?}",
                    signed_in.session.email, signed_in.failed
                );
            }
            let view = signed_in.console.lock().await.view();
            info!("Admin session opened for {}", signed_in.session.email);

            ApiResponse::success(SignInResponse {
                access_token: signed_in.session.access_token,
                token_type: "Bearer",
                expires_at: signed_in.session.expires_at,
                email: signed_in.session.email,
                view,
                failed_collections: signed_in.failed,
            })
        }
        Err(e) => console_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/admin/session",
    tag = "admin",
    responses(
        (status = 200, description = "Session is live", body = inline(SuccessResponse<SessionInfo>)),
        (status = 401, description = "Missing, expired or revoked token", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[get("/admin/session")]
pub async fn get_session_handler(token: AdminToken, data: web::Data<AppState>) -> impl Responder {
    let console = match resolve_console_or_response(&data, &token).await {
        Ok(console) => console,
        Err(response) => return response,
    };

    let console = console.lock().await;
    match console.session() {
        Some(session) => ApiResponse::success(SessionInfo {
            email: session.email.clone(),
            expires_at: session.expires_at,
            view: console.view(),
        }),
        None => ApiResponse::unauthorized("INVALID_SESSION", "Session expired or signed out"),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/session",
    tag = "admin",
    responses(
        (status = 204, description = "Signed out"),
        (status = 401, description = "Missing, expired or revoked token", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[delete("/admin/session")]
pub async fn sign_out_handler(token: AdminToken, data: web::Data<AppState>) -> impl Responder {
    match data.admin.sign_out(&token.0).await {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => console_error_response(e),
    }
}
