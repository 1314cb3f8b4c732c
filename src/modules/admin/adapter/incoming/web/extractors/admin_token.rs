use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::future::{ready, Ready};

use crate::modules::admin::application::services::{ConsoleError, SharedConsole};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Bearer access token of an admin request. Whether it still names a live
/// session is decided by the workspaces, not here.
#[derive(Clone)]
pub struct AdminToken(pub String);

impl std::fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminToken(***)")
    }
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AdminToken {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match extract_token_from_header(req) {
            Some(token) if !token.is_empty() => ready(Ok(AdminToken(token))),
            _ => ready(Err(create_api_error(ApiResponse::unauthorized(
                "MISSING_AUTH_HEADER",
                "Missing or invalid authorization header",
            )))),
        }
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
}

pub async fn resolve_console_or_response(
    data: &web::Data<AppState>,
    token: &AdminToken,
) -> Result<SharedConsole, HttpResponse> {
    match data.admin.resolve(&token.0).await {
        Ok(console) => Ok(console),

        Err(ConsoleError::Identity(msg)) => {
            tracing::error!("Session check failed: {}", msg);
            Err(ApiResponse::bad_gateway(
                "IDENTITY_UNAVAILABLE",
                "Could not verify the session",
            ))
        }

        Err(_) => Err(ApiResponse::unauthorized(
            "INVALID_SESSION",
            "Session expired or signed out",
        )),
    }
}
