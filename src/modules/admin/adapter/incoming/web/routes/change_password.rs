use actix_web::{put, web, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use super::console_error_response;
use crate::modules::admin::adapter::incoming::web::extractors::{
    resolve_console_or_response, AdminToken,
};
use crate::api::schemas::ErrorResponse;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[utoipa::path(
    put,
    path = "/admin/password",
    tag = "admin",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 401, description = "Missing, expired or revoked token", body = ErrorResponse),
        (status = 422, description = "Field errors, including a wrong current password", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[put("/admin/password")]
pub async fn change_password_handler(
    token: AdminToken,
    req: web::Json<ChangePasswordRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let console = match resolve_console_or_response(&data, &token).await {
        Ok(console) => console,
        Err(response) => return response,
    };

    let result = console
        .lock()
        .await
        .change_password(
            &req.current_password,
            &req.new_password,
            &req.confirm_password,
        )
        .await;

    match result {
        Ok(()) => ApiResponse::success(serde_json::json!({ "message": "Password updated" })),
        Err(e) => console_error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::stubs::{StubIdentity, ADMIN_PASSWORD};
    use actix_web::{test, App};
    use std::sync::Arc;

    fn body(current: &str, new: &str, confirm: &str) -> serde_json::Value {
        serde_json::json!({
            "current_password": current,
            "new_password": new,
            "confirm_password": confirm,
        })
    }

    #[actix_web::test]
    async fn test_change_password_success() {
        let identity = Arc::new(StubIdentity::default());
        let token = identity.issue();
        let app_state = TestAppStateBuilder::default()
            .with_identity(identity.clone())
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(change_password_handler))
                .await;

        let req = test::TestRequest::put()
            .uri("/admin/password")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(body(ADMIN_PASSWORD, "brand-new", "brand-new"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        assert_eq!(identity.password(), "brand-new");
    }

    #[actix_web::test]
    async fn test_change_password_mismatch_is_422() {
        let identity = Arc::new(StubIdentity::default());
        let token = identity.issue();
        let app_state = TestAppStateBuilder::default()
            .with_identity(identity.clone())
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(change_password_handler))
                .await;

        let req = test::TestRequest::put()
            .uri("/admin/password")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(body(ADMIN_PASSWORD, "brand-new", "brand-old"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 422);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            json["error"]["fields"]["confirm_password"],
            "Passwords don't match"
        );
        assert_eq!(identity.password(), ADMIN_PASSWORD);
    }

    #[actix_web::test]
    async fn test_change_password_wrong_current_is_field_error() {
        let identity = Arc::new(StubIdentity::default());
        let token = identity.issue();
        let app_state = TestAppStateBuilder::default()
            .with_identity(identity.clone())
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(change_password_handler))
                .await;

        let req = test::TestRequest::put()
            .uri("/admin/password")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(body("not-my-password", "brand-new", "brand-new"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 422);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            json["error"]["fields"]["current_password"],
            "Current password is incorrect"
        );
    }

    #[actix_web::test]
    async fn test_change_password_requires_token() {
        let app_state = TestAppStateBuilder::default().build();
        let app =
            test::init_service(App::new().app_data(app_state).service(change_password_handler))
                .await;

        let req = test::TestRequest::put()
            .uri("/admin/password")
            .set_json(body(ADMIN_PASSWORD, "brand-new", "brand-new"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }
}
