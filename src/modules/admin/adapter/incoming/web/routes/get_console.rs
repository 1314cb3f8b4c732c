use actix_web::{get, web, Responder};

use crate::modules::admin::adapter::incoming::web::extractors::{
    resolve_console_or_response, AdminToken,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Overview counts plus every manager's items and open form.
#[get("/admin")]
pub async fn get_console_handler(token: AdminToken, data: web::Data<AppState>) -> impl Responder {
    match resolve_console_or_response(&data, &token).await {
        Ok(console) => ApiResponse::success(console.lock().await.snapshot()),
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fakes::InMemoryContent;
    use crate::tests::support::fixtures::{profile_draft, project_draft, skill_draft};
    use crate::tests::support::stubs::StubIdentity;
    use actix_web::{test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_console_snapshot_lists_all_collections() {
        let content = InMemoryContent::default();
        content.profile.seed(profile_draft("Ada"));
        content.skills.seed(skill_draft("Rust"));
        content.skills.seed(skill_draft("Go"));
        content.projects.seed(project_draft("Portfolio"));

        let identity = Arc::new(StubIdentity::default());
        let token = identity.issue();
        let app_state = TestAppStateBuilder::default()
            .with_content(content)
            .with_identity(identity)
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(get_console_handler)).await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let data = &body["data"];
        assert_eq!(data["view"], "console");
        assert_eq!(data["overview"]["profile_configured"], true);
        assert_eq!(data["overview"]["counts"]["skills"], 2);
        assert_eq!(data["overview"]["counts"]["projects"], 1);
        assert_eq!(data["overview"]["counts"]["certificates"], 0);
        assert_eq!(data["collections"].as_array().unwrap().len(), 6);
    }

    #[actix_web::test]
    async fn test_console_rejects_unknown_token() {
        let app_state = TestAppStateBuilder::default().build();
        let app =
            test::init_service(App::new().app_data(app_state).service(get_console_handler)).await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", "Bearer forged-token"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_SESSION");
    }
}
