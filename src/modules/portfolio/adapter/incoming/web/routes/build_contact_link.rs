use actix_web::{post, web, Responder};
use tracing::warn;

use crate::modules::portfolio::application::domain::contact::{ContactError, ContactForm};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[post("/api/contact")]
pub async fn build_contact_link_handler(
    req: web::Json<ContactForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.contact_link.execute(req.into_inner()).await {
        Ok(link) => ApiResponse::success(link),

        Err(ContactError::Invalid(errors)) => ApiResponse::validation_failed(&errors),

        Err(ContactError::PhoneNotConfigured) => {
            warn!("Contact link requested but no phone number is configured");
            ApiResponse::service_unavailable(
                "CONTACT_NOT_CONFIGURED",
                "Contact via messaging is not available yet",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::portfolio::application::domain::contact::ContactLink;
    use crate::modules::portfolio::application::ports::incoming::use_cases::BuildContactLinkUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct NoPhone;

    #[async_trait]
    impl BuildContactLinkUseCase for NoPhone {
        async fn execute(&self, form: ContactForm) -> Result<ContactLink, ContactError> {
            form.validate().map_err(ContactError::Invalid)?;
            Err(ContactError::PhoneNotConfigured)
        }
    }

    struct FixedLink;

    #[async_trait]
    impl BuildContactLinkUseCase for FixedLink {
        async fn execute(&self, _form: ContactForm) -> Result<ContactLink, ContactError> {
            Ok(ContactLink {
                url: "https://wa.me/628123?text=hi".into(),
            })
        }
    }

    fn payload() -> serde_json::Value {
        serde_json::json!({
            "name": "Rina",
            "email": "rina@example.com",
            "subject": "Hi",
            "message": "Hello"
        })
    }

    #[actix_web::test]
    async fn test_contact_link_success() {
        let app_state = TestAppStateBuilder::default()
            .with_contact_link(FixedLink)
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(build_contact_link_handler))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["url"], "https://wa.me/628123?text=hi");
    }

    #[actix_web::test]
    async fn test_contact_missing_field_is_422() {
        let app_state = TestAppStateBuilder::default()
            .with_contact_link(NoPhone)
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(build_contact_link_handler))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(serde_json::json!({ "name": "Rina", "email": "rina@example.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 422);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["fields"]["subject"], "Subject is required");
        assert_eq!(body["error"]["fields"]["message"], "Message is required");
    }

    #[actix_web::test]
    async fn test_contact_without_phone_is_503() {
        let app_state = TestAppStateBuilder::default()
            .with_contact_link(NoPhone)
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(build_contact_link_handler))
                .await;

        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "CONTACT_NOT_CONFIGURED");
    }
}
