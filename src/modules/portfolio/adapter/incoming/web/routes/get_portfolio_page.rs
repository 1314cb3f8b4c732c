use actix_web::{get, web, Responder};

use crate::shared::api::ApiResponse;
use crate::AppState;

/// Public portfolio page. Never fails: sections whose data could not be
/// read come back as `not_configured`.
#[get("/")]
pub async fn get_portfolio_page_handler(data: web::Data<AppState>) -> impl Responder {
    let page = data.render_page.page().await;
    ApiResponse::success(page.as_ref().clone())
}
