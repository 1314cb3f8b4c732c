use actix_web::{delete, web, Responder};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::{manager_error_response, parse_collection};
use crate::modules::admin::adapter::incoming::web::extractors::{
    resolve_console_or_response, AdminToken,
};
use crate::modules::admin::application::domain::manager::Confirmation;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[delete("/admin/{collection}/{id}")]
pub async fn delete_record_handler(
    token: AdminToken,
    path: web::Path<(String, Uuid)>,
    query: web::Query<DeleteQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (raw_collection, id) = path.into_inner();
    let collection = match parse_collection(&raw_collection) {
        Ok(c) => c,
        Err(response) => return response,
    };
    let console = match resolve_console_or_response(&data, &token).await {
        Ok(console) => console,
        Err(response) => return response,
    };

    let result = console
        .lock()
        .await
        .manager(collection)
        .delete(id, Confirmation::from(query.confirm))
        .await;

    match result {
        Ok(()) => {
            info!("Deleted {} record {}", collection, id);
            ApiResponse::no_content()
        }
        Err(e) => manager_error_response(e),
    }
}
