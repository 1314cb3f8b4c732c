use actix_web::{delete, web, Responder};
use serde::Deserialize;
use tracing::warn;

use crate::modules::admin::adapter::incoming::web::extractors::{
    resolve_console_or_response, AdminToken,
};
use crate::modules::media::application::domain::entities::Bucket;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize)]
pub struct DeleteMediaQuery {
    pub path: String,
}

#[delete("/admin/uploads/{bucket}")]
pub async fn delete_media_handler(
    token: AdminToken,
    bucket: web::Path<String>,
    query: web::Query<DeleteMediaQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let bucket = match bucket.parse::<Bucket>() {
        Ok(bucket) => bucket,
        Err(e) => return ApiResponse::not_found("UNKNOWN_BUCKET", &e.to_string()),
    };
    if let Err(response) = resolve_console_or_response(&data, &token).await {
        return response;
    }

    if data.upload_media.delete_file(bucket, &query.path).await {
        ApiResponse::no_content()
    } else {
        warn!("Could not remove {} from {}", query.path, bucket);
        ApiResponse::bad_gateway("DELETE_FAILED", "The file could not be removed")
    }
}
