use actix_web::{http::header, post, web, HttpRequest, Responder};
use serde::Deserialize;

use crate::modules::admin::adapter::incoming::web::extractors::{
    resolve_console_or_response, AdminToken,
};
use crate::modules::media::application::domain::entities::{Bucket, UploadFile};
use crate::modules::media::application::ports::incoming::use_cases::UploadError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize)]
pub struct UploadQuery {
    pub file_name: String,
    /// Object key to write to. A key is generated when absent.
    pub path: Option<String>,
}

/// Stores the raw request body in `bucket`. Admin only.
#[post("/admin/uploads/{bucket}")]
pub async fn upload_media_handler(
    token: AdminToken,
    req: HttpRequest,
    bucket: web::Path<String>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let bucket = match bucket.parse::<Bucket>() {
        Ok(bucket) => bucket,
        Err(e) => return ApiResponse::not_found("UNKNOWN_BUCKET", &e.to_string()),
    };
    if let Err(response) = resolve_console_or_response(&data, &token).await {
        return response;
    }

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let query = query.into_inner();
    let file = UploadFile {
        file_name: query.file_name,
        content_type,
        bytes: body,
    };

    match data.upload_media.upload(file, bucket, query.path).await {
        Ok(result) => ApiResponse::created(result),
        Err(e @ UploadError::TypeNotAllowed { .. }) => {
            ApiResponse::unsupported_media_type("FILE_TYPE_NOT_ALLOWED", &e.to_string())
        }
        Err(e @ UploadError::Storage(_)) => ApiResponse::bad_gateway("UPLOAD_FAILED", &e.to_string()),
    }
}
