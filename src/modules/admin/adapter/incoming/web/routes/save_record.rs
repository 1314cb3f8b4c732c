use actix_web::{post, put, web, HttpResponse, Responder};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::{manager_error_response, parse_collection};
use crate::modules::admin::adapter::incoming::web::extractors::{
    resolve_console_or_response, AdminToken,
};
use crate::modules::content::application::domain::form::FormData;
use crate::modules::media::application::domain::entities::UploadFile;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    /// Standard base64 with padding.
    pub data_base64: String,
}

impl Attachment {
    fn decode(self) -> Result<UploadFile, HttpResponse> {
        let bytes = general_purpose::STANDARD
            .decode(self.data_base64.trim())
            .map_err(|e| {
                warn!("Rejected attachment {}: {}", self.file_name, e);
                ApiResponse::bad_request("INVALID_ATTACHMENT", "Attachment is not valid base64")
            })?;

        Ok(UploadFile {
            file_name: self.file_name,
            content_type: self.content_type,
            bytes: bytes.into(),
        })
    }
}

#[derive(Deserialize)]
pub struct SaveRecordRequest {
    #[serde(default)]
    pub fields: FormData,
    pub attachment: Option<Attachment>,
}

impl SaveRecordRequest {
    fn into_parts(self) -> Result<(FormData, Option<UploadFile>), HttpResponse> {
        let upload = self.attachment.map(Attachment::decode).transpose()?;
        Ok((self.fields, upload))
    }
}

#[post("/admin/{collection}")]
pub async fn create_record_handler(
    token: AdminToken,
    path: web::Path<String>,
    req: web::Json<SaveRecordRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let collection = match parse_collection(&path) {
        Ok(c) => c,
        Err(response) => return response,
    };
    let (form, upload) = match req.into_inner().into_parts() {
        Ok(parts) => parts,
        Err(response) => return response,
    };
    let console = match resolve_console_or_response(&data, &token).await {
        Ok(console) => console,
        Err(response) => return response,
    };

    let mut console = console.lock().await;
    let manager = console.manager(collection);
    manager.cancel_edit();

    match manager.submit(form, upload).await {
        Ok(record) => {
            info!("Created {} record", collection);
            ApiResponse::created(record)
        }
        Err(e) => manager_error_response(e),
    }
}

#[put("/admin/{collection}/{id}")]
pub async fn update_record_handler(
    token: AdminToken,
    path: web::Path<(String, Uuid)>,
    req: web::Json<SaveRecordRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (raw_collection, id) = path.into_inner();
    let collection = match parse_collection(&raw_collection) {
        Ok(c) => c,
        Err(response) => return response,
    };
    let (form, upload) = match req.into_inner().into_parts() {
        Ok(parts) => parts,
        Err(response) => return response,
    };
    let console = match resolve_console_or_response(&data, &token).await {
        Ok(console) => console,
        Err(response) => return response,
    };

    let mut console = console.lock().await;
    let manager = console.manager(collection);
    if let Err(e) = manager.edit(id) {
        return manager_error_response(e);
    }

    match manager.submit(form, upload).await {
        Ok(record) => {
            info!("Updated {} record {}", collection, id);
            ApiResponse::success(record)
        }
        // A failed save leaves the record open in the form.
        Err(e) => manager_error_response(e),
    }
}
