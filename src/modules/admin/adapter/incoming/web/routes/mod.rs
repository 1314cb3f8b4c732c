mod change_password;
mod delete_record;
mod get_console;
mod save_record;
mod session;

pub use change_password::{__path_change_password_handler, change_password_handler, ChangePasswordRequest};
pub use delete_record::delete_record_handler;
pub use get_console::get_console_handler;
pub use save_record::{create_record_handler, update_record_handler};
pub use session::{
    __path_get_session_handler, __path_sign_in_handler, __path_sign_out_handler,
    get_session_handler, sign_in_handler, sign_out_handler, SessionInfo, SignInRequest,
    SignInResponse,
};

use actix_web::HttpResponse;
use tracing::error;

use crate::modules::admin::application::domain::manager::ManagerError;
use crate::modules::admin::application::services::ConsoleError;
use crate::modules::content::application::domain::entities::Collection;
use crate::modules::media::application::ports::incoming::use_cases::UploadError;
use crate::shared::api::ApiResponse;

fn parse_collection(raw: &str) -> Result<Collection, HttpResponse> {
    raw.parse::<Collection>().map_err(|e| {
        ApiResponse::not_found("UNKNOWN_COLLECTION", &e.to_string())
    })
}

fn console_error_response(e: ConsoleError) -> HttpResponse {
    match e {
        ConsoleError::Validation(errors) => ApiResponse::validation_failed(&errors),

        ConsoleError::InvalidCredentials => {
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }

        ConsoleError::NotAuthenticated => {
            ApiResponse::unauthorized("INVALID_SESSION", "Session expired or signed out")
        }

        ConsoleError::Identity(msg) => {
            error!("Identity provider error: {}", msg);
            ApiResponse::bad_gateway(
                "IDENTITY_UNAVAILABLE",
                "The identity provider is unavailable",
            )
        }
    }
}

fn manager_error_response(e: ManagerError) -> HttpResponse {
    match e {
        ManagerError::Validation(errors) => ApiResponse::validation_failed(&errors),

        ManagerError::NotConfirmed => ApiResponse::bad_request(
            "CONFIRMATION_REQUIRED",
            "Deletion must be confirmed with confirm=true",
        ),

        ManagerError::NotFound => ApiResponse::not_found("RECORD_NOT_FOUND", "Record not found"),

        ManagerError::Upload(e @ UploadError::TypeNotAllowed { .. }) => {
            ApiResponse::unsupported_media_type("FILE_TYPE_NOT_ALLOWED", &e.to_string())
        }

        ManagerError::Upload(UploadError::Storage(msg)) => {
            ApiResponse::bad_gateway("UPLOAD_FAILED", &format!("Upload failed: {msg}"))
        }

        ManagerError::Store(_) => ApiResponse::bad_gateway(
            "STORE_ERROR",
            "The content store could not complete the request",
        ),

        ManagerError::Unsupported(what) => ApiResponse::bad_request("UNSUPPORTED_OPERATION", what),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::content::application::domain::form::FieldErrors;
    use crate::modules::media::application::domain::entities::Bucket;

    #[test]
    fn test_manager_errors_map_to_statuses() {
        let cases = [
            (
                ManagerError::Validation(FieldErrors::single("title", "Title is required")),
                422,
            ),
            (ManagerError::NotConfirmed, 400),
            (ManagerError::NotFound, 404),
            (
                ManagerError::Upload(UploadError::TypeNotAllowed {
                    mime: "image/gif".into(),
                    bucket: Bucket::Avatars,
                }),
                415,
            ),
            (ManagerError::Upload(UploadError::Storage("down".into())), 502),
            (ManagerError::Store("timeout".into()), 502),
            (ManagerError::Unsupported("nope"), 400),
        ];

        for (error, status) in cases {
            assert_eq!(manager_error_response(error).status().as_u16(), status);
        }
    }

    #[test]
    fn test_console_errors_map_to_statuses() {
        assert_eq!(
            console_error_response(ConsoleError::InvalidCredentials).status(),
            401
        );
        assert_eq!(
            console_error_response(ConsoleError::Identity("down".into())).status(),
            502
        );
    }

    #[test]
    fn test_unknown_collection_is_404() {
        assert_eq!(parse_collection("skills").unwrap(), Collection::Skills);
        assert_eq!(parse_collection("pets").unwrap_err().status(), 404);
    }
}
