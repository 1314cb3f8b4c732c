pub mod upload_helper;

pub use upload_helper::UploadHelper;
