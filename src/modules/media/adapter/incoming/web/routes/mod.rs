mod delete_media;
mod upload_media;

pub use delete_media::delete_media_handler;
pub use upload_media::upload_media_handler;
