pub mod admin_token;

pub use admin_token::{resolve_console_or_response, AdminToken};
