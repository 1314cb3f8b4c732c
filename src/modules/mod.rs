pub mod admin;
pub mod content;
pub mod media;
pub mod portfolio;
