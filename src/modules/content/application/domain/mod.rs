pub mod entities;
pub mod form;
pub mod schemas;
