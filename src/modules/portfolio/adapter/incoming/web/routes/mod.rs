pub mod build_contact_link;
pub mod get_portfolio_page;

pub use build_contact_link::build_contact_link_handler;
pub use get_portfolio_page::get_portfolio_page_handler;
