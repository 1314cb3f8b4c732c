pub mod contact_link_service;
pub mod load_portfolio_service;
pub mod page_cache;

pub use contact_link_service::ContactLinkService;
pub use load_portfolio_service::LoadPortfolioService;
pub use page_cache::PortfolioPageCache;
