pub mod build_contact_link;
pub mod load_portfolio;
pub mod render_page;

pub use build_contact_link::BuildContactLinkUseCase;
pub use load_portfolio::LoadPortfolioUseCase;
pub use render_page::{PageRevalidator, RenderPageUseCase};
