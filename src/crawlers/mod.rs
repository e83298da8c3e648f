pub mod fixture;
pub mod renderer;
pub mod web;

pub use fixture::StaticRenderer;
pub use renderer::{FetchedPage, PageRenderer};
pub use web::WebDriverRenderer;
