//! Pure markup parsers for rendered topic pages.
//!
//! Nothing here touches the network; every function takes the rendered HTML of one page.

pub mod entries;
pub mod pager;

#[cfg(test)]
mod tests;

use scraper::{ElementRef, Selector};

pub use entries::extract_entries;
pub use pager::next_page_url;

/// Parses a selector that is known to be valid at compile time
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// Returns the first element matching any of `selectors`, tried in order
fn first_match<'a>(scope: ElementRef<'a>, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .find_map(|selector| scope.select(selector).next())
}
