use crate::crawlers::PageRenderer;
use crate::error::Result;
use crate::parsers;
use crate::results::{EntryAccumulator, HarvestOutcome, PageProgress, StopReason};
use std::collections::HashSet;
use url::Url;

/// Walks a topic page by page and collects its entries
///
/// The walk is strictly sequential: a page is rendered, parsed and merged before the next one
/// is requested. It ends when a page has no next-page link or when the page ceiling is hit.
#[derive(Debug, Clone)]
pub struct Harvester {
    start_url: Url,
    base_url: Url,
    max_pages: Option<u32>,
}

impl Harvester {
    /// Create a harvester starting at the first page of a topic
    ///
    /// `base_url` is the site origin that relative author and entry links resolve against.
    pub fn new(start_url: Url, base_url: Url) -> Self {
        Self {
            start_url,
            base_url,
            max_pages: None,
        }
    }

    /// Stop after `max_pages` pages; `None` walks until the last page
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages.filter(|&max| max > 0);
        self
    }

    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    /// True once `pages_visited` pages have been fetched and a ceiling is set at that count
    fn ceiling_reached(&self, pages_visited: u32) -> bool {
        self.max_pages.is_some_and(|max| pages_visited >= max)
    }

    /// Runs the walk with `renderer`
    ///
    /// A render failure ends the walk immediately and is returned as is. The renderer is
    /// borrowed, so closing it stays with the caller.
    pub async fn run<R: PageRenderer>(&self, renderer: &mut R) -> Result<HarvestOutcome> {
        let mut accumulator = EntryAccumulator::new();
        let mut pages = Vec::new();
        let mut visited = HashSet::new();
        let mut current_url = self.start_url.clone();
        let mut pages_visited: u32 = 0;

        ::log::info!("Scraping pages... (progress will be printed below)");

        let stop = loop {
            pages_visited += 1;
            visited.insert(current_url.to_string());
            ::log::info!("[page {}] Visiting: {}", pages_visited, current_url);

            let page = renderer.render(&current_url).await?;
            visited.insert(page.url.to_string());

            let entries = parsers::extract_entries(&page.html, &self.base_url);
            let raw_count = entries.len();
            let new_count = accumulator.merge(entries);

            ::log::info!(
                "[page {}] Found {} raw entries, {} new -> total {}",
                pages_visited,
                raw_count,
                new_count,
                accumulator.len()
            );
            pages.push(PageProgress {
                page: pages_visited,
                url: current_url.to_string(),
                raw_count,
                new_count,
                total: accumulator.len(),
            });

            if self.ceiling_reached(pages_visited) {
                ::log::info!("Reached max_pages limit ({}). Stopping.", pages_visited);
                break StopReason::PageCeiling;
            }

            let next = parsers::next_page_url(&page.html, &page.url)
                .filter(|next| !self.already_visited(next, &visited));
            match next {
                Some(next_url) => current_url = next_url,
                None => {
                    ::log::info!("No next page found. Reached the end.");
                    break StopReason::Exhausted;
                }
            }
        };

        Ok(HarvestOutcome {
            entries: accumulator.into_entries(),
            pages,
            stop,
        })
    }

    fn already_visited(&self, next: &Url, visited: &HashSet<String>) -> bool {
        let seen = visited.contains(next.as_str());
        if seen {
            ::log::warn!("Next-page link points back to {}, treating as last page", next);
        }
        seen
    }
}
