use super::renderer::{FetchedPage, PageRenderer};
use crate::error::{HarvestError, Result};
use std::collections::HashMap;
use url::Url;

/// Renderer that serves pre-rendered markup from memory
///
/// Requests for unknown URLs fail the same way a navigation error would.
#[derive(Debug, Default)]
pub struct StaticRenderer {
    pages: HashMap<String, String>,
    requested: Vec<String>,
}

impl StaticRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the markup served for `url`
    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    /// URLs requested so far, in order
    pub fn requested(&self) -> &[String] {
        &self.requested
    }
}

impl PageRenderer for StaticRenderer {
    async fn render(&mut self, url: &Url) -> Result<FetchedPage> {
        self.requested.push(url.to_string());

        match self.pages.get(url.as_str()) {
            Some(html) => Ok(FetchedPage {
                url: url.clone(),
                html: html.clone(),
            }),
            None => Err(HarvestError::PageNotFound(url.to_string())),
        }
    }

    async fn close(self) -> Result<()> {
        Ok(())
    }
}
