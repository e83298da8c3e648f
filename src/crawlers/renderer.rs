use crate::error::Result;
use url::Url;

/// Rendered markup of one page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the markup was rendered from, after redirects
    pub url: Url,

    /// Document markup after in-page scripts ran
    pub html: String,
}

/// Something that can turn a page URL into rendered markup
///
/// Implementations own their session; `close` releases it and must be called once the run
/// ends, whether it succeeded or not.
#[allow(async_fn_in_trait)]
pub trait PageRenderer {
    /// Navigate to `url` and return the rendered markup
    async fn render(&mut self, url: &Url) -> Result<FetchedPage>;

    /// Release the underlying session
    async fn close(self) -> Result<()>;
}
