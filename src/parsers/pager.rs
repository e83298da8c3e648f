use super::{first_match, selector};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static NEXT_LINK: LazyLock<[Selector; 2]> =
    LazyLock::new(|| [selector(r#"a[rel~="next"]"#), selector("div.pager a.next")]);

/// Returns the absolute URL of the next page, or `None` on the last page
///
/// Only an explicit next marker counts: an anchor with `rel="next"`, or the pager's
/// `a.next` link. Page-number widgets are never interpreted.
///
/// # Arguments
///
/// * `html` - Rendered page markup
/// * `current` - URL the markup was rendered from, used to resolve relative links
pub fn next_page_url(html: &str, current: &Url) -> Option<Url> {
    let doc = Html::parse_document(html);

    let link = first_match(doc.root_element(), &*NEXT_LINK)?;
    let href = link.value().attr("href").map(str::trim)?;
    if href.is_empty() {
        ::log::debug!("Next-page marker on {} has no href", current);
        return None;
    }

    match current.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            ::log::warn!("Ignoring unparsable next-page link {:?}: {}", href, e);
            None
        }
    }
}
