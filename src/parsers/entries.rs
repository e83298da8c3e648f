use super::{first_match, selector};
use crate::results::Entry;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;
use url::Url;

static ENTRY_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("li[data-id]"));
static STREAM_ITEM: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"li[class*="stream-item"]"#));
static CONTENT: LazyLock<[Selector; 2]> =
    LazyLock::new(|| [selector(".content"), selector(".entry-content")]);
static AUTHOR: LazyLock<[Selector; 2]> =
    LazyLock::new(|| [selector("a.entry-author"), selector("a[data-author]")]);
static DATE: LazyLock<[Selector; 2]> =
    LazyLock::new(|| [selector("a.entry-date"), selector("a.permalink")]);

/// Extracts the entries of one rendered topic page, in document order
///
/// The identifier is the post's `data-id`, or the numeric tail of its `/entry/<id>` permalink.
/// Posts with neither are skipped. Any other missing field is left empty, or derived
/// from the author name / entry id in the case of the two URLs.
///
/// # Arguments
///
/// * `html` - Rendered page markup
/// * `base` - Site origin used to resolve relative links
pub fn extract_entries(html: &str, base: &Url) -> Vec<Entry> {
    let doc = Html::parse_document(html);

    let mut items: Vec<ElementRef> = doc.select(&ENTRY_ITEM).collect();
    if items.is_empty() {
        items = doc.select(&STREAM_ITEM).collect();
    }

    let total = items.len();
    let entries: Vec<Entry> = items
        .into_iter()
        .filter_map(|item| parse_entry(item, base))
        .collect();

    if entries.len() < total {
        ::log::debug!("Skipped {} posts without an identifier", total - entries.len());
    }

    entries
}

fn parse_entry(item: ElementRef, base: &Url) -> Option<Entry> {
    let date_el = first_match(item, &*DATE);
    let entry_id = item
        .value()
        .attr("data-id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| {
            date_el
                .and_then(|el| el.value().attr("href"))
                .and_then(entry_id_from_href)
        })?;

    let content = first_match(item, &*CONTENT)
        .map(block_text)
        .unwrap_or_default();

    let author_el = first_match(item, &*AUTHOR);
    let author = author_el.map(inline_text).unwrap_or_default();
    let author_url = author_el
        .and_then(|el| resolve_href(el, base))
        .or_else(|| profile_url(&author, base))
        .unwrap_or_default();

    let date = date_el.map(inline_text).unwrap_or_default();
    let permalink = date_el
        .and_then(|el| resolve_href(el, base))
        .or_else(|| {
            base.join(&format!("/entry/{entry_id}"))
                .ok()
                .map(String::from)
        })
        .unwrap_or_default();

    Some(Entry {
        entry_id,
        author,
        author_url,
        date,
        permalink,
        content,
    })
}

/// Text of a short element such as a link, trimmed
fn inline_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Elements whose boundaries start a new line in the flattened body
const BLOCK_ELEMENTS: [&str; 14] = [
    "address", "blockquote", "dd", "div", "dl", "dt", "h1", "h2", "h3", "li", "ol", "p", "pre",
    "ul",
];

/// Text of a block element flattened to plain text
///
/// `<br>` and the boundaries of nested block elements become line breaks; inline elements such
/// as links stay on their line. Other whitespace runs collapse to one space, lines are trimmed
/// and blank lines dropped.
fn block_text(el: ElementRef) -> String {
    let mut raw = String::new();
    push_flattened(el, &mut raw);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_flattened(el: ElementRef, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&text.replace('\n', " ")),
            Node::Element(element) if element.name() == "br" => out.push('\n'),
            Node::Element(element) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_ELEMENTS.contains(&element.name());
                if block {
                    out.push('\n');
                }
                push_flattened(child_el, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn resolve_href(el: ElementRef, base: &Url) -> Option<String> {
    let href = el.value().attr("href").map(str::trim)?;
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().map(String::from)
}

fn profile_url(author: &str, base: &Url) -> Option<String> {
    if author.is_empty() {
        return None;
    }
    let nick = author.split_whitespace().collect::<Vec<_>>().join("-");
    base.join(&format!("/biri/{nick}")).ok().map(String::from)
}

/// Numeric id at the end of an `/entry/<id>` link
fn entry_id_from_href(href: &str) -> Option<String> {
    let path = href.split(['?', '#']).next()?;
    let id = path.trim_end_matches('/').rsplit_once("/entry/")?.1;
    (!id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())).then(|| id.to_string())
}
