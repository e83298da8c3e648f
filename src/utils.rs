use crate::error::{HarvestError, Result};
use url::Url;

/// Normalizes a topic slug or full topic URL to the first page of the topic on `base`
///
/// Only the path of a full URL is kept; query and fragment are replaced by `?p=1`.
pub fn normalize_topic_url(topic: &str, base: &Url) -> Result<Url> {
    let topic = topic.trim();
    let path = if topic.starts_with("http://") || topic.starts_with("https://") {
        let parsed = Url::parse(topic).map_err(|e| HarvestError::invalid_url(topic, e))?;
        parsed.path().trim_matches('/').to_string()
    } else {
        topic.trim_matches('/').to_string()
    };

    if path.is_empty() {
        return Err(HarvestError::InvalidTopic(topic.to_string()));
    }

    let mut url = base
        .join(&format!("/{path}"))
        .map_err(|e| HarvestError::invalid_url(&path, e))?;
    url.set_query(Some("p=1"));
    Ok(url)
}

/// Parses a base URL, used for the site origin
pub fn parse_base_url(base: &str) -> Result<Url> {
    Url::parse(base).map_err(|e| HarvestError::invalid_url(base, e))
}

/// Splits a single-line `Cookie` header into `(name, value)` pairs
///
/// Parts without `=` are ignored.
pub fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|part| part.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://eksisozluk.com").unwrap()
    }

    #[test]
    fn test_normalize_slug() {
        let url = normalize_topic_url("python--12345", &base()).unwrap();
        assert_eq!(url.as_str(), "https://eksisozluk.com/python--12345?p=1");

        let url = normalize_topic_url(" /python--12345/ ", &base()).unwrap();
        assert_eq!(url.as_str(), "https://eksisozluk.com/python--12345?p=1");
    }

    #[test]
    fn test_normalize_full_url_resets_page() {
        let url =
            normalize_topic_url("https://eksisozluk.com/python--12345?p=7#entry", &base()).unwrap();
        assert_eq!(url.as_str(), "https://eksisozluk.com/python--12345?p=1");
    }

    #[test]
    fn test_normalize_full_url_uses_configured_base() {
        let base = Url::parse("http://127.0.0.1:8080").unwrap();
        let url = normalize_topic_url("https://eksisozluk.com/rust--999", &base).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/rust--999?p=1");
    }

    #[test]
    fn test_normalize_rejects_blank_topic() {
        assert!(matches!(
            normalize_topic_url("  / ", &base()),
            Err(HarvestError::InvalidTopic(_))
        ));
        assert!(matches!(
            normalize_topic_url("https://eksisozluk.com/", &base()),
            Err(HarvestError::InvalidTopic(_))
        ));
    }

    #[test]
    fn test_parse_cookie_header() {
        let pairs = parse_cookie_header("a=1; session = abc=def ;broken; =x; last=");
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("session".to_string(), "abc=def".to_string()),
                ("last".to_string(), String::new()),
            ]
        );
        assert!(parse_cookie_header("").is_empty());
    }
}
