use crate::config::{Browser, HarvestConfig};
use crate::crawlers::renderer::{FetchedPage, PageRenderer};
use crate::error::{HarvestError, Result};
use crate::utils;
use fantoccini::cookies::Cookie;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder};
use serde_json::{Map, Value, json};
use std::time::{Duration, Instant};
use tokio::time::{sleep, timeout};
use url::Url;

/// Local WebDriver endpoints tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 3] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // geckodriver / Selenium default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Renders pages in a real browser driven over WebDriver
///
/// One browser session is opened by [`WebDriverRenderer::connect`] and reused for every
/// page until [`PageRenderer::close`].
pub struct WebDriverRenderer {
    client: Client,
    settle: Duration,
    delay: Duration,
    page_timeout: Duration,
    pages_rendered: usize,
}

impl WebDriverRenderer {
    /// Opens a browser session and injects the configured session cookies
    pub async fn connect(config: &HarvestConfig) -> Result<Self> {
        let base = utils::parse_base_url(&config.base_url)?;
        let client = connect_to_webdriver(&config.webdriver_url, capabilities(config)).await?;

        let renderer = Self {
            client,
            settle: Duration::from_millis(config.settle_ms),
            delay: Duration::from_millis(config.delay_ms),
            page_timeout: Duration::from_secs(config.page_timeout_secs),
            pages_rendered: 0,
        };

        if let Some(cookie) = &config.cookie {
            renderer.inject_cookies(&base, cookie).await;
        }
        Ok(renderer)
    }

    /// Adds the cookies of a `Cookie` header to the session and returns how many were accepted
    ///
    /// WebDriver only accepts cookies for the current document's domain, so the site origin is
    /// loaded first. Neither a failed origin load nor a rejected cookie stops the run; both are
    /// logged and the run continues with whatever the browser accepted.
    async fn inject_cookies(&self, base: &Url, header: &str) -> usize {
        let cookies = session_cookies(header, base);
        if cookies.is_empty() {
            ::log::warn!("Cookie header contains no name=value pairs, nothing injected");
            return 0;
        }

        if let Err(e) = self.navigate(base).await {
            ::log::warn!("Continuing without cookies, could not load {}: {}", base, e);
            return 0;
        }

        let mut injected = 0;
        for cookie in cookies {
            let name = cookie.name().to_string();
            match self.client.add_cookie(cookie).await {
                Ok(()) => injected += 1,
                Err(e) => ::log::warn!("Failed to add cookie {}: {}", name, e),
            }
        }

        ::log::info!("Injected {} cookies for {}", injected, base.host_str().unwrap_or_default());
        injected
    }

    /// Navigates to `url`, bounded by the page-load timeout
    async fn navigate(&self, url: &Url) -> Result<()> {
        match timeout(self.page_timeout, self.client.goto(url.as_str())).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(navigation_error(e, "accessing", url)),
            Err(_) => {
                ::log::error!("Timeout loading: {}", url);
                Err(HarvestError::Timeout {
                    url: url.to_string(),
                    secs: self.page_timeout.as_secs(),
                })
            }
        }
    }
}

impl PageRenderer for WebDriverRenderer {
    async fn render(&mut self, url: &Url) -> Result<FetchedPage> {
        let started = Instant::now();
        ::log::debug!("RENDER: {}", url);

        self.navigate(url).await?;

        // Give in-page scripts time to populate the entry list
        let wait = if self.pages_rendered == 0 {
            self.settle
        } else {
            self.delay
        };
        sleep(wait).await;

        let html = self
            .client
            .source()
            .await
            .map_err(|e| navigation_error(e, "getting source for", url))?;

        let rendered_url = match self.client.current_url().await {
            Ok(current) => current,
            Err(e) => {
                ::log::debug!("Could not read current url, keeping {}: {}", url, e);
                url.clone()
            }
        };

        self.pages_rendered += 1;
        ::log::debug!(
            "Rendered {} ({} bytes) in {:.2} seconds",
            rendered_url,
            html.len(),
            started.elapsed().as_secs_f64()
        );

        Ok(FetchedPage {
            url: rendered_url,
            html,
        })
    }

    async fn close(self) -> Result<()> {
        self.client.close().await.map_err(HarvestError::Session)?;
        ::log::debug!("WebDriver session closed");
        Ok(())
    }
}

/// Builds the WebDriver capabilities for the configured browser
///
/// Headless mode only hides the window; it does not change what gets rendered.
pub fn capabilities(config: &HarvestConfig) -> Map<String, Value> {
    let mut caps = Map::new();

    match config.browser {
        Browser::Chrome => {
            let mut args = vec![
                format!("--window-size={},{}", config.window_width, config.window_height),
                format!("--lang={}", config.locale),
                format!("--user-agent={}", config.user_agent),
            ];
            if config.headless {
                args.push("--headless=new".to_string());
                args.push("--disable-gpu".to_string());
            }

            caps.insert("browserName".to_string(), json!("chrome"));
            caps.insert(
                "goog:chromeOptions".to_string(),
                json!({
                    "args": args,
                    "prefs": { "intl.accept_languages": config.locale },
                }),
            );
        }
        Browser::Firefox => {
            let mut args = vec![
                format!("--width={}", config.window_width),
                format!("--height={}", config.window_height),
            ];
            if config.headless {
                args.push("-headless".to_string());
            }

            caps.insert("browserName".to_string(), json!("firefox"));
            caps.insert(
                "moz:firefoxOptions".to_string(),
                json!({
                    "args": args,
                    "prefs": {
                        "intl.accept_languages": config.locale,
                        "general.useragent.override": config.user_agent,
                    },
                }),
            );
        }
    }

    caps
}

/// Builds one cookie per `name=value` pair, scoped to `base`'s host and path `/`
pub fn session_cookies(header: &str, base: &Url) -> Vec<Cookie<'static>> {
    let domain = base.host_str().unwrap_or_default().to_string();
    utils::parse_cookie_header(header)
        .into_iter()
        .map(|(name, value)| {
            let mut cookie = Cookie::new(name, value);
            cookie.set_domain(domain.clone());
            cookie.set_path("/");
            cookie
        })
        .collect()
}

/// Connects to the WebDriver instance, falling back to common local endpoints
async fn connect_to_webdriver(webdriver_url: &str, caps: Map<String, Value>) -> Result<Client> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(caps);

    let first_error = match builder.connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            e
        }
    };

    for url in FALLBACK_WEBDRIVER_URLS {
        if url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = builder.connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(HarvestError::Connect {
        url: webdriver_url.to_string(),
        source: first_error,
    })
}

/// Logs a failed WebDriver command and wraps it as a navigation error
fn navigation_error(error: CmdError, context: &str, url: &Url) -> HarvestError {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost session while {} {}", context, url);
    } else {
        ::log::error!("Failed {} {}: {}", context, url, error);
    }
    HarvestError::Navigation {
        url: url.to_string(),
        source: error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome_args(caps: &Map<String, Value>) -> Vec<String> {
        caps["goog:chromeOptions"]["args"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_session_cookies_scoped_to_site() {
        let base = Url::parse("https://eksisozluk.com").unwrap();
        let cookies = session_cookies("a=1; session=abc=def; broken", &base);

        let pairs: Vec<_> = cookies.iter().map(|c| (c.name(), c.value())).collect();
        assert_eq!(pairs, [("a", "1"), ("session", "abc=def")]);
        for cookie in &cookies {
            assert_eq!(cookie.domain(), Some("eksisozluk.com"));
            assert_eq!(cookie.path(), Some("/"));
        }
        assert!(session_cookies("no pairs here", &base).is_empty());
    }

    #[test]
    fn test_chrome_headless_capabilities() {
        let caps = capabilities(&HarvestConfig::default());
        assert_eq!(caps["browserName"], "chrome");

        let args = chrome_args(&caps);
        assert!(args.contains(&"--headless=new".to_string()));
        assert!(args.contains(&"--window-size=1366,800".to_string()));
        assert!(args.contains(&"--lang=tr-TR".to_string()));
        assert!(args.iter().any(|a| a.starts_with("--user-agent=Mozilla/5.0")));
    }

    #[test]
    fn test_visible_browser_drops_headless_flag() {
        let config = HarvestConfig {
            headless: false,
            ..HarvestConfig::default()
        };
        let args = chrome_args(&capabilities(&config));
        assert!(!args.iter().any(|a| a.contains("headless")));
    }

    #[test]
    fn test_firefox_capabilities() {
        let config = HarvestConfig {
            browser: Browser::Firefox,
            ..HarvestConfig::default()
        };
        let caps = capabilities(&config);
        assert_eq!(caps["browserName"], "firefox");
        assert!(caps.get("goog:chromeOptions").is_none());

        let options = &caps["moz:firefoxOptions"];
        assert_eq!(options["args"], json!(["--width=1366", "--height=800", "-headless"]));
        assert_eq!(options["prefs"]["intl.accept_languages"], "tr-TR");
    }
}
