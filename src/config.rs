use crate::error::{HarvestError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Browser family requested from the WebDriver server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
}

/// Configuration for a harvest run
///
/// Resolved once at start-up and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Site origin that topic slugs and relative links resolve against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the JSON output file
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Optional upper bound on visited pages
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// Wait after each page navigation following the first, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Wait after the first navigation, in milliseconds
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Page-load timeout, in seconds
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Raw `Cookie` header injected into the browser session
    #[serde(default)]
    pub cookie: Option<String>,

    #[serde(default = "default_headless")]
    pub headless: bool,

    #[serde(default)]
    pub browser: Browser,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

fn default_base_url() -> String {
    "https://eksisozluk.com".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("entries.json")
}

fn default_delay_ms() -> u64 {
    1200
}

fn default_settle_ms() -> u64 {
    800
}

fn default_page_timeout_secs() -> u64 {
    30
}

fn default_headless() -> bool {
    true
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36"
        .to_string()
}

fn default_locale() -> String {
    "tr-TR".to_string()
}

fn default_window_width() -> u32 {
    1366
}

fn default_window_height() -> u32 {
    800
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            output: default_output(),
            max_pages: None,
            delay_ms: default_delay_ms(),
            settle_ms: default_settle_ms(),
            page_timeout_secs: default_page_timeout_secs(),
            cookie: None,
            headless: default_headless(),
            browser: Browser::default(),
            webdriver_url: default_webdriver_url(),
            user_agent: default_user_agent(),
            locale: default_locale(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

/// Values that take precedence over a config file
///
/// `None` leaves the underlying value untouched.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub output: Option<PathBuf>,
    pub max_pages: Option<u32>,
    pub delay_ms: Option<u64>,
    pub cookie: Option<String>,
    pub headless: Option<bool>,
    pub browser: Option<Browser>,
    pub webdriver_url: Option<String>,
}

/// Values read from the process environment at start-up
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// `EKSI_COOKIE`
    pub cookie: Option<String>,
    /// `WEBDRIVER_URL`
    pub webdriver_url: Option<String>,
}

impl EnvOverrides {
    /// Reads the supported variables, ignoring empty values
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            cookie: read("EKSI_COOKIE"),
            webdriver_url: read("WEBDRIVER_URL"),
        }
    }
}

impl HarvestConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let read_err = |source| HarvestError::ConfigRead {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(read_err)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(read_err)?;

        serde_json::from_str(&contents).map_err(|source| HarvestError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies environment values, then command-line values on top
    pub fn resolve(mut self, env: EnvOverrides, flags: ConfigOverrides) -> Self {
        if let Some(cookie) = env.cookie {
            self.cookie = Some(cookie);
        }
        if let Some(url) = env.webdriver_url {
            self.webdriver_url = url;
        }

        if let Some(base_url) = flags.base_url {
            self.base_url = base_url;
        }
        if let Some(output) = flags.output {
            self.output = output;
        }
        if flags.max_pages.is_some() {
            self.max_pages = flags.max_pages;
        }
        if let Some(delay_ms) = flags.delay_ms {
            self.delay_ms = delay_ms;
        }
        if let Some(cookie) = flags.cookie {
            self.cookie = Some(cookie);
        }
        if let Some(headless) = flags.headless {
            self.headless = headless;
        }
        if let Some(browser) = flags.browser {
            self.browser = browser;
        }
        if let Some(url) = flags.webdriver_url {
            self.webdriver_url = url;
        }

        // A ceiling of zero means "no ceiling"
        self.max_pages = self.max_pages.filter(|&max| max > 0);
        self.cookie = self.cookie.filter(|c| !c.trim().is_empty());
        self
    }
}
