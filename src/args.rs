use clap::{Parser, ValueEnum};
use eksi_harvest::config::{Browser, ConfigOverrides};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eksi-harvest")]
#[command(about = "Collects every entry of an Ekşi Sözlük topic into a JSON file")]
#[command(version)]
pub struct Args {
    /// Topic slug or full topic URL (e.g. 'python--12345' or the full URL)
    pub topic: String,

    /// Output JSON filename [default: entries.json]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of pages to visit
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: Option<u32>,

    /// Delay between page navigations in milliseconds [default: 1200]
    #[arg(long)]
    pub delay: Option<u64>,

    /// Single-line Cookie header (falls back to the EKSI_COOKIE environment variable)
    #[arg(long)]
    pub cookie: Option<String>,

    /// Run with a visible browser window
    #[arg(long)]
    pub no_headless: bool,

    /// JSON configuration file; command-line flags take precedence over it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// WebDriver server URL (falls back to WEBDRIVER_URL, then http://localhost:4444)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Browser requested from the WebDriver server
    #[arg(long, value_enum)]
    pub browser: Option<BrowserArg>,

    /// Site origin to scrape [default: https://eksisozluk.com]
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BrowserArg {
    Chrome,
    Firefox,
}

impl From<BrowserArg> for Browser {
    fn from(arg: BrowserArg) -> Self {
        match arg {
            BrowserArg::Chrome => Browser::Chrome,
            BrowserArg::Firefox => Browser::Firefox,
        }
    }
}

impl Args {
    /// Values given on the command line, to be applied over file and environment config
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            output: self.output.clone(),
            max_pages: self.max_pages,
            delay_ms: self.delay,
            cookie: self.cookie.clone(),
            headless: self.no_headless.then_some(false),
            browser: self.browser.map(Browser::from),
            webdriver_url: self.webdriver_url.clone(),
        }
    }
}
