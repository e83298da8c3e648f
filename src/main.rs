use clap::Parser;
use eksi_harvest::config::{EnvOverrides, HarvestConfig};
use eksi_harvest::{HarvestError, WebDriverRenderer};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging, `info` unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("{}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                ::log::error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), HarvestError> {
    let file_config = match &args.config {
        Some(path) => HarvestConfig::from_file(path)?,
        None => HarvestConfig::default(),
    };
    let config = file_config.resolve(EnvOverrides::from_env(), args.overrides());

    println!("Note: rendering requires a WebDriver server (e.g., ChromeDriver or geckodriver).");
    println!("Set WEBDRIVER_URL or --webdriver-url if not using {}", config.webdriver_url);

    let start_time = std::time::Instant::now();
    let renderer = WebDriverRenderer::connect(&config).await?;
    let outcome = eksi_harvest::harvest_to_file(&args.topic, &config, renderer).await?;

    ::log::info!(
        "Scraping finished. {} entries from {} pages saved -> {} ({:.2} seconds)",
        outcome.entries.len(),
        outcome.pages.len(),
        config.output.display(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
