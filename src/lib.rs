// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod harvester;
pub mod parsers;
pub mod results;
pub mod utils;
pub mod writer;

// Re-export commonly used types for convenience
pub use config::HarvestConfig;
pub use crawlers::{PageRenderer, StaticRenderer, WebDriverRenderer};
pub use error::{HarvestError, Result};
pub use harvester::Harvester;
pub use results::{Entry, HarvestOutcome, PageProgress, StopReason};

/// Harvests every entry of `topic` with `renderer`
///
/// `topic` is a slug such as `python--12345` or a full topic URL. The renderer is closed
/// before returning, whether the walk succeeded or not.
pub async fn harvest_topic<R: PageRenderer>(
    topic: &str,
    config: &HarvestConfig,
    mut renderer: R,
) -> Result<HarvestOutcome> {
    let harvester = utils::parse_base_url(&config.base_url).and_then(|base_url| {
        let start_url = utils::normalize_topic_url(topic, &base_url)?;
        Ok(Harvester::new(start_url, base_url).with_max_pages(config.max_pages))
    });

    let outcome = match harvester {
        Ok(harvester) => {
            ::log::info!("Starting scraper for: {}", harvester.start_url());
            ::log::info!(
                "Headless: {}   Delay between pages: {} ms",
                config.headless,
                config.delay_ms
            );
            if config.cookie.is_some() {
                ::log::info!("Cookie header provided: cookies were injected into the session.");
            } else {
                ::log::info!("No cookie header provided: public pages only.");
            }
            harvester.run(&mut renderer).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = renderer.close().await {
        ::log::warn!("Failed to close browser session: {}", e);
    }

    outcome
}

/// Harvests `topic` and writes the entries to `config.output`
///
/// The output file is only written after the whole walk succeeded; on any failure it is left
/// untouched.
pub async fn harvest_to_file<R: PageRenderer>(
    topic: &str,
    config: &HarvestConfig,
    renderer: R,
) -> Result<HarvestOutcome> {
    let outcome = harvest_topic(topic, config, renderer).await?;
    writer::write_entries(&config.output, &outcome.entries)?;
    Ok(outcome)
}
