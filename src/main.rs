mod catalog;
mod crawler;
mod error;
mod extract;
mod fetcher;
mod merge;
mod record;
mod settings;
mod store;
mod year;

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use tracing::info;

use crawler::Crawler;
use fetcher::HttpSource;
use settings::Settings;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let settings = Settings::load();
    info!(settings = ?settings, "Starting catalog sync");

    let t0 = Instant::now();

    let categories = catalog::load_categories(&settings.catalog_path);
    if categories.is_empty() {
        println!(
            "Could not load categories from {:?}, exiting.",
            settings.catalog_path
        );
        return Ok(());
    }

    let end_year = chrono::Local::now().year();
    std::fs::create_dir_all(&settings.data_dir)
        .with_context(|| format!("Failed to create {:?}", settings.data_dir))?;

    let source = HttpSource::new(&settings)?;
    let crawler = Crawler::new(&source, &settings);

    crawler.run_all(&categories, settings.start_year, end_year);

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
