use anyhow::Result;
use tracing::{error, info};

use crate::fetcher::PageSource;
use crate::merge::{merge, sort_records};
use crate::record::Category;
use crate::settings::Settings;
use crate::store::DatasetStore;
use crate::year::process_year;

/// Counts reported after one category has been crawled and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub existing: usize,
    pub fetched: usize,
    pub merged: usize,
    pub saved: bool,
}

impl CategorySummary {
    pub fn added(&self) -> usize {
        self.merged.saturating_sub(self.existing)
    }
}

pub struct Crawler<'a> {
    source: &'a dyn PageSource,
    settings: &'a Settings,
    store: DatasetStore,
}

impl<'a> Crawler<'a> {
    pub fn new(source: &'a dyn PageSource, settings: &'a Settings) -> Self {
        Crawler {
            source,
            settings,
            store: DatasetStore::new(&settings.data_dir),
        }
    }

    /// Crawl every category in order. A failing category is logged and
    /// does not stop the ones after it.
    pub fn run_all(
        &self,
        categories: &[Category],
        start_year: i32,
        end_year: i32,
    ) -> Vec<Result<CategorySummary>> {
        let mut outcomes = Vec::with_capacity(categories.len());
        for category in categories {
            println!("\n{}", "=".repeat(50));
            println!("Category: {} (code {})", category.name, category.code);
            println!("{}", "=".repeat(50));

            let outcome = self.run_category(category, start_year, end_year);
            match &outcome {
                Ok(s) => println!(
                    "{}: {} existing, {} fetched, {} after merge ({} new){}",
                    category.name,
                    s.existing,
                    s.fetched,
                    s.merged,
                    s.added(),
                    if s.saved { "" } else { ", nothing saved" }
                ),
                Err(e) => error!("Category {} failed: {:#}", category.name, e),
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Read-merge-write one category over `[start_year, end_year]`.
    ///
    /// All years are fetched into a single batch and merged once at the end;
    /// the persisted file is only touched after the merge succeeds.
    pub fn run_category(
        &self,
        category: &Category,
        start_year: i32,
        end_year: i32,
    ) -> Result<CategorySummary> {
        let existing = self.store.load(&category.name);
        info!(
            category = %category.name,
            existing = existing.len(),
            "Loaded existing data"
        );

        info!(
            category = %category.name,
            code = %category.code,
            "Crawling years {}-{}",
            start_year,
            end_year
        );
        let mut fresh = Vec::new();
        for year in start_year..=end_year {
            let year_records = process_year(self.source, self.settings, &category.code, year);
            if !year_records.is_empty() {
                info!(year, count = year_records.len(), "Year done");
            }
            fresh.extend(year_records);
        }

        let mut merged = merge(&existing, &fresh);
        sort_records(&mut merged);

        let summary = CategorySummary {
            existing: existing.len(),
            fetched: fresh.len(),
            merged: merged.len(),
            saved: self.store.save(&category.name, &merged)?,
        };
        info!(
            category = %category.name,
            merged = summary.merged,
            added = summary.added(),
            "Merged"
        );
        Ok(summary)
    }
}
