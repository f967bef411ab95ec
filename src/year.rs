use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::extract::extract;
use crate::fetcher::{fetch_with_retry, PageSource};
use crate::record::Record;
use crate::settings::Settings;

/// Walk every page of one (category, year) pair and collect its records.
///
/// Page 1 decides everything: if it fails or comes back empty the year is
/// treated as having no data, otherwise its `resultNum` fixes how many more
/// pages are requested. Later pages that fail or are empty are skipped.
pub fn process_year(
    source: &dyn PageSource,
    settings: &Settings,
    category_code: &str,
    year: i32,
) -> Vec<Record> {
    let fetch =
        |page: u32| fetch_with_retry(source, settings.max_retries, page, category_code, year);

    let Some(first) = fetch(1) else {
        return Vec::new();
    };
    let (mut records, result_num) = extract(Some(&first), settings.max_results);
    if records.is_empty() {
        debug!(year, "No data");
        return records;
    }

    let page_count = total_pages(result_num, settings.page_size);
    info!(year, result_num, page_count, "Fetching year");

    let pb = progress_bar(page_count);
    pb.inc(1);

    for page in 2..=page_count {
        pb.inc(1);
        let Some(json) = fetch(page) else {
            continue;
        };
        let (extracted, _) = extract(Some(&json), settings.max_results);
        if extracted.is_empty() {
            info!(year, page, "Page returned no usable data");
            continue;
        }
        debug!(year, page, count = extracted.len(), "Page fetched");
        records.extend(extracted);
    }

    pb.finish_and_clear();
    records
}

pub fn total_pages(result_num: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    result_num.div_ceil(u64::from(page_size)).min(u64::from(u32::MAX)) as u32
}

fn progress_bar(total_pages: u32) -> ProgressBar {
    let pb = ProgressBar::new(u64::from(total_pages));
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} page {pos}/{len}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}
