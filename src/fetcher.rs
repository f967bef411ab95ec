use std::time::Duration;

use serde_json::Value;
use tracing::warn;

use crate::error::FetchError;
use crate::settings::Settings;

/// Anything that can hand back one raw page of search results.
pub trait PageSource {
    fn fetch_page(
        &self,
        page_start: u32,
        category_code: &str,
        year: i32,
    ) -> Result<Value, FetchError>;
}

/// Blocking HTTP client for the category search endpoint.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
    page_size: u32,
}

impl HttpSource {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(HttpSource {
            client,
            base_url: settings.base_url.clone(),
            page_size: settings.page_size,
        })
    }

    fn request(
        &self,
        page_start: u32,
        category_code: &str,
        year: i32,
    ) -> Result<reqwest::blocking::Request, FetchError> {
        let request = self
            .client
            .get(&self.base_url)
            .query(&[
                ("pageStart", page_start.to_string()),
                ("pageNum", self.page_size.to_string()),
                ("contDisplayType", category_code.to_string()),
                ("mediaYear", year.to_string()),
            ])
            .build()?;
        Ok(request)
    }
}

impl PageSource for HttpSource {
    fn fetch_page(
        &self,
        page_start: u32,
        category_code: &str,
        year: i32,
    ) -> Result<Value, FetchError> {
        let request = self.request(page_start, category_code, year)?;
        let response = self.client.execute(request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Fetch one page, retrying every failure up to `max_retries` more times.
/// `None` means the page is given up on; callers treat it as empty.
pub fn fetch_with_retry(
    source: &dyn PageSource,
    max_retries: u32,
    page_start: u32,
    category_code: &str,
    year: i32,
) -> Option<Value> {
    for attempt in 0..=max_retries {
        match source.fetch_page(page_start, category_code, year) {
            Ok(page) => return Some(page),
            Err(e) if attempt < max_retries => {
                warn!(
                    "Request failed (page {}, year {}), retry {}/{}: {}",
                    page_start,
                    year,
                    attempt + 1,
                    max_retries,
                    e
                );
            }
            Err(e) => {
                warn!(
                    "Request failed (page {}, year {}), giving up after {} retries: {}",
                    page_start, year, max_retries, e
                );
            }
        }
    }
    None
}
