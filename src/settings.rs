use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

const BASE_URL: &str = "https://jadeite.migu.cn/search/v3/category";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const TIMEOUT_SECS: u64 = 10;
const PAGE_SIZE: u32 = 50;
const MAX_RESULTS: u64 = 1500;
const MAX_RETRIES: u32 = 3;
const DATA_DIR: &str = "data";
const CATALOG_PATH: &str = "catalog.json";
const START_YEAR: i32 = 1900;

/// Run-wide knobs. Defaults are the compile-time constants above; any field
/// can be overridden through a `CATALOG_*` environment variable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub page_size: u32,
    pub max_results: u64,
    pub max_retries: u32,
    pub data_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub start_year: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout_secs: TIMEOUT_SECS,
            page_size: PAGE_SIZE,
            max_results: MAX_RESULTS,
            max_retries: MAX_RETRIES,
            data_dir: PathBuf::from(DATA_DIR),
            catalog_path: PathBuf::from(CATALOG_PATH),
            start_year: START_YEAR,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        let built = config::Config::builder()
            .add_source(config::Environment::with_prefix("CATALOG").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>());

        match built {
            Ok(settings) => settings.validated(),
            Err(e) => {
                warn!("Ignoring invalid CATALOG_* overrides: {}", e);
                Settings::default()
            }
        }
    }

    fn validated(mut self) -> Self {
        if self.page_size == 0 {
            warn!("CATALOG_PAGE_SIZE must be positive, using {}", PAGE_SIZE);
            self.page_size = PAGE_SIZE;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.page_size, 50);
        assert_eq!(s.max_retries, 3);
        assert_eq!(s.max_results, 1500);
        assert_eq!(s.start_year, 1900);
        assert_eq!(s.data_dir, PathBuf::from("data"));
        assert!(s.base_url.ends_with("/search/v3/category"));
    }

    #[test]
    fn zero_page_size_falls_back_to_default() {
        let s = Settings {
            page_size: 0,
            max_retries: 1,
            ..Settings::default()
        }
        .validated();
        assert_eq!(s.page_size, 50);
        assert_eq!(s.max_retries, 1);
    }

    #[test]
    fn partial_source_keeps_other_defaults() {
        let s: Settings = config::Config::builder()
            .set_override("max_retries", 1)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(s.max_retries, 1);
        assert_eq!(s.page_size, 50);
        assert_eq!(s.catalog_path, PathBuf::from("catalog.json"));
    }
}
