#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{HarvestError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.hh.ru";
pub const DEFAULT_SEARCH_TEXT: &str = "PHP";
/// The API refuses pages larger than this.
pub const MAX_PER_PAGE: u32 = 100;
/// Region 113 is the whole of Russia.
pub const DEFAULT_AREA: &str = "113";
pub const DEFAULT_USER_AGENT: &str = "HH Vacancy Fetcher/1.0";
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(200);
pub const DEFAULT_DETAIL_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a harvest run needs to know. Passed explicitly into the
/// pagination driver and the enricher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub base_url: String,
    pub search_text: String,
    pub per_page: u32,
    pub area: String,
    pub user_agent: String,
    pub page_delay: Duration,
    pub detail_delay: Duration,
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_text: DEFAULT_SEARCH_TEXT.to_string(),
            per_page: MAX_PER_PAGE,
            area: DEFAULT_AREA.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_delay: DEFAULT_PAGE_DELAY,
            detail_delay: DEFAULT_DETAIL_DELAY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SearchConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_delays(mut self, page_delay: Duration, detail_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self.detail_delay = detail_delay;
        self
    }

    /// `{base}/vacancies?text=..&page=..&per_page=..&area=..`
    pub fn vacancies_url(&self, page: u32) -> Result<Url> {
        let mut url = self.endpoint(&["vacancies"])?;
        url.query_pairs_mut()
            .append_pair("text", &self.search_text)
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &self.per_page.to_string())
            .append_pair("area", &self.area);
        Ok(url)
    }

    /// `{base}/vacancies/{id}`
    pub fn vacancy_url(&self, id: &str) -> Result<Url> {
        self.endpoint(&["vacancies", id])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| HarvestError::ConfigError {
            message: format!("invalid base URL {}: {}", self.base_url, e),
        })?;
        url.path_segments_mut()
            .map_err(|_| HarvestError::ConfigError {
                message: format!("base URL {} cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Validate for SearchConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.base_url)?;
        validate_non_empty_string("search.text", &self.search_text)?;
        validate_range("search.per_page", self.per_page, 1, MAX_PER_PAGE)?;
        validate_non_empty_string("search.area", &self.area)?;
        validate_non_empty_string("api.user_agent", &self.user_agent)?;
        validate_positive_number("api.timeout_seconds", self.timeout.as_secs(), 1)?;
        Ok(())
    }
}
