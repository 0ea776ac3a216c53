use crate::config::SearchConfig;
use crate::utils::error::{HarvestError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Optional file layer between the built-in defaults and the command line.
/// Every key may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub search: Option<SearchSection>,
    pub api: Option<ApiSection>,
    pub rate_limit: Option<RateLimitSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSection {
    pub text: Option<String>,
    pub per_page: Option<u32>,
    pub area: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateLimitSection {
    pub page_delay_ms: Option<u64>,
    pub detail_delay_ms: Option<u64>,
}

impl TomlConfig {
    /// Reads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| HarvestError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HarvestError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HarvestError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlays every key present in the file onto `config`.
    pub fn apply_to(&self, config: &mut SearchConfig) {
        if let Some(search) = &self.search {
            if let Some(text) = &search.text {
                config.search_text = text.clone();
            }
            if let Some(per_page) = search.per_page {
                config.per_page = per_page;
            }
            if let Some(area) = &search.area {
                config.area = area.clone();
            }
        }

        if let Some(api) = &self.api {
            if let Some(base_url) = &api.base_url {
                config.base_url = base_url.clone();
            }
            if let Some(user_agent) = &api.user_agent {
                config.user_agent = user_agent.clone();
            }
            if let Some(timeout) = api.timeout_seconds {
                config.timeout = Duration::from_secs(timeout);
            }
        }

        if let Some(rate_limit) = &self.rate_limit {
            if let Some(ms) = rate_limit.page_delay_ms {
                config.page_delay = Duration::from_millis(ms);
            }
            if let Some(ms) = rate_limit.detail_delay_ms {
                config.detail_delay = Duration::from_millis(ms);
            }
        }
    }

}
