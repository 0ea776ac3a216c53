use crate::config::toml_config::TomlConfig;
use crate::config::SearchConfig;
use crate::core::render::OutputFormat;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "hh-vacancies")]
#[command(about = "Fetch vacancies from the hh.ru API with salary and contact details")]
pub struct CliConfig {
    #[arg(long, help = "TOML file with [search], [api] and [rate_limit] sections")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Free-text search query (default: PHP)")]
    pub text: Option<String>,

    #[arg(long, help = "Vacancies per page, 1-100 (default: 100)")]
    pub per_page: Option<u32>,

    #[arg(long, help = "Region filter id (default: 113)")]
    pub area: Option<String>,

    #[arg(long, help = "API base URL (default: https://api.hh.ru)")]
    pub base_url: Option<String>,

    #[arg(long, help = "User-Agent sent with every request")]
    pub user_agent: Option<String>,

    #[arg(long, help = "Delay before each page request after the first, in ms")]
    pub page_delay_ms: Option<u64>,

    #[arg(long, help = "Delay before each vacancy detail request, in ms")]
    pub detail_delay_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit status logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Defaults, then the config file, then flags.
    pub fn resolve(&self) -> Result<SearchConfig> {
        let mut config = SearchConfig::default();

        if let Some(path) = &self.config {
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(text) = &self.text {
            config.search_text = text.clone();
        }
        if let Some(per_page) = self.per_page {
            config.per_page = per_page;
        }
        if let Some(area) = &self.area {
            config.area = area.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Some(ms) = self.page_delay_ms {
            config.page_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.detail_delay_ms {
            config.detail_delay = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_flags_resolves_to_defaults() {
        let cli = CliConfig::try_parse_from(["hh-vacancies"]).unwrap();
        assert_eq!(cli.resolve().unwrap(), SearchConfig::default());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[search]\ntext = \"Java\"\nper_page = 20\n")
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::try_parse_from([
            "hh-vacancies",
            "--config",
            path.as_str(),
            "--text",
            "Rust",
            "--detail-delay-ms",
            "0",
            "--format",
            "json",
        ])
        .unwrap();
        let config = cli.resolve().unwrap();

        assert_eq!(config.search_text, "Rust");
        assert_eq!(config.per_page, 20);
        assert_eq!(config.detail_delay, Duration::ZERO);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
