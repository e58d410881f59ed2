use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::parser::node::{Markup, MarkupError};

const DEFAULT_URL: &str = "https://docs.parfin.io/#tag/Blockchain";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Runtime settings: defaults, then `redoc_catalog.toml`, then `CATALOG_*` env vars.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub url: String,
    pub navigation_timeout_secs: u64,
    /// Pause between snapshots while waiting for sections to show up.
    pub settle_delay_ms: u64,
    pub selector_timeout_ms: u64,
    pub max_retries: u32,
    /// First retry delay; doubles on every further attempt.
    pub retry_backoff_ms: u64,
    pub user_agent: String,
    pub section_prefix: String,
    pub method_selector: String,
    pub summary_selector: String,
    pub description_selector: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            navigation_timeout_secs: 120,
            settle_delay_ms: 4000,
            selector_timeout_ms: 15_000,
            max_retries: 3,
            retry_backoff_ms: 2000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            section_prefix: "tag/".to_string(),
            method_selector: "span.http-verb".to_string(),
            summary_selector: "h2".to_string(),
            description_selector: "div p".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("redoc_catalog").required(false))
                .add_source(Environment::with_prefix("CATALOG").try_parsing(true)),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn markup(&self) -> Result<Markup, MarkupError> {
        Markup::new(
            &self.section_prefix,
            &self.method_selector,
            &self.summary_selector,
            &self.description_selector,
        )
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        Settings::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
            .unwrap()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let s = Settings::from_builder(Config::builder()).unwrap();
        assert_eq!(s.url, DEFAULT_URL);
        assert_eq!(s.settle_delay(), Duration::from_millis(4000));
        assert_eq!(s.selector_timeout(), Duration::from_secs(15));
        assert_eq!(s.navigation_timeout(), Duration::from_secs(120));
        assert_eq!(s.max_retries, 3);
        assert_eq!(s.retry_backoff(), Duration::from_millis(2000));
        assert!(s.markup().is_ok());
    }

    #[test]
    fn file_overrides_some_fields() {
        let s = from_toml(
            r#"
            url = "http://localhost:8080/docs"
            settle_delay_ms = 250
            method_selector = "span.verb"
            "#,
        );
        assert_eq!(s.url, "http://localhost:8080/docs");
        assert_eq!(s.settle_delay_ms, 250);
        assert_eq!(s.method_selector, "span.verb");
        assert_eq!(s.section_prefix, "tag/");
    }

    #[test]
    fn bad_selector_surfaces_at_markup() {
        let s = from_toml(r#"summary_selector = "h2[""#);
        assert!(s.markup().is_err());
    }
}
