//! Configuration loader and validator for the article SSR resolver.
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "NEWSROOM_API_URL";

static API_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"/api/?$").expect("valid regex"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub api: Api,
    pub site: Site,
    #[serde(default)]
    pub revalidate: Revalidate,
}

/// Upstream REST API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Api {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_posts_limit")]
    pub posts_limit: u32,
}

/// Site identity used when synthesizing metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Site {
    pub name: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_description")]
    pub default_description: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Suggested cache windows, in seconds, per upstream endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Revalidate {
    pub categories: u64,
    pub tags: u64,
    pub post: u64,
    pub posts: u64,
    pub posts_by_category: u64,
}

impl Default for Revalidate {
    fn default() -> Self {
        Self {
            categories: 600,
            tags: 600,
            post: 180,
            posts: 300,
            posts_by_category: 300,
        }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_posts_limit() -> u32 {
    50
}

fn default_locale() -> String {
    "fr_FR".into()
}

fn default_description() -> String {
    "Read the latest news and articles.".into()
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.api.timeout_ms)
    }

    /// Public origin used for canonical URLs: the API base URL with a trailing
    /// `/api` segment removed.
    pub fn public_base_url(&self) -> String {
        public_base_url(&self.api.base_url)
    }
}

/// Strip a trailing `/api` (and any trailing slash) from an API origin.
pub fn public_base_url(api_base: &str) -> String {
    let trimmed = api_base.trim();
    let stripped = API_SUFFIX.replace(trimmed, "");
    stripped.trim_end_matches('/').to_string()
}

/// Load configuration from a YAML file, apply the environment override and
/// validate it.
/// - If `path` is None, uses `config.yaml` in the current working directory.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.yaml"));
    let content = fs::read_to_string(path)?;
    let mut cfg: Config = serde_yaml::from_str(&content)?;
    apply_env_override(&mut cfg, std::env::var(API_URL_ENV).ok());
    validate(&cfg)?;
    Ok(cfg)
}

fn apply_env_override(cfg: &mut Config, value: Option<String>) {
    if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
        cfg.api.base_url = url.trim().to_string();
    }
}

/// Validate a configuration instance.
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let base = cfg.api.base_url.trim();
    if base.is_empty() {
        return Err(ConfigError::Invalid("api.base_url must be non-empty"));
    }
    match Url::parse(base) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => {
            return Err(ConfigError::Invalid(
                "api.base_url must be an absolute http(s) URL",
            ))
        }
    }
    if cfg.api.timeout_ms == 0 {
        return Err(ConfigError::Invalid("api.timeout_ms must be > 0"));
    }
    if cfg.api.posts_limit == 0 {
        return Err(ConfigError::Invalid("api.posts_limit must be > 0"));
    }

    if cfg.site.name.trim().is_empty() {
        return Err(ConfigError::Invalid("site.name must be non-empty"));
    }
    if cfg.site.locale.trim().is_empty() {
        return Err(ConfigError::Invalid("site.locale must be non-empty"));
    }

    Ok(())
}

/// Returns a complete example YAML configuration.
pub fn example() -> &'static str {
    r#"api:
  base_url: "https://www.example.com/api"
  timeout_ms: 10000
  posts_limit: 50

site:
  name: "Le Journal"
  locale: "fr_FR"
  default_description: "Toute l'actualité, analysée et expliquée."
  logo_url: "https://www.example.com/logo.png"

revalidate:
  categories: 600
  tags: 600
  post: 180
  posts: 300
  posts_by_category: 300
"#
}
