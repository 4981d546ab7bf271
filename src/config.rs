use serde::Deserialize;
use std::time::Duration;

use crate::services::{providers::tmdb::TmdbConfig, RecommendationSettings};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key (v3) or read access token (v4)
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with a poster path to build an image URL
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Locale sent with every upstream request
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Per-call upstream timeout, in seconds
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w200".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tmdb(&self) -> TmdbConfig {
        TmdbConfig {
            api_key: self.tmdb_api_key.clone(),
            api_url: self.tmdb_api_url.trim_end_matches('/').to_string(),
            language: self.tmdb_language.clone(),
            timeout: Duration::from_secs(self.upstream_timeout_secs),
        }
    }

    pub fn recommendation_settings(&self) -> RecommendationSettings {
        RecommendationSettings {
            image_base_url: self.tmdb_image_base_url.trim_end_matches('/').to_string(),
            ..RecommendationSettings::default()
        }
    }
}
