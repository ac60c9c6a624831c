//! Environment-driven settings for the planner and its providers.
//!
//! Everything has a default except the provider API keys. Without a Yelp key
//! the directory reports itself unavailable on every call and the pipeline
//! runs on fallbacks; without an OpenAI key the generative step is skipped.

use crate::services::itinerary_generation_service::ItineraryGenerationConfig;
use std::{env, str::FromStr, time::Duration};
use url::Url;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

const YELP_API_URL: &str = "https://api.yelp.com/v3";
const YELP_RESULT_LIMIT: u32 = 50;
const YELP_TIMEOUT_SECS: u64 = 10;

const OPENAI_API_URL: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "gpt-4o-mini-2024-07-18";
const OPENAI_TIMEOUT_SECS: u64 = 15;

const ITINERARY_MAX_ITEMS: usize = 5;

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Results requested per query, 1..=50 (the provider's ceiling)
    pub result_limit: u32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct GenerativeConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub host: String,
    pub port: u16,
    pub directory: DirectoryConfig,
    /// `None` disables the generative step
    pub generative: Option<GenerativeConfig>,
    pub max_items: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: YELP_API_URL.to_string(),
            result_limit: YELP_RESULT_LIMIT,
            timeout: Duration::from_secs(YELP_TIMEOUT_SECS),
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Self {
        let directory = DirectoryConfig {
            api_key: non_empty_var("YELP_API_KEY"),
            base_url: url_var("YELP_API_URL", YELP_API_URL),
            result_limit: parsed_var("YELP_RESULT_LIMIT", YELP_RESULT_LIMIT)
                .clamp(1, YELP_RESULT_LIMIT),
            timeout: Duration::from_secs(parsed_var("YELP_TIMEOUT_SECS", YELP_TIMEOUT_SECS)),
        };

        let generative = non_empty_var("OPENAI_API_KEY").map(|api_key| GenerativeConfig {
            api_key,
            base_url: url_var("OPENAI_API_URL", OPENAI_API_URL),
            model: non_empty_var("OPENAI_MODEL").unwrap_or_else(|| OPENAI_MODEL.to_string()),
            timeout: Duration::from_secs(parsed_var("OPENAI_TIMEOUT_SECS", OPENAI_TIMEOUT_SECS)),
        });

        Self {
            host: non_empty_var("HOST").unwrap_or_else(|| HOST.to_string()),
            port: parsed_var("PORT", PORT),
            directory,
            generative,
            max_items: parsed_var("ITINERARY_MAX_ITEMS", ITINERARY_MAX_ITEMS).max(1),
        }
    }

    /// Pipeline settings derived from the provider settings
    pub fn generation_config(&self) -> ItineraryGenerationConfig {
        let mut config = ItineraryGenerationConfig {
            max_items: self.max_items,
            directory_limit: self.directory.result_limit,
            directory_timeout: self.directory.timeout,
            ..ItineraryGenerationConfig::default()
        };
        if let Some(generative) = &self.generative {
            config.generative_timeout = generative.timeout;
        }
        config
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parsed_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn url_var(key: &str, default: &str) -> String {
    match non_empty_var(key) {
        Some(value) => match Url::parse(&value) {
            Ok(_) => value.trim_end_matches('/').to_string(),
            Err(err) => {
                log::warn!("{} is not a valid URL ({}); using {}", key, err, default);
                default.to_string()
            }
        },
        None => default.to_string(),
    }
}
