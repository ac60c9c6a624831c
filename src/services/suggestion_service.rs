//! Optional generative seeding of date ideas.
//!
//! A text-generation provider is asked for a handful of places. Whatever goes
//! wrong (no key, quota, timeout, prose instead of JSON) the step still hands
//! back a small placeholder list so the rest of the pipeline can run.

use crate::config::GenerativeConfig;
use crate::error::ProviderError;
use crate::models::candidate::{Candidate, Coordinates};
use crate::services::budget_service::Budget;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

const SYSTEM_PROMPT: &str = "You are a helpful assistant for planning date itineraries.";
const MAX_SUGGESTIONS: usize = 5;
const DEFAULT_CATEGORY: &str = "General";

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat completions client
#[derive(Clone)]
pub struct OpenAiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &GenerativeConfig) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.7,
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Parse("No content in completion".to_string()))
    }
}

/// A place named by the generative provider
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuggestedPlace {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl SuggestedPlace {
    fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            category: Some(DEFAULT_CATEGORY.to_string()),
            coordinates: None,
        }
    }

    pub fn into_candidate(self) -> Candidate {
        let category = self
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let mut candidate = Candidate::seed(self.name, category);
        if let Some(coordinates) = self.coordinates {
            candidate.coordinates = coordinates;
        }
        candidate
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SuggestionPayload {
    List(Vec<SuggestedPlace>),
    Wrapped { places: Vec<SuggestedPlace> },
}

fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid regex"))
}

/// Parse a provider reply into at most five named places
pub fn parse_suggestions(text: &str) -> Result<Vec<SuggestedPlace>, ProviderError> {
    let body = code_fence()
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
        .trim();

    let payload: SuggestionPayload =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    let places = match payload {
        SuggestionPayload::List(places) | SuggestionPayload::Wrapped { places } => places,
    };

    let places: Vec<SuggestedPlace> = places
        .into_iter()
        .filter(|place| !place.name.trim().is_empty())
        .take(MAX_SUGGESTIONS)
        .collect();

    if places.is_empty() {
        return Err(ProviderError::Parse("Reply named no places".to_string()));
    }

    Ok(places)
}

/// Stand-in list used whenever the provider cannot give us anything usable
pub fn placeholder_suggestions() -> Vec<SuggestedPlace> {
    vec![
        SuggestedPlace::placeholder("Fallback Place 1"),
        SuggestedPlace::placeholder("Fallback Place 2"),
        SuggestedPlace::placeholder("Fallback Place 3"),
    ]
}

pub fn build_prompt(city: &str, interests: &[String], budget: Budget) -> String {
    format!(
        "Generate a date itinerary in {} for someone interested in {} with a budget of {}. \
         Provide a list of 3-5 places. Respond with only a JSON array of objects with \
         \"name\" and \"category\" fields.",
        city,
        interests.join(", "),
        budget
    )
}

pub struct GenerativeSuggester {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl GenerativeSuggester {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    async fn request_suggestions(
        &self,
        city: &str,
        interests: &[String],
        budget: Budget,
    ) -> Result<Vec<SuggestedPlace>, ProviderError> {
        let prompt = build_prompt(city, interests, budget);
        let text = tokio::time::timeout(
            self.timeout,
            self.generator.complete(SYSTEM_PROMPT, &prompt),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.timeout.as_millis()))??;
        parse_suggestions(&text)
    }

    /// Seed candidates for the pipeline. Never fails.
    pub async fn suggest(
        &self,
        city: &str,
        interests: &[String],
        budget: Budget,
    ) -> Vec<Candidate> {
        let places = match self.request_suggestions(city, interests, budget).await {
            Ok(places) => {
                log::info!("Generative provider suggested {} places", places.len());
                places
            }
            Err(err) => {
                log::warn!("Generative suggestions unavailable, using placeholders: {}", err);
                placeholder_suggestions()
            }
        };

        places.into_iter().map(SuggestedPlace::into_candidate).collect()
    }
}
