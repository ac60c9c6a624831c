#![allow(dead_code)]

use actix_web::{web, App};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cupid_api::config::{DirectoryConfig, PlannerConfig};
use cupid_api::error::ProviderError;
use cupid_api::models::candidate::{Candidate, Coordinates};
use cupid_api::routes;
use cupid_api::services::directory_service::{BusinessDirectory, DirectoryQuery};
use cupid_api::services::itinerary_generation_service::{
    ItineraryGenerationConfig, ItineraryGenerator,
};
use cupid_api::services::suggestion_service::TextGenerator;

/// In-process stand-in for the business directory
#[derive(Default)]
pub struct FakeDirectory {
    listings: Vec<Candidate>,
    named: HashMap<String, Candidate>,
    fail: bool,
    delay: Option<Duration>,
    queries: Mutex<Vec<DirectoryQuery>>,
}

impl FakeDirectory {
    pub fn with_listings(listings: Vec<Candidate>) -> Self {
        Self {
            listings,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn stalled(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Answer name lookups for `name` with `listing`
    pub fn with_named(mut self, name: &str, listing: Candidate) -> Self {
        self.named.insert(name.to_string(), listing);
        self
    }

    pub fn queries(&self) -> Vec<DirectoryQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn category_queries(&self) -> Vec<DirectoryQuery> {
        self.queries()
            .into_iter()
            .filter(|q| q.categories.is_some())
            .collect()
    }
}

#[async_trait]
impl BusinessDirectory for FakeDirectory {
    async fn fetch(&self, query: &DirectoryQuery) -> Result<Vec<Candidate>, ProviderError> {
        self.queries.lock().unwrap().push(query.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(ProviderError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }

        Ok(match &query.term {
            Some(term) => self.named.get(term).cloned().into_iter().collect(),
            None => self.listings.clone(),
        })
    }
}

/// In-process stand-in for the text-generation provider
pub struct FakeGenerator {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Behaves like an exhausted quota
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().ok_or_else(|| ProviderError::Status {
            status: 429,
            body: "insufficient_quota".to_string(),
        })
    }
}

pub fn listing(identity: &str, name: &str, rating: f64, price: Option<&str>) -> Candidate {
    Candidate {
        identity: identity.to_string(),
        name: name.to_string(),
        categories: vec!["Parks".to_string()],
        coordinates: Coordinates::new(40.7 + rating / 100.0, -73.9),
        rating,
        price: price.map(|p| p.to_string()),
        image_url: format!("https://example.com/{}.jpg", identity),
        address: "New York, NY".to_string(),
    }
}

pub fn new_york_listings() -> Vec<Candidate> {
    vec![
        listing("central-park", "Central Park", 4.7, Some("$")),
        listing("moma", "The Museum of Modern Art", 4.8, Some("$$")),
        listing("blue-bottle", "Blue Bottle Coffee", 4.3, Some("$")),
        listing("met", "The Metropolitan Museum of Art", 4.8, Some("$$")),
        listing("bryant-park", "Bryant Park", 4.6, None),
        listing("stumptown", "Stumptown Coffee Roasters", 4.1, Some("$")),
        listing("high-line", "The High Line", 4.7, None),
    ]
}

pub fn fast_config() -> ItineraryGenerationConfig {
    ItineraryGenerationConfig {
        directory_timeout: Duration::from_millis(200),
        generative_timeout: Duration::from_millis(200),
        ..ItineraryGenerationConfig::default()
    }
}

pub fn generator_with(directory: Arc<FakeDirectory>) -> ItineraryGenerator {
    ItineraryGenerator::with_config(directory, fast_config())
}

pub fn planner_config() -> PlannerConfig {
    PlannerConfig {
        host: "127.0.0.1".to_string(),
        port: 8080,
        directory: DirectoryConfig::default(),
        generative: None,
        max_items: 5,
    }
}

pub fn create_app(
    generator: ItineraryGenerator,
    config: PlannerConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(generator))
        .app_data(web::Data::new(config))
        .configure(routes::configure)
}
