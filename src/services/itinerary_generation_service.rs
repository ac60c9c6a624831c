use crate::error::ItineraryError;
use crate::models::{
    candidate::{Candidate, Coordinates},
    itinerary::ItineraryItem,
    request::ItineraryRequest,
};
use crate::services::budget_service::{Budget, BudgetResolver, ResolvedBudget};
use crate::services::candidate_ranking::{Deduplicator, Ranker};
use crate::services::category_service::InterestCategoryMapper;
use crate::services::directory_service::{BusinessDirectory, DirectoryQuery};
use crate::services::itinerary_assembly::ItineraryAssembler;
use crate::services::suggestion_service::{GenerativeSuggester, TextGenerator};
use futures::future::join_all;
use std::{future::Future, sync::Arc, time::Duration};

const DEFAULT_MAX_ITEMS: usize = 5;
const DEFAULT_DIRECTORY_LIMIT: u32 = 50;
const DEFAULT_DIRECTORY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_GENERATIVE_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug)]
pub struct ItineraryGenerationConfig {
    pub max_items: usize,
    pub directory_limit: u32,
    /// Bound on each individual directory call
    pub directory_timeout: Duration,
    /// Bound on the generative call
    pub generative_timeout: Duration,
}

impl Default for ItineraryGenerationConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            directory_limit: DEFAULT_DIRECTORY_LIMIT,
            directory_timeout: Duration::from_secs(DEFAULT_DIRECTORY_TIMEOUT_SECS),
            generative_timeout: Duration::from_secs(DEFAULT_GENERATIVE_TIMEOUT_SECS),
        }
    }
}

impl ItineraryGenerationConfig {
    /// Longest a whole request may take: the concurrent generative/directory
    /// phase, then one round of seed lookups, plus a second of slack
    pub fn request_deadline(&self) -> Duration {
        self.generative_timeout.max(self.directory_timeout)
            + self.directory_timeout
            + Duration::from_secs(1)
    }
}

/// Generic places used when no provider gave us anything.
///
/// They are not tied to any city, so they carry unlocated (0, 0)
/// coordinates; the city is filled in as their address.
pub fn fallback_seeds() -> Vec<Candidate> {
    [
        ("fallback:park", "Neighborhood Park", "Parks", 4.7, "$"),
        ("fallback:museum", "Local Art Museum", "Museums", 4.8, "$$"),
        ("fallback:cafe", "Corner Coffee House", "Cafes", 4.5, "$"),
    ]
    .into_iter()
    .map(|(identity, name, category, rating, price)| Candidate {
        identity: identity.to_string(),
        name: name.to_string(),
        categories: vec![category.to_string()],
        coordinates: Coordinates::default(),
        rating,
        price: Some(price.to_string()),
        image_url: String::new(),
        address: String::new(),
    })
    .collect()
}

/// Plans a date itinerary from a city, interests and a budget.
///
/// Holds its provider clients explicitly; nothing is shared between calls, so
/// one generator can serve any number of concurrent requests.
pub struct ItineraryGenerator {
    directory: Arc<dyn BusinessDirectory>,
    suggester: Option<GenerativeSuggester>,
    config: ItineraryGenerationConfig,
    fallback_seeds: Vec<Candidate>,
}

impl ItineraryGenerator {
    pub fn with_config(
        directory: Arc<dyn BusinessDirectory>,
        config: ItineraryGenerationConfig,
    ) -> Self {
        Self {
            directory,
            suggester: None,
            config,
            fallback_seeds: fallback_seeds(),
        }
    }

    /// Enable generative seeding through the given provider
    pub fn with_suggester(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.suggester = Some(GenerativeSuggester::new(
            generator,
            self.config.generative_timeout,
        ));
        self
    }

    pub fn with_fallback_seeds(mut self, seeds: Vec<Candidate>) -> Self {
        self.fallback_seeds = seeds;
        self
    }

    pub fn config(&self) -> &ItineraryGenerationConfig {
        &self.config
    }

    /// Run the pipeline, giving up with a single `Generation` error as soon
    /// as `cancelled` resolves. Outstanding provider calls are dropped.
    pub async fn generate_until<F>(
        &self,
        request: &ItineraryRequest,
        cancelled: F,
    ) -> Result<Vec<ItineraryItem>, ItineraryError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancelled => {
                log::info!("Itinerary generation for '{}' cancelled", request.city);
                Err(ItineraryError::generation("request cancelled"))
            }
            result = self.generate_itinerary(request) => result,
        }
    }

    /// Generate an ordered itinerary of 1..=max_items stops
    pub async fn generate_itinerary(
        &self,
        request: &ItineraryRequest,
    ) -> Result<Vec<ItineraryItem>, ItineraryError> {
        let city = request.city.trim();
        if city.is_empty() {
            return Err(ItineraryError::input("city must not be empty"));
        }

        let ResolvedBudget {
            budget,
            tiers,
            unrecognized,
        } = BudgetResolver::resolve(&request.budget);
        if let Some(err) = unrecognized {
            log::warn!("{}; defaulting to '{}'", err, budget);
        }
        let categories = InterestCategoryMapper::map_interests(&request.interests)?;

        log::info!(
            "Generating itinerary for '{}' (categories: {}, price: {})",
            city,
            categories.joined(),
            tiers.joined()
        );

        let query =
            DirectoryQuery::by_categories(&categories, city, &tiers, self.config.directory_limit);
        let (seeds, listings) = tokio::join!(
            self.seed_candidates(city, &request.interests, budget),
            self.search_directory(&query),
        );
        let seeds = self.enrich_seeds(seeds, city).await;

        let pool = if seeds.is_empty() && listings.is_empty() {
            log::info!("No provider candidates for '{}', using fallback seeds", city);
            self.fallback_for(city)
        } else {
            seeds.into_iter().chain(listings).collect()
        };

        let unique = Deduplicator::dedupe(pool);
        let selected = Ranker::select(unique, self.config.max_items);
        if selected.is_empty() {
            return Err(ItineraryError::generation(format!(
                "no candidates available for '{}'",
                city
            )));
        }

        let itinerary = ItineraryAssembler::assemble(selected);
        // Unenriched seeds and fallback places keep (0, 0)
        let unlocated = itinerary
            .iter()
            .filter(|item| item.coordinates.is_placeholder())
            .count();
        if unlocated > 0 {
            log::info!("{} of the stops for '{}' have no location", unlocated, city);
        }
        log::info!("Generated {} stops for '{}'", itinerary.len(), city);
        Ok(itinerary)
    }

    async fn seed_candidates(
        &self,
        city: &str,
        interests: &[String],
        budget: Budget,
    ) -> Vec<Candidate> {
        match &self.suggester {
            Some(suggester) => suggester.suggest(city, interests, budget).await,
            None => Vec::new(),
        }
    }

    /// Replace each seed with its directory record when one is found
    async fn enrich_seeds(&self, seeds: Vec<Candidate>, city: &str) -> Vec<Candidate> {
        let lookups = seeds.into_iter().map(|seed| async move {
            let query = DirectoryQuery::by_name(&seed.name, city);
            match self.search_directory(&query).await.into_iter().next() {
                Some(listing) => listing,
                None => {
                    log::debug!("No directory match for seed '{}'", seed.name);
                    seed
                }
            }
        });
        join_all(lookups).await
    }

    async fn search_directory(&self, query: &DirectoryQuery) -> Vec<Candidate> {
        match tokio::time::timeout(self.config.directory_timeout, self.directory.search(query))
            .await
        {
            Ok(candidates) => candidates,
            Err(_) => {
                log::warn!(
                    "Directory search timed out after {:?}",
                    self.config.directory_timeout
                );
                Vec::new()
            }
        }
    }

    fn fallback_for(&self, city: &str) -> Vec<Candidate> {
        self.fallback_seeds
            .iter()
            .cloned()
            .map(|mut seed| {
                if seed.address.is_empty() {
                    seed.address = city.to_string();
                }
                seed
            })
            .collect()
    }
}
