//! Business directory (Yelp Fusion) client
//!
//! One `GET /businesses/search` per call, bearer-authenticated, bounded by the
//! HTTP client timeout. Callers go through [`BusinessDirectory::search`], which
//! never fails: provider errors are logged and turned into an empty result.
//! There is no retry here; retrying is the caller's business.

use crate::config::DirectoryConfig;
use crate::error::ProviderError;
use crate::models::candidate::{Candidate, Coordinates};
use crate::services::budget_service::PriceTiers;
use crate::services::category_service::CategorySet;
use async_trait::async_trait;
use serde::Deserialize;

/// Parameters of a single directory search
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryQuery {
    pub term: Option<String>,
    /// Comma-joined provider category aliases
    pub categories: Option<String>,
    pub location: String,
    /// Comma-joined price tiers, e.g. `"1,2"`
    pub price: Option<String>,
    pub limit: u32,
}

impl DirectoryQuery {
    pub fn by_categories(
        categories: &CategorySet,
        location: &str,
        tiers: &PriceTiers,
        limit: u32,
    ) -> Self {
        Self {
            term: None,
            categories: Some(categories.joined()),
            location: location.to_string(),
            price: Some(tiers.joined()),
            limit,
        }
    }

    /// Best single match for a place name, used to locate generative seeds
    pub fn by_name(name: &str, location: &str) -> Self {
        Self {
            term: Some(name.to_string()),
            categories: None,
            location: location.to_string(),
            price: None,
            limit: 1,
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("location", self.location.clone())];
        if let Some(term) = &self.term {
            pairs.push(("term", term.clone()));
        }
        if let Some(categories) = &self.categories {
            pairs.push(("categories", categories.clone()));
        }
        if let Some(price) = &self.price {
            pairs.push(("price", price.clone()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

#[async_trait]
pub trait BusinessDirectory: Send + Sync {
    /// Raw provider call
    async fn fetch(&self, query: &DirectoryQuery) -> Result<Vec<Candidate>, ProviderError>;

    /// Provider call that degrades to an empty list
    async fn search(&self, query: &DirectoryQuery) -> Vec<Candidate> {
        match self.fetch(query).await {
            Ok(candidates) => {
                log::debug!(
                    "Directory returned {} candidates for {:?}",
                    candidates.len(),
                    query
                );
                candidates
            }
            Err(err) => {
                log::warn!("Directory search failed, continuing without results: {}", err);
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct YelpSearchResponse {
    #[serde(default)]
    businesses: Vec<YelpBusiness>,
}

#[derive(Debug, Deserialize)]
struct YelpBusiness {
    id: String,
    name: String,
    #[serde(default)]
    categories: Vec<YelpCategory>,
    coordinates: Option<YelpCoordinates>,
    #[serde(default)]
    rating: f64,
    price: Option<String>,
    image_url: Option<String>,
    location: Option<YelpLocation>,
}

#[derive(Debug, Deserialize)]
struct YelpCategory {
    title: String,
}

#[derive(Debug, Deserialize)]
struct YelpCoordinates {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YelpLocation {
    #[serde(default)]
    display_address: Vec<String>,
}

impl YelpBusiness {
    /// Businesses without a location are useless on a map and are skipped
    fn into_candidate(self) -> Option<Candidate> {
        let coordinates = match self.coordinates {
            Some(YelpCoordinates {
                latitude: Some(latitude),
                longitude: Some(longitude),
            }) => Coordinates::new(latitude, longitude),
            _ => {
                log::debug!("Skipping business '{}' without coordinates", self.id);
                return None;
            }
        };

        Some(Candidate {
            identity: self.id,
            name: self.name,
            categories: self.categories.into_iter().map(|c| c.title).collect(),
            coordinates,
            rating: self.rating,
            price: self.price.filter(|p| !p.is_empty()),
            image_url: self.image_url.unwrap_or_default(),
            address: self
                .location
                .map(|l| l.display_address.join(", "))
                .unwrap_or_default(),
        })
    }
}

#[derive(Clone)]
pub struct YelpDirectoryClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl YelpDirectoryClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        if config.api_key.is_none() {
            log::warn!("YELP_API_KEY not set; directory searches will use fallbacks");
        }

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl BusinessDirectory for YelpDirectoryClient {
    async fn fetch(&self, query: &DirectoryQuery) -> Result<Vec<Candidate>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::Unavailable("YELP_API_KEY not set".to_string()))?;

        let url = format!("{}/businesses/search", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(api_key)
            .query(&query.query_pairs())
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

        let search_response: YelpSearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(search_response
            .businesses
            .into_iter()
            .filter_map(YelpBusiness::into_candidate)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::budget_service::Budget;
    use crate::services::category_service::InterestCategoryMapper;

    struct FailingDirectory;

    #[async_trait]
    impl BusinessDirectory for FailingDirectory {
        async fn fetch(&self, _query: &DirectoryQuery) -> Result<Vec<Candidate>, ProviderError> {
            Err(ProviderError::Status {
                status: 503,
                body: "down for maintenance".to_string(),
            })
        }
    }

    #[test]
    fn test_category_query_pairs() {
        let categories = InterestCategoryMapper::map_interests(&[
            "parks".to_string(),
            "museums".to_string(),
        ])
        .unwrap();
        let query = DirectoryQuery::by_categories(
            &categories,
            "New York",
            &Budget::Moderate.price_tiers(),
            50,
        );

        assert_eq!(
            query.query_pairs(),
            vec![
                ("location", "New York".to_string()),
                ("categories", "parks,museums".to_string()),
                ("price", "1,2".to_string()),
                ("limit", "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_name_query_pairs() {
        let query = DirectoryQuery::by_name("Central Park", "New York");
        assert_eq!(
            query.query_pairs(),
            vec![
                ("location", "New York".to_string()),
                ("term", "Central Park".to_string()),
                ("limit", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_yelp_businesses() {
        let payload = serde_json::json!({
            "businesses": [
                {
                    "id": "moma-ny",
                    "name": "The Museum of Modern Art",
                    "categories": [
                        {"alias": "artmuseums", "title": "Art Museums"},
                        {"alias": "galleries", "title": "Art Galleries"}
                    ],
                    "coordinates": {"latitude": 40.761433, "longitude": -73.977622},
                    "rating": 4.5,
                    "price": "$$",
                    "image_url": "https://example.com/moma.jpg",
                    "location": {"display_address": ["11 W 53rd St", "New York, NY 10019"]}
                },
                {
                    "id": "nowhere",
                    "name": "Pop-up Stand",
                    "coordinates": {"latitude": null, "longitude": null},
                    "rating": 5.0
                }
            ],
            "total": 2
        });

        let response: YelpSearchResponse = serde_json::from_value(payload).unwrap();
        let candidates: Vec<Candidate> = response
            .businesses
            .into_iter()
            .filter_map(YelpBusiness::into_candidate)
            .collect();

        assert_eq!(candidates.len(), 1);
        let moma = &candidates[0];
        assert_eq!(moma.identity, "moma-ny");
        assert_eq!(moma.categories, vec!["Art Museums", "Art Galleries"]);
        assert_eq!(moma.coordinates, Coordinates::new(40.761433, -73.977622));
        assert_eq!(moma.price.as_deref(), Some("$$"));
        assert_eq!(moma.address, "11 W 53rd St, New York, NY 10019");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_unavailable() {
        let client = YelpDirectoryClient::new(&DirectoryConfig::default()).unwrap();
        let query = DirectoryQuery::by_name("Central Park", "New York");

        let result = client.fetch(&query).await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
        assert!(client.search(&query).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_swallows_provider_errors() {
        let query = DirectoryQuery::by_name("Central Park", "New York");
        assert!(FailingDirectory.search(&query).await.is_empty());
    }
}
