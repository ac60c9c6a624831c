use crate::models::candidate::Coordinates;
use serde::{Deserialize, Serialize};

/// A normalized, user-facing stop in a generated plan.
///
/// This is the only record handed to the date storage and map rendering
/// collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryItem {
    pub name: String,
    /// `(0, 0)` marks a stop that could not be located (an unmatched
    /// suggestion or a fallback place); map renderers should skip it.
    // Early itineraries stored a `position: [lat, lon]` pair
    #[serde(alias = "position")]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f64,
    /// 0 (unknown) to 4
    #[serde(default)]
    pub cost: u8,
    #[serde(default)]
    pub busy: bool,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub address: String,
}
