use serde::{Deserialize, Serialize};

/// Inbound planning request. Created per call, never stored here.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ItineraryRequest {
    pub city: String,
    pub interests: Vec<String>,
    /// One of `$`..`$$$$`; anything else is treated as `$`
    #[serde(default)]
    pub budget: String,
}

impl ItineraryRequest {
    pub fn new<S: Into<String>>(city: S, interests: Vec<String>, budget: S) -> Self {
        Self {
            city: city.into(),
            interests,
            budget: budget.into(),
        }
    }
}
