use crate::models::{candidate::Candidate, itinerary::ItineraryItem};

const MAX_COST: u8 = 4;

pub struct ItineraryAssembler;

impl ItineraryAssembler {
    /// Normalize selected candidates into itinerary items, preserving order
    pub fn assemble(candidates: Vec<Candidate>) -> Vec<ItineraryItem> {
        candidates.into_iter().map(Self::to_item).collect()
    }

    pub fn to_item(candidate: Candidate) -> ItineraryItem {
        ItineraryItem {
            cost: Self::cost(&candidate),
            description: Self::description(&candidate),
            name: candidate.name,
            coordinates: candidate.coordinates,
            rating: candidate.rating,
            busy: false,
            image_url: candidate.image_url,
            address: candidate.address,
        }
    }

    /// `"$$"` costs 2, no price costs 0
    pub fn cost(candidate: &Candidate) -> u8 {
        candidate
            .price
            .as_deref()
            .map(|price| price.trim().chars().count().min(MAX_COST as usize) as u8)
            .unwrap_or(0)
    }

    pub fn description(candidate: &Candidate) -> String {
        candidate
            .categories
            .iter()
            .map(|label| label.trim())
            .filter(|label| !label.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
