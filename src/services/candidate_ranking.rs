use crate::models::candidate::Candidate;
use std::collections::HashMap;

pub struct Deduplicator;

impl Deduplicator {
    /// Collapse candidates sharing an identity.
    ///
    /// The later record wins and takes over the slot of the first occurrence,
    /// so results are unique by identity and otherwise keep input order.
    pub fn dedupe(candidates: Vec<Candidate>) -> Vec<Candidate> {
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut unique: Vec<Candidate> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            match slots.get(&candidate.identity) {
                Some(&slot) => unique[slot] = candidate,
                None => {
                    slots.insert(candidate.identity.clone(), unique.len());
                    unique.push(candidate);
                }
            }
        }

        unique
    }
}

pub struct Ranker;

impl Ranker {
    /// Best-rated first, at most `max_items`. Equal ratings keep input order;
    /// short lists are returned as they are, never padded.
    pub fn select(mut candidates: Vec<Candidate>, max_items: usize) -> Vec<Candidate> {
        // sort_by is stable
        candidates.sort_by(|a, b| rating_key(b).total_cmp(&rating_key(a)));
        candidates.truncate(max_items);
        candidates
    }
}

// A NaN rating ranks like an unrated place
fn rating_key(candidate: &Candidate) -> f64 {
    if candidate.rating.is_nan() {
        0.0
    } else {
        candidate.rating
    }
}
