pub mod candidate;
pub mod itinerary;
pub mod request;
