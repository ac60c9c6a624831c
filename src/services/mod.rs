pub mod budget_service;
pub mod candidate_ranking;
pub mod category_service;
pub mod directory_service;
pub mod itinerary_assembly;
pub mod itinerary_generation_service;
pub mod suggestion_service;
