use crate::{
    error::ItineraryError,
    models::{itinerary::ItineraryItem, request::ItineraryRequest},
    services::itinerary_generation_service::ItineraryGenerator,
};
use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Handed to the date storage collaborator, which assigns the id
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDate {
    pub itinerary: Vec<ItineraryItem>,
    pub generated_at: DateTime<Utc>,
}

/*
    /api/dates/generate
*/
pub async fn generate(
    generator: web::Data<ItineraryGenerator>,
    input: web::Json<ItineraryRequest>,
) -> impl Responder {
    let request = input.into_inner();
    let deadline = tokio::time::sleep(generator.config().request_deadline());

    match generator.generate_until(&request, deadline).await {
        Ok(itinerary) => HttpResponse::Created().json(GeneratedDate {
            itinerary,
            generated_at: Utc::now(),
        }),
        Err(err @ ItineraryError::Input { .. }) => {
            log::info!("Rejected itinerary request: {}", err);
            HttpResponse::BadRequest().json(json!({ "message": err.user_message() }))
        }
        Err(err) => {
            log::error!("Itinerary generation failed: {}", err);
            HttpResponse::InternalServerError().json(json!({ "message": err.user_message() }))
        }
    }
}
