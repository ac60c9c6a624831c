use std::{io, sync::Arc};

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use cupid_api::{
    config::PlannerConfig,
    routes,
    services::{
        directory_service::YelpDirectoryClient,
        itinerary_generation_service::ItineraryGenerator,
        suggestion_service::OpenAiClient,
    },
};
use env_logger::Env;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = PlannerConfig::from_env();

    let directory = YelpDirectoryClient::new(&config.directory)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let mut generator =
        ItineraryGenerator::with_config(Arc::new(directory), config.generation_config());

    match &config.generative {
        Some(generative) => match OpenAiClient::new(generative) {
            Ok(client) => {
                log::info!("Generative suggestions enabled ({})", generative.model);
                generator = generator.with_suggester(Arc::new(client));
            }
            Err(e) => log::warn!("Generative client not available: {}. Continuing without it.", e),
        },
        None => log::info!("OPENAI_API_KEY not set; generative suggestions disabled"),
    }

    let generator = web::Data::new(generator);
    let planner_config = web::Data::new(config.clone());

    log::info!("Attempting to bind to {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(generator.clone())
            .app_data(planner_config.clone())
            .configure(routes::configure)
    })
    .bind((config.host.clone(), config.port))?
    .run()
    .await
}
