use crate::config::PlannerConfig;
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

#[derive(Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub services: HashMap<String, ServiceStatus>,
    pub environment: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ServiceStatus {
    pub status: String,
    pub details: Option<String>,
}

/*
    /health
*/
pub async fn health_check(config: web::Data<PlannerConfig>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let directory_result = check_directory(&config);
    health
        .services
        .insert("business_directory".to_string(), directory_result.clone());

    let generative_result = check_generative(&config);
    health
        .services
        .insert("generative".to_string(), generative_result.clone());

    // The generative step is optional, so "disabled" does not degrade
    if directory_result.status != "ok" || generative_result.status == "error" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn check_directory(config: &PlannerConfig) -> ServiceStatus {
    match &config.directory.api_key {
        Some(key) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "Yelp API key configured ({}), {} results per search",
                mask_key(key),
                config.directory.result_limit
            )),
        },
        None => ServiceStatus {
            status: "error".to_string(),
            details: Some("YELP_API_KEY not configured; serving fallback places".to_string()),
        },
    }
}

fn check_generative(config: &PlannerConfig) -> ServiceStatus {
    match &config.generative {
        Some(generative) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "Model {} configured ({})",
                generative.model,
                mask_key(&generative.api_key)
            )),
        },
        None => ServiceStatus {
            status: "disabled".to_string(),
            details: Some("OPENAI_API_KEY not configured".to_string()),
        },
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}
