use actix_web::web;

pub mod date;
pub mod health;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api").service(
                web::scope("/dates").route("/generate", web::post().to(date::generate)),
            ),
        );
}
