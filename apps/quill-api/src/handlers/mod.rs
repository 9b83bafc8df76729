//! HTTP handlers and route configuration.

mod auth;
mod authors;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/refresh", web::post().to(auth::refresh))
                    .route("/me", web::get().to(auth::me)),
            )
            // Author routes
            .service(
                web::scope("/authors")
                    .route("", web::get().to(authors::list))
                    .route("/{id}", web::get().to(authors::get))
                    .route("/{id}", web::delete().to(authors::delete))
                    .route("/{id}/password", web::put().to(authors::change_password))
                    .route("/{id}/posts", web::get().to(authors::list_posts)),
            )
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_published))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::patch().to(posts::update_text))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/publish", web::post().to(posts::publish))
                    .route("/{id}/unpublish", web::post().to(posts::unpublish)),
            ),
    );
}
