//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod comments;
mod feed;
mod health;
mod posts;
mod views;


use actix_web::{HttpResponse, http::header, web};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(feed::index))
                    .route("", web::post().to(posts::create))
                    .route("/{post_id}", web::get().to(feed::post_detail))
                    .route("/{post_id}", web::put().to(posts::edit))
                    .route("/{post_id}", web::delete().to(posts::delete))
                    .route("/{post_id}/comments", web::post().to(comments::add))
                    .route(
                        "/{post_id}/comments/{comment_id}",
                        web::put().to(comments::edit),
                    )
                    .route(
                        "/{post_id}/comments/{comment_id}",
                        web::delete().to(comments::delete),
                    ),
            )
            .route("/category/{slug}", web::get().to(feed::category_posts))
            .route("/profile/{username}", web::get().to(feed::profile))
            .service(
                web::scope("/admin/categories")
                    .route("", web::post().to(categories::create))
                    .route("/{slug}", web::put().to(categories::update)),
            ),
    );
}

/// Where a rejected ownership check sends the caller.
fn redirect_to(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn post_url(post_id: uuid::Uuid) -> String {
    format!("/api/posts/{post_id}")
}

fn profile_url(username: &str) -> String {
    format!("/api/profile/{username}")
}
