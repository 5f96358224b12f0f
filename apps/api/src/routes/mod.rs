use actix_web::web;

pub mod auth;
pub mod google;
pub mod health;
pub mod users;

/// Register every route. `main.rs` adds the global middleware stack;
/// per-route authorization is declared inside each module.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(
        web::scope("/auth")
            .configure(auth::configure_routes)
            .configure(google::configure_routes),
    );

    cfg.service(web::scope("/users").configure(users::configure_routes));
}
