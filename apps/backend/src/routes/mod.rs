use actix_web::web;

pub mod auth;
pub mod games;
pub mod pages;
pub mod play;
pub mod state;

/// Configure application routes for the server and for tests.
///
/// `main.rs` adds middleware (CORS, logging, trace ids) around these;
/// tests register the same paths without the wrappers so endpoint
/// behavior can be exercised directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(pages::configure_routes);
    cfg.service(
        web::scope("/api")
            .configure(state::configure_routes)
            .configure(auth::configure_routes)
            .configure(games::configure_routes)
            .configure(play::configure_routes),
    );
}
