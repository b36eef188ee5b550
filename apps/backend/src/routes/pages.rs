//! Static entry page.

use actix_web::{web, HttpResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
///
/// The single-page client; everything else it does goes through /api.
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)));
}
