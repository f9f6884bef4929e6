use actix_web::{web, HttpResponse};

pub const STATUS_BODY: &str = "API Is Up";

async fn status() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(STATUS_BODY)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
