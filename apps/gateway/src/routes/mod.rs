use actix_web::web;

pub mod auth;
pub mod status;
pub mod user;
pub mod widgets;

/// Register every gateway route at the application root.
pub fn configure(cfg: &mut web::ServiceConfig) {
    status::configure_routes(cfg);
    auth::configure_routes(cfg);
    user::configure_routes(cfg);
    widgets::configure_routes(cfg);
}
