use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::BearerClaims;

/// Identity portion of the caller's claims. Scopes are deliberately absent.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

async fn current_user(claims: BearerClaims) -> Result<HttpResponse, AppError> {
    let claims = claims.into_inner();

    Ok(HttpResponse::Ok().json(UserResponse {
        user_id: claims.sub,
        name: claims.name,
        email: claims.email,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/user").route(web::get().to(current_user)));
}
