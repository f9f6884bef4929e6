use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::jwt::mint_access_token;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::logging::security;
use crate::services::users::UserLookup;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Identity-assertion login: no password, the email alone selects the user.
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { email, scopes } = body.into_inner();

    let user = match app_state.users.find_by_email(&email).await? {
        UserLookup::Found(user) => user,
        UserLookup::NotFound => {
            security::login_failed("unknown_email", &email);
            return Err(AppError::login_failed());
        }
    };

    let token = mint_access_token(&user, &email, &scopes, SystemTime::now(), &app_state.security)?;

    info!(user_id = user.id, scopes = ?scopes, "Issued access token");
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
}
