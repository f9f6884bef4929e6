use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::claims::WIDGETS_SCOPE;
use crate::domain::Widget;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::BearerClaims;
use crate::logging::security;
use crate::services::widget_filter::WidgetFilter;
use crate::state::app_state::AppState;
use crate::web::request_facts::UpstreamOutcome;

#[derive(Debug, Serialize)]
pub struct WidgetsResponse {
    /// Count of `matching_items`, i.e. after filtering.
    pub total_widgets_owned_by_user: usize,
    pub matching_items: Vec<Widget>,
}

fn query_pairs(req: &HttpRequest) -> Result<Vec<(String, String)>, AppError> {
    web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .map_err(|e| {
            warn!(error = %e, "Undecodable query string");
            AppError::bad_request(ErrorCode::InvalidQuery, "Invalid query string")
        })
}

async fn list_widgets(
    req: HttpRequest,
    claims: BearerClaims,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if let Err(e) = claims.require_scope(WIDGETS_SCOPE) {
        security::scope_denied(claims.sub, WIDGETS_SCOPE);
        return Err(e);
    }

    // Validate the query before spending an upstream round trip on it.
    let filter = WidgetFilter::from_query(&query_pairs(&req)?)?;

    let fetched = app_state.widgets.fetch_widgets(claims.sub).await;
    req.extensions_mut().insert(UpstreamOutcome::of(&fetched));
    let owned = fetched?;
    let owned_count = owned.len();

    let matching_items: Vec<Widget> = filter
        .apply(owned)?
        .into_iter()
        .map(Widget::labelled)
        .collect();

    debug!(
        user_id = claims.sub,
        owned = owned_count,
        matching = matching_items.len(),
        clauses = filter.clauses().len(),
        "Filtered widgets"
    );

    Ok(HttpResponse::Ok().json(WidgetsResponse {
        total_widgets_owned_by_user: matching_items.len(),
        matching_items,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/widgets").route(web::get().to(list_widgets)));
}
