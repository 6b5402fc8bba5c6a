//! HTTP handler functions for the dashboard API.

use actix_web::{HttpResponse, web};
use covid_dashboard_analytics::aggregate::nation_rollup;
use covid_dashboard_analytics::dashboard::dashboard as derive_dashboard;
use covid_dashboard_case_models::DailyRecord;
use covid_dashboard_geography::{GeoError, state_options};
use covid_dashboard_geography_models::LocationScope;
use covid_dashboard_server_models::{
    ApiCityOptions, ApiDashboard, ApiHealth, CitiesQueryParams, DashboardQueryParams,
};
use covid_dashboard_source::SourceError;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/states`
///
/// Returns the state dropdown options, ordered by name.
pub async fn states() -> HttpResponse {
    HttpResponse::Ok().json(state_options())
}

/// `GET /api/cities?state=41`
///
/// Returns the city dropdown options for one state. With no state
/// selected the dropdown stays disabled and empty.
pub async fn cities(
    state: web::Data<AppState>,
    params: web::Query<CitiesQueryParams>,
) -> HttpResponse {
    let Some(state_code) = params.state else {
        return HttpResponse::Ok().json(ApiCityOptions {
            disabled: true,
            options: Vec::new(),
        });
    };

    match state.geo.city_options(state_code) {
        Ok(options) => HttpResponse::Ok().json(ApiCityOptions {
            disabled: false,
            options,
        }),
        Err(e) => {
            log::warn!("Failed to list cities for state {state_code}: {e}");
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("Unknown state code: {state_code}")
            }))
        }
    }
}

/// `GET /api/dashboard?state=41&city=4106902`
///
/// Resolves the scope, fetches its records fresh, recomputes every
/// derived series, and returns the chart and card payload. Any fetch or
/// aggregation failure renders the empty state — never a partial
/// dashboard.
pub async fn dashboard(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    let scope = LocationScope::resolve(params.state, params.city);

    let location = match state.geo.label_for(scope) {
        Ok(location) => location,
        Err(e @ GeoError::UnknownLocationCode { .. }) => {
            log::warn!("Dashboard request for unknown scope {scope:?}: {e}");
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
        Err(e) => {
            log::error!("Failed to resolve label for {scope:?}: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to resolve location"
            }));
        }
    };

    let records = match fetch_scope_records(&state, scope).await {
        Ok(records) => records,
        Err(e) => {
            log::error!("Failed to fetch records for {location}: {e}");
            return HttpResponse::Ok().json(ApiDashboard::empty(location));
        }
    };

    match derive_dashboard(&records) {
        Ok(dashboard) => {
            HttpResponse::Ok().json(ApiDashboard::from_parts(location, &dashboard))
        }
        Err(e) => {
            log::warn!("Failed to derive dashboard for {location}: {e}");
            HttpResponse::Ok().json(ApiDashboard::empty(location))
        }
    }
}

/// Fetches the raw series for a scope: a single place's records, or the
/// nation-wide rollup of every per-state record.
async fn fetch_scope_records(
    state: &web::Data<AppState>,
    scope: LocationScope,
) -> Result<Vec<DailyRecord>, SourceError> {
    match scope {
        LocationScope::City(code) | LocationScope::State(code) => {
            state.source.fetch_place(code).await
        }
        LocationScope::Nation => {
            let states = state.source.fetch_states_bulk().await?;
            Ok(nation_rollup(&states))
        }
    }
}
