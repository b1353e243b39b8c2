//! # HTTP Routes
//!
//! Thin Axum handlers over the entity finders. Every handler collects the
//! raw query string into a sanitized [`ParameterSet`], runs one finder and
//! returns the rows as a JSON array. Path identifiers accept an optional
//! `.json` suffix, so `/v1/countries/US` and `/v1/countries/US.json` are the
//! same resource.
//!
//! Every route requires an `api_key` query parameter naming one of the
//! configured keys.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use sea_orm::JsonValue;
use tower_http::trace::TraceLayer;

use crate::database::QueryExecutor;
use crate::entities::{
    continent, country, language, people_group, profile_text, region, resource, total,
};
use crate::errors::ApiError;
use crate::generator::EntityConfig;
use crate::params::ParameterSet;
use crate::query::PreparedQuery;
use crate::validation::ValidationError;

/// Query parameter carrying the caller's key.
pub const API_KEY_PARAM: &str = "api_key";

type QueryPairs = Vec<(String, String)>;
type ApiResult = Result<Json<Vec<JsonValue>>, ApiError>;
type Finder = fn(&ParameterSet) -> Result<PreparedQuery, ValidationError>;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn QueryExecutor>,
    pub api_keys: Arc<HashSet<String>>,
}

impl AppState {
    #[must_use]
    pub fn new(db: impl QueryExecutor + 'static, api_keys: HashSet<String>) -> Self {
        Self {
            db: Arc::new(db),
            api_keys: Arc::new(api_keys),
        }
    }
}

/// Build the versioned API router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/people_groups.json", get(people_groups_index))
        .route(
            "/v1/people_groups/daily_unreached.json",
            get(people_groups_daily_unreached),
        )
        .route("/v1/people_groups/{id}", get(people_groups_show))
        .route("/v1/people_groups/{id}/profile_text", get(profile_text_index))
        .route("/v1/countries.json", get(countries_index))
        .route("/v1/countries/{id}", get(countries_show))
        .route("/v1/languages.json", get(languages_index))
        .route("/v1/languages/{id}", get(languages_show))
        .route("/v1/languages/{id}/resources", get(resources_index))
        .route("/v1/continents.json", get(continents_index))
        .route("/v1/continents/{id}", get(continents_show))
        .route("/v1/regions.json", get(regions_index))
        .route("/v1/regions/{id}", get(regions_show))
        .route("/v1/totals.json", get(totals_index))
        .route("/v1/totals/{id}", get(totals_show))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Reject requests without a known `api_key` and record accepted ones.
async fn require_api_key(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = pairs
        .into_iter()
        .find(|(name, _)| name == API_KEY_PARAM)
        .map(|(_, value)| value)
        .filter(|value| state.api_keys.contains(value))
        .ok_or_else(|| ApiError::unauthorized("A valid api_key is required"))?;

    tracing::info!(
        target: "jpapi::analytics",
        api_key = %key,
        method = %request.method(),
        path = %request.uri().path(),
        query = request.uri().query().unwrap_or_default(),
        "api request"
    );
    Ok(next.run(request).await)
}

fn resource_id(raw: &str) -> &str {
    raw.strip_suffix(".json").unwrap_or(raw)
}

async fn run(state: &AppState, finder: Finder, params: &ParameterSet) -> ApiResult {
    let query = finder(params)?;
    Ok(Json(state.db.fetch_all(&query).await?))
}

async fn index(state: &AppState, finder: Finder, pairs: QueryPairs) -> ApiResult {
    run(state, finder, &ParameterSet::from_pairs(pairs)).await
}

/// A single-resource lookup; an empty result is a 404.
async fn show(
    state: &AppState,
    config: &EntityConfig,
    finder: Finder,
    id: &str,
    pairs: QueryPairs,
) -> ApiResult {
    let id = resource_id(id);
    let params = ParameterSet::from_pairs(pairs).with("id", id);
    let rows = run(state, finder, &params).await?;
    if rows.is_empty() {
        return Err(ApiError::not_found(config.resource, Some(id.to_string())));
    }
    Ok(rows)
}

async fn people_groups_index(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    index(&state, people_group::find_all_with_filters, pairs).await
}

async fn people_groups_daily_unreached(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    index(&state, people_group::daily_unreached, pairs).await
}

/// One people group, narrowed to a country when `country` is given. Each
/// row lists every country the group lives in under `Countries`.
async fn people_groups_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    let id = resource_id(&id);
    let request = ParameterSet::from_pairs(pairs);
    // paging never applies to a single group or to its country list
    let by_id = ParameterSet::new().with("id", id);
    let (finder, params): (Finder, ParameterSet) = match request.get("country") {
        Some(country) if request.has("country") => (
            people_group::find_by_id_and_country,
            by_id.clone().with_value("country", country.clone()),
        ),
        _ => (people_group::find_by_id, by_id.clone()),
    };

    let Json(mut rows) = run(&state, finder, &params).await?;
    if rows.is_empty() {
        return Err(ApiError::not_found(
            people_group::CONFIG.resource,
            Some(id.to_string()),
        ));
    }

    let Json(countries) = run(&state, people_group::find_country_list, &by_id).await?;
    for row in &mut rows {
        if let Some(fields) = row.as_object_mut() {
            fields.insert("Countries".to_string(), JsonValue::Array(countries.clone()));
        }
    }
    Ok(Json(rows))
}

async fn profile_text_index(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    let params = ParameterSet::from_pairs(pairs).with("id", resource_id(&id));
    run(&state, profile_text::find_all_by_id_and_country, &params).await
}

async fn countries_index(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    index(&state, country::find_all_with_filters, pairs).await
}

async fn countries_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    show(&state, &country::CONFIG, country::find_by_id, &id, pairs).await
}

async fn languages_index(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    index(&state, language::find_all_with_filters, pairs).await
}

async fn languages_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    show(&state, &language::CONFIG, language::find_by_id, &id, pairs).await
}

async fn resources_index(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    let params = ParameterSet::from_pairs(pairs).with("id", resource_id(&id));
    run(&state, resource::find_all_by_language_id, &params).await
}

async fn continents_index(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    index(&state, continent::find_all, pairs).await
}

async fn continents_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    show(&state, &continent::CONFIG, continent::find_by_id, &id, pairs).await
}

async fn regions_index(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    index(&state, region::find_all, pairs).await
}

async fn regions_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    show(&state, &region::CONFIG, region::find_by_id, &id, pairs).await
}

async fn totals_index(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    index(&state, total::find_all, pairs).await
}

async fn totals_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult {
    show(&state, &total::CONFIG, total::find_by_id, &id, pairs).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id_strips_json_suffix() {
        assert_eq!(resource_id("US.json"), "US");
        assert_eq!(resource_id("US"), "US");
        assert_eq!(resource_id(".json"), "");
    }
}
