use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use race_core::{
    engine::RaceEngine,
    error::RaceError,
    report::render_html,
    request::{RaceRequest, RequestLimits},
};
use serde::Deserialize;
use serde_json::json;

pub type AppState = Arc<RaceEngine>;

const INVALID_PARAMS: &str = "Please provide valid parameters";

pub fn create(engine: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/races", get(list_races).post(create_race))
        .route("/races/:id", get(show_race).delete(delete_race))
        .route("/races/:id/report", get(race_report))
        .with_state(engine)
}

#[derive(Debug, Deserialize)]
pub struct RaceQuery {
    #[serde(rename = "numCorredores")]
    num_corredores: Option<String>,
    distancia: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRace {
    #[serde(rename = "numCorredores")]
    num_corredores: i64,
    distancia: f64,
}

/// Maps engine errors onto JSON responses.
pub struct ApiError(RaceError);

impl From<RaceError> for ApiError {
    fn from(err: RaceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            log::error!("request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// 400 body for the query-string entry point. States the configured
/// limits so a caller can tell an over-limit value from a malformed one.
fn invalid_params(limits: &RequestLimits, err: &RaceError) -> String {
    format!(
        "{INVALID_PARAMS}: numCorredores (integer from 1 to {}) and distancia \
         (number > 0, at most {}). {err}",
        limits.max_runners, limits.max_distance
    )
}

fn not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("race {id} not found") })),
    )
        .into_response()
}

/// Query-string entry point: run, persist, and render the HTML report.
pub async fn index(State(engine): State<AppState>, Query(query): Query<RaceQuery>) -> Response {
    let request = match RaceRequest::parse(
        query.num_corredores.as_deref(),
        query.distancia.as_deref(),
        engine.limits(),
    ) {
        Ok(request) => request,
        Err(err) => {
            log::debug!("rejected query {query:?}: {err}");
            return (StatusCode::BAD_REQUEST, invalid_params(engine.limits(), &err))
                .into_response();
        }
    };

    let rendered = engine
        .run_race(&request)
        .and_then(|race| render_html(race.distance, &race.result()));
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            log::error!("race failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

pub async fn create_race(
    State(engine): State<AppState>,
    body: Result<Json<CreateRace>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body.map_err(|e| RaceError::InvalidRequest(e.body_text()))?;
    let request = RaceRequest::validate(body.num_corredores, body.distancia, engine.limits())?;
    let race = engine.run_race(&request)?;
    Ok((StatusCode::CREATED, Json(race)).into_response())
}

pub async fn list_races(State(engine): State<AppState>) -> Result<Response, ApiError> {
    Ok(Json(engine.list_races()?).into_response())
}

pub async fn show_race(
    State(engine): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    Ok(match engine.get_race(&id)? {
        Some(race) => Json(race).into_response(),
        None => not_found(&id),
    })
}

pub async fn race_report(
    State(engine): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    Ok(match engine.get_race(&id)? {
        Some(race) => Html(render_html(race.distance, &race.result())?).into_response(),
        None => not_found(&id),
    })
}

pub async fn delete_race(
    State(engine): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    Ok(if engine.delete_race(&id)? {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(&id)
    })
}
