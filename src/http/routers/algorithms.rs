// Router for running algorithms and listing what is available
use crate::engine::Algorithm;
use crate::http::{AppState, error::Error as HTTPError};
use crate::schemas::run::{AlgorithmInfo, RunRequest, RunResponse};
use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{Router, get, post},
};
use schemars::schema_for;
use serde_json::json;
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/run", post(run_algorithm))
        .route("/api/algorithms", get(list_algorithms))
        .route("/api/health", get(health_check))
        .route("/api/schema/run-request", get(get_run_request_schema))
        .with_state(state)
}

async fn run_algorithm(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RunRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HTTPError> {
    let Json(request) = payload.map_err(|rejection| {
        log::debug!("Rejected run request: {}", rejection.body_text());
        HTTPError::BadRequest(rejection.body_text())
    })?;

    let algorithm: Algorithm = request.algorithm.parse()?;
    let parameters = request.parameters();
    log::debug!("Run request for {} with {:?}", algorithm, parameters);

    let trace = algorithm.run(request.graph, &parameters, &state.config.limits)?;
    Ok((StatusCode::OK, Json(RunResponse::from(trace))))
}

async fn list_algorithms() -> Result<impl IntoResponse, HTTPError> {
    let algorithms: Vec<AlgorithmInfo> = Algorithm::ALL.into_iter().map(AlgorithmInfo::from).collect();
    Ok((StatusCode::OK, Json(json!({ "algorithms": algorithms }))))
}

async fn health_check() -> Result<impl IntoResponse, HTTPError> {
    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "supported_algorithms": Algorithm::supported_ids(),
        })),
    ))
}

async fn get_run_request_schema() -> Result<impl IntoResponse, HTTPError> {
    log::debug!("Fetching run request schema");
    let schema = schema_for!(RunRequest);
    Ok((StatusCode::OK, Json(schema)))
}
