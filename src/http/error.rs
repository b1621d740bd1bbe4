use crate::engine::{Algorithm, EngineError, UnknownAlgorithm};
use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request path not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    UnsupportedAlgorithm(#[from] UnknownAlgorithm),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("an internal server error occurred")]
    Anyhow(#[from] anyhow::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // Callers that got the request wrong also get the list of valid names
            Error::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": msg,
                    "supported_algorithms": Algorithm::supported_ids(),
                }),
            ),
            Error::UnsupportedAlgorithm(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": e.to_string(),
                    "supported_algorithms": Algorithm::supported_ids(),
                }),
            ),
            Error::Engine(e) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "error": e.to_string() }),
            ),
            Error::NotFound => (StatusCode::NOT_FOUND, json!({ "error": "Not Found" })),
            Error::Anyhow(e) => {
                log::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": e.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
