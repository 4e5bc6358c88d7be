//! Route handlers for the conversion and merge endpoints.

use crate::error::{BoxRequestError, RequestError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sheetpress_pipeline::{merge_all, process_upload, MergeOutcome, Page, PipelineError, Rules};
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// Shared application state: the normalization rule set, loaded once
/// at startup and immutable for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<Rules>,
}

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

/// Health check endpoint handler.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Query parameters accepted by `/convert`.
#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    filename: Option<String>,
    content: Option<String>,
}

/// JSON body accepted by `/convert`. Fields mirror the query
/// parameters and fill in whichever ones the query leaves out.
#[derive(Debug, Default, Deserialize)]
pub struct ConvertBody {
    filename: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Error)]
enum ConvertError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("{0}")]
    Pipeline(PipelineError),
}

impl RequestError for ConvertError {
    fn error_code(&self) -> &'static str {
        match self {
            ConvertError::MissingField(_) => "MISSING_FIELD",
            ConvertError::Pipeline(PipelineError::InvalidBase64(_)) => "INVALID_BASE64",
            ConvertError::Pipeline(PipelineError::Decode(_)) => "DECODE_ERROR",
            ConvertError::Pipeline(_) => "INTERNAL_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ConvertError::MissingField(_) => StatusCode::BAD_REQUEST,
            ConvertError::Pipeline(PipelineError::InvalidBase64(_)) => StatusCode::BAD_REQUEST,
            ConvertError::Pipeline(PipelineError::Decode(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ConvertError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Handler for `POST /convert`.
///
/// Decodes a base64 XLSX workbook and responds with one base64 Parquet
/// blob per non-empty sheet. `filename` and `content` may arrive as
/// query parameters or in the JSON body; query parameters win when
/// both are present. A body that is not valid JSON is ignored, so a
/// request that names everything in the query still succeeds.
#[instrument(skip_all, err)]
pub async fn convert(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
    body: Option<Json<ConvertBody>>,
) -> Result<Json<Vec<Page>>, BoxRequestError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let filename = query
        .filename
        .or(body.filename)
        .ok_or(ConvertError::MissingField("filename"))?;
    let content = query
        .content
        .or(body.content)
        .ok_or(ConvertError::MissingField("content"))?;

    let outcome =
        process_upload(&filename, &content, &state.rules).map_err(ConvertError::Pipeline)?;
    Ok(Json(outcome.pages))
}

/// JSON body accepted by `/merge`.
#[derive(Debug, Deserialize)]
pub struct MergeRequest {
    parquet_contents: Vec<ContentItem>,
}

/// One merge input; the base64 Parquet blob rides in a `$content` field.
#[derive(Debug, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "$content")]
    content: String,
}

/// Response from `/merge`. `content` is absent when no input survived
/// decoding, which tells the caller there was nothing to merge.
#[derive(Debug, Serialize, Deserialize)]
pub struct MergeResponse {
    pub content: Option<String>,
    pub merged: bool,
}

#[derive(Debug, Error)]
enum MergeError {
    #[error("Malformed JSON body: {0}")]
    MalformedBody(String),
    #[error("{0}")]
    Pipeline(PipelineError),
}

impl RequestError for MergeError {
    fn error_code(&self) -> &'static str {
        match self {
            MergeError::MalformedBody(_) => "MALFORMED_JSON",
            MergeError::Pipeline(PipelineError::MergeSerialization(_)) => {
                "MERGE_SERIALIZATION_ERROR"
            }
            MergeError::Pipeline(_) => "INTERNAL_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            MergeError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            MergeError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Handler for `POST /merge`.
///
/// Decodes each base64 Parquet blob, merges every readable table into
/// one, and responds with the merged blob. Inputs that fail to decode
/// are skipped rather than failing the request; if nothing survives,
/// the response says so instead of carrying a blob.
#[instrument(skip_all, err)]
pub async fn merge(
    State(state): State<AppState>,
    payload: Result<Json<MergeRequest>, JsonRejection>,
) -> Result<Json<MergeResponse>, BoxRequestError> {
    let Json(request) =
        payload.map_err(|rejection| MergeError::MalformedBody(rejection.body_text()))?;
    let contents: Vec<String> = request
        .parquet_contents
        .into_iter()
        .map(|item| item.content)
        .collect();

    let outcome = merge_all(&contents, &state.rules).map_err(MergeError::Pipeline)?;
    let response = match outcome {
        MergeOutcome::Merged { content, .. } => MergeResponse {
            content: Some(content),
            merged: true,
        },
        MergeOutcome::Empty { .. } => MergeResponse {
            content: None,
            merged: false,
        },
    };
    Ok(Json(response))
}

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/convert", post(convert))
        .route("/merge", post(merge))
        .with_state(state)
}
