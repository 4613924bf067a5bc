//! Pipeline validation handlers

use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};

use crate::dsl::parsing;
use crate::server::error::ApiResult;
use crate::server::AppState;

/// POST /validate
/// Validate a pipeline submitted as YAML or JSON
pub async fn validate_pipeline(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let document = parsing::decode_bytes(&body)?;
    let pipeline = state.validator.parse(&document)?;

    tracing::info!(
        "Accepted pipeline on {} with {} jobs",
        pipeline.image,
        pipeline.jobs.len()
    );

    let jobs: Vec<&str> = pipeline.jobs.iter().map(|job| job.name.as_str()).collect();
    Ok(Json(json!({
        "valid": true,
        "image": pipeline.image,
        "jobs": jobs,
    })))
}

/// GET /schema
/// JSON Schema of an accepted pipeline document
pub async fn pipeline_schema(State(state): State<AppState>) -> Json<Value> {
    Json(state.validator.json_schema())
}
