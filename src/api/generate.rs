//! Image generation endpoint
//!
//! POST /generate - Proxy a prompt to Stability AI

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{error, info};

use super::AppState;
use crate::models::{GenerateFailure, GenerateRequest, GenerateResponse};
use crate::stability::StabilityError;

/// Build the generation router
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate))
}

fn failure(error: String, details: Option<Value>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(GenerateFailure { error, details }),
    )
        .into_response()
}

/// Generate an image for a prompt
async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            error!("Rejected generate request: {}", rejection.body_text());
            return failure(
                "Error generating image".to_string(),
                Some(Value::String(rejection.body_text())),
            );
        }
    };

    match state.stability.generate(&req.prompt).await {
        Ok(image) => {
            info!("Generated image received from Stability AI");
            Json(GenerateResponse {
                images: vec![image],
            })
            .into_response()
        }
        Err(e @ StabilityError::MissingImage) => {
            error!("{}", e);
            failure(e.to_string(), None)
        }
        Err(e) => {
            error!("Stability API error: {}", e);
            failure("Error generating image".to_string(), e.details())
        }
    }
}
