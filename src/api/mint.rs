//! NFT publication endpoint
//!
//! POST /makeNFT - Pin an image and its metadata document to IPFS

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{error, info};

use super::AppState;
use crate::models::{MintFailure, MintRequest, MintResponse};

/// Build the mint router
pub fn router() -> Router<AppState> {
    Router::new().route("/makeNFT", post(make_nft))
}

fn failure(error: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MintFailure {
            success: false,
            error,
        }),
    )
        .into_response()
}

/// Publish an image with its name and description
async fn make_nft(
    State(state): State<AppState>,
    payload: Result<Json<MintRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            error!("Rejected makeNFT request: {}", rejection.body_text());
            return failure(rejection.body_text());
        }
    };

    match state.minter.mint(&req).await {
        Ok(minted) => {
            let csv = minted.summary.to_csv();
            info!("CSV output:\n{}", csv);
            Json(MintResponse {
                success: true,
                ipfs_hash: minted.metadata_cid.clone(),
                image_cid: minted.image_uri(),
                metadata_url: minted.metadata_uri(),
                csv,
            })
            .into_response()
        }
        Err(e) => {
            error!("Error creating NFT via Pinata: {}", e);
            failure(e.to_string())
        }
    }
}
