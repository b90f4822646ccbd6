use axum::{extract::State, routing::post, Json, Router};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppError,
    services::ocr::{self, OcrResult},
    services::sheet::utils::load_file_from_url,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/ocr/process", post(process_ocr))
}

#[derive(Debug, Deserialize)]
pub struct OcrRequest {
    signed_url: Option<String>,
}

async fn process_ocr(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OcrRequest>,
) -> Result<Json<OcrResult>, AppError> {
    let image_data = match &request.signed_url {
        Some(url) => load_file_from_url(url, state.config.max_file_size).await?,
        None => Bytes::new(),
    };

    Ok(Json(ocr::process_image(&image_data)))
}
