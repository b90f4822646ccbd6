use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

pub mod forms;
pub mod ocr;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .merge(forms::routes())
        .merge(ocr::routes())
}

async fn health_check() -> &'static str {
    "OK"
}
