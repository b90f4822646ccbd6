use axum::{extract::State, http::Method, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    error::AppError,
    services::{
        form::{form_from_report, FormSchema},
        sheet::{utils::load_file_from_url, SheetAnalyzer, SheetReport},
    },
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/forms/analyze", post(analyze_form))
        .layer(cors)
}

#[derive(Debug, Deserialize)]
pub struct FileInfo {
    #[serde(rename = "type")]
    file_type: String,
    signed_url: String,
    filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    files: Vec<FileInfo>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    analysis: SheetReport,
    form: FormSchema,
}

#[axum::debug_handler]
async fn analyze_form(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let start = std::time::Instant::now();

    let file_info = request
        .files
        .first()
        .ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    tracing::info!(
        "Processing file type: {}, URL length: {}",
        file_info.file_type,
        file_info.signed_url.len()
    );

    if !file_info.file_type.to_lowercase().contains("xlsx") {
        tracing::error!("Unsupported file type: {}", file_info.file_type);
        return Err(AppError::InvalidInput(
            "Only XLSX files are supported".to_string(),
        ));
    }

    tracing::info!("Downloading file from URL...");
    let download_start = std::time::Instant::now();
    let file_data =
        load_file_from_url(&file_info.signed_url, state.config.max_file_size).await?;
    tracing::info!(
        "File downloaded, size: {}KB, took: {:?}",
        file_data.len() / 1024,
        download_start.elapsed()
    );

    let filename = file_info
        .filename
        .clone()
        .unwrap_or_else(|| "uploaded_file.xlsx".to_string());

    tracing::info!("Starting sheet analysis...");
    let analysis_start = std::time::Instant::now();
    let analyzer = SheetAnalyzer::default();
    let report = analyzer.analyze_from_bytes(&filename, file_data)?;
    tracing::info!(
        "Sheet analysis completed in {:?}. Found {} rows, {} columns",
        analysis_start.elapsed(),
        report.row_count,
        report.column_count
    );

    let form = form_from_report(&report);

    tracing::info!("Total processing completed in {:?}", start.elapsed());

    Ok(Json(AnalyzeResponse {
        analysis: report,
        form,
    }))
}
