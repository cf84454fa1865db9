//! HTTP surface: intake form pages and the JSON screening API

use crate::metrics::ScreeningMetrics;
use crate::model::inference::{ScreenError, ScreeningEngine};
use crate::types::record::IntakeRecord;
use crate::types::report::ScreeningReport;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Shared state handed to every request handler.
///
/// The engine is immutable after startup, so handlers run concurrently
/// without coordination.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ScreeningEngine>,
    pub metrics: Arc<ScreeningMetrics>,
    pub frontend_dir: Arc<PathBuf>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_form))
        .route("/result", post(handle_form))
        .route("/api/screen", post(api_screen))
        .fallback(not_found)
        .with_state(state)
}

/// Error returned by a screening request.
pub struct ApiError(ScreenError);

impl From<ScreenError> for ApiError {
    fn from(err: ScreenError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            // The record could not be encoded: the caller's data is at fault.
            ScreenError::Encode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            // A length mismatch means the deployed model is broken.
            ScreenError::Score(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.0.to_string()).into_response()
    }
}

async fn serve_form(State(state): State<AppState>) -> Response {
    serve_page(&state, "index.html", None).await
}

async fn handle_form(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let record = IntakeRecord::from_form(&fields);
    let start = Instant::now();

    match state.engine.screen_one(&record) {
        Ok(prediction) => {
            state
                .metrics
                .record_screening(start.elapsed(), prediction.probability, prediction.label);
            debug!(
                prediction = prediction.label,
                probability = prediction.probability,
                "Intake form screened"
            );
            serve_page(&state, "result.html", Some(prediction.label)).await
        }
        Err(err) => {
            state.metrics.record_failure();
            error!(error = %err, "Failed to screen intake form");
            ApiError::from(err).into_response()
        }
    }
}

async fn api_screen(
    State(state): State<AppState>,
    Json(records): Json<Vec<IntakeRecord>>,
) -> Result<Json<Vec<ScreeningReport>>, ApiError> {
    let start = Instant::now();
    let reports = match state.engine.screen_to_reports(&records) {
        Ok(reports) => reports,
        Err(err) => {
            state.metrics.record_failure();
            error!(error = %err, records = records.len(), "Screening batch failed");
            return Err(err.into());
        }
    };

    let per_record = start.elapsed() / reports.len().max(1) as u32;
    for report in &reports {
        state
            .metrics
            .record_screening(per_record, report.probability, report.prediction);
    }

    info!(
        records = reports.len(),
        positives = reports.iter().filter(|r| r.prediction == 1).count(),
        "Screening batch complete"
    );

    Ok(Json(reports))
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html("<h1>404 Not Found</h1>")).into_response()
}

/// Serve a page from the frontend directory, substituting the prediction
/// into the `{result}` placeholder when one is given.
async fn serve_page(state: &AppState, file: &str, result: Option<u8>) -> Response {
    let path = state.frontend_dir.join(file);
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => {
            let page = match result {
                Some(label) => render_result(&page, label),
                None => page,
            };
            Html(page).into_response()
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "Failed to read frontend page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

fn render_result(template: &str, label: u8) -> String {
    template.replacen("{result}", &label.to_string(), 1)
}
