//! HTTP Endpoints
//!
//! REST API for the calculators.

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fincalc_core::{to_indian_currency, to_indian_words, CalculatorKind};
use fincalc_session::{CalculationReport, CalculatorForm, SavedCalculation};

use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.config.read();
    let cors_layer = build_cors_layer(&config.server.cors_origins, config.server.cors_enabled);
    drop(config);

    Router::new()
        // Calculators
        .route("/api/calculate/:kind", post(calculate))
        .route("/api/active", get(get_active))
        .route("/api/active/:kind", post(set_active))
        // Saved results
        .route("/api/results", get(list_results))
        .route("/api/results/:kind", post(save_result))
        // Formatting helpers
        .route("/api/format", get(format_amount))
        // Health check
        .route("/health", get(health_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns a permissive layer
/// - If cors_origins is empty, defaults to localhost:3000
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let localhost = || {
        CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };

    if origins.is_empty() {
        tracing::info!("No CORS origins configured, defaulting to localhost:3000");
        return localhost();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::error!("All configured CORS origins are invalid, falling back to localhost");
        return localhost();
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Run a calculator and remember the outcome as its last report
async fn calculate(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(form): Json<CalculatorForm>,
) -> Result<Json<CalculationReport>, ServerError> {
    let kind: CalculatorKind = kind.parse()?;

    let outcome = state.service.calculate(kind, &form).await;
    state.session.lock().record(kind, &outcome);

    Ok(Json(outcome?))
}

#[derive(Debug, Serialize)]
struct ActiveCalculator {
    active: CalculatorKind,
}

async fn get_active(State(state): State<AppState>) -> Json<ActiveCalculator> {
    Json(ActiveCalculator {
        active: state.session.lock().active(),
    })
}

async fn set_active(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<ActiveCalculator>, ServerError> {
    let kind: CalculatorKind = kind.parse()?;
    state.session.lock().show(kind);
    Ok(Json(ActiveCalculator { active: kind }))
}

/// Save the last successful report of a calculator
async fn save_result(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<(StatusCode, Json<SavedCalculation>), ServerError> {
    let kind: CalculatorKind = kind.parse()?;

    let entry = state.session.lock().save(kind).cloned();
    entry
        .map(|entry| (StatusCode::CREATED, Json(entry)))
        .ok_or_else(|| {
            ServerError::Conflict(format!(
                "No successful {} calculation to save",
                kind.label()
            ))
        })
}

async fn list_results(State(state): State<AppState>) -> Json<Vec<SavedCalculation>> {
    Json(state.session.lock().saved().iter().cloned().collect())
}

#[derive(Debug, Deserialize)]
struct FormatQuery {
    amount: f64,
}

#[derive(Debug, Serialize)]
struct FormattedAmount {
    currency: String,
    words: String,
}

/// Currency and words for an arbitrary amount
async fn format_amount(
    Query(query): Query<FormatQuery>,
) -> Result<Json<FormattedAmount>, ServerError> {
    if !query.amount.is_finite() {
        return Err(ServerError::InvalidRequest(
            "amount must be a finite number".to_string(),
        ));
    }

    Ok(Json(FormattedAmount {
        currency: to_indian_currency(query.amount),
        words: to_indian_words(query.amount),
    }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => ServerError::NotFound("Metrics exporter disabled".to_string()).into_response(),
    }
}
