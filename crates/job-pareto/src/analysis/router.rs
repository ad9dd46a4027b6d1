use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::service::{
    ConcentrationService, ConcentrationServiceError, ParameterOverrides, ReportRequest,
};

/// Router builder exposing the concentration report endpoints.
pub fn concentration_router(service: Arc<ConcentrationService>) -> Router {
    Router::new()
        .route(
            "/api/v1/concentration/report",
            get(cached_report_handler).post(report_handler),
        )
        .route("/api/v1/concentration/parameters", get(parameters_handler))
        .with_state(service)
}

pub(crate) async fn report_handler(
    State(service): State<Arc<ConcentrationService>>,
    Json(request): Json<ReportRequest>,
) -> Response {
    match service.report(request) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn cached_report_handler(
    State(service): State<Arc<ConcentrationService>>,
    Query(overrides): Query<ParameterOverrides>,
) -> Response {
    match service.cached_report(overrides) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn parameters_handler(
    State(service): State<Arc<ConcentrationService>>,
) -> Response {
    (StatusCode::OK, Json(service.parameter_catalog())).into_response()
}

fn error_response(error: ConcentrationServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), Json(payload)).into_response()
}
