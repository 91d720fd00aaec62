use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use super::calendar::standing_for_display;
use super::presentation::{EligibilityView, StandingView, WindowView};
use super::repository::{NotificationPublisher, SubmissionRepository};
use super::service::{ProgressTrackingService, SubmissionAttempt, SubmissionServiceError};

/// Router builder exposing HTTP endpoints for standings and submissions.
pub fn progress_router<R, N>(service: Arc<ProgressTrackingService<R, N>>) -> Router
where
    R: SubmissionRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/academics/standing", post(standing_handler::<R, N>))
        .route(
            "/api/v1/progress/submissions",
            post(submit_handler::<R, N>),
        )
        .route(
            "/api/v1/progress/eligibility",
            post(eligibility_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct StandingRequest {
    enrollment_span: String,
    /// Defaults to today when the client omits it.
    on: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct EligibilityRequest {
    student_id: String,
    enrollment_span: String,
    on: Option<NaiveDate>,
}

pub(crate) async fn standing_handler<R, N>(
    State(_service): State<Arc<ProgressTrackingService<R, N>>>,
    axum::Json(request): axum::Json<StandingRequest>,
) -> Response
where
    R: SubmissionRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let on = request.on.unwrap_or_else(|| Utc::now().date_naive());
    let standing = standing_for_display(&request.enrollment_span, on);
    let view = StandingView::from_standing(&standing);
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<ProgressTrackingService<R, N>>>,
    axum::Json(attempt): axum::Json<SubmissionAttempt>,
) -> Response
where
    R: SubmissionRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(attempt) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(SubmissionServiceError::WindowClosed(decision)) => {
            let view = WindowView::from_decision(&decision);
            (StatusCode::CONFLICT, axum::Json(view)).into_response()
        }
        Err(error @ SubmissionServiceError::Term(_))
        | Err(error @ SubmissionServiceError::Capture(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn eligibility_handler<R, N>(
    State(service): State<Arc<ProgressTrackingService<R, N>>>,
    axum::Json(request): axum::Json<EligibilityRequest>,
) -> Response
where
    R: SubmissionRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let student = super::domain::StudentId(request.student_id);

    let eligibility = match service.eligibility(&student, &request.enrollment_span) {
        Ok(result) => result,
        Err(error @ SubmissionServiceError::Term(_)) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
        }
    };

    let on = request.on.unwrap_or_else(|| Utc::now().date_naive());
    let window = match service.window(&student, &request.enrollment_span, on) {
        Ok(decision) => decision,
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
        }
    };

    let payload = json!({
        "eligibility": EligibilityView::from_result(&eligibility),
        "window": WindowView::from_decision(&window),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
