use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::{AppraisalId, AppraisalStatus};
use super::repository::{AppraisalFilter, AppraisalRepository};
use super::scoring::AppraisalView;
use super::service::{AppraisalService, AppraisalServiceError, Reviewer};

/// Router builder exposing the role-scoped listing, detail, and export
/// endpoints.
pub fn appraisal_router<R>(service: Arc<AppraisalService<R>>) -> Router
where
    R: AppraisalRepository + 'static,
{
    Router::new()
        .route("/api/v1/appraisals", get(list_handler::<R>))
        .route("/api/v1/appraisals/export.csv", get(export_handler::<R>))
        .route("/api/v1/appraisals/:appraisal_id", get(detail_handler::<R>))
        .with_state(service)
}

/// Query parameters accepted by the listing and export endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    department: Option<String>,
    cycle: Option<String>,
    status: Option<String>,
    search: Option<String>,
    today: Option<String>,
}

enum ResolvedQuery {
    Filter(AppraisalFilter, NaiveDate),
    /// Malformed status parameter: fail closed with an empty result set.
    Closed(NaiveDate),
}

impl ListQuery {
    fn resolve(self) -> ResolvedQuery {
        let today = self
            .today
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
            .unwrap_or_else(|| Local::now().date_naive());

        let status = match self.status.as_deref() {
            None => None,
            Some(raw) => match AppraisalStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    warn!(status = raw, "unknown status filter, returning empty set");
                    return ResolvedQuery::Closed(today);
                }
            },
        };

        ResolvedQuery::Filter(
            AppraisalFilter {
                department: self.department,
                cycle_id: self.cycle,
                status,
                search: self.search,
            },
            today,
        )
    }
}

/// Resolve the reviewer principal from request headers. Session mechanics
/// live upstream; the headers carry the already-authenticated role.
fn reviewer_from_headers(headers: &HeaderMap) -> Result<Reviewer, Response> {
    let role = headers
        .get("x-reviewer-role")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_ascii_lowercase());

    let department = headers
        .get("x-reviewer-department")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    match (role.as_deref(), department) {
        (Some("dean"), _) => Ok(Reviewer::Dean),
        (Some("hod"), Some(department)) => Ok(Reviewer::Hod { department }),
        (Some("hod"), None) => Err(forbidden("hod reviewer requires a department")),
        _ => Err(forbidden("missing or unrecognized reviewer role")),
    }
}

fn forbidden(message: &str) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::FORBIDDEN, Json(payload)).into_response()
}

fn service_error_response(error: AppraisalServiceError) -> Response {
    match error {
        AppraisalServiceError::Authorization { .. } => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::FORBIDDEN, Json(payload)).into_response()
        }
        AppraisalServiceError::NotFound { .. } => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        AppraisalServiceError::Repository(_) | AppraisalServiceError::Export(_) => {
            warn!(%error, "appraisal request failed");
            let payload = json!({ "error": "internal error" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct ListResponse {
    today: NaiveDate,
    count: usize,
    appraisals: Vec<AppraisalView>,
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<AppraisalService<R>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: AppraisalRepository + 'static,
{
    let reviewer = match reviewer_from_headers(&headers) {
        Ok(reviewer) => reviewer,
        Err(response) => return response,
    };

    let (filter, today) = match query.resolve() {
        ResolvedQuery::Filter(filter, today) => (filter, today),
        ResolvedQuery::Closed(today) => {
            let body = ListResponse {
                today,
                count: 0,
                appraisals: Vec::new(),
            };
            return (StatusCode::OK, Json(body)).into_response();
        }
    };

    match service.list(&reviewer, filter, today) {
        Ok(appraisals) => {
            let body = ListResponse {
                today,
                count: appraisals.len(),
                appraisals,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<AppraisalService<R>>>,
    headers: HeaderMap,
    Path(appraisal_id): Path<String>,
) -> Response
where
    R: AppraisalRepository + 'static,
{
    let reviewer = match reviewer_from_headers(&headers) {
        Ok(reviewer) => reviewer,
        Err(response) => return response,
    };

    let id = AppraisalId(appraisal_id);
    let today = Local::now().date_naive();

    match service.detail(&reviewer, &id, today) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<AppraisalService<R>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: AppraisalRepository + 'static,
{
    let reviewer = match reviewer_from_headers(&headers) {
        Ok(reviewer) => reviewer,
        Err(response) => return response,
    };

    let csv_result = match query.resolve() {
        ResolvedQuery::Filter(filter, today) => service.export_csv(&reviewer, filter, today),
        // Fail closed: header row only.
        ResolvedQuery::Closed(_) => {
            super::export::csv_string(&[]).map_err(AppraisalServiceError::from)
        }
    };

    match csv_result {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"appraisals.csv\"",
                ),
            ],
            body,
        )
            .into_response(),
        Err(error) => service_error_response(error),
    }
}
