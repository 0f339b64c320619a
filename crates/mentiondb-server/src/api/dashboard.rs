use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use mentiondb_core::FilterAction;

use crate::dashboard::DashboardSnapshot;
use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

pub(super) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<DashboardSnapshot>> {
    let snapshot = state.dashboard.snapshot().await;
    Json(ApiResponse::new(snapshot, req_id.0))
}

/// Applies one filter action and returns the state as of the start of the
/// re-fetch (`loading` is `true`). Poll `GET /api/v1/dashboard` for the rows.
pub(super) async fn apply_filter_action(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    action: Result<Json<FilterAction>, JsonRejection>,
) -> Result<Json<ApiResponse<DashboardSnapshot>>, ApiError> {
    let Json(action) =
        action.map_err(|e| ApiError::bad_request(req_id.0.clone(), e.body_text()))?;

    tracing::info!(?action, "filter action");
    // Detach: the re-fetch outlives this request.
    drop(state.dashboard.dispatch(action).await);

    let snapshot = state.dashboard.snapshot().await;
    Ok(Json(ApiResponse::new(snapshot, req_id.0)))
}
