//! App listing handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::AppSummaryDto;
use crate::state::AppState;

/// List every configured app with its log paths.
pub async fn list(State(state): State<AppState>) -> Json<Vec<AppSummaryDto>> {
    let apps = state.catalog.list().await;
    Json(apps.into_iter().map(AppSummaryDto::from).collect())
}
