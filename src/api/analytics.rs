//! Progress analytics handler.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::identity::Identity;
use crate::api::server::AppState;
use crate::game::analytics::{self, AnalyticsSummary};

pub async fn summary(
    State(state): State<AppState>,
    Identity(account): Identity,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    Ok(Json(analytics::summary(&state.store, &account.id)?))
}
