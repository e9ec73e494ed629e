//! Reward catalog and purchase handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::api::error::ApiError;
use crate::api::identity::Identity;
use crate::api::server::AppState;
use crate::game::reward::{self, RewardDraft};
use crate::game::types::RewardRecord;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<RewardRecord>>, ApiError> {
    Ok(Json(state.store.list_rewards()?))
}

pub async fn create(
    State(state): State<AppState>,
    Identity(account): Identity,
    Json(draft): Json<RewardDraft>,
) -> Result<(StatusCode, Json<RewardRecord>), ApiError> {
    let record = reward::create_reward(&state.store, &account, draft)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn purchase(
    State(state): State<AppState>,
    Identity(account): Identity,
    Path(reward_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let updated = reward::purchase(&state.store, &account.id, &reward_id)?;
    Ok(Json(json!({
        "message": "Reward purchased!",
        "user": updated,
    })))
}
