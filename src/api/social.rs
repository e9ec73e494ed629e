//! Guild handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::api::error::ApiError;
use crate::api::identity::Identity;
use crate::api::server::AppState;
use crate::game::guild::{self, GuildDraft};
use crate::game::types::GuildRecord;

pub async fn list(
    State(state): State<AppState>,
    Identity(account): Identity,
) -> Result<Json<Vec<GuildRecord>>, ApiError> {
    Ok(Json(guild::guilds_for(&state.store, &account.id)?))
}

pub async fn create(
    State(state): State<AppState>,
    Identity(account): Identity,
    Json(draft): Json<GuildDraft>,
) -> Result<(StatusCode, Json<GuildRecord>), ApiError> {
    let record = guild::create_guild(&state.store, &account.id, draft)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn join(
    State(state): State<AppState>,
    Identity(account): Identity,
    Path(guild_id): Path<String>,
) -> Result<Json<GuildRecord>, ApiError> {
    let record = guild::join_guild(&state.store, state.notifier.as_ref(), &account.id, &guild_id)?;
    Ok(Json(record))
}

pub async fn leave(
    State(state): State<AppState>,
    Identity(account): Identity,
    Path(guild_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    guild::leave_guild(&state.store, &account.id, &guild_id)?;
    Ok(Json(json!({ "message": "Left guild" })))
}
