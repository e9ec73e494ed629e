//! Quest CRUD and completion handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::api::error::ApiError;
use crate::api::identity::Identity;
use crate::api::server::AppState;
use crate::game::quest::{self, QuestDraft, QuestPatch};
use crate::game::types::QuestRecord;

pub async fn list(
    State(state): State<AppState>,
    Identity(account): Identity,
) -> Result<Json<Vec<QuestRecord>>, ApiError> {
    Ok(Json(state.store.list_quests(&account.id)?))
}

pub async fn fetch(
    State(state): State<AppState>,
    Identity(account): Identity,
    Path(quest_id): Path<String>,
) -> Result<Json<QuestRecord>, ApiError> {
    Ok(Json(state.store.get_quest(&account.id, &quest_id)?))
}

pub async fn create(
    State(state): State<AppState>,
    Identity(account): Identity,
    Json(draft): Json<QuestDraft>,
) -> Result<(StatusCode, Json<QuestRecord>), ApiError> {
    let quest = quest::create_quest(&state.store, state.notifier.as_ref(), &account.id, draft)?;
    Ok((StatusCode::CREATED, Json(quest)))
}

pub async fn update(
    State(state): State<AppState>,
    Identity(account): Identity,
    Path(quest_id): Path<String>,
    Json(patch): Json<QuestPatch>,
) -> Result<Json<QuestRecord>, ApiError> {
    let quest = quest::update_quest(&state.store, &account.id, &quest_id, patch)?;
    Ok(Json(quest))
}

pub async fn remove(
    State(state): State<AppState>,
    Identity(account): Identity,
    Path(quest_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    quest::delete_quest(&state.store, &account.id, &quest_id)?;
    Ok(Json(json!({ "message": "Quest deleted" })))
}

pub async fn complete(
    State(state): State<AppState>,
    Identity(account): Identity,
    Path(quest_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let (quest, rewards) =
        quest::complete_quest(&state.store, state.notifier.as_ref(), &account.id, &quest_id)?;
    Ok(Json(json!({ "quest": quest, "rewards": rewards })))
}
