//! Registration, profile, and friend handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::error::ApiError;
use crate::api::identity::Identity;
use crate::api::server::AppState;
use crate::game::account::{self, AccountDraft, ProfilePatch};
use crate::game::types::{AccountRecord, AccountRole};

pub async fn register(
    State(state): State<AppState>,
    Json(draft): Json<AccountDraft>,
) -> Result<(StatusCode, Json<AccountRecord>), ApiError> {
    let promote = state
        .admin_emails
        .iter()
        .any(|a| a.eq_ignore_ascii_case(draft.email.trim()));

    let mut account = account::register(
        &state.store,
        draft,
        state.starting_coins,
        state.starting_gems,
    )?;
    if promote {
        account.role = AccountRole::Admin;
        state.store.put_account(account.clone())?;
    }
    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn profile(Identity(account): Identity) -> Json<AccountRecord> {
    Json(account)
}

pub async fn update_profile(
    State(state): State<AppState>,
    Identity(account): Identity,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<AccountRecord>, ApiError> {
    let updated = account::update_profile(&state.store, &account.id, patch)?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct FriendRequest {
    pub friend_id: String,
}

pub async fn add_friend(
    State(state): State<AppState>,
    Identity(account): Identity,
    Json(req): Json<FriendRequest>,
) -> Result<Json<Value>, ApiError> {
    account::add_friend(
        &state.store,
        state.notifier.as_ref(),
        &account.id,
        &req.friend_id,
    )?;
    Ok(Json(json!({ "message": "Friend added" })))
}
