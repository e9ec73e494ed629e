//! Achievement catalog handler. Secret achievements stay hidden until the
//! caller has unlocked them.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::identity::Identity;
use crate::api::server::AppState;
use crate::game::achievement;
use crate::game::types::AchievementRecord;

#[derive(Debug, Serialize)]
pub struct AchievementView {
    #[serde(flatten)]
    pub achievement: AchievementRecord,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

pub async fn list(
    State(state): State<AppState>,
    Identity(account): Identity,
) -> Result<Json<Vec<AchievementView>>, ApiError> {
    let visible = achievement::list_visible(&state.store, &account.id)?;
    let views = visible
        .into_iter()
        .map(|(achievement, unlock)| AchievementView {
            achievement,
            unlocked: unlock.is_some(),
            unlocked_at: unlock.map(|u| u.unlocked_at),
        })
        .collect();
    Ok(Json(views))
}
