//! Reward catalog operations: admin-only creation and coin/gem purchases
//! with avatar customization merging.

use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;

use crate::game::errors::GameError;
use crate::game::storage::GameStore;
use crate::game::types::{
    AccountRecord, InventoryEntry, RewardCost, RewardKind, RewardRecord,
};
use crate::validation;

/// Client payload for reward creation (administrators only).
#[derive(Debug, Clone, Deserialize)]
pub struct RewardDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: RewardCost,
    pub kind: RewardKind,
    #[serde(default)]
    pub customization: HashMap<String, String>,
}

pub fn create_reward(
    store: &GameStore,
    actor: &AccountRecord,
    draft: RewardDraft,
) -> Result<RewardRecord, GameError> {
    if !actor.is_admin() {
        return Err(GameError::PermissionDenied(
            "admin access required".to_string(),
        ));
    }
    validation::validate_name(&draft.name)?;
    if draft.cost.coins < 0 || draft.cost.gems < 0 {
        return Err(GameError::Validation(
            "reward cost components must be non-negative".to_string(),
        ));
    }

    let mut reward = RewardRecord::new(draft.name.trim(), draft.kind, draft.cost)
        .with_description(&draft.description);
    reward.customization = draft.customization;
    store.put_reward(reward.clone())?;
    Ok(reward)
}

/// Purchase a reward: both currency components are checked independently
/// before either is debited, so a failed purchase leaves the account
/// untouched. Cosmetic rewards merge their customization payload into the
/// avatar, later keys overwriting earlier ones.
pub fn purchase(
    store: &GameStore,
    account_id: &str,
    reward_id: &str,
) -> Result<AccountRecord, GameError> {
    let reward = store.get_reward(reward_id)?;
    let mut account = store.get_account(account_id)?;

    if account.currencies.coins < reward.cost.coins || account.currencies.gems < reward.cost.gems {
        return Err(GameError::InsufficientFunds);
    }

    account.currencies.coins -= reward.cost.coins;
    account.currencies.gems -= reward.cost.gems;
    account.inventory.push(InventoryEntry {
        reward_id: reward.id.clone(),
        acquired_at: Utc::now(),
        used: false,
    });

    if reward.kind == RewardKind::Customization {
        for (slot, value) in &reward.customization {
            account
                .avatar
                .customization
                .insert(slot.clone(), value.clone());
        }
    }

    store.put_account(account.clone())?;
    Ok(account)
}
