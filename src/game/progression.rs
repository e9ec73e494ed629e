//! Progression engine: converts experience awards into level advancement
//! and applies additive currency updates with lifetime-total tracking.

use log::debug;

use crate::game::errors::GameError;
use crate::game::storage::GameStore;
use crate::game::types::QuestCategory;

/// Result of an experience award.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: u32,
    pub levels_gained: u32,
}

/// Experience required to advance from `level` to `level + 1`:
/// `floor(100 * 1.5^(level-1))`. Accelerating cost curve; 100/150/225 for
/// the first three levels.
pub fn xp_for_next_level(level: u32) -> u64 {
    (100.0 * 1.5f64.powi(level as i32 - 1)).floor() as u64
}

/// Award experience to an account, resolving any number of level-ups in a
/// single call. The balance carries the remainder, so awarding `a + b` at
/// once lands on the same level and balance as awarding `a` then `b`.
pub fn award_experience(
    store: &GameStore,
    account_id: &str,
    amount: u64,
) -> Result<LevelUp, GameError> {
    let mut account = store.get_account(account_id)?;
    account.currencies.xp += amount;
    account.stats.total_xp_earned += amount;

    let mut levels_gained = 0u32;
    let mut cost = xp_for_next_level(account.avatar.level);
    while account.currencies.xp >= cost {
        account.currencies.xp -= cost;
        account.avatar.level += 1;
        levels_gained += 1;
        cost = xp_for_next_level(account.avatar.level);
    }

    if levels_gained > 0 {
        debug!(
            "account {} reached level {} (+{})",
            account.id, account.avatar.level, levels_gained
        );
    }

    let new_level = account.avatar.level;
    store.put_account(account)?;
    Ok(LevelUp {
        new_level,
        levels_gained,
    })
}

/// Add coins; lifetime earnings accumulate alongside the balance.
pub fn award_coins(store: &GameStore, account_id: &str, amount: i64) -> Result<(), GameError> {
    let mut account = store.get_account(account_id)?;
    account.currencies.coins += amount;
    account.stats.total_coins_earned += amount;
    store.put_account(account)
}

pub fn award_gems(store: &GameStore, account_id: &str, amount: i64) -> Result<(), GameError> {
    let mut account = store.get_account(account_id)?;
    account.currencies.gems += amount;
    store.put_account(account)
}

/// Credit skill points to one category bucket.
pub fn award_skill_points(
    store: &GameStore,
    account_id: &str,
    category: QuestCategory,
    amount: u32,
) -> Result<(), GameError> {
    if amount == 0 {
        return Ok(());
    }
    let mut account = store.get_account(account_id)?;
    *account.currencies.skill_points.entry(category).or_insert(0) += amount;
    store.put_account(account)
}
