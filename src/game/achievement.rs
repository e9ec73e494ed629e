//! Achievement evaluation: compares an account's cumulative statistics
//! against the library of threshold-based unlock conditions, records new
//! unlocks, and grants the attached reward schedules.

use std::collections::HashMap;

use chrono::Utc;
use log::info;

use crate::game::analytics;
use crate::game::errors::GameError;
use crate::game::progression;
use crate::game::storage::GameStore;
use crate::game::types::{
    AccountRecord, AchievementRecord, QuestCategory, QuestKind, Requirement, UnlockedAchievement,
};

/// Statistics derived from the quest log rather than stored on the account.
/// Computed once per evaluation pass so each requirement check is a lookup.
#[derive(Debug, Clone, Default)]
pub struct DerivedStats {
    pub streak: u32,
    pub kind_completions: HashMap<QuestKind, u32>,
    pub category_completions: HashMap<QuestCategory, u32>,
}

/// Scan the account's quests and completion history.
pub fn derive_stats(store: &GameStore, account_id: &str) -> Result<DerivedStats, GameError> {
    let quests = store.list_quests(account_id)?;
    let mut kind_completions: HashMap<QuestKind, u32> = HashMap::new();
    let mut category_completions: HashMap<QuestCategory, u32> = HashMap::new();
    let mut all_dates = Vec::new();

    for quest in &quests {
        let completions = quest.completed_dates.len() as u32;
        if completions > 0 {
            *kind_completions.entry(quest.kind).or_insert(0) += completions;
            *category_completions.entry(quest.category).or_insert(0) += completions;
        }
        all_dates.extend(quest.completed_dates.iter().copied());
    }

    // Streak requirements unlock against the best run ever reached, not
    // only the trailing one.
    let (_current, longest) = analytics::streaks(&all_dates);
    Ok(DerivedStats {
        streak: longest,
        kind_completions,
        category_completions,
    })
}

/// Whether `account` satisfies a single requirement, given derived stats.
fn requirement_met(
    store: &GameStore,
    account: &AccountRecord,
    derived: &DerivedStats,
    requirement: &Requirement,
) -> Result<bool, GameError> {
    use Requirement::*;

    let met = match requirement {
        QuestsCompleted { threshold } => account.stats.quests_completed >= *threshold,
        StreakReached { threshold } => {
            derived.streak.max(account.stats.longest_streak) >= *threshold
        }
        XpEarned { threshold } => account.stats.total_xp_earned >= *threshold,
        CoinsEarned { threshold } => account.stats.total_coins_earned >= *threshold,
        SkillLevelReached {
            category,
            threshold,
        } => account.currencies.skill_points_for(*category) >= *threshold,
        QuestTypeCompleted { kind, threshold } => {
            derived.kind_completions.get(kind).copied().unwrap_or(0) >= *threshold
        }
        CategoryCompleted {
            category,
            threshold,
        } => {
            derived
                .category_completions
                .get(category)
                .copied()
                .unwrap_or(0)
                >= *threshold
        }
        FriendsCount { threshold } => account.friends.len() as u32 >= *threshold,
        GuildsJoined { threshold } => account.guilds.len() as u32 >= *threshold,
        CustomEvent { event, threshold } => {
            account.stats.custom_events.get(event).copied().unwrap_or(0) >= *threshold
        }
        SpecificQuest { quest_id } => match store.get_quest(&account.id, quest_id) {
            Ok(quest) => !quest.completed_dates.is_empty(),
            Err(GameError::NotFound(_)) => false,
            Err(err) => return Err(err),
        },
    };
    Ok(met)
}

/// Evaluate the whole library for one account. Newly satisfied achievements
/// are appended to the unlock list with the current timestamp and their
/// reward schedules are granted through the progression engine. Returns the
/// achievements unlocked by this pass.
pub fn evaluate(
    store: &GameStore,
    account_id: &str,
    derived: &DerivedStats,
) -> Result<Vec<AchievementRecord>, GameError> {
    let mut account = store.get_account(account_id)?;
    let library = store.list_achievements()?;
    let mut unlocked = Vec::new();

    for achievement in library {
        if account.has_unlocked(&achievement.id) {
            continue;
        }
        if requirement_met(store, &account, derived, &achievement.requirement)? {
            account.achievements.push(UnlockedAchievement {
                achievement_id: achievement.id.clone(),
                unlocked_at: Utc::now(),
            });
            account.stats.achievements_unlocked += 1;
            info!("account {} unlocked achievement {}", account.id, achievement.id);
            unlocked.push(achievement);
        }
    }

    if unlocked.is_empty() {
        return Ok(unlocked);
    }
    store.put_account(account)?;

    // Grant reward schedules after the unlock list is persisted; each award
    // re-reads the account so balances never diverge from the store.
    for achievement in &unlocked {
        if achievement.rewards.xp > 0 {
            progression::award_experience(store, account_id, achievement.rewards.xp)?;
        }
        if achievement.rewards.coins > 0 {
            progression::award_coins(store, account_id, achievement.rewards.coins)?;
        }
        if achievement.rewards.gems > 0 {
            progression::award_gems(store, account_id, achievement.rewards.gems)?;
        }
    }

    Ok(unlocked)
}

/// The catalog as one account sees it: secret achievements are hidden until
/// unlocked; every entry carries the unlock record when present.
pub fn list_visible(
    store: &GameStore,
    account_id: &str,
) -> Result<Vec<(AchievementRecord, Option<UnlockedAchievement>)>, GameError> {
    let account = store.get_account(account_id)?;
    let mut visible = Vec::new();
    for achievement in store.list_achievements()? {
        let unlock = account
            .achievements
            .iter()
            .find(|u| u.achievement_id == achievement.id)
            .cloned();
        if achievement.is_secret && unlock.is_none() {
            continue;
        }
        visible.push((achievement, unlock));
    }
    Ok(visible)
}
