//! Quest lifecycle: creation with difficulty-derived reward schedules,
//! updates, deletion, and the completion workflow (recurrence handling,
//! reward grant, achievement pass, completion notification).

use chrono::{DateTime, Duration, Months, Utc};
use serde::Deserialize;

use crate::game::achievement;
use crate::game::analytics;
use crate::game::errors::GameError;
use crate::game::notify::{dispatch, Notification, Notifier};
use crate::game::progression;
use crate::game::storage::GameStore;
use crate::game::types::{
    Difficulty, QuestCategory, QuestKind, QuestRecord, QuestRewards, QuestStatus, Recurrence,
    RecurrenceFrequency,
};
use crate::validation;

/// Reward schedule for a difficulty, credited to `category`'s skill bucket.
/// Experience multipliers 5/10/20/40/100 and coin multipliers 1/3/5/10/25
/// for trivial through epic; skill points are `max(1, xp / 10)`.
pub fn rewards_for(difficulty: Difficulty, category: QuestCategory) -> QuestRewards {
    let (xp, coins) = match difficulty {
        Difficulty::Trivial => (5, 1),
        Difficulty::Easy => (10, 3),
        Difficulty::Medium => (20, 5),
        Difficulty::Hard => (40, 10),
        Difficulty::Epic => (100, 25),
    };
    let mut rewards = QuestRewards {
        xp,
        coins,
        skill_points: Default::default(),
    };
    rewards
        .skill_points
        .insert(category, ((xp / 10) as u32).max(1));
    rewards
}

/// Client payload for quest creation. The reward schedule defaults from the
/// difficulty but may be overridden explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: QuestCategory,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub kind: QuestKind,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub rewards: Option<QuestRewards>,
}

/// Partial update payload; absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<QuestCategory>,
    pub difficulty: Option<Difficulty>,
    pub kind: Option<QuestKind>,
    pub recurrence: Option<Recurrence>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub progress: Option<u8>,
    pub status: Option<QuestStatus>,
}

pub fn create_quest(
    store: &GameStore,
    notifier: &dyn Notifier,
    owner_id: &str,
    draft: QuestDraft,
) -> Result<QuestRecord, GameError> {
    validation::validate_title(&draft.title)?;
    validation::validate_tags(&draft.tags)?;

    let rewards = draft
        .rewards
        .unwrap_or_else(|| rewards_for(draft.difficulty, draft.category));

    let mut quest = QuestRecord::new(owner_id, draft.title.trim(), draft.category)
        .with_difficulty(draft.difficulty)
        .with_kind(draft.kind)
        .with_rewards(rewards);
    quest.description = draft.description;
    quest.recurrence = draft.recurrence;
    quest.due_date = draft.due_date;
    quest.tags = draft.tags;
    quest.is_public = draft.is_public;
    store.put_quest(quest.clone())?;

    let mut account = store.get_account(owner_id)?;
    account.stats.tasks_created += 1;
    store.put_account(account.clone())?;

    dispatch(
        notifier,
        &account,
        Notification::new(
            "New Quest Created!",
            format!("You've started \"{}\". Good luck!", quest.title),
        ),
    );

    Ok(quest)
}

pub fn update_quest(
    store: &GameStore,
    owner_id: &str,
    quest_id: &str,
    patch: QuestPatch,
) -> Result<QuestRecord, GameError> {
    let mut quest = store.get_quest(owner_id, quest_id)?;

    if let Some(title) = patch.title {
        validation::validate_title(&title)?;
        quest.title = title.trim().to_string();
    }
    if let Some(description) = patch.description {
        quest.description = description;
    }
    if let Some(category) = patch.category {
        quest.category = category;
    }
    if let Some(difficulty) = patch.difficulty {
        quest.difficulty = difficulty;
    }
    if let Some(kind) = patch.kind {
        quest.kind = kind;
    }
    if let Some(recurrence) = patch.recurrence {
        quest.recurrence = recurrence;
    }
    if let Some(due_date) = patch.due_date {
        quest.due_date = Some(due_date);
    }
    if let Some(tags) = patch.tags {
        validation::validate_tags(&tags)?;
        quest.tags = tags;
    }
    if let Some(is_public) = patch.is_public {
        quest.is_public = is_public;
    }
    if let Some(progress) = patch.progress {
        if progress > 100 {
            return Err(GameError::Validation(
                "progress must be between 0 and 100".to_string(),
            ));
        }
        quest.progress = progress;
    }
    if let Some(status) = patch.status {
        // Updates may fail or archive an active quest, or pull an archived
        // one back. Completion only happens through `complete_quest`, and a
        // completed quest never reopens this way.
        let allowed = status == quest.status
            || matches!(
                (quest.status, status),
                (QuestStatus::Active, QuestStatus::Failed | QuestStatus::Archived)
                    | (QuestStatus::Archived, QuestStatus::Active)
            );
        if !allowed {
            return Err(GameError::Validation(format!(
                "quest status cannot change from {:?} to {:?}",
                quest.status, status
            )));
        }
        quest.status = status;
    }

    store.put_quest(quest.clone())?;
    Ok(quest)
}

pub fn delete_quest(store: &GameStore, owner_id: &str, quest_id: &str) -> Result<(), GameError> {
    // Surfaces the same NotFound for missing and foreign quests.
    store.get_quest(owner_id, quest_id)?;
    store.delete_quest(owner_id, quest_id)
}

fn next_due_date(due: DateTime<Utc>, frequency: RecurrenceFrequency) -> DateTime<Utc> {
    match frequency {
        RecurrenceFrequency::Daily => due + Duration::days(1),
        RecurrenceFrequency::Weekly => due + Duration::weeks(1),
        RecurrenceFrequency::Monthly => due
            .checked_add_months(Months::new(1))
            .unwrap_or(due + Duration::days(30)),
        RecurrenceFrequency::Once => due,
    }
}

/// Complete a quest: mark it done, handle recurrence, grant the reward
/// schedule through the progression engine, run the achievement pass, and
/// emit a best-effort completion notification. Completing a quest that is
/// not `Active` (including a second completion of a one-off quest) yields
/// the same `NotFound` as a missing or foreign quest.
pub fn complete_quest(
    store: &GameStore,
    notifier: &dyn Notifier,
    owner_id: &str,
    quest_id: &str,
) -> Result<(QuestRecord, QuestRewards), GameError> {
    let mut quest = store.get_quest(owner_id, quest_id)?;
    if !quest.is_active() {
        return Err(GameError::NotFound(format!("quest: {}", quest_id)));
    }

    let now = Utc::now();
    quest.status = QuestStatus::Completed;
    quest.progress = 100;
    quest.completed_dates.push(now);

    if quest.recurrence.frequency != RecurrenceFrequency::Once {
        let next = next_due_date(quest.due_date.unwrap_or(now), quest.recurrence.frequency);
        let series_ended = quest
            .recurrence
            .end_date
            .map(|end| next > end)
            .unwrap_or(false);
        if !series_ended {
            quest.status = QuestStatus::Active;
            quest.progress = 0;
            quest.due_date = Some(next);
            quest.streak_count += 1;
        }
    }

    store.put_quest(quest.clone())?;

    let rewards = quest.rewards.clone();

    // Completion statistics feed the achievement pass below.
    let mut account = store.get_account(owner_id)?;
    account.stats.quests_completed += 1;
    store.put_account(account)?;

    progression::award_experience(store, owner_id, rewards.xp)?;
    progression::award_coins(store, owner_id, rewards.coins)?;
    for (category, points) in &rewards.skill_points {
        progression::award_skill_points(store, owner_id, *category, *points)?;
    }

    let derived = achievement::derive_stats(store, owner_id)?;
    let all_dates: Vec<DateTime<Utc>> = store
        .list_quests(owner_id)?
        .iter()
        .flat_map(|q| q.completed_dates.iter().copied())
        .collect();
    let (current_streak, longest_streak) = analytics::streaks(&all_dates);
    let mut account = store.get_account(owner_id)?;
    account.stats.daily_streak = current_streak;
    account.stats.longest_streak = account.stats.longest_streak.max(longest_streak);
    store.put_account(account)?;

    achievement::evaluate(store, owner_id, &derived)?;

    let account = store.get_account(owner_id)?;
    dispatch(
        notifier,
        &account,
        Notification::new(
            "Quest Completed!",
            format!("You earned {} XP and {} coins!", rewards.xp, rewards.coins),
        ),
    );

    Ok((quest, rewards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::notify::LogNotifier;
    use crate::game::storage::GameStoreBuilder;
    use crate::game::types::AccountRecord;
    use tempfile::TempDir;

    fn setup() -> (TempDir, GameStore, String) {
        let dir = TempDir::new().expect("tempdir");
        let store = GameStoreBuilder::new(dir.path())
            .without_seed_library()
            .open()
            .expect("store");
        let account = store
            .create_account(AccountRecord::new("alice@example.com", "Alice"))
            .expect("account");
        let id = account.id;
        (dir, store, id)
    }

    fn draft(title: &str) -> QuestDraft {
        QuestDraft {
            title: title.to_string(),
            description: String::new(),
            category: QuestCategory::Fitness,
            difficulty: Difficulty::Medium,
            kind: QuestKind::Daily,
            recurrence: Recurrence::default(),
            due_date: None,
            tags: Vec::new(),
            is_public: false,
            rewards: None,
        }
    }

    #[test]
    fn reward_table_matches_difficulty() {
        let trivial = rewards_for(Difficulty::Trivial, QuestCategory::Other);
        assert_eq!((trivial.xp, trivial.coins), (5, 1));
        assert_eq!(trivial.skill_points[&QuestCategory::Other], 1);

        let epic = rewards_for(Difficulty::Epic, QuestCategory::Learning);
        assert_eq!((epic.xp, epic.coins), (100, 25));
        assert_eq!(epic.skill_points[&QuestCategory::Learning], 10);
    }

    #[test]
    fn create_rejects_blank_title() {
        let (_dir, store, owner) = setup();
        let err = create_quest(&store, &LogNotifier, &owner, draft("   ")).unwrap_err();
        assert!(matches!(err, GameError::Validation(_)));
    }

    #[test]
    fn create_applies_default_rewards_and_counts_task() {
        let (_dir, store, owner) = setup();
        let quest = create_quest(&store, &LogNotifier, &owner, draft("Morning run")).unwrap();
        assert_eq!(quest.rewards.xp, 20);
        assert_eq!(quest.rewards.coins, 5);
        let account = store.get_account(&owner).unwrap();
        assert_eq!(account.stats.tasks_created, 1);
    }

    #[test]
    fn completing_one_off_quest_is_terminal() {
        let (_dir, store, owner) = setup();
        let quest = create_quest(&store, &LogNotifier, &owner, draft("Morning run")).unwrap();

        let (done, rewards) = complete_quest(&store, &LogNotifier, &owner, &quest.id).unwrap();
        assert_eq!(done.status, QuestStatus::Completed);
        assert_eq!(done.progress, 100);
        assert_eq!(done.completed_dates.len(), 1);
        assert_eq!(rewards.xp, 20);

        // Second completion must be rejected as not found.
        let err = complete_quest(&store, &LogNotifier, &owner, &quest.id).unwrap_err();
        assert!(matches!(err, GameError::NotFound(_)));
        let stored = store.get_quest(&owner, &quest.id).unwrap();
        assert_eq!(stored.completed_dates.len(), 1);
    }

    #[test]
    fn medium_quest_at_level_one_stays_level_one() {
        let (_dir, store, owner) = setup();
        let quest = create_quest(&store, &LogNotifier, &owner, draft("Morning run")).unwrap();
        complete_quest(&store, &LogNotifier, &owner, &quest.id).unwrap();

        let account = store.get_account(&owner).unwrap();
        assert_eq!(account.avatar.level, 1);
        assert_eq!(account.currencies.xp, 20);
        assert_eq!(account.currencies.coins, 105);
        assert_eq!(account.currencies.skill_points_for(QuestCategory::Fitness), 2);
        assert_eq!(account.stats.quests_completed, 1);
    }

    #[test]
    fn recurring_daily_quest_reopens_with_advanced_due_date() {
        let (_dir, store, owner) = setup();
        let due = Utc::now();
        let mut d = draft("Water the plants");
        d.recurrence.frequency = RecurrenceFrequency::Daily;
        d.due_date = Some(due);
        let quest = create_quest(&store, &LogNotifier, &owner, d).unwrap();

        let (reopened, _) = complete_quest(&store, &LogNotifier, &owner, &quest.id).unwrap();
        assert_eq!(reopened.status, QuestStatus::Active);
        assert_eq!(reopened.progress, 0);
        assert_eq!(reopened.streak_count, 1);
        assert_eq!(reopened.due_date, Some(due + Duration::days(1)));
        assert_eq!(reopened.completed_dates.len(), 1);
    }

    #[test]
    fn recurrence_past_end_date_stays_completed() {
        let (_dir, store, owner) = setup();
        let due = Utc::now();
        let mut d = draft("Final sprint");
        d.recurrence.frequency = RecurrenceFrequency::Daily;
        d.recurrence.end_date = Some(due + Duration::hours(1));
        d.due_date = Some(due);
        let quest = create_quest(&store, &LogNotifier, &owner, d).unwrap();

        let (done, _) = complete_quest(&store, &LogNotifier, &owner, &quest.id).unwrap();
        assert_eq!(done.status, QuestStatus::Completed);
        assert_eq!(done.streak_count, 0);
    }

    #[test]
    fn weekly_and_monthly_steps() {
        let due = Utc::now();
        assert_eq!(
            next_due_date(due, RecurrenceFrequency::Weekly),
            due + Duration::weeks(1)
        );
        let monthly = next_due_date(due, RecurrenceFrequency::Monthly);
        assert!(monthly > due + Duration::days(27));
        assert!(monthly <= due + Duration::days(31));
    }

    #[test]
    fn update_clamps_progress() {
        let (_dir, store, owner) = setup();
        let quest = create_quest(&store, &LogNotifier, &owner, draft("Stretch")).unwrap();
        let err = update_quest(
            &store,
            &owner,
            &quest.id,
            QuestPatch {
                progress: Some(150),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, GameError::Validation(_)));

        let updated = update_quest(
            &store,
            &owner,
            &quest.id,
            QuestPatch {
                progress: Some(60),
                title: Some("Stretch more".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.progress, 60);
        assert_eq!(updated.title, "Stretch more");
    }

    #[test]
    fn completed_quest_cannot_be_reopened_for_more_rewards() {
        let (_dir, store, owner) = setup();
        let quest = create_quest(&store, &LogNotifier, &owner, draft("Morning run")).unwrap();
        complete_quest(&store, &LogNotifier, &owner, &quest.id).unwrap();

        let err = update_quest(
            &store,
            &owner,
            &quest.id,
            QuestPatch {
                status: Some(QuestStatus::Active),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, GameError::Validation(_)));

        // The quest stays terminal and never pays out a second time.
        let err = complete_quest(&store, &LogNotifier, &owner, &quest.id).unwrap_err();
        assert!(matches!(err, GameError::NotFound(_)));
        let account = store.get_account(&owner).unwrap();
        assert_eq!(account.currencies.coins, 105);
        assert_eq!(account.stats.quests_completed, 1);
    }

    #[test]
    fn archive_and_unarchive_round_trip() {
        let (_dir, store, owner) = setup();
        let quest = create_quest(&store, &LogNotifier, &owner, draft("Sort photos")).unwrap();

        let archived = update_quest(
            &store,
            &owner,
            &quest.id,
            QuestPatch {
                status: Some(QuestStatus::Archived),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(archived.status, QuestStatus::Archived);

        let restored = update_quest(
            &store,
            &owner,
            &quest.id,
            QuestPatch {
                status: Some(QuestStatus::Active),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(restored.status, QuestStatus::Active);

        // A failed quest is terminal as well.
        update_quest(
            &store,
            &owner,
            &quest.id,
            QuestPatch {
                status: Some(QuestStatus::Failed),
                ..Default::default()
            },
        )
        .unwrap();
        let err = update_quest(
            &store,
            &owner,
            &quest.id,
            QuestPatch {
                status: Some(QuestStatus::Active),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, GameError::Validation(_)));
    }

    #[test]
    fn delete_requires_ownership() {
        let (_dir, store, owner) = setup();
        let quest = create_quest(&store, &LogNotifier, &owner, draft("Tidy desk")).unwrap();
        let err = delete_quest(&store, "someone-else", &quest.id).unwrap_err();
        assert!(matches!(err, GameError::NotFound(_)));
        delete_quest(&store, &owner, &quest.id).unwrap();
        assert!(store.get_quest(&owner, &quest.id).is_err());
    }
}
