/// Integration tests for the quest lifecycle: creation, updates, completion,
/// recurrence handling, and the rewards that flow back to the account.
use chrono::{Duration, Utc};
use questlog::game::notify::LogNotifier;
use questlog::game::quest::{self, QuestDraft, QuestPatch};
use questlog::game::storage::{GameStore, GameStoreBuilder};
use questlog::game::types::{
    AccountRecord, Difficulty, QuestCategory, QuestStatus, Recurrence, RecurrenceFrequency,
};
use tempfile::{tempdir, TempDir};

fn setup() -> (TempDir, GameStore, AccountRecord) {
    let dir = tempdir().unwrap();
    let store = GameStoreBuilder::new(dir.path())
        .without_seed_library()
        .open()
        .unwrap();
    let account = store
        .create_account(AccountRecord::new("hero@example.com", "Hero"))
        .unwrap();
    (dir, store, account)
}

fn draft(title: &str) -> QuestDraft {
    QuestDraft {
        title: title.to_string(),
        description: String::new(),
        category: QuestCategory::Fitness,
        difficulty: Difficulty::Medium,
        kind: Default::default(),
        recurrence: Recurrence::default(),
        due_date: None,
        tags: Vec::new(),
        is_public: false,
        rewards: None,
    }
}

#[test]
fn create_persists_and_bumps_creation_counter() {
    let (_dir, store, account) = setup();
    let quest = quest::create_quest(&store, &LogNotifier, &account.id, draft("Morning run")).unwrap();

    assert_eq!(quest.status, QuestStatus::Active);
    assert_eq!(quest.rewards.xp, 20);
    assert_eq!(quest.rewards.coins, 5);

    let stored = store.get_quest(&account.id, &quest.id).unwrap();
    assert_eq!(stored.title, "Morning run");

    let account = store.get_account(&account.id).unwrap();
    assert_eq!(account.stats.tasks_created, 1);
}

#[test]
fn update_merges_fields_and_clamps_progress() {
    let (_dir, store, account) = setup();
    let quest = quest::create_quest(&store, &LogNotifier, &account.id, draft("Read")).unwrap();

    let updated = quest::update_quest(
        &store,
        &account.id,
        &quest.id,
        QuestPatch {
            description: Some("Two chapters".to_string()),
            progress: Some(60),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(updated.description, "Two chapters");
    assert_eq!(updated.progress, 60);

    let err = quest::update_quest(
        &store,
        &account.id,
        &quest.id,
        QuestPatch {
            progress: Some(150),
            ..Default::default()
        },
    );
    assert!(err.is_err());
}

#[test]
fn one_off_completion_is_terminal() {
    let (_dir, store, account) = setup();
    let quest = quest::create_quest(&store, &LogNotifier, &account.id, draft("Stretch")).unwrap();

    let (done, rewards) =
        quest::complete_quest(&store, &LogNotifier, &account.id, &quest.id).unwrap();
    assert_eq!(done.status, QuestStatus::Completed);
    assert_eq!(done.progress, 100);
    assert_eq!(done.completed_dates.len(), 1);
    assert_eq!(rewards.xp, 20);

    // Completing again is rejected outright.
    let again = quest::complete_quest(&store, &LogNotifier, &account.id, &quest.id);
    assert!(again.is_err());
    let stored = store.get_quest(&account.id, &quest.id).unwrap();
    assert_eq!(stored.completed_dates.len(), 1);
}

#[test]
fn completion_pays_out_to_the_account() {
    let (_dir, store, account) = setup();
    let quest = quest::create_quest(&store, &LogNotifier, &account.id, draft("Lift")).unwrap();
    quest::complete_quest(&store, &LogNotifier, &account.id, &quest.id).unwrap();

    let account = store.get_account(&account.id).unwrap();
    assert_eq!(account.avatar.level, 1);
    assert_eq!(account.currencies.xp, 20);
    assert_eq!(account.currencies.coins, 105);
    assert_eq!(account.currencies.skill_points_for(QuestCategory::Fitness), 2);
    assert_eq!(account.stats.quests_completed, 1);
}

#[test]
fn recurring_daily_quest_reopens_with_advanced_due_date() {
    let (_dir, store, account) = setup();
    let due = Utc::now();
    let mut d = draft("Meditate");
    d.recurrence = Recurrence {
        frequency: RecurrenceFrequency::Daily,
        end_date: None,
    };
    d.due_date = Some(due);
    let quest = quest::create_quest(&store, &LogNotifier, &account.id, d).unwrap();

    let (reopened, _) =
        quest::complete_quest(&store, &LogNotifier, &account.id, &quest.id).unwrap();
    assert_eq!(reopened.status, QuestStatus::Active);
    assert_eq!(reopened.progress, 0);
    assert_eq!(reopened.streak_count, 1);
    assert_eq!(reopened.due_date, Some(due + Duration::days(1)));
    assert_eq!(reopened.completed_dates.len(), 1);
}

#[test]
fn recurrence_stops_past_end_date() {
    let (_dir, store, account) = setup();
    let due = Utc::now();
    let mut d = draft("Journal");
    d.recurrence = Recurrence {
        frequency: RecurrenceFrequency::Daily,
        // Next occurrence would land past the end date.
        end_date: Some(due + Duration::hours(1)),
    };
    d.due_date = Some(due);
    let quest = quest::create_quest(&store, &LogNotifier, &account.id, d).unwrap();

    let (done, _) = quest::complete_quest(&store, &LogNotifier, &account.id, &quest.id).unwrap();
    assert_eq!(done.status, QuestStatus::Completed);
    assert_eq!(done.progress, 100);
}

#[test]
fn deleting_a_foreign_quest_is_not_found() {
    let (_dir, store, account) = setup();
    let other = store
        .create_account(AccountRecord::new("rival@example.com", "Rival"))
        .unwrap();
    let quest = quest::create_quest(&store, &LogNotifier, &other.id, draft("Theirs")).unwrap();

    assert!(quest::delete_quest(&store, &account.id, &quest.id).is_err());
    // Still present for the real owner.
    assert!(store.get_quest(&other.id, &quest.id).is_ok());

    quest::delete_quest(&store, &other.id, &quest.id).unwrap();
    assert!(store.get_quest(&other.id, &quest.id).is_err());
}

#[test]
fn quests_list_newest_first() {
    let (_dir, store, account) = setup();
    let first = quest::create_quest(&store, &LogNotifier, &account.id, draft("First")).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = quest::create_quest(&store, &LogNotifier, &account.id, draft("Second")).unwrap();

    let listed = store.list_quests(&account.id).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}
