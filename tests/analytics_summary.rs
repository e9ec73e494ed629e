/// Integration tests for the analytics aggregator over real quest history.
use chrono::{Duration, Utc};
use questlog::game::analytics;
use questlog::game::notify::LogNotifier;
use questlog::game::quest::{self, QuestDraft};
use questlog::game::storage::{GameStore, GameStoreBuilder};
use questlog::game::types::{AccountRecord, Difficulty, QuestCategory, QuestRecord, QuestStatus};
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

#[test]
fn empty_history_is_all_zeroes() {
    let (_dir, store, account) = setup();
    let summary = analytics::summary(&store, &account.id).unwrap();
    assert_eq!(summary.quests_completed, 0);
    assert_eq!(summary.current_streak, 0);
    assert_eq!(summary.longest_streak, 0);
    assert_eq!(summary.total_xp, 0);
}

#[test]
fn summary_reflects_completions() {
    let (_dir, store, account) = setup();
    let q = quest::create_quest(
        &store,
        &LogNotifier,
        &account.id,
        QuestDraft {
            title: "Run".to_string(),
            description: String::new(),
            category: QuestCategory::Fitness,
            difficulty: Difficulty::Medium,
            kind: Default::default(),
            recurrence: Default::default(),
            due_date: None,
            tags: Vec::new(),
            is_public: false,
            rewards: None,
        },
    )
    .unwrap();
    quest::complete_quest(&store, &LogNotifier, &account.id, &q.id).unwrap();

    let summary = analytics::summary(&store, &account.id).unwrap();
    assert_eq!(summary.quests_completed, 1);
    assert_eq!(summary.current_streak, 1);
    assert_eq!(summary.longest_streak, 1);
    assert_eq!(summary.total_xp, 20);
    assert_eq!(
        summary.skill_points.get(&QuestCategory::Fitness).copied(),
        Some(2)
    );
}

#[test]
fn streaks_span_multiple_quests() {
    let (_dir, store, account) = setup();
    let today = Utc::now();

    // Seed two quests with hand-written completion histories: one covers
    // three consecutive days ending yesterday, the other adds today.
    let mut first = QuestRecord::new(&account.id, "Walk", QuestCategory::Wellness);
    first.status = QuestStatus::Completed;
    first.completed_dates = vec![
        today - Duration::days(3),
        today - Duration::days(2),
        today - Duration::days(1),
    ];
    store.put_quest(first).unwrap();

    let mut second = QuestRecord::new(&account.id, "Read", QuestCategory::Learning);
    second.status = QuestStatus::Completed;
    second.completed_dates = vec![today];
    store.put_quest(second).unwrap();

    let summary = analytics::summary(&store, &account.id).unwrap();
    assert_eq!(summary.current_streak, 4);
    assert_eq!(summary.longest_streak, 4);
    assert_eq!(summary.quests_completed, 4);
}

#[test]
fn gaps_break_the_trailing_run() {
    let (_dir, store, account) = setup();
    let today = Utc::now();

    let mut q = QuestRecord::new(&account.id, "Walk", QuestCategory::Wellness);
    q.status = QuestStatus::Completed;
    q.completed_dates = vec![
        today - Duration::days(6),
        today - Duration::days(5),
        today - Duration::days(4),
        // Gap: days 3 and 2 missing.
        today - Duration::days(1),
        today,
    ];
    store.put_quest(q).unwrap();

    let summary = analytics::summary(&store, &account.id).unwrap();
    assert_eq!(summary.current_streak, 2);
    assert_eq!(summary.longest_streak, 3);
}

#[test]
fn same_day_completions_do_not_inflate_streaks() {
    let (_dir, store, account) = setup();
    let today = Utc::now();

    let mut q = QuestRecord::new(&account.id, "Hydrate", QuestCategory::Wellness);
    q.status = QuestStatus::Completed;
    q.completed_dates = vec![today, today, today - Duration::days(1)];
    store.put_quest(q).unwrap();

    let summary = analytics::summary(&store, &account.id).unwrap();
    assert_eq!(summary.current_streak, 2);
    assert_eq!(summary.longest_streak, 2);
    assert_eq!(summary.quests_completed, 3);
}
