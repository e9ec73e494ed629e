//! Starter content inserted when a fresh database is opened: the
//! achievement library and a small cosmetic reward catalog. Administrators
//! can extend both at runtime; these only guarantee a new install is not
//! empty.

use crate::game::types::{
    AchievementCategory, AchievementRecord, QuestCategory, QuestKind, Requirement, RewardCost,
    RewardKind, RewardRecord,
};

pub fn seed_starter_achievements() -> Vec<AchievementRecord> {
    use AchievementCategory::*;
    use Requirement::*;

    let mut achievements = Vec::new();

    // Completion milestones
    achievements.push(
        AchievementRecord::new(
            "first_steps",
            "First Steps",
            "Complete your first quest",
            General,
            QuestsCompleted { threshold: 1 },
        )
        .with_icon("footprints")
        .with_rewards(25, 10, 0),
    );

    achievements.push(
        AchievementRecord::new(
            "quest_apprentice",
            "Quest Apprentice",
            "Complete 10 quests",
            General,
            QuestsCompleted { threshold: 10 },
        )
        .with_tier(2)
        .with_rewards(100, 25, 0),
    );

    achievements.push(
        AchievementRecord::new(
            "quest_master",
            "Quest Master",
            "Complete 100 quests",
            General,
            QuestsCompleted { threshold: 100 },
        )
        .with_tier(4)
        .with_rewards(500, 100, 5)
        .as_featured(),
    );

    // Streaks
    achievements.push(
        AchievementRecord::new(
            "one_week_strong",
            "One Week Strong",
            "Keep a 7-day completion streak",
            General,
            StreakReached { threshold: 7 },
        )
        .with_tier(2)
        .with_icon("flame")
        .with_rewards(75, 20, 0),
    );

    achievements.push(
        AchievementRecord::new(
            "unstoppable",
            "Unstoppable",
            "Keep a 30-day completion streak",
            General,
            StreakReached { threshold: 30 },
        )
        .with_tier(4)
        .with_icon("flame")
        .with_rewards(300, 75, 3),
    );

    // Lifetime currency
    achievements.push(
        AchievementRecord::new(
            "xp_collector",
            "Experience Collector",
            "Earn 1000 lifetime experience",
            General,
            XpEarned { threshold: 1000 },
        )
        .with_tier(3)
        .with_rewards(0, 50, 0),
    );

    achievements.push(
        AchievementRecord::new(
            "coin_purse",
            "Heavy Coin Purse",
            "Earn 500 lifetime coins",
            General,
            CoinsEarned { threshold: 500 },
        )
        .with_tier(2)
        .with_icon("coins")
        .with_rewards(50, 0, 1),
    );

    // Category skill mastery
    achievements.push(
        AchievementRecord::new(
            "iron_body",
            "Iron Body",
            "Earn 50 fitness skill points",
            Fitness,
            SkillLevelReached {
                category: QuestCategory::Fitness,
                threshold: 50,
            },
        )
        .with_tier(3)
        .with_rewards(150, 30, 0),
    );

    achievements.push(
        AchievementRecord::new(
            "bookworm",
            "Bookworm",
            "Earn 50 learning skill points",
            Learning,
            SkillLevelReached {
                category: QuestCategory::Learning,
                threshold: 50,
            },
        )
        .with_tier(3)
        .with_icon("book")
        .with_rewards(150, 30, 0),
    );

    // Per-kind and per-category completions
    achievements.push(
        AchievementRecord::new(
            "daily_devotee",
            "Daily Devotee",
            "Complete 25 daily quests",
            General,
            QuestTypeCompleted {
                kind: QuestKind::Daily,
                threshold: 25,
            },
        )
        .with_tier(2)
        .with_rewards(100, 20, 0),
    );

    achievements.push(
        AchievementRecord::new(
            "wellness_warrior",
            "Wellness Warrior",
            "Complete 15 wellness quests",
            Wellness,
            CategoryCompleted {
                category: QuestCategory::Wellness,
                threshold: 15,
            },
        )
        .with_tier(2)
        .with_icon("leaf")
        .with_rewards(100, 20, 0),
    );

    // Social
    achievements.push(
        AchievementRecord::new(
            "social_butterfly",
            "Social Butterfly",
            "Add 5 friends",
            Social,
            FriendsCount { threshold: 5 },
        )
        .with_icon("users")
        .with_rewards(50, 10, 0),
    );

    achievements.push(
        AchievementRecord::new(
            "guild_founder",
            "Banner Raised",
            "Join your first guild",
            Social,
            GuildsJoined { threshold: 1 },
        )
        .with_icon("shield")
        .with_rewards(50, 10, 0),
    );

    // Hidden until earned
    achievements.push(
        AchievementRecord::new(
            "night_owl",
            "Night Owl",
            "Log a night-owl session",
            General,
            CustomEvent {
                event: "night_owl".to_string(),
                threshold: 1,
            },
        )
        .with_icon("moon")
        .with_rewards(25, 5, 0)
        .as_secret(),
    );

    achievements
}

pub fn seed_reward_catalog() -> Vec<RewardRecord> {
    vec![
        RewardRecord::new(
            "Crimson Cloak",
            RewardKind::Customization,
            RewardCost { coins: 50, gems: 0 },
        )
        .with_description("A flowing cloak for seasoned adventurers")
        .with_customization("outfit", "crimson_cloak"),
        RewardRecord::new(
            "Golden Crown",
            RewardKind::Customization,
            RewardCost { coins: 200, gems: 2 },
        )
        .with_description("Proof that productivity is royalty")
        .with_customization("hair", "golden_crown"),
        RewardRecord::new(
            "Midnight Palette",
            RewardKind::Customization,
            RewardCost { coins: 75, gems: 0 },
        )
        .with_description("A darker color scheme for your avatar")
        .with_customization("color", "#1a1a2e"),
        RewardRecord::new(
            "Streak Shield",
            RewardKind::Item,
            RewardCost { coins: 100, gems: 1 },
        )
        .with_description("Keeps a streak alive through one missed day"),
    ]
}
