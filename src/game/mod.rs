//! Domain layer: typed records, sled-backed persistence, and the
//! progression, quest, achievement, analytics, reward, and guild logic the
//! REST layer drives. No HTTP types appear below this line.

pub mod account;
pub mod achievement;
pub mod analytics;
pub mod errors;
pub mod guild;
pub mod notify;
pub mod progression;
pub mod quest;
pub mod reward;
pub mod seed;
pub mod storage;
pub mod types;

pub use account::{add_friend, register, update_profile, AccountDraft, ProfilePatch};
pub use achievement::{derive_stats, evaluate, list_visible, DerivedStats};
pub use analytics::{streaks, summary, AnalyticsSummary};
pub use errors::GameError;
pub use guild::{create_guild, guilds_for, join_guild, leave_guild, GuildDraft};
pub use notify::{dispatch, LogNotifier, Notification, Notifier};
pub use progression::{
    award_coins, award_experience, award_gems, award_skill_points, xp_for_next_level, LevelUp,
};
pub use quest::{
    complete_quest, create_quest, delete_quest, rewards_for, update_quest, QuestDraft, QuestPatch,
};
pub use reward::{create_reward, purchase, RewardDraft};
pub use seed::{seed_reward_catalog, seed_starter_achievements};
pub use storage::{GameStore, GameStoreBuilder};
pub use types::*;
