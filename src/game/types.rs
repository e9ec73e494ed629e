use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub const ACCOUNT_SCHEMA_VERSION: u8 = 1;
pub const QUEST_SCHEMA_VERSION: u8 = 1;
pub const REWARD_SCHEMA_VERSION: u8 = 1;
pub const GUILD_SCHEMA_VERSION: u8 = 1;
pub const ACHIEVEMENT_SCHEMA_VERSION: u8 = 1;

// ============================================================================
// Shared Enums
// ============================================================================

/// Quest (and skill-point) categories. Closed set; `Other` earns skill
/// points under its own bucket like any other category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestCategory {
    Fitness,
    Productivity,
    Learning,
    Creativity,
    Wellness,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Trivial,
    Easy,
    Medium,
    Hard,
    Epic,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    Daily,
    Weekly,
    Epic,
    Side,
}

impl Default for QuestKind {
    fn default() -> Self {
        Self::Daily
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceFrequency {
    Once,
    Daily,
    Weekly,
    Monthly,
}

impl Default for RecurrenceFrequency {
    fn default() -> Self {
        Self::Once
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    Active,
    Completed,
    Failed,
    Archived,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AvatarClass {
    Adventurer,
    Warrior,
    Mage,
    Ranger,
    Healer,
}

impl Default for AvatarClass {
    fn default() -> Self {
        Self::Adventurer
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Member,
    Admin,
}

impl Default for AccountRole {
    fn default() -> Self {
        Self::Member
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProfileVisibility {
    Public,
    Friends,
    Private,
}

impl Default for ProfileVisibility {
    fn default() -> Self {
        Self::Friends
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Default for Theme {
    fn default() -> Self {
        Self::System
    }
}

// ============================================================================
// Account
// ============================================================================

/// Avatar presentation state. `customization` is an open key/value map so
/// cosmetic rewards can introduce new slots without a schema change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Avatar {
    pub level: u32,
    pub class: AvatarClass,
    #[serde(default)]
    pub customization: HashMap<String, String>,
}

impl Default for Avatar {
    fn default() -> Self {
        let mut customization = HashMap::new();
        customization.insert("hair".to_string(), "default".to_string());
        customization.insert("face".to_string(), "default".to_string());
        customization.insert("outfit".to_string(), "default".to_string());
        customization.insert("color".to_string(), "#7e57c2".to_string());
        Self {
            level: 1,
            class: AvatarClass::default(),
            customization,
        }
    }
}

/// Spendable balances plus per-category skill points. `xp` is the balance
/// toward the next level, not a lifetime total (see [`AccountStats`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Currencies {
    pub xp: u64,
    pub coins: i64,
    pub gems: i64,
    #[serde(default)]
    pub skill_points: HashMap<QuestCategory, u32>,
}

impl Currencies {
    pub fn skill_points_for(&self, category: QuestCategory) -> u32 {
        self.skill_points.get(&category).copied().unwrap_or(0)
    }
}

/// Cumulative statistics the achievement evaluator tests against.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AccountStats {
    pub quests_completed: u32,
    pub daily_streak: u32,
    pub longest_streak: u32,
    pub tasks_created: u32,
    pub achievements_unlocked: u32,
    pub total_xp_earned: u64,
    pub total_coins_earned: i64,
    /// Named custom event counters (e.g. "early_bird"), bumped by clients.
    #[serde(default)]
    pub custom_events: HashMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationPrefs {
    pub email: bool,
    pub push: bool,
    pub reminders: bool,
    pub social_activity: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            reminders: true,
            social_activity: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrivacyPrefs {
    pub profile_visibility: ProfileVisibility,
    pub activity_sharing: bool,
    pub show_on_leaderboards: bool,
}

impl Default for PrivacyPrefs {
    fn default() -> Self {
        Self {
            profile_visibility: ProfileVisibility::default(),
            activity_sharing: true,
            show_on_leaderboards: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    #[serde(default)]
    pub notifications: NotificationPrefs,
    #[serde(default)]
    pub privacy: PrivacyPrefs,
    #[serde(default)]
    pub theme: Theme,
}

/// A pointer into the achievement library plus the unlock timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnlockedAchievement {
    pub achievement_id: String,
    pub unlocked_at: DateTime<Utc>,
}

/// A purchased reward sitting in an account's inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryEntry {
    pub reward_id: String,
    pub acquired_at: DateTime<Utc>,
    #[serde(default)]
    pub used: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountRecord {
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar: Avatar,
    #[serde(default)]
    pub currencies: Currencies,
    #[serde(default)]
    pub stats: AccountStats,
    #[serde(default)]
    pub preferences: Preferences,
    /// Account ids, mirrored on both sides of a friendship.
    #[serde(default)]
    pub friends: Vec<String>,
    /// Guild ids, mirrored on the guild roster.
    #[serde(default)]
    pub guilds: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<UnlockedAchievement>,
    #[serde(default)]
    pub inventory: Vec<InventoryEntry>,
    #[serde(default)]
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl AccountRecord {
    /// New account with the canonical starting balances (100 coins, 5 gems).
    pub fn new(email: &str, display_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.trim().to_ascii_lowercase(),
            display_name: display_name.to_string(),
            avatar: Avatar::default(),
            currencies: Currencies {
                xp: 0,
                coins: 100,
                gems: 5,
                skill_points: HashMap::new(),
            },
            stats: AccountStats::default(),
            preferences: Preferences::default(),
            friends: Vec::new(),
            guilds: Vec::new(),
            achievements: Vec::new(),
            inventory: Vec::new(),
            role: AccountRole::Member,
            created_at: now,
            updated_at: now,
            schema_version: ACCOUNT_SCHEMA_VERSION,
        }
    }

    pub fn with_role(mut self, role: AccountRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_balances(mut self, coins: i64, gems: i64) -> Self {
        self.currencies.coins = coins;
        self.currencies.gems = gems;
        self
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn is_admin(&self) -> bool {
        self.role == AccountRole::Admin
    }

    pub fn has_unlocked(&self, achievement_id: &str) -> bool {
        self.achievements
            .iter()
            .any(|a| a.achievement_id == achievement_id)
    }
}

// ============================================================================
// Quest
// ============================================================================

/// Recurrence rule. `Once` quests terminate on completion; anything else
/// reopens the quest with an advanced due date until `end_date` is passed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Recurrence {
    #[serde(default)]
    pub frequency: RecurrenceFrequency,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// Reward schedule fixed at quest creation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuestRewards {
    pub xp: u64,
    pub coins: i64,
    #[serde(default)]
    pub skill_points: HashMap<QuestCategory, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestRecord {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: QuestCategory,
    pub difficulty: Difficulty,
    pub kind: QuestKind,
    #[serde(default)]
    pub recurrence: Recurrence,
    pub status: QuestStatus,
    /// Bounded [0, 100].
    pub progress: u8,
    pub rewards: QuestRewards,
    /// Ordered completion timestamps; recurring quests accumulate one per
    /// completed occurrence.
    #[serde(default)]
    pub completed_dates: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub streak_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl QuestRecord {
    pub fn new(owner_id: &str, title: &str, category: QuestCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            category,
            difficulty: Difficulty::default(),
            kind: QuestKind::default(),
            recurrence: Recurrence::default(),
            status: QuestStatus::Active,
            progress: 0,
            rewards: QuestRewards::default(),
            completed_dates: Vec::new(),
            streak_count: 0,
            tags: Vec::new(),
            due_date: None,
            is_public: false,
            created_at: now,
            updated_at: now,
            schema_version: QUEST_SCHEMA_VERSION,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_kind(mut self, kind: QuestKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_recurrence(mut self, frequency: RecurrenceFrequency) -> Self {
        self.recurrence.frequency = frequency;
        self
    }

    pub fn with_recurrence_end(mut self, end_date: DateTime<Utc>) -> Self {
        self.recurrence.end_date = Some(end_date);
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_rewards(mut self, rewards: QuestRewards) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == QuestStatus::Active
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ============================================================================
// Reward Catalog
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    /// Merges its `customization` payload into the buyer's avatar.
    Customization,
    /// Plain inventory item.
    Item,
}

/// Price in coins and/or gems. Both components are checked independently
/// at purchase time; an absent component costs zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RewardCost {
    #[serde(default)]
    pub coins: i64,
    #[serde(default)]
    pub gems: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RewardRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: RewardCost,
    pub kind: RewardKind,
    #[serde(default)]
    pub customization: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl RewardRecord {
    pub fn new(name: &str, kind: RewardKind, cost: RewardCost) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: String::new(),
            cost,
            kind,
            customization: HashMap::new(),
            created_at: Utc::now(),
            schema_version: REWARD_SCHEMA_VERSION,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_customization(mut self, slot: &str, value: &str) -> Self {
        self.customization
            .insert(slot.to_string(), value.to_string());
        self
    }
}

// ============================================================================
// Guild
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuildRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub leader_id: String,
    /// Roster; always includes the leader.
    pub member_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl GuildRecord {
    pub fn new(name: &str, founder_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: String::new(),
            leader_id: founder_id.to_string(),
            member_ids: vec![founder_id.to_string()],
            created_at: Utc::now(),
            schema_version: GUILD_SCHEMA_VERSION,
        }
    }

    pub fn is_member(&self, account_id: &str) -> bool {
        self.member_ids.iter().any(|m| m == account_id)
    }
}

// ============================================================================
// Achievement Library
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    General,
    Fitness,
    Productivity,
    Learning,
    Creativity,
    Wellness,
    Social,
}

/// Unlock condition. Exactly one requirement per achievement; an account
/// satisfies it when the corresponding statistic reaches the threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    QuestsCompleted { threshold: u32 },
    StreakReached { threshold: u32 },
    XpEarned { threshold: u64 },
    CoinsEarned { threshold: i64 },
    SkillLevelReached { category: QuestCategory, threshold: u32 },
    QuestTypeCompleted { kind: QuestKind, threshold: u32 },
    CategoryCompleted { category: QuestCategory, threshold: u32 },
    FriendsCount { threshold: u32 },
    GuildsJoined { threshold: u32 },
    CustomEvent { event: String, threshold: u32 },
    /// Satisfied once the referenced quest has been completed at least once.
    SpecificQuest { quest_id: String },
}

/// Currency granted when an achievement unlocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AchievementRewards {
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub coins: i64,
    #[serde(default)]
    pub gems: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AchievementRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: AchievementCategory,
    pub icon: String,
    /// 1 (bronze) through 5 (mythic).
    pub tier: u8,
    pub requirement: Requirement,
    #[serde(default)]
    pub rewards: AchievementRewards,
    /// Hidden from listings until unlocked.
    #[serde(default)]
    pub is_secret: bool,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl AchievementRecord {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        category: AchievementCategory,
        requirement: Requirement,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category,
            icon: "trophy".to_string(),
            tier: 1,
            requirement,
            rewards: AchievementRewards::default(),
            is_secret: false,
            is_featured: false,
            created_at: Utc::now(),
            schema_version: ACHIEVEMENT_SCHEMA_VERSION,
        }
    }

    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    pub fn with_rewards(mut self, xp: u64, coins: i64, gems: i64) -> Self {
        self.rewards = AchievementRewards { xp, coins, gems };
        self
    }

    pub fn as_secret(mut self) -> Self {
        self.is_secret = true;
        self
    }

    pub fn as_featured(mut self) -> Self {
        self.is_featured = true;
        self
    }
}
