use std::path::{Path, PathBuf};

use sled::IVec;

use crate::game::errors::GameError;
use crate::game::seed::{seed_reward_catalog, seed_starter_achievements};
use crate::game::types::{
    AccountRecord, AchievementRecord, GuildRecord, QuestRecord, RewardRecord,
    ACCOUNT_SCHEMA_VERSION, ACHIEVEMENT_SCHEMA_VERSION, GUILD_SCHEMA_VERSION,
    QUEST_SCHEMA_VERSION, REWARD_SCHEMA_VERSION,
};

const TREE_ACCOUNTS: &str = "questlog_accounts";
const TREE_QUESTS: &str = "questlog_quests";
const TREE_REWARDS: &str = "questlog_rewards";
const TREE_GUILDS: &str = "questlog_guilds";
const TREE_ACHIEVEMENTS: &str = "questlog_achievements";

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct GameStoreBuilder {
    path: PathBuf,
    seed_library: bool,
}

impl GameStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seed_library: true,
        }
    }

    /// Opt out of seeding the achievement library and starter reward catalog
    /// during initialization (useful for targeted tests).
    pub fn without_seed_library(mut self) -> Self {
        self.seed_library = false;
        self
    }

    pub fn open(self) -> Result<GameStore, GameError> {
        GameStore::open_with_options(self.path, self.seed_library)
    }
}

/// Sled-backed persistence for accounts, quests, the reward catalog, guilds,
/// and the achievement library. One tree per entity family, bincode values,
/// schema-version checks on every read.
pub struct GameStore {
    _db: sled::Db,
    accounts: sled::Tree,
    quests: sled::Tree,
    rewards: sled::Tree,
    guilds: sled::Tree,
    achievements: sled::Tree,
}

impl GameStore {
    /// Open (or create) the store rooted at `path`. When `seed_library` is
    /// true the starter achievements and reward catalog are inserted if the
    /// library is still empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        Self::open_with_options(path, true)
    }

    fn open_with_options<P: AsRef<Path>>(path: P, seed_library: bool) -> Result<Self, GameError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let accounts = db.open_tree(TREE_ACCOUNTS)?;
        let quests = db.open_tree(TREE_QUESTS)?;
        let rewards = db.open_tree(TREE_REWARDS)?;
        let guilds = db.open_tree(TREE_GUILDS)?;
        let achievements = db.open_tree(TREE_ACHIEVEMENTS)?;
        let store = Self {
            _db: db,
            accounts,
            quests,
            rewards,
            guilds,
            achievements,
        };

        if seed_library {
            store.seed_library_if_needed()?;
        }

        Ok(store)
    }

    fn account_key(account_id: &str) -> Vec<u8> {
        format!("accounts:{}", account_id).into_bytes()
    }

    fn email_key(email: &str) -> Vec<u8> {
        format!("emails:{}", email.to_ascii_lowercase()).into_bytes()
    }

    /// Quests are keyed under their owner so ownership checks and per-owner
    /// listings are a prefix scan, and a foreign quest id is a plain miss.
    fn quest_key(owner_id: &str, quest_id: &str) -> Vec<u8> {
        format!("quests:{}:{}", owner_id, quest_id).into_bytes()
    }

    fn quest_prefix(owner_id: &str) -> Vec<u8> {
        format!("quests:{}:", owner_id).into_bytes()
    }

    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serialize(value)?)
    }

    fn deserialize<T: serde::de::DeserializeOwned>(bytes: IVec) -> Result<T, GameError> {
        Ok(bincode::deserialize::<T>(&bytes)?)
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    /// Register a new account, enforcing email uniqueness.
    pub fn create_account(&self, account: AccountRecord) -> Result<AccountRecord, GameError> {
        let email_key = Self::email_key(&account.email);
        if self.accounts.get(&email_key)?.is_some() {
            return Err(GameError::DuplicateEmail(account.email));
        }
        self.accounts
            .insert(email_key, account.id.as_bytes().to_vec())?;
        self.put_account(account.clone())?;
        Ok(account)
    }

    /// Insert or update an account record.
    pub fn put_account(&self, mut account: AccountRecord) -> Result<(), GameError> {
        account.schema_version = ACCOUNT_SCHEMA_VERSION;
        account.touch();
        let key = Self::account_key(&account.id);
        let bytes = Self::serialize(&account)?;
        self.accounts.insert(key, bytes)?;
        self.accounts.flush()?;
        Ok(())
    }

    /// Fetch an account by id.
    pub fn get_account(&self, account_id: &str) -> Result<AccountRecord, GameError> {
        let key = Self::account_key(account_id);
        let Some(bytes) = self.accounts.get(&key)? else {
            return Err(GameError::NotFound(format!("account: {}", account_id)));
        };
        let record: AccountRecord = Self::deserialize(bytes)?;
        if record.schema_version != ACCOUNT_SCHEMA_VERSION {
            return Err(GameError::SchemaMismatch {
                entity: "account",
                expected: ACCOUNT_SCHEMA_VERSION,
                found: record.schema_version,
            });
        }
        Ok(record)
    }

    pub fn find_account_by_email(&self, email: &str) -> Result<AccountRecord, GameError> {
        let Some(id_bytes) = self.accounts.get(Self::email_key(email))? else {
            return Err(GameError::NotFound(format!("account: {}", email)));
        };
        let id = String::from_utf8_lossy(&id_bytes).to_string();
        self.get_account(&id)
    }

    pub fn list_account_ids(&self) -> Result<Vec<String>, GameError> {
        let mut ids = Vec::new();
        for entry in self.accounts.scan_prefix(b"accounts:") {
            let (key, _) = entry?;
            let text = String::from_utf8_lossy(&key);
            if let Some(id) = text.strip_prefix("accounts:") {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }

    // ------------------------------------------------------------------
    // Quests
    // ------------------------------------------------------------------

    /// Insert or update a quest record.
    pub fn put_quest(&self, mut quest: QuestRecord) -> Result<(), GameError> {
        quest.schema_version = QUEST_SCHEMA_VERSION;
        quest.touch();
        let key = Self::quest_key(&quest.owner_id, &quest.id);
        let bytes = Self::serialize(&quest)?;
        self.quests.insert(key, bytes)?;
        self.quests.flush()?;
        Ok(())
    }

    /// Fetch a quest scoped to its owner. A quest belonging to someone else
    /// yields the same `NotFound` as a nonexistent id.
    pub fn get_quest(&self, owner_id: &str, quest_id: &str) -> Result<QuestRecord, GameError> {
        let key = Self::quest_key(owner_id, quest_id);
        let Some(bytes) = self.quests.get(&key)? else {
            return Err(GameError::NotFound(format!("quest: {}", quest_id)));
        };
        let record: QuestRecord = Self::deserialize(bytes)?;
        if record.schema_version != QUEST_SCHEMA_VERSION {
            return Err(GameError::SchemaMismatch {
                entity: "quest",
                expected: QUEST_SCHEMA_VERSION,
                found: record.schema_version,
            });
        }
        Ok(record)
    }

    /// All quests owned by `owner_id`, newest first.
    pub fn list_quests(&self, owner_id: &str) -> Result<Vec<QuestRecord>, GameError> {
        let mut quests: Vec<QuestRecord> = self
            .quests
            .scan_prefix(Self::quest_prefix(owner_id))
            .map(|entry| {
                entry
                    .map_err(GameError::from)
                    .and_then(|(_key, value)| Self::deserialize(value))
            })
            .collect::<Result<_, _>>()?;
        quests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quests)
    }

    pub fn delete_quest(&self, owner_id: &str, quest_id: &str) -> Result<(), GameError> {
        let key = Self::quest_key(owner_id, quest_id);
        let removed = self.quests.remove(&key)?;
        if removed.is_none() {
            return Err(GameError::NotFound(format!("quest: {}", quest_id)));
        }
        self.quests.flush()?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reward catalog
    // ------------------------------------------------------------------

    pub fn put_reward(&self, mut reward: RewardRecord) -> Result<(), GameError> {
        reward.schema_version = REWARD_SCHEMA_VERSION;
        let key = format!("rewards:{}", reward.id).into_bytes();
        let bytes = Self::serialize(&reward)?;
        self.rewards.insert(key, bytes)?;
        self.rewards.flush()?;
        Ok(())
    }

    pub fn get_reward(&self, reward_id: &str) -> Result<RewardRecord, GameError> {
        let key = format!("rewards:{}", reward_id).into_bytes();
        let Some(bytes) = self.rewards.get(&key)? else {
            return Err(GameError::NotFound(format!("reward: {}", reward_id)));
        };
        Ok(Self::deserialize(bytes)?)
    }

    pub fn list_rewards(&self) -> Result<Vec<RewardRecord>, GameError> {
        self.rewards
            .scan_prefix(b"rewards:")
            .map(|entry| {
                entry
                    .map_err(GameError::from)
                    .and_then(|(_key, value)| Self::deserialize(value))
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Guilds
    // ------------------------------------------------------------------

    pub fn put_guild(&self, mut guild: GuildRecord) -> Result<(), GameError> {
        guild.schema_version = GUILD_SCHEMA_VERSION;
        let key = format!("guilds:{}", guild.id).into_bytes();
        let bytes = Self::serialize(&guild)?;
        self.guilds.insert(key, bytes)?;
        self.guilds.flush()?;
        Ok(())
    }

    pub fn get_guild(&self, guild_id: &str) -> Result<GuildRecord, GameError> {
        let key = format!("guilds:{}", guild_id).into_bytes();
        let Some(bytes) = self.guilds.get(&key)? else {
            return Err(GameError::NotFound(format!("guild: {}", guild_id)));
        };
        Ok(Self::deserialize(bytes)?)
    }

    pub fn list_guilds(&self) -> Result<Vec<GuildRecord>, GameError> {
        self.guilds
            .scan_prefix(b"guilds:")
            .map(|entry| {
                entry
                    .map_err(GameError::from)
                    .and_then(|(_key, value)| Self::deserialize(value))
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Achievement library
    // ------------------------------------------------------------------

    pub fn put_achievement(&self, mut achievement: AchievementRecord) -> Result<(), GameError> {
        achievement.schema_version = ACHIEVEMENT_SCHEMA_VERSION;
        let key = format!("achievements:{}", achievement.id).into_bytes();
        let bytes = Self::serialize(&achievement)?;
        self.achievements.insert(key, bytes)?;
        self.achievements.flush()?;
        Ok(())
    }

    pub fn get_achievement(&self, achievement_id: &str) -> Result<AchievementRecord, GameError> {
        let key = format!("achievements:{}", achievement_id).into_bytes();
        let Some(bytes) = self.achievements.get(&key)? else {
            return Err(GameError::NotFound(format!(
                "achievement: {}",
                achievement_id
            )));
        };
        Ok(Self::deserialize(bytes)?)
    }

    pub fn list_achievements(&self) -> Result<Vec<AchievementRecord>, GameError> {
        let mut all: Vec<AchievementRecord> = self
            .achievements
            .scan_prefix(b"achievements:")
            .map(|entry| {
                entry
                    .map_err(GameError::from)
                    .and_then(|(_key, value)| Self::deserialize(value))
            })
            .collect::<Result<_, _>>()?;
        all.sort_by(|a, b| (a.tier, a.id.clone()).cmp(&(b.tier, b.id.clone())));
        Ok(all)
    }

    /// Seed the achievement library and starter reward catalog on first open.
    pub fn seed_library_if_needed(&self) -> Result<usize, GameError> {
        if self.achievements.scan_prefix(b"achievements:").next().is_some() {
            return Ok(0);
        }
        let mut inserted = 0usize;
        for achievement in seed_starter_achievements() {
            self.put_achievement(achievement)?;
            inserted += 1;
        }
        for reward in seed_reward_catalog() {
            self.put_reward(reward)?;
            inserted += 1;
        }
        Ok(inserted)
    }
}
