//! Guild membership: creation, join/leave with two-sided back-references,
//! and leadership handoff when the leader departs.

use serde::Deserialize;

use crate::game::errors::GameError;
use crate::game::notify::{dispatch, Notification, Notifier};
use crate::game::storage::GameStore;
use crate::game::types::GuildRecord;
use crate::validation;

#[derive(Debug, Clone, Deserialize)]
pub struct GuildDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Found a guild: the founder becomes leader and the sole roster entry.
pub fn create_guild(
    store: &GameStore,
    founder_id: &str,
    draft: GuildDraft,
) -> Result<GuildRecord, GameError> {
    validation::validate_name(&draft.name)?;
    let mut founder = store.get_account(founder_id)?;

    let mut guild = GuildRecord::new(draft.name.trim(), founder_id);
    guild.description = draft.description;
    store.put_guild(guild.clone())?;

    founder.guilds.push(guild.id.clone());
    store.put_account(founder)?;
    Ok(guild)
}

pub fn join_guild(
    store: &GameStore,
    notifier: &dyn Notifier,
    account_id: &str,
    guild_id: &str,
) -> Result<GuildRecord, GameError> {
    let mut guild = store.get_guild(guild_id)?;
    if guild.is_member(account_id) {
        return Err(GameError::AlreadyMember);
    }

    let mut account = store.get_account(account_id)?;
    guild.member_ids.push(account_id.to_string());
    account.guilds.push(guild.id.clone());

    store.put_guild(guild.clone())?;
    store.put_account(account.clone())?;

    dispatch(
        notifier,
        &account,
        Notification::new("Joined Guild!", format!("You've joined {}!", guild.name)),
    );
    Ok(guild)
}

/// Leave a guild. A departing leader of a non-empty guild hands leadership
/// to the first remaining roster member. Non-members get the same NotFound
/// as a missing guild.
pub fn leave_guild(
    store: &GameStore,
    account_id: &str,
    guild_id: &str,
) -> Result<GuildRecord, GameError> {
    let mut guild = store.get_guild(guild_id)?;
    if !guild.is_member(account_id) {
        return Err(GameError::NotFound(format!("guild: {}", guild_id)));
    }

    guild.member_ids.retain(|m| m != account_id);
    if guild.leader_id == account_id {
        if let Some(next_leader) = guild.member_ids.first() {
            guild.leader_id = next_leader.clone();
        }
    }

    let mut account = store.get_account(account_id)?;
    account.guilds.retain(|g| g != &guild.id);

    store.put_guild(guild.clone())?;
    store.put_account(account)?;
    Ok(guild)
}

/// Guilds whose roster includes the account.
pub fn guilds_for(store: &GameStore, account_id: &str) -> Result<Vec<GuildRecord>, GameError> {
    Ok(store
        .list_guilds()?
        .into_iter()
        .filter(|g| g.is_member(account_id))
        .collect())
}
