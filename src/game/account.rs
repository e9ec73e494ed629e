//! Account provisioning, profile updates, and friendships.

use serde::Deserialize;
use std::collections::HashMap;

use crate::game::errors::GameError;
use crate::game::notify::{dispatch, Notification, Notifier};
use crate::game::storage::GameStore;
use crate::game::types::{AccountRecord, AvatarClass, Preferences};
use crate::validation;

/// Registration payload. In production the identity provider calls this
/// once after its own signup flow; the id it receives back is what it
/// presents on subsequent requests.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountDraft {
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub avatar_class: Option<AvatarClass>,
    pub customization: Option<HashMap<String, String>>,
    pub preferences: Option<Preferences>,
}

pub fn register(
    store: &GameStore,
    draft: AccountDraft,
    starting_coins: i64,
    starting_gems: i64,
) -> Result<AccountRecord, GameError> {
    validation::validate_email(&draft.email)?;
    validation::validate_name(&draft.display_name)?;
    let account = AccountRecord::new(&draft.email, draft.display_name.trim())
        .with_balances(starting_coins, starting_gems);
    store.create_account(account)
}

pub fn update_profile(
    store: &GameStore,
    account_id: &str,
    patch: ProfilePatch,
) -> Result<AccountRecord, GameError> {
    let mut account = store.get_account(account_id)?;

    if let Some(display_name) = patch.display_name {
        validation::validate_name(&display_name)?;
        account.display_name = display_name.trim().to_string();
    }
    if let Some(class) = patch.avatar_class {
        account.avatar.class = class;
    }
    if let Some(customization) = patch.customization {
        for (slot, value) in customization {
            account.avatar.customization.insert(slot, value);
        }
    }
    if let Some(preferences) = patch.preferences {
        account.preferences = preferences;
    }

    store.put_account(account.clone())?;
    Ok(account)
}

/// Record a friendship on both sides and notify the new friend.
pub fn add_friend(
    store: &GameStore,
    notifier: &dyn Notifier,
    account_id: &str,
    friend_id: &str,
) -> Result<AccountRecord, GameError> {
    if account_id == friend_id {
        return Err(GameError::Validation(
            "cannot befriend yourself".to_string(),
        ));
    }
    let mut account = store.get_account(account_id)?;
    let mut friend = store.get_account(friend_id)?;

    if account.friends.iter().any(|f| f == friend_id) {
        return Err(GameError::AlreadyMember);
    }

    account.friends.push(friend.id.clone());
    friend.friends.push(account.id.clone());

    store.put_account(account.clone())?;
    store.put_account(friend.clone())?;

    dispatch(
        notifier,
        &friend,
        Notification::new(
            "New Friend!",
            format!("{} added you as a friend!", account.display_name),
        ),
    );
    Ok(account)
}
