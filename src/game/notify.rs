//! Best-effort notification dispatch. Delivery mechanics (push tokens,
//! email) live behind the [`Notifier`] trait; the shipped implementation
//! records notifications in the server log. Dispatch must never fail or
//! block the operation that triggered it.

use log::{info, warn};

use crate::game::types::AccountRecord;
use crate::logutil::escape_log;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    /// Deliver a notification to one account. Implementations report
    /// failure through the return value; callers ignore it beyond logging.
    fn notify(&self, account: &AccountRecord, notification: &Notification) -> Result<(), String>;
}

/// Dispatch helper: respects the account's push preference and swallows
/// delivery errors.
pub fn dispatch(notifier: &dyn Notifier, account: &AccountRecord, notification: Notification) {
    if !account.preferences.notifications.push {
        return;
    }
    if let Err(err) = notifier.notify(account, &notification) {
        warn!(
            "notification to {} dropped: {}",
            account.id,
            escape_log(&err)
        );
    }
}

/// Default notifier: writes the notification to the server log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, account: &AccountRecord, notification: &Notification) -> Result<(), String> {
        info!(
            "notify {}: {} - {}",
            account.id,
            escape_log(&notification.title),
            escape_log(&notification.body)
        );
        Ok(())
    }
}
