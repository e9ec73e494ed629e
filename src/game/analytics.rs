//! Read-only analytics over completion history: completion counts and
//! consecutive-calendar-day streaks.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::game::errors::GameError;
use crate::game::storage::GameStore;
use crate::game::types::{QuestCategory, QuestStatus};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalyticsSummary {
    pub quests_completed: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_xp: u64,
    pub skill_points: HashMap<QuestCategory, u32>,
}

/// Current and longest consecutive-day runs over a set of completion
/// timestamps. Multiple completions on one calendar day collapse; a gap of
/// more than one day resets the running streak to one. "Current" is the
/// length of the trailing run in the history.
pub fn streaks(timestamps: &[DateTime<Utc>]) -> (u32, u32) {
    let mut days: Vec<NaiveDate> = timestamps.iter().map(|t| t.date_naive()).collect();
    days.sort();
    days.dedup();

    if days.is_empty() {
        return (0, 0);
    }

    let mut current = 1u32;
    let mut longest = 1u32;
    for pair in days.windows(2) {
        let gap = (pair[1] - pair[0]).num_days();
        if gap == 1 {
            current += 1;
        } else {
            current = 1;
        }
        longest = longest.max(current);
    }
    (current, longest)
}

/// Full summary for one account: completion count across all quests,
/// streaks over the merged completion history, lifetime experience, and
/// skill-point totals.
pub fn summary(store: &GameStore, account_id: &str) -> Result<AnalyticsSummary, GameError> {
    let account = store.get_account(account_id)?;
    let quests = store.list_quests(account_id)?;

    let mut all_dates: Vec<DateTime<Utc>> = Vec::new();
    let mut quests_completed = 0u32;
    for quest in &quests {
        // Recurring quests reopen after completion, so count occurrences
        // rather than terminal statuses.
        quests_completed += quest.completed_dates.len() as u32;
        if quest.completed_dates.is_empty() && quest.status == QuestStatus::Completed {
            quests_completed += 1;
        }
        all_dates.extend(quest.completed_dates.iter().copied());
    }

    let (current_streak, longest_streak) = streaks(&all_dates);

    Ok(AnalyticsSummary {
        quests_completed,
        current_streak,
        longest_streak,
        total_xp: account.stats.total_xp_earned,
        skill_points: account.currencies.skill_points.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, 9, 0, 0).unwrap()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(streaks(&[]), (0, 0));
    }

    #[test]
    fn consecutive_days_extend_the_streak() {
        let dates = vec![day(1), day(2), day(3)];
        assert_eq!(streaks(&dates), (3, 3));
    }

    #[test]
    fn gap_resets_current_but_keeps_longest() {
        let dates = vec![day(1), day(2), day(3), day(7), day(8)];
        assert_eq!(streaks(&dates), (2, 3));
    }

    #[test]
    fn same_day_repeats_collapse() {
        let late = day(2) + chrono::Duration::hours(8);
        let dates = vec![day(1), day(2), late];
        assert_eq!(streaks(&dates), (2, 2));
    }

    #[test]
    fn unsorted_input_is_handled() {
        let dates = vec![day(3), day(1), day(2)];
        assert_eq!(streaks(&dates), (3, 3));
    }
}
