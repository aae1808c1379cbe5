use crate::models::DiaryEntry;
use chrono::{Local, NaiveDate};
use std::collections::BTreeSet;

pub fn current_streak(entries: &[DiaryEntry]) -> u32 {
    current_streak_at(Local::now().date_naive(), entries)
}

/// Counts consecutive days ending at `today` that have at least one entry.
///
/// A day without an entry today means no current streak at all, however long the run
/// that ended yesterday.
pub fn current_streak_at(today: NaiveDate, entries: &[DiaryEntry]) -> u32 {
    let dates: BTreeSet<&str> = entries.iter().map(|entry| entry.date.as_str()).collect();

    let mut streak = 0;
    let mut expected = today;
    for date in dates.into_iter().rev() {
        if date != date_key(expected) {
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(previous) => expected = previous,
            None => break,
        }
    }
    streak
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
