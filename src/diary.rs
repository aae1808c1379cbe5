use crate::errors::{AppError, ValidationError};
use crate::models::DiaryEntry;
use crate::storage::{DIARY_KEY, SharedStore, load_json, save_json};
use crate::streak::current_streak_at;
use chrono::{DateTime, Local, NaiveDate};

const MISSING_FIELDS: &str = "Please select a date and enter your thoughts.";

pub struct Diary {
    store: SharedStore,
}

impl Diary {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Entries in save order, newest first.
    pub fn entries(&self) -> Vec<DiaryEntry> {
        load_json(self.store.as_ref(), DIARY_KEY)
    }

    pub fn streak(&self, today: NaiveDate) -> u32 {
        current_streak_at(today, &self.entries())
    }

    pub async fn save(
        &self,
        date: &str,
        text: &str,
        now: DateTime<Local>,
    ) -> Result<DiaryEntry, AppError> {
        let date = date.trim();
        if date.is_empty() || text.trim().is_empty() {
            return Err(ValidationError::new(MISSING_FIELDS).into());
        }
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ValidationError::new("Date must be in YYYY-MM-DD format."))?;
        if day > now.date_naive() {
            return Err(ValidationError::new("Diary entries cannot be dated in the future.").into());
        }

        let mut entries = self.entries();
        let entry = DiaryEntry {
            id: next_id(&entries, now),
            date: day.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M").to_string(),
            text: text.to_string(),
        };
        entries.insert(0, entry.clone());
        save_json(self.store.as_ref(), DIARY_KEY, &entries).await?;
        Ok(entry)
    }
}

/// Millisecond timestamp id, nudged past the newest id when two saves share a millisecond.
fn next_id(entries: &[DiaryEntry], now: DateTime<Local>) -> String {
    let millis = now.timestamp_millis();
    let newest = entries
        .first()
        .and_then(|entry| entry.id.parse::<i64>().ok())
        .unwrap_or(i64::MIN);
    millis.max(newest.saturating_add(1)).to_string()
}
