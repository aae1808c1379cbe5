use crate::errors::{AppError, ValidationError};
use crate::models::{JournalAnswers, JournalEntry, Mood};
use crate::storage::{JOURNAL_KEY, SharedStore, load_json, save_json};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rand::seq::SliceRandom;
use std::{sync::Arc, time::Duration};
use tracing::error;

const REFLECTIONS: [&str; 4] = [
    "Your journey of self-reflection shows incredible growth. Each moment of awareness brings you closer to inner peace.",
    "The gratitude you express illuminates the beauty in everyday moments. This mindful appreciation enriches your well-being.",
    "Your honest self-reflection demonstrates courage and wisdom. These insights are stepping stones to personal growth.",
    "Your gratitude practice is creating positive neural pathways that enhance your overall happiness and resilience.",
];

#[async_trait]
pub trait ReflectionGenerator: Send + Sync {
    async fn reflect(&self, entry: &JournalEntry) -> Result<String, ReflectionError>;
}

#[derive(Debug, thiserror::Error)]
#[error("reflection unavailable: {0}")]
pub struct ReflectionError(pub String);

/// Stand-in for a model call: waits, then picks one of a few fixed reflections.
pub struct CannedReflections {
    delay: Duration,
}

impl CannedReflections {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ReflectionGenerator for CannedReflections {
    async fn reflect(&self, _entry: &JournalEntry) -> Result<String, ReflectionError> {
        tokio::time::sleep(self.delay).await;
        REFLECTIONS
            .choose(&mut rand::thread_rng())
            .map(|text| text.to_string())
            .ok_or_else(|| ReflectionError("no reflections configured".to_string()))
    }
}

pub struct Journal {
    store: SharedStore,
    reflections: Arc<dyn ReflectionGenerator>,
}

impl Journal {
    pub fn new(store: SharedStore, reflections: Arc<dyn ReflectionGenerator>) -> Self {
        Self { store, reflections }
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        load_json(self.store.as_ref(), JOURNAL_KEY)
    }

    pub async fn save(
        &self,
        mood: Option<Mood>,
        answers: JournalAnswers,
        now: DateTime<Utc>,
    ) -> Result<JournalEntry, AppError> {
        let Some(mood) = mood.filter(|_| is_complete(&answers)) else {
            return Err(ValidationError::new("Please complete all fields before saving.").into());
        };

        let mut entry = JournalEntry {
            id: now.timestamp_millis().to_string(),
            mood,
            answers,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            reflection: None,
        };
        match self.reflections.reflect(&entry).await {
            Ok(reflection) => entry.reflection = Some(reflection),
            Err(err) => error!("error generating reflection: {err}"),
        }

        let mut entries = self.entries();
        entries.insert(0, entry.clone());
        save_json(self.store.as_ref(), JOURNAL_KEY, &entries).await?;
        Ok(entry)
    }
}

fn is_complete(answers: &JournalAnswers) -> bool {
    !answers.happiness.is_empty()
        && !answers.self_appreciation.is_empty()
        && !answers.gratitude.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    struct Failing;

    #[async_trait]
    impl ReflectionGenerator for Failing {
        async fn reflect(&self, _entry: &JournalEntry) -> Result<String, ReflectionError> {
            Err(ReflectionError("offline".to_string()))
        }
    }

    fn answers() -> JournalAnswers {
        JournalAnswers {
            happiness: "a walk".to_string(),
            self_appreciation: "patient".to_string(),
            gratitude: "friends".to_string(),
        }
    }

    #[tokio::test]
    async fn save_attaches_a_canned_reflection() {
        let journal = Journal::new(
            MemoryStore::shared(),
            Arc::new(CannedReflections::new(Duration::ZERO)),
        );
        let entry = journal.save(Some(Mood::Calm), answers(), Utc::now()).await.unwrap();
        let reflection = entry.reflection.clone().expect("reflection");
        assert!(REFLECTIONS.contains(&reflection.as_str()));
        assert_eq!(journal.entries(), vec![entry]);
    }

    #[tokio::test]
    async fn reflection_failure_still_saves() {
        let journal = Journal::new(MemoryStore::shared(), Arc::new(Failing));
        let entry = journal.save(Some(Mood::Sad), answers(), Utc::now()).await.unwrap();
        assert!(entry.reflection.is_none());
        assert_eq!(journal.entries().len(), 1);
    }

    #[tokio::test]
    async fn incomplete_form_is_rejected() {
        let journal = Journal::new(MemoryStore::shared(), Arc::new(Failing));
        assert!(journal.save(None, answers(), Utc::now()).await.is_err());

        let mut partial = answers();
        partial.gratitude.clear();
        assert!(journal.save(Some(Mood::Happy), partial, Utc::now()).await.is_err());
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn stored_entries_use_camel_case_answers() {
        let entry = JournalEntry {
            id: "1".to_string(),
            mood: Mood::Stressed,
            answers: answers(),
            timestamp: "2024-01-05T10:00:00.000Z".to_string(),
            reflection: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["mood"], "stressed");
        assert_eq!(json["answers"]["selfAppreciation"], "patient");
        assert!(json.get("reflection").is_none());
    }
}
