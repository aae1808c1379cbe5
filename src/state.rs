use crate::accounts::AccountStore;
use crate::chat::{ChatLog, CompletionClient, GroqClient};
use crate::config::Config;
use crate::diary::Diary;
use crate::journal::{CannedReflections, Journal, ReflectionGenerator};
use crate::quiz::QuizHistory;
use crate::storage::SharedStore;
use crate::timer::TimerRunner;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Every service shares one store; each sits behind its own lock so a given page handles
/// one interaction at a time.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<Mutex<AccountStore>>,
    pub diary: Arc<Mutex<Diary>>,
    pub journal: Arc<Mutex<Journal>>,
    pub quiz: Arc<Mutex<QuizHistory>>,
    pub chat: Arc<Mutex<ChatLog>>,
    pub timer: Arc<TimerRunner>,
}

impl AppState {
    pub fn new(
        store: SharedStore,
        reflections: Arc<dyn ReflectionGenerator>,
        completions: Arc<dyn CompletionClient>,
    ) -> Self {
        let mut accounts = AccountStore::new(store.clone());
        accounts.restore_session();

        Self {
            accounts: Arc::new(Mutex::new(accounts)),
            diary: Arc::new(Mutex::new(Diary::new(store.clone()))),
            journal: Arc::new(Mutex::new(Journal::new(store.clone(), reflections))),
            quiz: Arc::new(Mutex::new(QuizHistory::new(store.clone()))),
            chat: Arc::new(Mutex::new(ChatLog::new(store, completions))),
            timer: Arc::new(TimerRunner::new()),
        }
    }

    pub fn from_config(store: SharedStore, config: &Config) -> Self {
        let reflections = Arc::new(CannedReflections::new(config.reflection_delay));
        let completions = Arc::new(GroqClient::new(
            config.completion_url.clone(),
            config.completion_model.clone(),
            config.api_key.clone(),
        ));
        Self::new(store, reflections, completions)
    }
}
