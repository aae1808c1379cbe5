pub mod accounts;
pub mod app;
pub mod chat;
pub mod config;
pub mod diary;
pub mod directory;
pub mod errors;
pub mod handlers;
pub mod journal;
pub mod models;
pub mod quiz;
pub mod state;
pub mod storage;
pub mod streak;
pub mod timer;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
