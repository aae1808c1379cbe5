use crate::directory::VideoKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Persisted records. Field names follow the stored camelCase schema.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub username: String,
    // Stored in plaintext, alongside everything else in the local store.
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: String,
    pub date: String,
    pub time: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Calm,
    Neutral,
    Sad,
    Stressed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalAnswers {
    pub happiness: String,
    pub self_appreciation: String,
    pub gratitude: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub mood: Mood,
    pub answers: JournalAnswers,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u32,
    pub category: String,
    pub description: String,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

// Request bodies.

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct DiaryRequest {
    pub date: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    pub mood: Option<Mood>,
    #[serde(default)]
    pub answers: JournalAnswers,
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub answers: BTreeMap<String, usize>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PresetRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct InspirationQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct VideoQuery {
    #[serde(rename = "type")]
    pub kind: Option<VideoKind>,
}

// Responses.

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub email: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiaryResponse {
    pub streak: u32,
    pub entries: Vec<DiaryEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimerResponse {
    pub display: String,
    pub time_left: u32,
    pub running: bool,
    pub completed: bool,
    pub progress: f64,
}
