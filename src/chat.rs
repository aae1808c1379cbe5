//! Companion chat: a persisted message log plus a pass-through to a chat-completions API.
//!
//! Completion failures never escape this module; they are turned into the reply text the
//! user sees. There is no timeout, retry or backoff.

use crate::errors::StorageError;
use crate::models::{ChatMessage, Sender};
use crate::storage::{CHAT_KEY, SharedStore, load_json, save_json};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

pub const GREETING: &str =
    "Hello! I'm here to listen and support you on your wellness journey. How are you feeling today?";
pub const SYSTEM_PROMPT: &str = "You are a supportive AI therapist.";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("response carried no message content")]
    EmptyReply,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, user_message: &str) -> Result<String, CompletionError>;
}

pub struct GroqClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl GroqClient {
    pub fn new(url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            model: model.into(),
            api_key,
        }
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, user_message: &str) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user_message },
            ],
        });

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail: Value = response.json().await.unwrap_or_default();
            let message = detail
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            return Err(CompletionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let data: Value = response.json().await?;
        data.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or(CompletionError::EmptyReply)
    }
}

/// Maps a completion outcome to the text posted back into the conversation.
pub fn reply_text(outcome: Result<String, CompletionError>) -> String {
    match outcome {
        Ok(text) => text,
        Err(CompletionError::Rejected { status, message }) => {
            error!(status, "completion service error: {message}");
            format!("Error from AI service: {message}. Please check your Groq setup and API key.")
        }
        Err(CompletionError::EmptyReply) => {
            error!("invalid response structure from completion service");
            "Sorry, I received an unexpected response from the AI. Please try again.".to_string()
        }
        Err(err) => {
            error!("completion request failed: {err}");
            "Sorry, I'm having trouble connecting to the AI service. Please check your network and API key setup."
                .to_string()
        }
    }
}

pub struct ChatLog {
    store: SharedStore,
    client: Arc<dyn CompletionClient>,
}

impl ChatLog {
    pub fn new(store: SharedStore, client: Arc<dyn CompletionClient>) -> Self {
        Self { store, client }
    }

    /// The conversation so far, seeded with the greeting the first time it is read.
    pub async fn history(&self, now: DateTime<Utc>) -> Result<Vec<ChatMessage>, StorageError> {
        if self.store.get(CHAT_KEY).is_some() {
            return Ok(load_json(self.store.as_ref(), CHAT_KEY));
        }
        let seeded = vec![greeting(now)];
        save_json(self.store.as_ref(), CHAT_KEY, &seeded).await?;
        Ok(seeded)
    }

    /// Posts `text` and the companion's reply. Blank input leaves the log untouched.
    pub async fn send(&self, text: &str, now: DateTime<Utc>) -> Result<Vec<ChatMessage>, StorageError> {
        let mut messages = self.history(now).await?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(messages);
        }

        let sent_at = now.timestamp_millis();
        messages.push(ChatMessage {
            id: sent_at.to_string(),
            text: text.to_string(),
            sender: Sender::User,
            timestamp: stamp(now),
        });
        save_json(self.store.as_ref(), CHAT_KEY, &messages).await?;

        let reply = reply_text(self.client.complete(text).await);
        let replied_at = Utc::now().max(now);
        messages.push(ChatMessage {
            id: sent_at.saturating_add(1).to_string(),
            text: reply,
            sender: Sender::Ai,
            timestamp: stamp(replied_at),
        });
        save_json(self.store.as_ref(), CHAT_KEY, &messages).await?;
        Ok(messages)
    }

    pub async fn clear(&self, now: DateTime<Utc>) -> Result<Vec<ChatMessage>, StorageError> {
        let reset = vec![greeting(now)];
        save_json(self.store.as_ref(), CHAT_KEY, &reset).await?;
        info!("chat history cleared");
        Ok(reset)
    }
}

fn greeting(now: DateTime<Utc>) -> ChatMessage {
    ChatMessage {
        id: "1".to_string(),
        text: GREETING.to_string(),
        sender: Sender::Ai,
        timestamp: stamp(now),
    }
}

fn stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use axum::{Json, Router, http::StatusCode, routing::post};

    struct Echo;

    #[async_trait]
    impl CompletionClient for Echo {
        async fn complete(&self, user_message: &str) -> Result<String, CompletionError> {
            Ok(format!("you said: {user_message}"))
        }
    }

    async fn fake_endpoint(status: StatusCode, body: Value) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1/chat/completions")
    }

    async fn plain_text_endpoint(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move || async move { (status, body) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1/chat/completions")
    }

    #[tokio::test]
    async fn history_is_seeded_once() {
        let store = MemoryStore::shared();
        let log = ChatLog::new(store.clone(), Arc::new(Echo));
        let first = log.history(Utc::now()).await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].text, GREETING);
        assert!(store.get(CHAT_KEY).is_some());
        assert_eq!(log.history(Utc::now()).await.unwrap(), first);
    }

    #[tokio::test]
    async fn send_appends_user_and_reply() {
        let log = ChatLog::new(MemoryStore::shared(), Arc::new(Echo));
        let messages = log.send("  rough day  ", Utc::now()).await.unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text, "rough day");
        assert_eq!(messages[2].sender, Sender::Ai);
        assert_eq!(messages[2].text, "you said: rough day");
        assert_ne!(messages[1].id, messages[2].id);
    }

    #[tokio::test]
    async fn blank_input_is_ignored_and_clear_resets() {
        let log = ChatLog::new(MemoryStore::shared(), Arc::new(Echo));
        log.send("hello", Utc::now()).await.unwrap();
        assert_eq!(log.send("   ", Utc::now()).await.unwrap().len(), 3);

        let reset = log.clear(Utc::now()).await.unwrap();
        assert_eq!(reset.len(), 1);
        assert_eq!(log.history(Utc::now()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_key_becomes_connection_message() {
        let client = GroqClient::new("http://127.0.0.1:9/unused", "model", None);
        let text = reply_text(client.complete("hi").await);
        assert!(text.starts_with("Sorry, I'm having trouble connecting"));
    }

    #[tokio::test]
    async fn groq_client_reads_first_choice() {
        let url = fake_endpoint(
            StatusCode::OK,
            json!({ "choices": [{ "message": { "content": "breathe slowly" } }] }),
        )
        .await;
        let client = GroqClient::new(url, "llama3-70b-8192", Some("key".to_string()));
        assert_eq!(client.complete("hi").await.unwrap(), "breathe slowly");
    }

    #[tokio::test]
    async fn groq_errors_are_reported_in_band() {
        let url = fake_endpoint(
            StatusCode::UNAUTHORIZED,
            json!({ "error": { "message": "Invalid API Key" } }),
        )
        .await;
        let client = GroqClient::new(url, "llama3-70b-8192", Some("bad".to_string()));
        assert_eq!(
            reply_text(client.complete("hi").await),
            "Error from AI service: Invalid API Key. Please check your Groq setup and API key."
        );

        let url = fake_endpoint(StatusCode::OK, json!({ "choices": [] })).await;
        let client = GroqClient::new(url, "llama3-70b-8192", Some("key".to_string()));
        assert_eq!(
            reply_text(client.complete("hi").await),
            "Sorry, I received an unexpected response from the AI. Please try again."
        );
    }

    #[tokio::test]
    async fn error_without_json_body_reports_the_status() {
        let url = plain_text_endpoint(StatusCode::BAD_GATEWAY, "upstream unavailable").await;
        let client = GroqClient::new(url, "llama3-70b-8192", Some("key".to_string()));
        assert_eq!(
            reply_text(client.complete("hi").await),
            "Error from AI service: Request failed with status 502. Please check your Groq setup and API key."
        );
    }
}
