use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{ChatRequest, ChatResponse};

/// Errors that can occur talking to the chat server.
#[derive(Debug)]
pub enum ChatError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Server returned a non-success HTTP status.
    Api { status: u16, message: String },
    /// Body was not JSON, or JSON that doesn't match the reply schema.
    Parse(String),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Network(msg) => write!(f, "network error: {msg}"),
            ChatError::Api { status, message } => {
                write!(f, "server error (HTTP {status}): {message}")
            }
            ChatError::Parse(msg) => write!(f, "malformed reply: {msg}"),
        }
    }
}

impl std::error::Error for ChatError {}

/// A backend that can answer one user message with one structured reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends the literal message text and awaits the full reply. Exactly one
    /// outbound request per invocation; no retries, no caching, no client
    /// timeout beyond the transport's.
    async fn send(&self, message: &str) -> Result<ChatResponse, ChatError>;
}

/// HTTP implementation posting to `{base_url}/chat`.
pub struct HttpChatBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpChatBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, message: &str) -> Result<ChatResponse, ChatError> {
        let request = ChatRequest {
            message: message.to_string(),
        };

        info!("Chat request: {} bytes of input", message.len());

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        debug!("Chat response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Chat API error: {} - {}", status, message);
            return Err(ChatError::Api { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let reply: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ChatError::Parse(e.to_string()))?;

        info!(
            "Chat reply: {} bytes of text, directions={}",
            reply.response.len(),
            reply.directions_info.is_some()
        );
        Ok(reply)
    }
}
