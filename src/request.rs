//! Chat-completion request body assembly.
//!
//! The compiled template becomes the system message and a second, smaller
//! template becomes the user message. The body uses the OpenAI-compatible
//! `chat/completions` shape:
//!
//! ```json
//! {
//!   "model": "...",
//!   "messages": [
//!     {"role": "system", "content": "..."},
//!     {"role": "user", "content": "..."}
//!   ],
//!   "max_tokens": 2000,
//!   "temperature": 0.7
//! }
//! ```
//!
//! Nothing here performs network I/O.

use crate::config::Config;
use crate::error::{PromptcError, Result};
use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// A chat-completion request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatRequest {
    /// Build a request from a compiled system prompt and user message.
    pub fn new(config: &Config, system_prompt: String, user_message: String) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![
                Message {
                    role: Role::System,
                    content: system_prompt,
                },
                Message {
                    role: Role::User,
                    content: user_message,
                },
            ],
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Pretty-printed JSON body.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PromptcError::UserError(format!("failed to serialize request body: {}", e))
        })
    }
}
