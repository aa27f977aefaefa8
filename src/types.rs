//! Chat completion data types
//!
//! Messages, supported models, and the response shape returned by the API.

use crate::validation::{self, Validate, Violation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Message Types
// =============================================================================

/// The role of the speaker in one turn of the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    #[default]
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn of the conversation and who said it
///
/// After the optional system message, user and assistant turns should
/// alternate, ending with a user turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    content: String,
    role: Role,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Validate with `path` as the field prefix, e.g. `messages[2]`
    pub(crate) fn validate_at(&self, path: &str) -> Result<(), Violation> {
        validation::required_text(&format!("{}.content", path), &self.content)
    }
}

// =============================================================================
// Models
// =============================================================================

/// Models offered by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    #[serde(rename = "pplx-7b-chat")]
    Pplx7bChat,
    #[serde(rename = "pplx-70b-chat")]
    Pplx70bChat,
    #[serde(rename = "pplx-7b-online")]
    Pplx7bOnline,
    #[serde(rename = "pplx-70b-online")]
    Pplx70bOnline,
    #[serde(rename = "llama-2-70b-chat")]
    Llama2_70bChat,
    #[serde(rename = "codellama-34b-instruct")]
    CodeLlama34bInstruct,
    #[serde(rename = "mistral-7b-instruct")]
    Mistral7bInstruct,
    #[serde(rename = "mixtral-8x7b-instruct")]
    Mixtral8x7bInstruct,
}

impl ModelType {
    /// Used when the caller leaves the model empty
    pub const DEFAULT: ModelType = ModelType::Mistral7bInstruct;

    pub const ALL: [ModelType; 8] = [
        ModelType::Pplx7bChat,
        ModelType::Pplx70bChat,
        ModelType::Pplx7bOnline,
        ModelType::Pplx70bOnline,
        ModelType::Llama2_70bChat,
        ModelType::CodeLlama34bInstruct,
        ModelType::Mistral7bInstruct,
        ModelType::Mixtral8x7bInstruct,
    ];

    /// Wire identifier sent in the `model` field
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Pplx7bChat => "pplx-7b-chat",
            ModelType::Pplx70bChat => "pplx-70b-chat",
            ModelType::Pplx7bOnline => "pplx-7b-online",
            ModelType::Pplx70bOnline => "pplx-70b-online",
            ModelType::Llama2_70bChat => "llama-2-70b-chat",
            ModelType::CodeLlama34bInstruct => "codellama-34b-instruct",
            ModelType::Mistral7bInstruct => "mistral-7b-instruct",
            ModelType::Mixtral8x7bInstruct => "mixtral-8x7b-instruct",
        }
    }

    /// Maximum context window in tokens (prompt plus completion)
    ///
    /// Informational only; requests are not checked against it.
    pub fn context_length(&self) -> u32 {
        match self {
            ModelType::CodeLlama34bInstruct => 16384,
            ModelType::Pplx7bChat => 8192,
            ModelType::Pplx70bChat
            | ModelType::Pplx7bOnline
            | ModelType::Pplx70bOnline
            | ModelType::Llama2_70bChat
            | ModelType::Mistral7bInstruct
            | ModelType::Mixtral8x7bInstruct => 4096,
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelType::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("Unknown model: {}", s))
    }
}

impl From<ModelType> for String {
    fn from(model: ModelType) -> Self {
        model.as_str().to_string()
    }
}

// =============================================================================
// Chat Completion Response
// =============================================================================

/// Token usage for one completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the request prompt
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Tokens generated in the response
    #[serde(default)]
    pub completion_tokens: u32,
    /// Prompt plus completion
    #[serde(default)]
    pub total_tokens: u32,
}

/// One generated continuation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    /// `stop` at a natural stopping point, `length` when `max_tokens` was reached
    #[serde(default)]
    pub finish_reason: String,
    #[serde(default)]
    pub message: ChatMessage,
    /// Incremental tokens; only meaningful for streamed responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<ChatMessage>,
}

impl Choice {
    /// True when generation stopped because the token limit was hit
    pub fn is_truncated(&self) -> bool {
        self.finish_reason == "length"
    }
}

/// Response of a chat completion call
///
/// Every field tolerates absence during deserialization so that a structurally
/// incomplete payload is reported by [`Validate`] rather than by the JSON parser.
/// Choices are taken as sent: an empty completion (e.g. `max_tokens = 0`) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Unique per response
    #[serde(default)]
    pub id: String,
    /// Model that generated the response
    #[serde(default)]
    pub model: String,
    /// Unix timestamp in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if any
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content())
    }
}

impl Validate for ChatCompletionResponse {
    fn validate(&self) -> Result<(), Violation> {
        validation::required_text("id", &self.id)?;
        validation::required_text("model", &self.model)?;
        validation::required("created", &self.created)?;
        validation::required("usage", &self.usage)
    }
}
