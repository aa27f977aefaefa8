//! Wire request and the options-to-request mapping
//!
//! A [`ChatCompletionRequest`] can only be obtained from validated
//! [`ChatCompletionOptions`], so every instance satisfies the API's rules.

use crate::error::{PplxError, PplxResult};
use crate::options::ChatCompletionOptions;
use crate::types::{ChatMessage, ModelType};
use crate::validation::{Validate, Violation};
use serde::Serialize;

/// Body of `POST /chat/completions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    top_k: u32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f64>,
}

impl ChatCompletionRequest {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn top_p(&self) -> Option<f64> {
        self.top_p
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }

    pub fn stream(&self) -> bool {
        self.stream
    }

    pub fn presence_penalty(&self) -> Option<f64> {
        self.presence_penalty
    }

    pub fn frequency_penalty(&self) -> Option<f64> {
        self.frequency_penalty
    }
}

impl TryFrom<ChatCompletionOptions> for ChatCompletionRequest {
    type Error = PplxError;

    /// Validate, reject conflicting or unsupported settings, then apply defaults
    fn try_from(opts: ChatCompletionOptions) -> PplxResult<Self> {
        opts.validate().map_err(Violation::into_invalid_option)?;

        if opts.temperature.is_some() && opts.top_p.is_some() {
            return Err(PplxError::ConflictingOptions {
                first: "temperature",
                second: "top_p",
            });
        }

        if opts.presence_penalty.is_some() && opts.frequency_penalty.is_some() {
            return Err(PplxError::ConflictingOptions {
                first: "presence_penalty",
                second: "frequency_penalty",
            });
        }

        if opts.stream {
            return Err(PplxError::Unsupported("stream is not implemented"));
        }

        let model = if opts.model.is_empty() {
            ModelType::DEFAULT.into()
        } else {
            opts.model
        };

        Ok(Self {
            model,
            messages: opts.messages,
            max_tokens: opts.max_tokens,
            temperature: opts.temperature,
            top_p: opts.top_p,
            top_k: opts.top_k,
            stream: opts.stream,
            presence_penalty: opts.presence_penalty,
            frequency_penalty: opts.frequency_penalty,
        })
    }
}
