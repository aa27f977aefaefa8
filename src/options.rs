//! Caller-facing completion options

use crate::types::ChatMessage;
use crate::validation::{self, Bound, Validate, Violation};

/// Inclusive upper limit for `top_k`
pub const MAX_TOP_K: u32 = 2048;

const UNIT_RANGE: Bound = Bound::Between { min: 0.0, max: 1.0 };
const PRESENCE_PENALTY_RANGE: Bound = Bound::Between {
    min: -2.0,
    max: 2.0,
};
const FREQUENCY_PENALTY_RANGE: Bound = Bound::Above(0.0);

/// Lift a plain integer into the optional numeric form used by tuning fields
///
/// ```
/// use pplx::{ChatCompletionOptions, ChatMessage, nullable_int};
///
/// let options = ChatCompletionOptions {
///     messages: vec![ChatMessage::user("Hi")],
///     temperature: nullable_int(1),
///     ..Default::default()
/// };
/// assert_eq!(options.temperature, Some(1.0));
/// ```
pub fn nullable_int(value: i32) -> Option<f64> {
    Some(f64::from(value))
}

/// Options for a single chat completion
///
/// Construct with a struct literal and `..Default::default()`, or start from
/// [`ChatCompletionOptions::new`] and chain the `with_*` setters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatCompletionOptions {
    /// Model name; empty selects [`ModelType::DEFAULT`](crate::ModelType::DEFAULT)
    pub model: String,
    /// The conversation so far. Must not be empty.
    pub messages: Vec<ChatMessage>,
    /// Upper bound on completion tokens. Unset lets the model run until its
    /// stop token or the end of its context window.
    pub max_tokens: Option<u32>,
    /// Sampling randomness in [0, 1]. Incompatible with `top_p`.
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold in [0, 1]. Incompatible with `temperature`.
    pub top_p: Option<f64>,
    /// Top-k filtering in [0, 2048]; 0 disables it
    pub top_k: u32,
    /// Server-sent event streaming. Not supported; must stay `false`.
    pub stream: bool,
    /// In [-2, 2]. Incompatible with `frequency_penalty`.
    pub presence_penalty: Option<f64>,
    /// Multiplicative penalty greater than 0; 1 means no penalty.
    /// Incompatible with `presence_penalty`.
    pub frequency_penalty: Option<f64>,
}

impl ChatCompletionOptions {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_presence_penalty(mut self, presence_penalty: f64) -> Self {
        self.presence_penalty = Some(presence_penalty);
        self
    }

    pub fn with_frequency_penalty(mut self, frequency_penalty: f64) -> Self {
        self.frequency_penalty = Some(frequency_penalty);
        self
    }
}

impl Validate for ChatCompletionOptions {
    fn validate(&self) -> Result<(), Violation> {
        validation::required_items("messages", &self.messages)?;
        for (i, message) in self.messages.iter().enumerate() {
            message.validate_at(&format!("messages[{}]", i))?;
        }
        validation::nullable("temperature", self.temperature, UNIT_RANGE)?;
        validation::nullable("top_p", self.top_p, UNIT_RANGE)?;
        validation::bounded(
            "top_k",
            f64::from(self.top_k),
            Bound::Between {
                min: 0.0,
                max: f64::from(MAX_TOP_K),
            },
        )?;
        validation::nullable(
            "presence_penalty",
            self.presence_penalty,
            PRESENCE_PENALTY_RANGE,
        )?;
        validation::nullable(
            "frequency_penalty",
            self.frequency_penalty,
            FREQUENCY_PENALTY_RANGE,
        )
    }
}
