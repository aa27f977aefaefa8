//! pplx - Typed client for the Perplexity chat completions API
//!
//! Options are validated and mapped to a wire request locally, sent as one
//! authenticated HTTPS POST, and the JSON answer is decoded and validated
//! into a [`ChatCompletionResponse`]. Every failure is a [`PplxError`].

pub mod cli;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod options;
pub mod request;
pub mod telemetry;
pub mod transport;
pub mod types;
pub mod validation;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{ErrorKind, PplxError, PplxResult};
pub use options::{ChatCompletionOptions, nullable_int};
pub use request::ChatCompletionRequest;
pub use types::{ChatCompletionResponse, ChatMessage, Choice, ModelType, Role, Usage};
