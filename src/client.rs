//! Client facade
//!
//! [`Client`] owns the transport and the bearer token and exposes the single
//! completion operation.

use crate::config::ClientConfig;
use crate::decode::decode_validated;
use crate::error::{PplxError, PplxResult};
use crate::options::ChatCompletionOptions;
use crate::request::ChatCompletionRequest;
use crate::transport::{ApiRequest, CHAT_COMPLETIONS_PATH, HttpTransport, Transport};
use crate::types::ChatCompletionResponse;
use reqwest::Method;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::Instrument;
use uuid::Uuid;

/// Chat completions client
///
/// Cheap to share behind an `Arc`; concurrent calls are independent. The
/// token can be rotated at any time with [`Client::set_api_key`]; each call
/// reads it once, when its request is built.
///
/// ```no_run
/// # async fn run() -> pplx::PplxResult<()> {
/// use pplx::{ChatCompletionOptions, ChatMessage, Client, ClientConfig};
///
/// let client = Client::new(&ClientConfig::default())?;
/// client.set_api_key("Bearer pplx-...").await;
///
/// let response = client
///     .chat_complete(ChatCompletionOptions::new(vec![ChatMessage::user("Hello!")]))
///     .await?;
/// println!("{}", response.first_content().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
pub struct Client {
    transport: Arc<dyn Transport>,
    api_key: RwLock<String>,
}

impl Client {
    /// Build a client with an HTTP transport configured from `config`
    ///
    /// Fails with [`PplxError::Config`] when `config` does not validate.
    pub fn new(config: &ClientConfig) -> PplxResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.base_url(), config.timeout())?;
        tracing::debug!(base_url = %config.base_url(), timeout = ?config.timeout(), "Client created");
        Ok(Self {
            transport: Arc::new(transport),
            api_key: RwLock::new(config.api_key().unwrap_or_default().to_string()),
        })
    }

    /// Build a client over any [`Transport`], with no token set
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            api_key: RwLock::new(String::new()),
        }
    }

    /// Replace the bearer token used by subsequent calls
    ///
    /// The value is sent verbatim as the `Authorization` header, so it must
    /// include the scheme, e.g. `Bearer pplx-...`.
    pub async fn set_api_key(&self, api_key: impl Into<String>) {
        *self.api_key.write().await = api_key.into();
    }

    /// Run one chat completion
    ///
    /// Options are validated and mapped locally before anything is sent.
    /// Exactly one request is made; nothing is retried.
    pub async fn chat_complete(
        &self,
        options: ChatCompletionOptions,
    ) -> PplxResult<ChatCompletionResponse> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "chat_complete",
            request_id = %request_id,
            model = tracing::field::Empty
        );

        async move {
            let request = ChatCompletionRequest::try_from(options)?;
            tracing::Span::current().record("model", request.model());

            let authorization = self.api_key.read().await.clone();
            let api_request =
                ApiRequest::json(Method::POST, CHAT_COMPLETIONS_PATH, authorization, &request)?;

            let body = self
                .transport
                .execute(api_request)
                .await?
                .into_success_body()?;

            let response: ChatCompletionResponse = decode_validated(&body)?;
            tracing::debug!(
                id = %response.id,
                choices = response.choices.len(),
                total_tokens = response.usage.map(|u| u.total_tokens),
                "Chat completion succeeded"
            );
            Ok::<_, PplxError>(response)
        }
        .instrument(span)
        .await
    }
}
