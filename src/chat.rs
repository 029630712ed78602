//! Chat API client.
//!
//! Sends the conversation to `POST /api/v1/chat` and decodes the streamed
//! reply. Two delivery styles share one decoder:
//!
//! - [`ChatClient::send_message`] calls back once per token and resolves
//!   when the stream ends.
//! - [`ChatClient::stream_message`] returns a [`TokenStream`] to pull from.
//!
//! Each call owns a fresh [`DecodeSession`]. Dropping the returned future or
//! stream cancels the request and releases the connection.

use bytes::Bytes;
use futures_util::stream;
use futures_util::StreamExt;

use crate::adapters::ReqwestHttpClient;
use crate::config::ChatConfig;
use crate::error::{ChatError, ChatResult, ProtocolViolation, TransportError};
use crate::models::{ChatRequest, Message};
use crate::stream::{DecodeSession, StreamOutcome, TokenStream};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError, ResponseBody};

/// Client for the streaming chat endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient<C: HttpClient = ReqwestHttpClient> {
    http: C,
    config: ChatConfig,
}

impl ChatClient<ReqwestHttpClient> {
    /// Create a client backed by reqwest.
    pub fn new(config: ChatConfig) -> ChatResult<Self> {
        let http = ReqwestHttpClient::from_config(&config).map_err(TransportError::from)?;
        Ok(Self { http, config })
    }
}

impl<C: HttpClient> ChatClient<C> {
    /// Create a client over any transport.
    pub fn with_http(http: C, config: ChatConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Send `messages` and deliver each token to `on_token` as it arrives.
    ///
    /// Resolves once the stream has ended. On failure, tokens already passed
    /// to `on_token` stay delivered; no token follows the failure.
    pub async fn send_message<F>(&self, messages: &[Message], mut on_token: F) -> ChatResult<StreamOutcome>
    where
        F: FnMut(&str),
    {
        let result = async {
            let mut tokens = self.stream_message(messages).await?;
            while let Some(token) = tokens.next().await {
                on_token(token?.as_str());
            }
            tokens
                .outcome()
                .ok_or_else(|| ChatError::from(ProtocolViolation::SessionClosed))
        }
        .await;

        match &result {
            Ok(outcome) => tracing::info!(
                tokens = outcome.tokens,
                completion = ?outcome.completion,
                "chat reply complete"
            ),
            Err(e) => tracing::warn!(
                code = e.error_code(),
                kind = %e.kind(),
                error = %e,
                "chat request failed"
            ),
        }
        result
    }

    /// Send `messages` and return the reply as a stream of tokens.
    ///
    /// Fails before any token if the request is rejected or the response
    /// has no body.
    pub async fn stream_message(&self, messages: &[Message]) -> ChatResult<TokenStream> {
        let url = self.config.chat_url();
        let request = ChatRequest::new(messages.to_vec());
        let body = serde_json::to_string(&request)
            .map_err(|e| TransportError::Encode(e.to_string()))?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        tracing::debug!(
            url = %url,
            messages = messages.len(),
            format = %self.config.wire_format,
            "sending chat request"
        );

        let response = self
            .http
            .post_stream(&url, &body, &headers)
            .await
            .map_err(|e| request_error(&url, e))?;

        let chunks: ByteStream = match response {
            ResponseBody::Streaming(chunks) => chunks,
            ResponseBody::Buffered(bytes) => {
                Box::pin(stream::once(async move { Ok::<Bytes, HttpError>(bytes) }))
            }
            ResponseBody::Empty => return Err(TransportError::MissingBody.into()),
        };

        let session = DecodeSession::new(self.config.wire_format)
            .with_require_terminal_frame(self.config.require_terminal_frame);
        Ok(TokenStream::new(chunks, session))
    }
}

/// Map a failure raised before the body was handed over.
fn request_error(url: &str, err: HttpError) -> TransportError {
    match TransportError::from(err) {
        TransportError::ConnectionFailed { message, .. } => TransportError::ConnectionFailed {
            url: url.to_string(),
            message,
        },
        // An I/O error before the body exists is a connection problem, not a read fault
        TransportError::ReadFault { message } => TransportError::ConnectionFailed {
            url: url.to_string(),
            message,
        },
        other => other,
    }
}
