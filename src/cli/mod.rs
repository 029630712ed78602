//! Command-line front end.
//!
//! ```ignore
//! use clap::Parser;
//! use codebase_chat::cli::{run_prompt, Cli};
//!
//! let cli = Cli::parse();
//! let chat = ChatClient::new(cli.chat_config())?;
//! let transcript = run_prompt(&chat, &cli.prompt_text(), None, &mut std::io::stdout()).await?;
//! ```

pub mod args;

pub use args::Cli;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::io::Write;

use crate::chat::ChatClient;
use crate::traits::HttpClient;
use crate::transcript::Transcript;

/// Send one prompt and write the reply to `out` as it streams.
///
/// A failed send is recorded in the returned transcript as an error
/// message; only local failures (blank prompt, unwritable output) are
/// returned as `Err`.
pub async fn run_prompt<C, W>(
    chat: &ChatClient<C>,
    prompt: &str,
    codebase_context: Option<&str>,
    out: &mut W,
) -> Result<Transcript>
where
    C: HttpClient,
    W: Write,
{
    let mut transcript = Transcript::new();
    if !transcript.begin_exchange(prompt) {
        return Err(eyre!("prompt is empty"));
    }
    let messages = transcript.request_messages(codebase_context);

    let mut write_error = None;
    let result = chat
        .send_message(&messages, |token| {
            transcript.append_token(token);
            if write_error.is_none() {
                if let Err(e) = out.write_all(token.as_bytes()).and_then(|_| out.flush()) {
                    write_error = Some(e);
                }
            }
        })
        .await;

    if let Some(e) = write_error {
        return Err(e.into());
    }
    writeln!(out)?;

    if let Err(e) = result {
        tracing::warn!(kind = %e.kind(), hint = e.recovery_hint(), "request failed");
        transcript.record_failure(&e);
    }
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::config::ChatConfig;
    use crate::models::{Message, Role};

    fn chat(response: MockResponse) -> (ChatClient<MockHttpClient>, MockHttpClient) {
        let mock = MockHttpClient::new();
        mock.set_default_response(response);
        (ChatClient::with_http(mock.clone(), ChatConfig::default()), mock)
    }

    #[tokio::test]
    async fn test_run_prompt_streams_to_output() {
        let (chat, _) = chat(MockResponse::chunks([
            "{\"content\":\"Hello\"}\n{\"content\":\", world\"}\n{\"done\":true}\n",
        ]));
        let mut out = Vec::new();
        let transcript = run_prompt(&chat, " hi ", None, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Hello, world\n");
        assert_eq!(
            transcript.messages(),
            &[Message::user("hi"), Message::assistant("Hello, world")]
        );
    }

    #[tokio::test]
    async fn test_run_prompt_sends_context() {
        let (chat, mock) = chat(MockResponse::chunks(["{\"done\":true}\n"]));
        let mut out = Vec::new();
        run_prompt(&chat, "why?", Some("ctx\n"), &mut out).await.unwrap();

        let body: serde_json::Value = serde_json::from_str(&mock.get_requests()[0].body).unwrap();
        assert_eq!(
            body["messages"][0]["content"],
            "ctx\n// User request below.\n\nwhy?"
        );
    }

    #[tokio::test]
    async fn test_run_prompt_records_failure() {
        let (chat, _) = chat(MockResponse::chunks([
            "{\"content\":\"part\"}\n{\"error\":\"boom\"}\n",
        ]));
        let mut out = Vec::new();
        let transcript = run_prompt(&chat, "hi", None, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "part\n");
        assert_eq!(transcript.messages()[1], Message::assistant("part"));
        let last = transcript.last().unwrap();
        assert_eq!(last.role, Role::Error);
        assert_eq!(last.content, "Error while sending the request: boom");
    }

    #[tokio::test]
    async fn test_run_prompt_rejects_blank_prompt() {
        let (chat, mock) = chat(MockResponse::Empty);
        let mut out = Vec::new();
        assert!(run_prompt(&chat, "   ", None, &mut out).await.is_err());
        assert!(mock.get_requests().is_empty());
    }
}
