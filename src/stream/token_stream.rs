//! Pull-style token stream over an asynchronous chunk source.
//!
//! [`TokenStream`] reads body chunks one at a time, decodes them through a
//! [`DecodeSession`] and yields tokens in arrival order. It ends with `None`
//! on success, or yields exactly one `Err` and then ends.
//!
//! Dropping the stream drops the chunk source, which releases the
//! underlying connection. No token is produced after that.

use futures::stream::{self, Stream};
use futures_util::StreamExt;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use crate::error::{ChatResult, TransportError};
use crate::traits::ByteStream;

use super::decoder::{DecodeSession, StreamOutcome};
use super::splitter::Lines;
use super::utf8::Utf8Decoder;

/// Lazy, finite, non-restartable sequence of tokens.
pub struct TokenStream {
    inner: Pin<Box<dyn Stream<Item = ChatResult<String>> + Send>>,
    outcome: Arc<Mutex<Option<StreamOutcome>>>,
}

impl TokenStream {
    /// Decode `chunks` with a fresh `session`.
    pub fn new(chunks: ByteStream, session: DecodeSession) -> Self {
        let outcome = Arc::new(Mutex::new(None));
        let state = DecodeState {
            chunks,
            utf8: Utf8Decoder::new(),
            session,
            lines: Lines::default(),
            eof: false,
            finished: false,
            outcome: Arc::clone(&outcome),
        };

        let inner = stream::unfold(state, |mut state| async move {
            if state.finished {
                return None;
            }
            loop {
                // First, drain lines already split from earlier chunks
                if let Some(line) = state.lines.next() {
                    match state.decode(&line) {
                        Some(item) => return Some((item, state)),
                        None => continue,
                    }
                }

                if state.eof {
                    if let Some(line) = state.session.take_final_line() {
                        match state.decode(&line) {
                            Some(item) => return Some((item, state)),
                            None => continue,
                        }
                    }
                    return match state.session.complete() {
                        Ok(outcome) => {
                            tracing::debug!(
                                tokens = outcome.tokens,
                                completion = ?outcome.completion,
                                "token stream complete"
                            );
                            if let Ok(mut slot) = state.outcome.lock() {
                                *slot = Some(outcome);
                            }
                            None
                        }
                        Err(e) => {
                            state.finished = true;
                            Some((Err(e), state))
                        }
                    };
                }

                // Need more data from the transport
                match state.chunks.next().await {
                    Some(Ok(bytes)) => {
                        let text = state.utf8.decode(&bytes);
                        if let Err(e) = state.split(&text) {
                            return Some((Err(e), state));
                        }
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "response stream read failed");
                        state.finished = true;
                        return Some((Err(TransportError::mid_stream(e).into()), state));
                    }
                    None => {
                        state.eof = true;
                        let tail = state.utf8.finish();
                        if let Err(e) = state.split(&tail) {
                            return Some((Err(e), state));
                        }
                    }
                }
            }
        });

        Self {
            inner: Box::pin(inner),
            outcome,
        }
    }

    /// How the stream ended, once it has been exhausted successfully.
    pub fn outcome(&self) -> Option<StreamOutcome> {
        self.outcome.lock().ok().and_then(|slot| *slot)
    }
}

impl Stream for TokenStream {
    type Item = ChatResult<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStream")
            .field("outcome", &self.outcome())
            .finish_non_exhaustive()
    }
}

struct DecodeState {
    chunks: ByteStream,
    utf8: Utf8Decoder,
    session: DecodeSession,
    lines: Lines,
    eof: bool,
    finished: bool,
    outcome: Arc<Mutex<Option<StreamOutcome>>>,
}

impl DecodeState {
    /// Decode one line. `Some` is an item to yield; `None` means keep going.
    fn decode(&mut self, line: &str) -> Option<ChatResult<String>> {
        match self.session.decode_line(line) {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }

    fn split(&mut self, text: &str) -> ChatResult<()> {
        match self.session.split(text) {
            Ok(lines) => {
                self.lines = lines;
                Ok(())
            }
            Err(e) => {
                self.finished = true;
                Err(e)
            }
        }
    }
}
