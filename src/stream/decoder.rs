//! Decode session: turns body text into tokens and enforces termination.
//!
//! A session lives for exactly one request/response exchange. It owns the
//! line splitter's carry and the terminated flag; nothing else touches them.
//!
//! Termination is strict: once a done or error frame has been seen, any
//! further non-blank line fails the session with
//! [`ProtocolViolation::FrameAfterTerminal`], whether it arrives in the same
//! chunk, a later chunk, or the final unterminated line.

use crate::error::{ChatError, ChatResult, ProtocolViolation, StreamError};

use super::frame::{Frame, WireFormat};
use super::splitter::{LineSplitter, Lines};

/// Session state. `Terminated` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Terminated,
}

/// How a successful stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The producer sent a done frame.
    Done,
    /// The transport ended without a terminal frame.
    EndOfStream,
}

/// Result of a successful stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOutcome {
    pub completion: Completion,
    /// Number of tokens delivered
    pub tokens: usize,
}

#[derive(Debug)]
pub struct DecodeSession {
    splitter: LineSplitter,
    format: WireFormat,
    require_terminal_frame: bool,
    state: SessionState,
    /// Set once the session has failed or completed
    closed: bool,
    tokens: usize,
}

impl DecodeSession {
    pub fn new(format: WireFormat) -> Self {
        Self {
            splitter: LineSplitter::new(),
            format,
            require_terminal_frame: false,
            state: SessionState::Active,
            closed: false,
            tokens: 0,
        }
    }

    /// Treat a stream that ends without a done frame as a protocol violation.
    pub fn with_require_terminal_frame(mut self, require: bool) -> Self {
        self.require_terminal_frame = require;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// Whether the session has failed or already completed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn tokens_delivered(&self) -> usize {
        self.tokens
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }

    /// Feed one chunk of body text, delivering each token to `on_token`.
    ///
    /// Stops at the first failing line; tokens from earlier lines have
    /// already been delivered.
    pub fn feed<F>(&mut self, chunk: &str, mut on_token: F) -> ChatResult<()>
    where
        F: FnMut(&str),
    {
        for line in self.split(chunk)? {
            if let Some(token) = self.decode_line(&line)? {
                on_token(token.as_str());
            }
        }
        Ok(())
    }

    /// Handle end of stream: decode the unterminated final line, if any, and
    /// close the session.
    pub fn finish<F>(&mut self, mut on_token: F) -> ChatResult<StreamOutcome>
    where
        F: FnMut(&str),
    {
        self.ensure_open()?;
        if let Some(line) = self.take_final_line() {
            if let Some(token) = self.decode_line(&line)? {
                on_token(token.as_str());
            }
        }
        self.complete()
    }

    /// Append a chunk and return the complete lines it yields.
    pub fn split(&mut self, chunk: &str) -> ChatResult<Lines> {
        self.ensure_open()?;
        Ok(self.splitter.push(chunk))
    }

    /// Take the unterminated final line at end of stream.
    pub fn take_final_line(&mut self) -> Option<String> {
        self.splitter.finish()
    }

    /// Classify one complete line.
    ///
    /// Returns the token to deliver, or `None` for a done frame. Any error
    /// closes the session.
    pub fn decode_line(&mut self, line: &str) -> ChatResult<Option<String>> {
        self.ensure_open()?;

        if self.state == SessionState::Terminated {
            tracing::warn!(tokens = self.tokens, "frame received after terminal frame");
            return Err(self.fail(ProtocolViolation::after_terminal(line).into()));
        }

        let frame = match Frame::parse(line, self.format) {
            Ok(frame) => frame,
            Err(violation) => {
                tracing::warn!(
                    code = violation.error_code(),
                    format = %self.format,
                    "malformed stream frame"
                );
                return Err(self.fail(violation.into()));
            }
        };

        match frame {
            Frame::Error(message) => {
                self.state = SessionState::Terminated;
                let err = StreamError::from_frame(message);
                tracing::warn!(tokens = self.tokens, reason = %err.message, "error frame received");
                Err(self.fail(err.into()))
            }
            Frame::Done => {
                self.state = SessionState::Terminated;
                tracing::debug!(tokens = self.tokens, "done frame received");
                Ok(None)
            }
            Frame::Content(text) => {
                self.tokens += 1;
                tracing::trace!(len = text.len(), "content frame");
                Ok(Some(text))
            }
        }
    }

    /// Close the session after end of stream and report how it ended.
    pub fn complete(&mut self) -> ChatResult<StreamOutcome> {
        self.ensure_open()?;
        let completion = match self.state {
            SessionState::Terminated => Completion::Done,
            SessionState::Active if self.require_terminal_frame => {
                return Err(self.fail(ProtocolViolation::MissingTerminalFrame.into()));
            }
            SessionState::Active => {
                tracing::debug!(tokens = self.tokens, "stream ended without done frame");
                Completion::EndOfStream
            }
        };
        self.closed = true;
        Ok(StreamOutcome {
            completion,
            tokens: self.tokens,
        })
    }

    fn ensure_open(&self) -> ChatResult<()> {
        if self.closed {
            Err(ProtocolViolation::SessionClosed.into())
        } else {
            Ok(())
        }
    }

    fn fail(&mut self, err: ChatError) -> ChatError {
        self.closed = true;
        err
    }
}
