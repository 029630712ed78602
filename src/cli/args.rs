//! Command-line arguments.
//!
//! Every option falls back to the same environment variable that
//! [`ChatConfig::from_env`](crate::config::ChatConfig::from_env) reads.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{ChatConfig, DEFAULT_BASE_URL};
use crate::stream::WireFormat;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "codebase-chat",
    version,
    about = "Ask the CodebaseAI chat server a question and stream the reply"
)]
pub struct Cli {
    /// Base URL of the chat server
    #[arg(long, env = "CODEBASE_CHAT_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Encoding of the response stream: done-error or success
    #[arg(long, env = "CODEBASE_CHAT_WIRE_FORMAT", default_value_t = WireFormat::DoneError)]
    pub wire_format: WireFormat,

    /// Fail if the reply ends without a done frame
    #[arg(
        long,
        env = "CODEBASE_CHAT_REQUIRE_DONE",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub require_done: bool,

    /// Connection timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// File whose contents are sent as codebase context ahead of the prompt
    #[arg(long, value_name = "PATH")]
    pub context_file: Option<PathBuf>,

    /// Debug logging for this crate
    #[arg(short, long)]
    pub verbose: bool,

    /// The question to ask
    #[arg(required = true, num_args = 1..)]
    pub prompt: Vec<String>,
}

impl Cli {
    /// The prompt words joined with single spaces.
    pub fn prompt_text(&self) -> String {
        self.prompt.join(" ")
    }

    pub fn chat_config(&self) -> ChatConfig {
        let config = ChatConfig::new()
            .with_base_url(self.url.clone())
            .with_wire_format(self.wire_format)
            .with_require_terminal_frame(self.require_done);
        match self.timeout {
            Some(secs) => config.with_request_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}
