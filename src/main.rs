use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use codebase_chat::chat::ChatClient;
use codebase_chat::cli::{run_prompt, Cli};
use codebase_chat::logging::{self, LogConfig};
use codebase_chat::models::Role;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_config = LogConfig::from_env();
    logging::init(if cli.verbose { log_config.verbose() } else { log_config });

    let context = match &cli.context_file {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .wrap_err_with(|| format!("failed to read context file {}", path.display()))?,
        ),
        None => None,
    };

    let config = cli.chat_config();
    tracing::debug!(url = %config.chat_url(), format = %config.wire_format, "starting");
    let chat = ChatClient::new(config)?;

    let mut stdout = std::io::stdout();
    let prompt = cli.prompt_text();

    // Dropping the request future on Ctrl-C closes the connection
    let transcript = tokio::select! {
        result = run_prompt(&chat, &prompt, context.as_deref(), &mut stdout) => result?,
        _ = tokio::signal::ctrl_c() => {
            eprintln!();
            eprintln!("Cancelled.");
            return Ok(ExitCode::from(130));
        }
    };

    match transcript.last() {
        Some(last) if last.role == Role::Error => {
            eprintln!("{}", last.content);
            Ok(ExitCode::FAILURE)
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}
