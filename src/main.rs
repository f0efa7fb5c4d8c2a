//! # Memory Harness CLI (`mema`)
//!
//! Runs the full ingestion pipeline (mail → notes → calendar → index) and
//! answers questions, interactively or one-shot.
//!
//! ## Usage
//!
//! ```bash
//! mema [--config ./config/mema.toml] [COMMAND]
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mema` / `mema chat` | Run the pipeline, then drop into the chat loop |
//! | `mema ask "<question>"` | Run the pipeline and answer one question |
//! | `mema sources` | Show connector configuration status |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use memory_harness::{chat, config, ingest, sources};

/// Memory Harness — a personal-data question-answering assistant over
/// mail, notes, and calendar.
#[derive(Parser)]
#[command(
    name = "mema",
    about = "Memory Harness — a personal-data question-answering assistant",
    version,
    long_about = "Memory Harness pulls text from mail, notes, and calendar providers, \
    indexes it in memory for semantic retrieval, and answers natural-language questions \
    through a conversational loop backed by a local Ollama model."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Missing file is fine — defaults apply and secrets may come from
    /// the environment or a local .env file.
    #[arg(long, global = true, default_value = "./config/mema.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline, then start the interactive chat loop.
    ///
    /// This is the default when no command is given.
    Chat,

    /// Run the full pipeline and answer a single question.
    Ask {
        /// The question to answer.
        question: String,
    },

    /// Show connector configuration status.
    Sources,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let session = ingest::build_session(&cfg).await?;
            chat::run_chat(&session.agent).await?;
        }
        Commands::Ask { question } => {
            let session = ingest::build_session(&cfg).await?;
            let answer = session.agent.respond(&question).await?;
            println!("AI: {}", answer);
        }
        Commands::Sources => {
            sources::list_sources(&cfg);
        }
    }

    Ok(())
}
