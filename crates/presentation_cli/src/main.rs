//! Interview CLI
//!
//! Runs a voice interview session in the terminal. Typed lines stand in for
//! the candidate's speech and the interviewer's lines are printed.

#![allow(clippy::print_stdout)]

mod console;
mod session;

use std::path::PathBuf;

use ai_core::InterviewerBackend;
use ai_speech::select_voice;
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, LoggingConfig, init_logging};

/// Interview CLI
#[derive(Debug, Parser)]
#[command(name = "interview-cli")]
#[command(author, version, about = "Voice interview turn-taking in the terminal", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: interview.toml if present)
    #[arg(short, long, global = true, env = "INTERVIEW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run an interview session
    ///
    /// Type your answers line by line. A pause ends your turn; `/submit`
    /// ends it right away, `/resume` restarts listening after a recognizer
    /// hiccup and `/stop` ends the interview.
    Interview {
        /// Session token from the resume upload (generated if missing)
        #[arg(short, long, env = "INTERVIEW_SESSION_TOKEN")]
        session_token: Option<String>,

        /// Use the offline scripted interviewer
        #[arg(long)]
        scripted: bool,
    },

    /// List the voice catalog and the voice that would be used
    Voices,

    /// Print the effective configuration as TOML
    Config,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Logging settings with `-v` flags taking precedence over the file
fn logging_config(config: &LoggingConfig, verbose: u8) -> LoggingConfig {
    if verbose == 0 {
        return config.clone();
    }
    LoggingConfig {
        filter: log_filter_from_verbosity(verbose).to_string(),
        ..config.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    init_logging(&logging_config(&config.logging, cli.verbose))?;

    match cli.command {
        Commands::Interview {
            session_token,
            scripted,
        } => {
            if scripted {
                config.interviewer.backend = InterviewerBackend::Scripted;
            }
            let outcome = session::run(&config, session_token).await?;
            // a pending blocking stdin read would hold up runtime shutdown
            std::process::exit(i32::from(outcome.notice.is_some()));
        },

        Commands::Voices => {
            let voices = &config.speech.voices;
            let selected = select_voice(voices, &config.speech.voice_preference());
            for line in console::voice_lines(voices, selected) {
                println!("{line}");
            }
        },

        Commands::Config => {
            print!("{}", config.to_toml()?);
        },
    }

    Ok(())
}
