//! Main entry point for the Speech Translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use std::path::PathBuf;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use speech_translator::cli::commands::{self, Commands};
use speech_translator::{Services, SpeechMode, TranslationMode, TranslatorConfig};

/// Speech Translator - translate text and listen to the result
#[derive(Parser, Debug)]
#[command(name = "speech-translator", version, about, long_about = None)]
struct Args {
    /// Base URL of the translation/speech backend (defaults to BACKEND_URL env var)
    #[arg(long)]
    backend_url: Option<String>,

    /// Translation backend: backend or mymemory (defaults to TRANSLATION_MODE env var)
    #[arg(long)]
    translation_mode: Option<TranslationMode>,

    /// Speech backend: backend or voiser (defaults to SPEECH_MODE env var)
    #[arg(long)]
    speech_mode: Option<SpeechMode>,

    /// JSON configuration file used instead of environment variables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Override config with CLI args if provided
    let mut config = match &args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::from_env()?,
    };
    if let Some(url) = args.backend_url {
        config.backend_url = Some(url);
    }
    if let Some(mode) = args.translation_mode {
        config.translation_mode = mode;
    }
    if let Some(mode) = args.speech_mode {
        config.speech_mode = mode;
    }

    // Execute command
    match args.command {
        Some(Commands::Translate {
            text,
            from,
            to,
            speak,
            copy,
        }) => {
            let services = Services::from_config(&config)?;
            commands::handle_translate(services, text, from, to, speak, copy).await?;
        }
        Some(Commands::Speak { text, lang }) => {
            let services = Services::from_config(&config)?;
            commands::handle_speak(services, text, lang).await?;
        }
        Some(Commands::Languages) => commands::handle_languages(),
        Some(Commands::Session { from, to }) => {
            let services = Services::from_config(&config)?;
            commands::handle_session(services, from, to).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
