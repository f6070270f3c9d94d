//! CLI command definitions and handlers

use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::controller::{
    Outcome, Services, SessionViewState, SpeechController, TranslatorController,
};
use crate::core::models::Language;

/// Commands for Speech Translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate text, optionally speaking or copying the result
    Translate {
        /// Text to translate
        text: String,

        /// Source language (en, mn, th, bn, hi)
        #[arg(long, default_value = "en")]
        from: Language,

        /// Target language (en, mn, th, bn, hi)
        #[arg(short, long, default_value = "mn")]
        to: Language,

        /// Play synthesized speech for the translation
        #[arg(long)]
        speak: bool,

        /// Copy the translation to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Speak text directly, without translating
    Speak {
        /// Text to speak
        text: String,

        /// Language of the text (en, mn, th, bn, hi)
        #[arg(short, long, default_value = "mn")]
        lang: Language,
    },

    /// List supported languages and their speech codes
    Languages,

    /// Interactive translator session on stdin
    Session {
        /// Initial source language
        #[arg(long, default_value = "en")]
        from: Language,

        /// Initial target language
        #[arg(short, long, default_value = "mn")]
        to: Language,
    },
}

/// Run `fut` behind a spinner
async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let output = fut.await;
    pb.finish_and_clear();
    output
}

fn ensure_ok(outcome: Outcome, action: &str) -> anyhow::Result<()> {
    match outcome {
        Outcome::Failed => anyhow::bail!("{} failed", action),
        Outcome::Rejected => anyhow::bail!("{} rejected: input is empty", action),
        _ => Ok(()),
    }
}

/// Handle one-shot translation
pub async fn handle_translate(
    services: Services,
    text: String,
    from: Language,
    to: Language,
    speak: bool,
    copy: bool,
) -> anyhow::Result<()> {
    info!("Translating {} -> {}", from, to);

    let controller = TranslatorController::new(services);
    controller.set_source_lang(from);
    controller.set_target_lang(to);
    controller.set_input(text);

    let outcome = with_spinner("Translating...", controller.submit_translation()).await;
    ensure_ok(outcome, "Translation")?;

    let state = controller.snapshot();
    println!("{}", state.translated_text);

    if copy {
        ensure_ok(controller.copy_result().await, "Copy")?;
    }

    if speak {
        let outcome = with_spinner("Playing...", controller.submit_playback()).await;
        ensure_ok(outcome, "Playback")?;
    }

    Ok(())
}

/// Handle direct text-to-speech
pub async fn handle_speak(services: Services, text: String, lang: Language) -> anyhow::Result<()> {
    info!("Speaking {} characters in {}", text.chars().count(), lang.name());

    let controller = SpeechController::new(services);
    controller.set_language(lang);
    controller.set_input(text);

    let outcome = with_spinner("Playing...", controller.submit_playback()).await;
    ensure_ok(outcome, "Playback")
}

/// Print the supported language table
pub fn handle_languages() {
    println!("{:<6} {:<12} {}", "code", "language", "speech");
    for lang in Language::ALL {
        println!("{:<6} {:<12} {}", lang.code(), lang.name(), lang.speech_code());
    }
}

fn print_state(state: &SessionViewState) {
    println!("\n[{} -> {}]", state.source_lang.name(), state.target_lang.name());
    println!("   Input:  {}", state.input_text);
    println!("   Output: {}", state.translated_text);
    if let Some(message) = state.translation.error_message() {
        println!("   Last translation error: {}", message);
    }
    if let Some(message) = state.playback.error_message() {
        println!("   Last playback error: {}", message);
    }
}

const SESSION_HELP: &str = "\
Type text to translate it, or a command:
  :from <code>   set source language
  :to <code>     set target language
  :swap          swap languages and texts
  :play          speak the translation
  :copy          copy the translation
  :show          show the current state
  :langs         list languages
  :help          show this help
  :quit          leave the session";

/// Interactive translator session
pub async fn handle_session(services: Services, from: Language, to: Language) -> anyhow::Result<()> {
    let controller = TranslatorController::with_state(
        services,
        SessionViewState {
            source_lang: from,
            target_lang: to,
            ..Default::default()
        },
    );

    println!("🌐 Speech Translator session ({} -> {})", from.name(), to.name());
    println!("{}", SESSION_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "" => continue,
            ":quit" | ":q" => break,
            ":help" => println!("{}", SESSION_HELP),
            ":langs" => handle_languages(),
            ":show" => print_state(&controller.snapshot()),
            ":from" | ":to" => match arg.parse::<Language>() {
                Ok(lang) if command == ":from" => controller.set_source_lang(lang),
                Ok(lang) => controller.set_target_lang(lang),
                Err(e) => eprintln!("❌ {}", e),
            },
            ":swap" => {
                controller.swap_languages();
                print_state(&controller.snapshot());
            }
            // Each command is awaited before the next line is read, so a
            // trigger can never fire while its operation is in flight
            ":play" => {
                if with_spinner("Playing...", controller.submit_playback()).await == Outcome::Skipped {
                    println!("Nothing to play yet.");
                }
            }
            ":copy" => {
                controller.copy_result().await;
            }
            _ => {
                controller.set_input(line);
                if with_spinner("Translating...", controller.submit_translation()).await
                    == Outcome::Completed
                {
                    println!("{}", controller.snapshot().translated_text);
                }
            }
        }
    }

    Ok(())
}
