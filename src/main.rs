//! Barbra - Entry Point
//!
//! Interactive terminal front-end for the assistant core. Loads settings and
//! backend configuration, then reads one command per line and prints the
//! reply.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use barbra::action::{ActionExecutor, SystemDevice};
use barbra::command::{CommandProcessor, Conversation};
use barbra::core::config::AssistantConfig;
use barbra::core::error::Result;
use barbra::core::types::AiMode;
use barbra::intent::SUGGESTIONS;
use barbra::llm::AiBackends;
use barbra::settings::{FileStore, SettingsManager, SettingsPatch};
use clap::Parser;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Barbra voice assistant shell
#[derive(Parser, Debug)]
#[command(name = "barbra")]
#[command(about = "Type commands for the Barbra assistant; unmatched text goes to the AI backend")]
struct Args {
    /// Backend configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Settings file (defaults to <config dir>/barbra/settings.json)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the stored AI mode: offline, cloud or local
    #[arg(long)]
    mode: Option<AiMode>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("barbra=info")),
        )
        .init();

    let rt = Runtime::new()?;

    let config = match &args.config {
        Some(path) => AssistantConfig::load(path)?,
        None => AssistantConfig::default(),
    }
    .with_env_overrides();

    let settings_path = args.settings.clone().unwrap_or_else(default_settings_path);
    let mut settings = rt.block_on(SettingsManager::load(FileStore::new(settings_path)));
    if let Some(mode) = args.mode {
        rt.block_on(settings.update(SettingsPatch {
            ai_mode: Some(mode),
            ..Default::default()
        }));
    }

    let executor = ActionExecutor::new(Arc::new(SystemDevice::new()));
    let processor = CommandProcessor::new(executor, AiBackends::new(config));
    let mut conversation = Conversation::new(processor);
    conversation.apply_settings(settings.settings());

    println!("\n=== BARBRA ===");
    println!("AI mode: {}", settings.settings().ai_mode);
    print_help();

    loop {
        // Prompt
        print!("> ");
        io::stdout().flush()?;

        // Read input; EOF ends the session
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        match ShellCommand::parse(&input) {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => print_help(),
            ShellCommand::ShowSettings => println!("{:#?}", settings.settings()),

            // Switch backend and persist the choice
            ShellCommand::Mode(mode) => match mode.parse::<AiMode>() {
                Ok(mode) => {
                    let updated = rt.block_on(settings.update(SettingsPatch {
                        ai_mode: Some(mode),
                        ..Default::default()
                    }));
                    conversation.apply_settings(updated);
                    println!("AI mode: {}", mode);
                }
                Err(e) => println!("{}", e),
            },

            // Empty key clears the stored one
            ShellCommand::Key(key) => {
                let updated = rt.block_on(settings.update(SettingsPatch {
                    api_key: Some(key.to_string()),
                    ..Default::default()
                }));
                conversation.apply_settings(updated);
                println!(
                    "API key {}",
                    if conversation.processor().has_credential() {
                        "stored"
                    } else {
                        "cleared"
                    }
                );
            }

            // Everything else goes to the assistant
            ShellCommand::Utterance(text) => {
                if let Some(reply) = rt.block_on(conversation.submit(text)) {
                    println!("{}", reply.message);
                }
            }
        }
    }

    println!("\nGoodbye! {} messages exchanged.", conversation.history().len());
    Ok(())
}

/// One line of shell input
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand<'a> {
    Empty,
    Quit,
    Help,
    ShowSettings,
    Mode(&'a str),
    Key(&'a str),
    Utterance(&'a str),
}

impl<'a> ShellCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let input = line.trim();
        match input {
            "" => return Self::Empty,
            "quit" | "q" => return Self::Quit,
            "help" => return Self::Help,
            ":settings" => return Self::ShowSettings,
            ":key" => return Self::Key(""),
            _ => {}
        }

        if let Some(mode) = input.strip_prefix(":mode ") {
            Self::Mode(mode.trim())
        } else if let Some(key) = input.strip_prefix(":key ") {
            Self::Key(key.trim())
        } else {
            Self::Utterance(input)
        }
    }
}

fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("barbra")
        .join("settings.json")
}

fn print_help() {
    println!();
    println!("Try:");
    for suggestion in SUGGESTIONS {
        println!("  {}", suggestion);
    }
    println!();
    println!("Shell commands:");
    println!("  :mode <offline|cloud|local>  - Switch AI backend");
    println!("  :key <api key>               - Set cloud API key (empty to clear)");
    println!("  :settings                    - Show current settings");
    println!("  help                         - Show this help");
    println!("  quit / q                     - Exit");
    println!();
}
