use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use judul_core::config_file::{self, ConfigFile};
use judul_core::{AssistantResponse, ChatMessage, ChatSession, ResearchMode, ResearchTitleSuggestion};
use judul_parsing::{ParsingConfigBuilder, ResponseExtractor, detect_command};
use serde::{Deserialize, Serialize};

mod output;

use output::ColorMode;

/// Research title assistant - pull title suggestions and links out of AI chat responses
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Debug logging (JUDUL_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Extra config file, layered over ./.judul.toml and the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an assistant response into title suggestions and links
    Parse {
        /// Response text file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Extract labeled links from an assistant response
    Links {
        /// Response text file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Classify a chat input as a research command
    Detect {
        /// The user's chat input
        input: String,
    },

    /// Replay a JSON chat transcript through a session
    Replay {
        /// JSON array of {"role": "user"|"assistant", ...} entries
        transcript: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// One turn of a recorded conversation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
enum TranscriptEntry {
    User { content: String },
    Assistant(AssistantResponse),
}

/// Session state printed by `replay --json`.
#[derive(Debug, Serialize)]
struct ReplaySummary<'a> {
    mode: &'a ResearchMode,
    selected: Option<&'a ResearchTitleSuggestion>,
    suggestions: &'a [ResearchTitleSuggestion],
    messages: &'a [ChatMessage],
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let file_config = load_file_config(cli.config.as_deref())?;
    let display = file_config.display.clone().unwrap_or_default();
    let extractor = build_extractor(&file_config)?;

    let use_color =
        !cli.no_color && display.color.unwrap_or(true) && std::io::stdout().is_terminal();
    let color = ColorMode(use_color);
    let default_json = display.json.unwrap_or(false);

    let mut writer = std::io::stdout().lock();

    match cli.command {
        Command::Parse { file, json } => {
            let text = read_input(file.as_deref())?;
            let parsed = extractor.parse_response(&text);
            if json || default_json {
                write_json(&mut writer, &parsed)?;
            } else if parsed.is_empty() {
                output::print_raw(&mut writer, &text, color)?;
            } else {
                output::print_parsed(&mut writer, &parsed, color)?;
            }
        }
        Command::Links { file, json } => {
            let text = read_input(file.as_deref())?;
            let links = extractor.extract_links(&text);
            if json || default_json {
                write_json(&mut writer, &links)?;
            } else {
                output::print_links(&mut writer, &links, color)?;
            }
        }
        Command::Detect { input } => {
            let command = detect_command(&input);
            if default_json {
                write_json(&mut writer, &command)?;
            } else {
                output::print_command(&mut writer, command.as_ref(), color)?;
            }
        }
        Command::Replay { transcript, json } => {
            let entries = load_transcript(&transcript)?;
            let session = replay(entries, &extractor);
            if json || default_json {
                let summary = ReplaySummary {
                    mode: session.mode(),
                    selected: session.selected(),
                    suggestions: session.suggestions(),
                    messages: session.messages(),
                };
                write_json(&mut writer, &summary)?;
            } else {
                output::print_session(&mut writer, &session, color)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("JUDUL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Default config cascade, with `explicit` layered on top when given.
fn load_file_config(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let base = config_file::load_config();
    let Some(path) = explicit else {
        return Ok(base);
    };
    let overlay = config_file::load_from_path(path)?;
    tracing::debug!(path = %path.display(), "loaded config override");
    Ok(config_file::merge(base, overlay))
}

fn build_extractor(config: &ConfigFile) -> anyhow::Result<ResponseExtractor> {
    let builder = match &config.parsing {
        Some(section) => ParsingConfigBuilder::from_section(section)
            .context("invalid [parsing] section in config")?,
        None => ParsingConfigBuilder::new(),
    };
    let config = builder.build().context("invalid parsing configuration")?;
    Ok(ResponseExtractor::with_config(config))
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn load_transcript(path: &Path) -> anyhow::Result<Vec<TranscriptEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid transcript JSON in {}", path.display()))
}

/// Feed a transcript through a fresh session: user turns go through the
/// command detector, assistant turns through the response parser.
fn replay(entries: Vec<TranscriptEntry>, extractor: &ResponseExtractor) -> ChatSession {
    let mut session = ChatSession::new();
    for entry in entries {
        match entry {
            TranscriptEntry::User { content } => {
                let command = detect_command(&content);
                tracing::debug!(?command, "user turn");
                session.push_user(content, command);
            }
            TranscriptEntry::Assistant(response) => {
                let parsed = extractor.parse_response(&response.text);
                session.apply_reply(response, parsed);
            }
        }
    }
    session
}

fn write_json<T: Serialize>(w: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}
