use std::io::Write;

use judul_core::{
    AssistantAction, ChatSession, Complexity, Link, ParsedResponse, ResearchCommand,
    ResearchMode, ResearchTitleSuggestion, Role,
};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print a response that yielded nothing structured, as plain chat text.
pub fn print_raw(w: &mut dyn Write, text: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", "(no title suggestions or links found)".dimmed())?;
    } else {
        writeln!(w, "(no title suggestions or links found)")?;
    }
    writeln!(w)?;
    writeln!(w, "{}", text.trim_end())?;
    Ok(())
}

/// Print suggestions followed by links.
pub fn print_parsed(
    w: &mut dyn Write,
    parsed: &ParsedResponse,
    color: ColorMode,
) -> std::io::Result<()> {
    if !parsed.suggestions.is_empty() {
        writeln!(
            w,
            "Found {} title suggestion{}",
            parsed.suggestions.len(),
            if parsed.suggestions.len() == 1 { "" } else { "s" }
        )?;
        for (i, suggestion) in parsed.suggestions.iter().enumerate() {
            print_suggestion(w, i + 1, suggestion, false, color)?;
        }
    }
    if !parsed.links.is_empty() {
        writeln!(w)?;
        print_links(w, &parsed.links, color)?;
    }
    Ok(())
}

fn print_suggestion(
    w: &mut dyn Write,
    number: usize,
    s: &ResearchTitleSuggestion,
    selected: bool,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    let marker = if selected { "*" } else { " " };
    if color.enabled() {
        writeln!(w, "{}[{}] {}", marker.green(), number, s.title.bold().cyan())?;
    } else {
        writeln!(w, "{}[{}] {}", marker, number, s.title)?;
    }

    writeln!(w, "    {}", s.description)?;

    let tier = complexity_label(s.complexity);
    if color.enabled() {
        let tier = match s.complexity {
            Complexity::Beginner => tier.green().to_string(),
            Complexity::Intermediate => tier.yellow().to_string(),
            Complexity::Advanced => tier.red().to_string(),
        };
        writeln!(
            w,
            "    {} | {} | {}",
            s.field.magenta(),
            tier,
            s.estimated_duration.dimmed()
        )?;
        writeln!(w, "    {}", s.keywords.join(", ").dimmed())?;
    } else {
        writeln!(w, "    {} | {} | {}", s.field, tier, s.estimated_duration)?;
        writeln!(w, "    {}", s.keywords.join(", "))?;
    }
    Ok(())
}

fn complexity_label(c: Complexity) -> &'static str {
    match c {
        Complexity::Beginner => "Pemula",
        Complexity::Intermediate => "Menengah",
        Complexity::Advanced => "Lanjutan",
    }
}

/// Print links as `label  href`, with the favicon source dimmed underneath.
pub fn print_links(w: &mut dyn Write, links: &[Link], color: ColorMode) -> std::io::Result<()> {
    if links.is_empty() {
        writeln!(w, "No links found")?;
        return Ok(());
    }
    writeln!(w, "Links:")?;
    for link in links {
        if color.enabled() {
            writeln!(w, "  {}  {}", link.label.bold(), link.href.blue().underline())?;
            if let Some(icon) = link.favicon_url() {
                writeln!(w, "    {}", icon.dimmed())?;
            }
        } else {
            writeln!(w, "  {}  {}", link.label, link.href)?;
            if let Some(icon) = link.favicon_url() {
                writeln!(w, "    {}", icon)?;
            }
        }
    }
    Ok(())
}

pub fn print_command(
    w: &mut dyn Write,
    command: Option<&ResearchCommand>,
    color: ColorMode,
) -> std::io::Result<()> {
    let (kind, detail) = match command {
        Some(ResearchCommand::SuggestTitles { topic }) => ("suggest-titles", topic_or_any(topic)),
        Some(ResearchCommand::FindReferences { topic }) => ("find-references", topic_or_any(topic)),
        Some(ResearchCommand::SelectTitle { index }) => ("select-title", index.to_string()),
        None => ("chat", String::new()),
    };
    if color.enabled() {
        write!(w, "{}", kind.green().bold())?;
    } else {
        write!(w, "{}", kind)?;
    }
    if detail.is_empty() {
        writeln!(w)?;
    } else {
        writeln!(w, " {}", detail)?;
    }
    Ok(())
}

fn topic_or_any(topic: &str) -> String {
    if topic.is_empty() {
        "(any topic)".to_string()
    } else {
        topic.to_string()
    }
}

/// Print the conversation, then the current research state.
pub fn print_session(
    w: &mut dyn Write,
    session: &ChatSession,
    color: ColorMode,
) -> std::io::Result<()> {
    for message in session.messages() {
        let who = match message.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        let first_line = message.content.lines().next().unwrap_or("");
        if color.enabled() {
            let who = match message.role {
                Role::User => who.cyan().to_string(),
                Role::Assistant => who.magenta().to_string(),
            };
            writeln!(w, "{:>9}: {}", who, first_line)?;
        } else {
            writeln!(w, "{:>9}: {}", who, first_line)?;
        }
        if !message.suggestions.is_empty() {
            writeln!(w, "           ({} title suggestions)", message.suggestions.len())?;
        }
        for action in &message.actions {
            writeln!(w, "           -> {}", describe_action(action))?;
        }
    }

    writeln!(w)?;
    let sep = "=".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.bold())?;
    } else {
        writeln!(w, "{}", sep)?;
    }
    writeln!(w, "Mode: {}", describe_mode(session.mode()))?;

    let selected_id = session.selected().map(|s| s.id.as_str());
    for (i, suggestion) in session.suggestions().iter().enumerate() {
        let selected = selected_id == Some(suggestion.id.as_str());
        print_suggestion(w, i + 1, suggestion, selected, color)?;
    }
    Ok(())
}

fn describe_mode(mode: &ResearchMode) -> String {
    match mode {
        ResearchMode::Chat => "chat".to_string(),
        ResearchMode::AwaitingTitles { topic } => {
            format!("waiting for title suggestions ({})", topic_or_any(topic))
        }
        ResearchMode::AwaitingReferences { topic } => {
            format!("waiting for references ({})", topic_or_any(topic))
        }
        ResearchMode::ReviewingTitles => "reviewing title suggestions".to_string(),
        ResearchMode::TitleSelected => "title selected".to_string(),
    }
}

fn describe_action(action: &AssistantAction) -> String {
    match action {
        AssistantAction::Navigate { href } => format!("navigate to {}", href),
        AssistantAction::Redirect { url } => format!("open {}", url),
        AssistantAction::CopyText { text } => format!("copy {:?}", text),
        AssistantAction::OpenSettings => "open settings".to_string(),
    }
}
