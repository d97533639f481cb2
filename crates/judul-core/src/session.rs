use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::AssistantAction;
use crate::voice::{NoopVoice, VoiceInput, VoiceOutput};
use crate::{AssistantResponse, Link, ParsedResponse, ResearchCommand, ResearchTitleSuggestion};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("no suggestion at position {index} (have {available})")]
    NoSuchIndex { index: usize, available: usize },
    #[error("no suggestion with id {0}")]
    NoSuchId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<ResearchTitleSuggestion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<AssistantAction>,
}

/// Where the research-assistant flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ResearchMode {
    /// Ordinary chat.
    #[default]
    Chat,
    /// Title suggestions were requested; waiting for the reply.
    AwaitingTitles { topic: String },
    /// References were requested; waiting for the reply.
    AwaitingReferences { topic: String },
    /// A suggestion list is on screen.
    ReviewingTitles,
    /// The user picked one of the suggestions.
    TitleSelected,
}

/// Client-side state of one chat session.
///
/// Holds the history, the current suggestion list and the selected
/// suggestion id. Voice capabilities are injected; the default is
/// [`NoopVoice`].
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    mode: ResearchMode,
    suggestions: Vec<ResearchTitleSuggestion>,
    selected_id: Option<String>,
    voice_input: Box<dyn VoiceInput>,
    voice_output: Box<dyn VoiceOutput>,
    speak_replies: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("messages", &self.messages.len())
            .field("mode", &self.mode)
            .field("suggestions", &self.suggestions.len())
            .field("selected_id", &self.selected_id)
            .field("speak_replies", &self.speak_replies)
            .finish()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            mode: ResearchMode::Chat,
            suggestions: Vec::new(),
            selected_id: None,
            voice_input: Box::new(NoopVoice),
            voice_output: Box::new(NoopVoice),
            speak_replies: false,
        }
    }

    /// Replace the voice capabilities. Replies are spoken when `speak_replies` is set.
    pub fn with_voice(
        mut self,
        input: Box<dyn VoiceInput>,
        output: Box<dyn VoiceOutput>,
        speak_replies: bool,
    ) -> Self {
        self.voice_input = input;
        self.voice_output = output;
        self.speak_replies = speak_replies;
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn mode(&self) -> &ResearchMode {
        &self.mode
    }

    pub fn suggestions(&self) -> &[ResearchTitleSuggestion] {
        &self.suggestions
    }

    pub fn selected(&self) -> Option<&ResearchTitleSuggestion> {
        let id = self.selected_id.as_deref()?;
        self.suggestions.iter().find(|s| s.id == id)
    }

    /// Record user input and apply the command detected in it, if any.
    ///
    /// A failed selection is logged and leaves the mode unchanged; the
    /// message itself is always recorded.
    pub fn push_user(&mut self, content: impl Into<String>, command: Option<ResearchCommand>) {
        self.messages.push(ChatMessage {
            role: Role::User,
            content: content.into(),
            suggestions: Vec::new(),
            links: Vec::new(),
            actions: Vec::new(),
        });

        match command {
            Some(ResearchCommand::SuggestTitles { topic }) => {
                self.mode = ResearchMode::AwaitingTitles { topic };
            }
            Some(ResearchCommand::FindReferences { topic }) => {
                self.mode = ResearchMode::AwaitingReferences { topic };
            }
            Some(ResearchCommand::SelectTitle { index }) => {
                if let Err(e) = self.select(index) {
                    tracing::debug!(error = %e, "ignoring selection");
                }
            }
            None => {}
        }
    }

    /// Record an assistant reply together with what was parsed out of its text.
    ///
    /// A non-empty suggestion list replaces the current one and clears the
    /// selection. An empty list leaves the current suggestions alone.
    pub fn apply_reply(&mut self, response: AssistantResponse, parsed: ParsedResponse) {
        if !parsed.suggestions.is_empty() {
            self.suggestions = parsed.suggestions.clone();
            self.selected_id = None;
            self.mode = ResearchMode::ReviewingTitles;
        } else if matches!(
            self.mode,
            ResearchMode::AwaitingTitles { .. } | ResearchMode::AwaitingReferences { .. }
        ) {
            self.mode = ResearchMode::Chat;
        }

        if self.speak_replies
            && self.voice_output.is_supported()
            && let Err(e) = self.voice_output.speak(&response.text)
        {
            tracing::warn!(error = %e, "failed to speak reply");
        }

        tracing::debug!(
            suggestions = parsed.suggestions.len(),
            links = parsed.links.len(),
            actions = response.actions.len(),
            "assistant reply recorded"
        );

        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content: response.text,
            suggestions: parsed.suggestions,
            links: parsed.links,
            actions: response.actions,
        });
    }

    /// Select the suggestion at 1-based `index`.
    pub fn select(&mut self, index: usize) -> Result<&ResearchTitleSuggestion, SessionError> {
        let available = self.suggestions.len();
        let id = index
            .checked_sub(1)
            .and_then(|i| self.suggestions.get(i))
            .map(|s| s.id.clone())
            .ok_or(SessionError::NoSuchIndex { index, available })?;
        self.select_id(&id)
    }

    /// Select the suggestion with the given id.
    pub fn select_id(&mut self, id: &str) -> Result<&ResearchTitleSuggestion, SessionError> {
        let pos = self
            .suggestions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SessionError::NoSuchId(id.to_string()))?;
        self.selected_id = Some(id.to_string());
        self.mode = ResearchMode::TitleSelected;
        Ok(&self.suggestions[pos])
    }

    /// Start listening through the injected voice input.
    pub fn start_listening(&mut self) -> bool {
        match self.voice_input.start() {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "voice input unavailable");
                false
            }
        }
    }

    /// Stop listening and return the transcript, if any.
    pub fn finish_listening(&mut self) -> Option<String> {
        self.voice_input.stop();
        self.voice_input
            .take_transcript()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Interrupt a reply being spoken.
    pub fn stop_speaking(&mut self) {
        self.voice_output.cancel();
    }
}
