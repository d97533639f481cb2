use std::fmt;

use serde::{Deserialize, Serialize};

pub mod action;
pub mod config_file;
pub mod session;
pub mod voice;

// Re-export for convenience
pub use action::{AssistantAction, AssistantResponse, PayloadError};
pub use session::{ChatMessage, ChatSession, ResearchMode, Role, SessionError};
pub use voice::{NoopVoice, VoiceError, VoiceInput, VoiceOutput};

/// Coarse research-domain category assigned to a parsed title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResearchField {
    #[serde(rename = "Kecerdasan Buatan")]
    ArtificialIntelligence,
    #[serde(rename = "Teknologi Informasi")]
    InformationTechnology,
    #[serde(rename = "Ekonomi dan Bisnis")]
    EconomicsBusiness,
    #[serde(rename = "Kesehatan")]
    Health,
    #[serde(rename = "Pendidikan")]
    Education,
    #[serde(rename = "Lingkungan dan Energi")]
    EnvironmentEnergy,
    #[serde(rename = "Teknik dan Industri")]
    EngineeringIndustry,
    #[default]
    #[serde(rename = "Multidisiplin")]
    Multidisciplinary,
}

impl ResearchField {
    /// Every field, in inference priority order. `Multidisciplinary` is last.
    pub const ALL: [ResearchField; 8] = [
        Self::ArtificialIntelligence,
        Self::InformationTechnology,
        Self::EconomicsBusiness,
        Self::Health,
        Self::Education,
        Self::EnvironmentEnergy,
        Self::EngineeringIndustry,
        Self::Multidisciplinary,
    ];

    /// Display label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ArtificialIntelligence => "Kecerdasan Buatan",
            Self::InformationTechnology => "Teknologi Informasi",
            Self::EconomicsBusiness => "Ekonomi dan Bisnis",
            Self::Health => "Kesehatan",
            Self::Education => "Pendidikan",
            Self::EnvironmentEnergy => "Lingkungan dan Energi",
            Self::EngineeringIndustry => "Teknik dan Industri",
            Self::Multidisciplinary => "Multidisiplin",
        }
    }

    /// Case-insensitive lookup by display label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ResearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse difficulty classification of a research title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Complexity {
    /// Duration estimate used when the source text names none.
    pub fn default_duration(&self) -> &'static str {
        match self {
            Self::Beginner => "4-6 bulan",
            Self::Intermediate => "6-8 bulan",
            Self::Advanced => "8-12 bulan",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A research title extracted from one assistant response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchTitleSuggestion {
    /// Generated per extraction; re-parsing the same text yields new ids.
    pub id: String,
    pub title: String,
    pub description: String,
    pub field: ResearchField,
    pub complexity: Complexity,
    pub estimated_duration: String,
    pub keywords: Vec<String>,
}

/// A labeled hyperlink mentioned in an assistant response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }

    /// Hostname part of `href`, without scheme, port or userinfo.
    pub fn host(&self) -> Option<&str> {
        let rest = self
            .href
            .strip_prefix("https://")
            .or_else(|| self.href.strip_prefix("http://"))?;
        let authority = rest.split(['/', '?', '#']).next()?;
        let host = authority.rsplit('@').next()?;
        let host = host.split(':').next()?;
        if host.is_empty() { None } else { Some(host) }
    }

    /// Favicon URL for the link's host, served by a third-party favicon service.
    pub fn favicon_url(&self) -> Option<String> {
        self.host()
            .map(|host| format!("https://www.google.com/s2/favicons?domain={}&sz=32", host))
    }
}

/// Both structured views of one assistant response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResponse {
    pub suggestions: Vec<ResearchTitleSuggestion>,
    pub links: Vec<Link>,
}

impl ParsedResponse {
    /// True when neither titles nor links were found; the caller renders raw text.
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty() && self.links.is_empty()
    }
}

/// A research-assistant command recognized in user chat input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ResearchCommand {
    /// Ask the assistant for research title suggestions on `topic`.
    SuggestTitles { topic: String },
    /// Ask the assistant for references or journals on `topic`.
    FindReferences { topic: String },
    /// Pick one of the current suggestions (1-based).
    SelectTitle { index: usize },
}
