use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("invalid assistant payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// A follow-up action attached to an assistant response.
///
/// Each kind carries exactly the fields it needs; unknown kinds fail to
/// deserialize instead of being passed through as an untyped bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum AssistantAction {
    /// In-app navigation to a route.
    Navigate { href: String },
    /// Redirect to an external URL.
    Redirect { url: String },
    /// Put text on the clipboard.
    CopyText { text: String },
    OpenSettings,
}

impl AssistantAction {
    /// The destination of navigation-like actions.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Navigate { href } => Some(href),
            Self::Redirect { url } => Some(url),
            Self::CopyText { .. } | Self::OpenSettings => None,
        }
    }
}

/// Body returned by the generative-AI service.
///
/// Only `text` is parsed into suggestions and links; `suggestions` holds the
/// service's own short follow-up prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub text: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub actions: Vec<AssistantAction>,
}

impl AssistantResponse {
    /// A response carrying only text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tagged_actions() {
        let json = r#"{
            "text": "Silakan buka halaman pengaturan.",
            "actions": [
                {"type": "navigate", "payload": {"href": "/settings"}},
                {"type": "redirect", "payload": {"url": "https://scholar.google.com"}}
            ]
        }"#;
        let resp = AssistantResponse::from_json(json).unwrap();
        assert!(resp.suggestions.is_empty());
        assert_eq!(
            resp.actions,
            vec![
                AssistantAction::Navigate {
                    href: "/settings".to_string()
                },
                AssistantAction::Redirect {
                    url: "https://scholar.google.com".to_string()
                },
            ]
        );
        assert_eq!(resp.actions[1].target(), Some("https://scholar.google.com"));
    }

    #[test]
    fn text_only_payload_defaults_optional_lists() {
        let resp = AssistantResponse::from_json(r#"{"text": "Halo"}"#).unwrap();
        assert_eq!(resp, AssistantResponse::from_text("Halo"));
    }

    #[test]
    fn unknown_action_kind_is_rejected() {
        let json = r#"{"text": "x", "actions": [{"type": "launch_rocket", "payload": {}}]}"#;
        assert!(AssistantResponse::from_json(json).is_err());
    }

    #[test]
    fn action_missing_required_field_is_rejected() {
        let json = r#"{"text": "x", "actions": [{"type": "navigate", "payload": {"url": "/a"}}]}"#;
        assert!(AssistantResponse::from_json(json).is_err());
    }
}
