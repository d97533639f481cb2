use judul_core::{Link, ParsedResponse, ResearchTitleSuggestion};

use crate::config::ParsingConfig;
use crate::metadata::{self, InferredMetadata};
use crate::{links, normalize, titles};

/// Parses assistant responses with one fixed [`ParsingConfig`].
///
/// Stateless apart from the config, so a single extractor can be shared by
/// every chat session.
#[derive(Debug, Clone, Default)]
pub struct ResponseExtractor {
    config: ParsingConfig,
}

impl ResponseExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn normalize_line(&self, line: &str) -> String {
        normalize::normalize_line(line)
    }

    /// Title suggestions found in `text`, in source order.
    pub fn extract_titles(&self, text: &str) -> Vec<ResearchTitleSuggestion> {
        titles::extract_titles_with_config(text, &self.config)
    }

    /// Field, complexity and keywords for a bare title.
    pub fn infer_metadata(&self, title: &str) -> InferredMetadata {
        metadata::infer_metadata_with_config(title, &self.config)
    }

    pub fn extract_links(&self, text: &str) -> Vec<Link> {
        links::extract_links(text)
    }

    /// Run both extractors over one response.
    ///
    /// An empty result means the caller should render the raw text.
    pub fn parse_response(&self, text: &str) -> ParsedResponse {
        let parsed = ParsedResponse {
            suggestions: self.extract_titles(text),
            links: self.extract_links(text),
        };
        tracing::debug!(
            chars = text.len(),
            suggestions = parsed.suggestions.len(),
            links = parsed.links.len(),
            "parsed assistant response"
        );
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingConfigBuilder;
    use judul_core::Complexity;

    #[test]
    fn test_parse_response_collects_titles_and_links() {
        let text = "1. **Analisis Sentimen Ulasan Aplikasi Belanja Daring**\n\
                    Mengukur persepsi pengguna dari ulasan di toko aplikasi.\n\
                    \n\
                    Sumber data: https://play.google.com/store";
        let parsed = ResponseExtractor::new().parse_response(text);
        assert_eq!(parsed.suggestions.len(), 1);
        assert_eq!(parsed.links.len(), 1);
        assert_eq!(parsed.links[0].label, "Sumber data");
        assert!(!parsed.is_empty());
    }

    #[test]
    fn test_plain_chat_parses_empty() {
        let parsed = ResponseExtractor::new().parse_response("Sama-sama, semoga lancar!");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_config_flows_through() {
        let config = ParsingConfigBuilder::new()
            .beginner_max_len(10)
            .build()
            .unwrap();
        let extractor = ResponseExtractor::with_config(config);
        assert_eq!(extractor.config().keyword_cap(), 5);
        assert_eq!(
            extractor.infer_metadata("Sejarah Kota Tua").complexity,
            Complexity::Intermediate
        );
        assert_eq!(
            ResponseExtractor::new()
                .infer_metadata("Sejarah Kota Tua")
                .complexity,
            Complexity::Beginner
        );
    }
}
