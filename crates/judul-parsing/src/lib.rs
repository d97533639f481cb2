pub mod commands;
pub mod config;
pub mod extractor;
pub mod links;
pub mod metadata;
pub mod normalize;
pub mod titles;
pub mod vocabulary;

pub use commands::detect_command;
pub use config::{ConfigError, ListOverride, MetadataPrecedence, ParsingConfig, ParsingConfigBuilder};
pub use extractor::ResponseExtractor;
pub use links::extract_links;
pub use metadata::{InferredMetadata, extract_keywords, infer_complexity, infer_field, infer_metadata};
pub use normalize::normalize_line;
pub use titles::{extract_titles, is_heading_candidate};
// Re-export domain types from core (canonical definitions live there)
pub use judul_core::{Complexity, Link, ParsedResponse, ResearchCommand, ResearchField, ResearchTitleSuggestion};

/// Parse one assistant response with the default configuration.
///
/// Steps:
/// 1. Scan lines for research title headings
/// 2. Absorb description and labeled metadata below each heading
/// 3. Infer field, complexity and keywords from the title text
/// 4. Collect labeled hyperlinks across the whole response
pub fn parse_response(text: &str) -> ParsedResponse {
    ResponseExtractor::new().parse_response(text)
}
