use judul_core::config_file::ParsingSection;
use regex::Regex;
use thiserror::Error;

use crate::vocabulary::{self, EXCLUSION_PHRASES, RESEARCH_TERMS};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Which source wins when a title carries explicit metadata labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataPrecedence {
    /// Labels found under the heading ("Bidang: ...") win; the title text fills gaps.
    #[default]
    Explicit,
    /// Title-text inference overwrites field and complexity; inferred keywords
    /// replace labeled ones only when more than the two defaults were inferred.
    Inferred,
}

impl std::str::FromStr for MetadataPrecedence {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "explicit" => Ok(Self::Explicit),
            "inferred" => Ok(Self::Inferred),
            other => Err(ConfigError::InvalidValue {
                key: "precedence",
                reason: format!("expected \"explicit\" or \"inferred\", got {:?}", other),
            }),
        }
    }
}

/// Configuration for the response parser.
///
/// `research_re` is `None` when the built-in vocabulary is in use.
/// Use [`ParsingConfigBuilder`] to construct with custom values.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── titles.rs ──
    /// A heading candidate must be longer than this many characters.
    pub(crate) heading_min_len: usize,
    /// Headings without research vocabulary must be longer than this.
    pub(crate) vocab_free_min_len: usize,
    /// Unlabeled lines shorter than this are not description text.
    pub(crate) description_min_len: usize,
    /// Lines inspected after an accepted heading.
    pub(crate) lookahead_lines: usize,
    /// Whole-word research vocabulary.
    pub(crate) research_re: Option<Regex>,
    /// Label and instruction phrases; `None` means the built-in list.
    pub(crate) exclusion_re: Option<Regex>,
    pub(crate) precedence: MetadataPrecedence,

    // ── metadata.rs ──
    pub(crate) keyword_cap: usize,
    pub(crate) beginner_max_len: usize,
    pub(crate) advanced_min_len: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            heading_min_len: 25,
            vocab_free_min_len: 50,
            description_min_len: 20,
            lookahead_lines: 8,
            research_re: None,
            exclusion_re: None,
            precedence: MetadataPrecedence::Explicit,
            keyword_cap: 5,
            beginner_max_len: 40,
            advanced_min_len: 120,
        }
    }
}

impl ParsingConfig {
    pub(crate) fn research_re(&self) -> &Regex {
        self.research_re.as_ref().unwrap_or(&vocabulary::RESEARCH_RE)
    }

    pub(crate) fn exclusion_re(&self) -> &Regex {
        self.exclusion_re.as_ref().unwrap_or(&vocabulary::EXCLUSION_RE)
    }

    pub fn keyword_cap(&self) -> usize {
        self.keyword_cap
    }

    pub fn precedence(&self) -> MetadataPrecedence {
        self.precedence
    }
}

/// Builder for [`ParsingConfig`].
///
/// Vocabulary lists are compiled in [`build()`](Self::build), which also
/// rejects thresholds the parser cannot honor.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    heading_min_len: Option<usize>,
    vocab_free_min_len: Option<usize>,
    description_min_len: Option<usize>,
    lookahead_lines: Option<usize>,
    research_terms: ListOverride<String>,
    exclusions: ListOverride<String>,
    precedence: Option<MetadataPrecedence>,
    keyword_cap: Option<usize>,
    beginner_max_len: Option<usize>,
    advanced_min_len: Option<usize>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the `[parsing]` section of a config file.
    pub fn from_section(section: &ParsingSection) -> Result<Self, ConfigError> {
        let mut builder = Self {
            heading_min_len: section.heading_min_len,
            vocab_free_min_len: section.vocab_free_min_len,
            description_min_len: section.description_min_len,
            lookahead_lines: section.lookahead_lines,
            keyword_cap: section.keyword_cap,
            beginner_max_len: section.beginner_max_len,
            advanced_min_len: section.advanced_min_len,
            ..Self::default()
        };
        if let Some(p) = &section.precedence {
            builder.precedence = Some(p.parse()?);
        }
        if let Some(terms) = &section.extra_research_terms {
            builder.research_terms = ListOverride::Extend(terms.clone());
        }
        if let Some(phrases) = &section.extra_exclusions {
            builder.exclusions = ListOverride::Extend(phrases.clone());
        }
        Ok(builder)
    }

    // ── Thresholds ──

    pub fn heading_min_len(mut self, n: usize) -> Self {
        self.heading_min_len = Some(n);
        self
    }

    pub fn vocab_free_min_len(mut self, n: usize) -> Self {
        self.vocab_free_min_len = Some(n);
        self
    }

    pub fn description_min_len(mut self, n: usize) -> Self {
        self.description_min_len = Some(n);
        self
    }

    pub fn lookahead_lines(mut self, n: usize) -> Self {
        self.lookahead_lines = Some(n);
        self
    }

    pub fn keyword_cap(mut self, n: usize) -> Self {
        self.keyword_cap = Some(n);
        self
    }

    pub fn beginner_max_len(mut self, n: usize) -> Self {
        self.beginner_max_len = Some(n);
        self
    }

    pub fn advanced_min_len(mut self, n: usize) -> Self {
        self.advanced_min_len = Some(n);
        self
    }

    pub fn precedence(mut self, precedence: MetadataPrecedence) -> Self {
        self.precedence = Some(precedence);
        self
    }

    // ── Research vocabulary ──

    pub fn set_research_terms(mut self, terms: Vec<String>) -> Self {
        self.research_terms = ListOverride::Replace(terms);
        self
    }

    pub fn add_research_term(mut self, term: String) -> Self {
        match &mut self.research_terms {
            ListOverride::Extend(v) => v.push(term),
            _ => self.research_terms = ListOverride::Extend(vec![term]),
        }
        self
    }

    // ── Exclusions ──

    pub fn set_exclusions(mut self, phrases: Vec<String>) -> Self {
        self.exclusions = ListOverride::Replace(phrases);
        self
    }

    pub fn add_exclusion(mut self, phrase: String) -> Self {
        match &mut self.exclusions {
            ListOverride::Extend(v) => v.push(phrase),
            _ => self.exclusions = ListOverride::Extend(vec![phrase]),
        }
        self
    }

    /// Compile vocabularies and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, ConfigError> {
        let defaults = ParsingConfig::default();

        let keyword_cap = self.keyword_cap.unwrap_or(defaults.keyword_cap);
        if keyword_cap < vocabulary::DEFAULT_KEYWORDS.len() {
            return Err(ConfigError::InvalidValue {
                key: "keyword_cap",
                reason: format!(
                    "must be at least {} to hold the default keywords",
                    vocabulary::DEFAULT_KEYWORDS.len()
                ),
            });
        }

        let lookahead_lines = self.lookahead_lines.unwrap_or(defaults.lookahead_lines);
        if lookahead_lines == 0 {
            return Err(ConfigError::InvalidValue {
                key: "lookahead_lines",
                reason: "must be at least 1".to_string(),
            });
        }

        let beginner_max_len = self.beginner_max_len.unwrap_or(defaults.beginner_max_len);
        let advanced_min_len = self.advanced_min_len.unwrap_or(defaults.advanced_min_len);
        if beginner_max_len > advanced_min_len {
            return Err(ConfigError::InvalidValue {
                key: "beginner_max_len",
                reason: format!("must not exceed advanced_min_len ({})", advanced_min_len),
            });
        }

        let research_re = match &self.research_terms {
            ListOverride::Default => None,
            other => {
                let defaults: Vec<String> = RESEARCH_TERMS.iter().map(|s| s.to_string()).collect();
                Some(vocabulary::term_regex(&other.resolve(&defaults))?)
            }
        };

        let exclusion_re = match &self.exclusions {
            ListOverride::Default => None,
            other => {
                let defaults: Vec<String> =
                    EXCLUSION_PHRASES.iter().map(|s| s.to_string()).collect();
                Some(vocabulary::phrase_regex(&other.resolve(&defaults))?)
            }
        };

        Ok(ParsingConfig {
            heading_min_len: self.heading_min_len.unwrap_or(defaults.heading_min_len),
            vocab_free_min_len: self
                .vocab_free_min_len
                .unwrap_or(defaults.vocab_free_min_len),
            description_min_len: self
                .description_min_len
                .unwrap_or(defaults.description_min_len),
            lookahead_lines,
            research_re,
            exclusion_re,
            precedence: self.precedence.unwrap_or_default(),
            keyword_cap,
            beginner_max_len,
            advanced_min_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParsingConfig::default();
        assert_eq!(config.heading_min_len, 25);
        assert_eq!(config.vocab_free_min_len, 50);
        assert_eq!(config.lookahead_lines, 8);
        assert_eq!(config.keyword_cap, 5);
        assert_eq!(config.precedence, MetadataPrecedence::Explicit);
        assert!(config.research_re.is_none());
    }

    #[test]
    fn test_builder_basic() {
        let config = ParsingConfigBuilder::new()
            .heading_min_len(15)
            .vocab_free_min_len(30)
            .keyword_cap(6)
            .precedence(MetadataPrecedence::Inferred)
            .build()
            .unwrap();
        assert_eq!(config.heading_min_len, 15);
        assert_eq!(config.vocab_free_min_len, 30);
        assert_eq!(config.keyword_cap, 6);
        assert_eq!(config.precedence(), MetadataPrecedence::Inferred);
        assert_eq!(
            ParsingConfig::default().precedence(),
            MetadataPrecedence::Explicit
        );
    }

    #[test]
    fn test_builder_rejects_small_keyword_cap() {
        let result = ParsingConfigBuilder::new().keyword_cap(1).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "keyword_cap",
                ..
            })
        ));
    }

    #[test]
    fn test_builder_rejects_zero_lookahead() {
        assert!(ParsingConfigBuilder::new().lookahead_lines(0).build().is_err());
    }

    #[test]
    fn test_builder_rejects_inverted_length_tiers() {
        let result = ParsingConfigBuilder::new()
            .beginner_max_len(200)
            .advanced_min_len(100)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_research_term() {
        let config = ParsingConfigBuilder::new()
            .add_research_term("tinjauan".to_string())
            .build()
            .unwrap();
        let re = config.research_re();
        assert!(re.is_match("Tinjauan Literatur"));
        assert!(re.is_match("Analisis Sentimen"));
    }

    #[test]
    fn test_replaced_research_terms_drop_defaults() {
        let config = ParsingConfigBuilder::new()
            .set_research_terms(vec!["tinjauan".to_string()])
            .build()
            .unwrap();
        assert!(!config.research_re().is_match("Analisis Sentimen"));
    }

    #[test]
    fn test_extra_exclusion_keeps_defaults() {
        let config = ParsingConfigBuilder::new()
            .add_exclusion("  Catatan: ".to_string())
            .build()
            .unwrap();
        let re = config.exclusion_re();
        assert!(re.is_match("CATATAN: jangan lupa"));
        assert!(re.is_match("Bidang: Kesehatan"));
    }

    #[test]
    fn test_replaced_exclusions_drop_defaults() {
        let config = ParsingConfigBuilder::new()
            .set_exclusions(vec!["catatan:".to_string()])
            .build()
            .unwrap();
        assert!(!config.exclusion_re().is_match("Bidang: Kesehatan"));
    }

    #[test]
    fn test_from_section() {
        let section = ParsingSection {
            lookahead_lines: Some(7),
            precedence: Some("Inferred".to_string()),
            extra_exclusions: Some(vec!["catatan:".to_string()]),
            ..Default::default()
        };
        let config = ParsingConfigBuilder::from_section(&section)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.lookahead_lines, 7);
        assert_eq!(config.precedence, MetadataPrecedence::Inferred);
        assert!(config.exclusion_re().is_match("Catatan: lihat lampiran"));
    }

    #[test]
    fn test_from_section_bad_precedence() {
        let section = ParsingSection {
            precedence: Some("random".to_string()),
            ..Default::default()
        };
        assert!(ParsingConfigBuilder::from_section(&section).is_err());
    }

    #[test]
    fn test_list_override_resolve() {
        let defaults = vec!["a".to_string(), "b".to_string()];

        let d: ListOverride<String> = ListOverride::Default;
        assert_eq!(d.resolve(&defaults), defaults);

        let r: ListOverride<String> = ListOverride::Replace(vec!["x".to_string()]);
        assert_eq!(r.resolve(&defaults), vec!["x".to_string()]);

        let e: ListOverride<String> = ListOverride::Extend(vec!["c".to_string()]);
        assert_eq!(
            e.resolve(&defaults),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
