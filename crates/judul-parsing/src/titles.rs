use std::time::{SystemTime, UNIX_EPOCH};

use judul_core::{Complexity, ResearchField, ResearchTitleSuggestion};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{MetadataPrecedence, ParsingConfig};
use crate::metadata::{self, InferredMetadata};
use crate::normalize::{normalize_line, plain_len};
use crate::vocabulary::DEFAULT_KEYWORDS;

const QUOTE_CHARS: [char; 3] = ['"', '\u{201c}', '\u{201d}'];

/// Metadata stated under a heading with labels such as "Bidang:" or "Tingkat:".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ExplicitMetadata {
    pub(crate) field: Option<ResearchField>,
    pub(crate) complexity: Option<Complexity>,
    pub(crate) duration: Option<String>,
    pub(crate) keywords: Vec<String>,
    pub(crate) description: Option<String>,
}

/// A heading being accumulated before it becomes a suggestion.
#[derive(Debug)]
struct TitleDraft {
    title: String,
    description: Vec<String>,
    explicit: ExplicitMetadata,
}

/// Extract research title suggestions from one assistant response.
///
/// Headings are found with line heuristics (numbered, bold, quoted, markdown
/// header, bullet) plus a research-vocabulary or length check. Each accepted
/// heading absorbs description and labeled metadata from the lines right
/// below it. Returns an empty list when nothing qualifies.
pub fn extract_titles(text: &str) -> Vec<ResearchTitleSuggestion> {
    extract_titles_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_titles`].
pub(crate) fn extract_titles_with_config(
    text: &str,
    config: &ParsingConfig,
) -> Vec<ResearchTitleSuggestion> {
    let lines: Vec<&str> = text.lines().collect();
    let batch = batch_stamp();
    let mut suggestions = Vec::new();
    let mut current: Option<TitleDraft> = None;

    for (i, line) in lines.iter().enumerate() {
        if !is_title_heading(line, config) {
            continue;
        }

        if let Some(draft) = current.take()
            && let Some(s) = finalize(draft, &batch, suggestions.len(), config)
        {
            suggestions.push(s);
        }

        let (description, explicit) = scan_following_lines(&lines[i + 1..], config);
        tracing::trace!(
            line = i,
            heading = %line.trim(),
            description_lines = description.len(),
            "accepted heading"
        );
        current = Some(TitleDraft {
            title: clean_title(line),
            description,
            explicit,
        });
    }

    if let Some(draft) = current.take()
        && let Some(s) = finalize(draft, &batch, suggestions.len(), config)
    {
        suggestions.push(s);
    }

    tracing::debug!(
        lines = lines.len(),
        titles = suggestions.len(),
        "title extraction complete"
    );
    suggestions
}

/// Syntactic heading test: numbered, bold, quoted, markdown header or
/// unindented bullet, and longer than the heading threshold.
pub fn is_heading_candidate(line: &str) -> bool {
    is_heading_candidate_with_config(line, &ParsingConfig::default())
}

pub(crate) fn is_heading_candidate_with_config(line: &str, config: &ParsingConfig) -> bool {
    static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+").unwrap());
    static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,4}\s+").unwrap());
    static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+]\s+").unwrap());

    let trimmed = line.trim();
    if trimmed.chars().count() <= config.heading_min_len {
        return false;
    }

    NUMBERED_RE.is_match(trimmed)
        || trimmed.contains("**")
        || trimmed.contains(QUOTE_CHARS)
        || HEADER_RE.is_match(trimmed)
        // Indented bullets are sub-points of the previous heading.
        || BULLET_RE.is_match(line)
}

/// Whether the line is a label or instructional phrase that must never be
/// taken as a title or description.
pub(crate) fn is_excluded(line: &str, config: &ParsingConfig) -> bool {
    config.exclusion_re().is_match(&normalize_line(line))
}

/// Full heading acceptance: a non-excluded candidate that either uses research
/// vocabulary or is long enough to stand on its own.
pub(crate) fn is_title_heading(line: &str, config: &ParsingConfig) -> bool {
    if !is_heading_candidate_with_config(line, config) || is_excluded(line, config) {
        return false;
    }
    let plain = normalize_line(line);
    config.research_re().is_match(&plain) || plain.chars().count() > config.vocab_free_min_len
}

/// Normalize a heading into a title: markdown stripped, a leading
/// "Judul 1:" / "Title:" tag removed, trailing separators trimmed.
fn clean_title(line: &str) -> String {
    static TAG_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)^(?:judul|title)(?:\s*\d+\s*[:.]|\s*:)\s*").unwrap());
    static TRAILING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s.,;:\-]+$").unwrap());

    let title = normalize_line(line);
    let title = TAG_RE.replace(&title, "");
    TRAILING_PUNCT.replace(&title, "").trim().to_string()
}

/// Walk the lookahead window below a heading, collecting description text and
/// labeled metadata. Stops at the next heading, at a blank line once something
/// was collected, or after `lookahead_lines` lines.
fn scan_following_lines(
    following: &[&str],
    config: &ParsingConfig,
) -> (Vec<String>, ExplicitMetadata) {
    static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?i)^(bidang|field|kompleksitas|tingkat(?:\s+kesulitan)?|complexity|level|durasi|estimasi(?:\s+waktu)?|duration|kata\s+kunci|keywords?|deskripsi|description)\s*:\s*(.*)$",
        )
        .unwrap()
    });

    let mut description = Vec::new();
    let mut explicit = ExplicitMetadata::default();
    let mut collected = false;

    for line in following.iter().take(config.lookahead_lines) {
        if line.trim().is_empty() {
            if collected {
                break;
            }
            continue;
        }
        if is_title_heading(line, config) {
            break;
        }
        collected = true;

        let plain = normalize_line(line);

        if let Some(duration) = find_duration(&plain)
            && explicit.duration.is_none()
        {
            explicit.duration = Some(duration);
        }

        if let Some(caps) = LABEL_RE.captures(&plain) {
            let label = caps[1].to_lowercase();
            let value = caps[2].trim();
            apply_label(&label, value, &mut explicit, config);
            continue;
        }

        if is_excluded(line, config) {
            continue;
        }
        if plain_len(line) > config.description_min_len {
            description.push(plain);
        }
    }

    (description, explicit)
}

fn apply_label(label: &str, value: &str, explicit: &mut ExplicitMetadata, config: &ParsingConfig) {
    if value.is_empty() {
        return;
    }
    if label == "bidang" || label == "field" {
        explicit.field = explicit.field.or_else(|| metadata::parse_field_label(value));
    } else if label.starts_with("kompleksitas")
        || label.starts_with("tingkat")
        || label == "complexity"
        || label == "level"
    {
        explicit.complexity = explicit
            .complexity
            .or_else(|| metadata::parse_complexity_label(value));
    } else if label.starts_with("kata") || label.starts_with("keyword") {
        if explicit.keywords.is_empty() {
            explicit.keywords = split_keywords(value, config.keyword_cap);
        }
    } else if (label == "deskripsi" || label == "description") && explicit.description.is_none() {
        explicit.description = Some(value.to_string());
    }
    // Durations are picked up by pattern, whatever the label.
}

/// "6-8 bulan" / "3 - 4 months" style durations, normalized to "a-b unit".
fn find_duration(text: &str) -> Option<String> {
    static DURATION_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)(\d+)\s*-\s*(\d+)\s*(bulan|months?)").unwrap());
    let caps = DURATION_RE.captures(text)?;
    Some(format!(
        "{}-{} {}",
        &caps[1],
        &caps[2],
        caps[3].to_lowercase()
    ))
}

fn split_keywords(value: &str, cap: usize) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for kw in value
        .split([',', ';'])
        .map(|k| k.trim().trim_end_matches('.').trim())
        .filter(|k| !k.is_empty())
    {
        if !keywords.iter().any(|k| k.eq_ignore_ascii_case(kw)) {
            keywords.push(kw.to_string());
        }
    }
    keywords.truncate(cap);
    keywords
}

/// Resolve explicit labels against title inference per the configured precedence.
fn resolve_metadata(
    explicit: &ExplicitMetadata,
    inferred: InferredMetadata,
    precedence: MetadataPrecedence,
) -> (ResearchField, Complexity, Vec<String>) {
    match precedence {
        MetadataPrecedence::Explicit => {
            let keywords = if explicit.keywords.is_empty() {
                inferred.keywords
            } else {
                explicit.keywords.clone()
            };
            (
                explicit.field.unwrap_or(inferred.field),
                explicit.complexity.unwrap_or(inferred.complexity),
                keywords,
            )
        }
        MetadataPrecedence::Inferred => {
            let keywords = if explicit.keywords.is_empty()
                || inferred.keywords.len() > DEFAULT_KEYWORDS.len()
            {
                inferred.keywords
            } else {
                explicit.keywords.clone()
            };
            (inferred.field, inferred.complexity, keywords)
        }
    }
}

fn finalize(
    draft: TitleDraft,
    batch: &str,
    index: usize,
    config: &ParsingConfig,
) -> Option<ResearchTitleSuggestion> {
    if draft.title.is_empty() {
        tracing::trace!("dropping heading with empty title");
        return None;
    }

    let inferred = metadata::infer_metadata_with_config(&draft.title, config);
    let (field, complexity, keywords) =
        resolve_metadata(&draft.explicit, inferred, config.precedence);

    let description = match draft.explicit.description {
        Some(d) => d,
        None if !draft.description.is_empty() => draft.description.join(" "),
        None => metadata::fallback_description(&draft.title, field),
    };

    let estimated_duration = draft
        .explicit
        .duration
        .unwrap_or_else(|| complexity.default_duration().to_string());

    Some(ResearchTitleSuggestion {
        id: format!("judul-{}-{}", batch, index + 1),
        title: draft.title,
        description,
        field,
        complexity,
        estimated_duration,
        keywords,
    })
}

/// Per-call id prefix: millisecond clock plus random bits.
fn batch_stamp() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{:x}{:06x}", millis, fastrand::u32(..0x100_0000))
}
