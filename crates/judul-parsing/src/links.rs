//! Labeled hyperlink extraction.

use std::collections::HashSet;

use judul_core::Link;
use once_cell::sync::Lazy;
use regex::Regex;

/// `Label: https://...`, with the label starting a line or a word.
static PLAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(?:^|[\s(\[])([\p{L}\p{N}][^\n:*]*?)[ \t]*:[ \t]*(https?://[^\s<>\]]+)")
        .unwrap()
});

/// `**Label**: https://...` and `**Label:** https://...`
static BOLD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^*\n]+?)(?::\*\*|\*\*[ \t]*:)[ \t]*(https?://[^\s<>\]]+)").unwrap()
});

/// `[Label](https://...)`
static MARKDOWN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]\n]+)\]\((https?://[^\s)]+)\)").unwrap());

/// Extract labeled links from text.
///
/// Patterns are applied in a fixed order (plain, bold, markdown), each over
/// the whole text. A URL already produced by an earlier match is skipped, so
/// the result is unique by `href`. Two different URLs sharing a label are both
/// kept. A label holding a markdown link (`[x](`) is left to the markdown
/// pattern.
pub fn extract_links(text: &str) -> Vec<Link> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();

    for re in [&*PLAIN_RE, &*BOLD_RE, &*MARKDOWN_RE] {
        for caps in re.captures_iter(text) {
            let label = trim_label(&caps[1]);
            let href = trim_href(&caps[2]);
            if label.is_empty() || href.is_empty() || label.contains("](") {
                continue;
            }
            if seen.insert(href.to_string()) {
                links.push(Link::new(label, href));
            }
        }
    }

    tracing::debug!(links = links.len(), "link extraction complete");
    links
}

/// Text after the last markdown link inside a label.
fn trim_label(label: &str) -> &str {
    let end = label
        .rfind("](")
        .and_then(|i| label[i..].find(')').map(|j| i + j + 1));
    match end {
        Some(end) => label[end..].trim(),
        None => label.trim(),
    }
}

/// Drop trailing sentence punctuation, and a closing parenthesis that the URL
/// itself does not open.
fn trim_href(href: &str) -> &str {
    let href = href.trim().trim_end_matches(['.', ',', ';']);
    match href.strip_suffix(')') {
        Some(inner) if href.matches('(').count() < href.matches(')').count() => {
            inner.trim_end_matches(['.', ',', ';'])
        }
        _ => href,
    }
}
