use judul_core::ResearchCommand;
use once_cell::sync::Lazy;
use regex::Regex;

static SELECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^/?(?:pilih|select)(?:\s+judul)?\s*#?(\d+)\s*[.!]?$").unwrap());

static TITLES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:/judul\b|.*?\b(?:carikan|cari|saran|buatkan|buat|rekomendasi(?:kan)?|usulkan)\s+(?:\w+\s+)?judul\b|.*?\bsuggest\s+(?:\w+\s+)?titles?\b)(.*)$",
    )
    .unwrap()
});

static REFERENCES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:/referensi\b|.*?\bcari(?:kan)?\s+(?:\w+\s+)?(?:referensi|jurnal)\b|.*?\bfind\s+(?:\w+\s+)?(?:references?|journals?)\b)(.*)$",
    )
    .unwrap()
});

/// Classify one user chat input.
///
/// Returns `None` for ordinary chat. Selection is checked first, so
/// "pilih 2" never reads as a title request.
pub fn detect_command(input: &str) -> Option<ResearchCommand> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(caps) = SELECT_RE.captures(input) {
        let index: usize = caps[1].parse().ok()?;
        return (index > 0).then_some(ResearchCommand::SelectTitle { index });
    }

    // References before titles: "cari jurnal untuk judul ..." asks for journals.
    if let Some(caps) = REFERENCES_RE.captures(input) {
        return Some(ResearchCommand::FindReferences {
            topic: extract_topic(&caps[1]),
        });
    }

    if let Some(caps) = TITLES_RE.captures(input) {
        return Some(ResearchCommand::SuggestTitles {
            topic: extract_topic(&caps[1]),
        });
    }

    None
}

/// Topic text after the trigger, past a leading "penelitian"/"skripsi" and
/// "tentang"/"mengenai"/"about".
fn extract_topic(rest: &str) -> String {
    static LEAD_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?i)^(?:(?:penelitian|skripsi|tesis|research)\s+)?(?:(?:tentang|mengenai|terkait|untuk|bidang|about|on|for)\s+)?",
        )
        .unwrap()
    });

    let rest = rest.trim().trim_start_matches([':', '-']).trim();
    LEAD_RE
        .replace(rest, "")
        .trim()
        .trim_end_matches(['.', '?', '!'])
        .trim()
        .to_string()
}
