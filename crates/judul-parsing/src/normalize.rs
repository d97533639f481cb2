use once_cell::sync::Lazy;
use regex::Regex;

static ORDINAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+").unwrap());
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}(?:\s+|$)").unwrap());
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+]\s+").unwrap());

const QUOTE_CHARS: [char; 5] = ['"', '\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}'];

/// Strip markdown decoration from a single line.
///
/// Removes, in order: a leading ordinal (`1. `), a leading heading marker
/// (`#`..`######`), bold and italic asterisks, backticks, a leading bullet,
/// a second leading ordinal (for `### 1. Title`), and decorative quotes.
/// Total: any input yields a string, possibly empty.
pub fn normalize_line(line: &str) -> String {
    let s = ORDINAL_RE.replace(line.trim(), "");
    let s = HEADING_RE.replace(s.trim_start(), "");
    let s = s.replace("**", "").replace(['*', '`'], "");
    let s = BULLET_RE.replace(s.trim_start(), "");
    let s = ORDINAL_RE.replace(s.trim_start(), "");
    s.replace(QUOTE_CHARS, "").trim().to_string()
}

/// Character count of the normalized line.
pub(crate) fn plain_len(line: &str) -> usize {
    normalize_line(line).chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_numbered_bold_title() {
        assert_eq!(
            normalize_line("1. **Analisis Sentimen Ulasan Produk**"),
            "Analisis Sentimen Ulasan Produk"
        );
    }

    #[test]
    fn strips_heading_then_ordinal() {
        assert_eq!(
            normalize_line("### 2. Implementasi Sistem Pakar"),
            "Implementasi Sistem Pakar"
        );
        assert_eq!(normalize_line("###### Judul"), "Judul");
    }

    #[test]
    fn strips_bullets_italics_code_and_quotes() {
        assert_eq!(normalize_line("- *Deteksi* `YOLO`"), "Deteksi YOLO");
        assert_eq!(normalize_line("+ \u{201c}Judul Kutipan\u{201d}"), "Judul Kutipan");
        assert_eq!(normalize_line("* \"Judul\""), "Judul");
    }

    #[test]
    fn keeps_apostrophes_and_inner_numbers() {
        assert_eq!(normalize_line("Studi Qur'an 2.0"), "Studi Qur'an 2.0");
        assert_eq!(normalize_line("3.5 Tahun Pertama"), "3.5 Tahun Pertama");
    }

    #[test]
    fn total_on_empty_and_decoration_only() {
        assert_eq!(normalize_line(""), "");
        assert_eq!(normalize_line("   "), "");
        assert_eq!(normalize_line("**"), "");
        assert_eq!(normalize_line("### "), "");
    }

    #[test]
    fn idempotent_on_plain_text() {
        for s in [
            "Analisis Dampak Penggunaan AI",
            "  padded  ",
            "Bidang: Kesehatan",
            "",
        ] {
            let once = normalize_line(s);
            assert_eq!(normalize_line(&once), once);
        }
    }
}
