use judul_core::{Complexity, ResearchField};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::vocabulary::{ADVANCED_RE, BEGINNER_RE, DEFAULT_KEYWORDS, FIELD_RES, TECH_TERMS};

/// Most technical terms taken from a title before the defaults are appended.
const MAX_MATCHED_TERMS: usize = 3;

/// Metadata derived from title text alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredMetadata {
    pub field: ResearchField,
    pub complexity: Complexity,
    pub keywords: Vec<String>,
}

/// Infer field, complexity and keywords from a title.
pub fn infer_metadata(title: &str) -> InferredMetadata {
    infer_metadata_with_config(title, &ParsingConfig::default())
}

/// Config-aware version of [`infer_metadata`].
pub(crate) fn infer_metadata_with_config(title: &str, config: &ParsingConfig) -> InferredMetadata {
    InferredMetadata {
        field: infer_field(title),
        complexity: infer_complexity_with_config(title, config),
        keywords: extract_keywords_with_cap(title, config.keyword_cap),
    }
}

/// First keyword family (in priority order) found in `text`, or `Multidisciplinary`.
pub fn infer_field(text: &str) -> ResearchField {
    FIELD_RES
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(field, _)| *field)
        .unwrap_or_default()
}

/// Classify a title as beginner / intermediate / advanced.
///
/// Advanced vocabulary or a very long title wins over beginner vocabulary
/// or a very short title.
pub fn infer_complexity(title: &str) -> Complexity {
    infer_complexity_with_config(title, &ParsingConfig::default())
}

pub(crate) fn infer_complexity_with_config(title: &str, config: &ParsingConfig) -> Complexity {
    let len = title.chars().count();
    if len > config.advanced_min_len || ADVANCED_RE.is_match(title) {
        Complexity::Advanced
    } else if BEGINNER_RE.is_match(title) || len < config.beginner_max_len {
        Complexity::Beginner
    } else {
        Complexity::Intermediate
    }
}

/// Keywords for a title: up to three technical terms plus the defaults.
///
/// Never empty and never longer than five entries.
pub fn extract_keywords(title: &str) -> Vec<String> {
    extract_keywords_with_cap(title, ParsingConfig::default().keyword_cap)
}

pub(crate) fn extract_keywords_with_cap(title: &str, cap: usize) -> Vec<String> {
    static WORD_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+(?:-[\p{L}\p{N}]+)*").unwrap());

    let title_lower = title.to_lowercase();
    let words: Vec<String> = WORD_RE
        .find_iter(&title_lower)
        .map(|m| m.as_str().to_string())
        .collect();

    let matched = TECH_TERMS
        .iter()
        .filter(|term| term_matches(term, &title_lower, &words))
        .take(MAX_MATCHED_TERMS)
        .map(|term| term.to_string());

    let mut keywords: Vec<String> = Vec::new();
    for kw in matched.chain(DEFAULT_KEYWORDS.iter().map(|s| s.to_string())) {
        if !keywords.iter().any(|k| k.eq_ignore_ascii_case(&kw)) {
            keywords.push(kw);
        }
    }
    // Keep the defaults when the cap bites: drop surplus matched terms first.
    while keywords.len() > cap.max(DEFAULT_KEYWORDS.len()) {
        let surplus = keywords.len() - DEFAULT_KEYWORDS.len() - 1;
        keywords.remove(surplus);
    }
    keywords
}

/// Multi-word terms must appear as a phrase. Single-word terms match a title
/// word that equals them, contains them (terms of 3+ chars), or starts them
/// (words of 4+ chars, e.g. "block" for "blockchain").
fn term_matches(term: &str, title_lower: &str, words: &[String]) -> bool {
    let term = term.to_lowercase();
    if term.contains(' ') {
        return title_lower.contains(&term);
    }
    words.iter().any(|w| {
        *w == term
            || (term.chars().count() >= 3 && w.contains(&term))
            || (w.chars().count() >= 4 && term.starts_with(w.as_str()))
    })
}

/// Map an explicit field label ("Bidang: Kesehatan") to a field.
///
/// Exact label match first, then keyword families. `Multidisiplin` is accepted
/// only when named exactly.
pub fn parse_field_label(value: &str) -> Option<ResearchField> {
    let value = value.trim().trim_end_matches('.');
    if value.is_empty() {
        return None;
    }
    ResearchField::from_label(value).or_else(|| {
        FIELD_RES
            .iter()
            .find(|(_, re)| re.is_match(value))
            .map(|(field, _)| *field)
    })
}

/// Map an explicit complexity label ("Tingkat: Sedang") to a tier.
pub fn parse_complexity_label(value: &str) -> Option<Complexity> {
    static BEGINNER: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\b(?:pemula|mudah|dasar|rendah|beginner|easy|basic|low)\b").unwrap()
    });
    static INTERMEDIATE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\b(?:sedang|menengah|intermediate|medium|moderate)\b").unwrap()
    });
    static ADVANCED: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\b(?:lanjut|lanjutan|tinggi|sulit|advanced|hard|high|expert)\b").unwrap()
    });

    if ADVANCED.is_match(value) {
        Some(Complexity::Advanced)
    } else if INTERMEDIATE.is_match(value) {
        Some(Complexity::Intermediate)
    } else if BEGINNER.is_match(value) {
        Some(Complexity::Beginner)
    } else {
        None
    }
}

/// Description used when no line under the heading qualified.
pub fn fallback_description(title: &str, field: ResearchField) -> String {
    static IMPLEMENTATION: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\b(?:implementasi|penerapan|implementation)\b").unwrap()
    });
    static ANALYSIS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\b(?:analisis|analysis)\b").unwrap());

    let field = field.label().to_lowercase();
    if IMPLEMENTATION.is_match(title) {
        format!(
            "Penelitian ini berfokus pada penerapan solusi \"{}\" secara nyata dan mengukur manfaatnya di bidang {}.",
            title, field
        )
    } else if ANALYSIS.is_match(title) {
        format!(
            "Penelitian ini melakukan analisis mendalam terkait \"{}\" untuk menghasilkan temuan yang relevan di bidang {}.",
            title, field
        )
    } else {
        format!(
            "Penelitian mengenai \"{}\" yang berkontribusi pada pengembangan ilmu di bidang {}.",
            title, field
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad_to(base: &str, len: usize) -> String {
        let mut s = base.to_string();
        while s.chars().count() < len {
            s.push_str(" x");
        }
        s.chars().take(len).collect()
    }

    #[test]
    fn field_priority_prefers_ai() {
        assert_eq!(
            infer_field("Analisis Dampak Penggunaan AI terhadap Produktivitas Mahasiswa"),
            ResearchField::ArtificialIntelligence
        );
        assert_eq!(
            infer_field("Pengembangan Aplikasi Android untuk Kasir"),
            ResearchField::InformationTechnology
        );
        assert_eq!(
            infer_field("Strategi Pemasaran UMKM di Era Digital"),
            ResearchField::EconomicsBusiness
        );
        assert_eq!(
            infer_field("Faktor Risiko Penyakit Jantung pada Lansia"),
            ResearchField::Health
        );
        assert_eq!(
            infer_field("Efektivitas Pembelajaran Daring di Sekolah Dasar"),
            ResearchField::Education
        );
        assert_eq!(
            infer_field("Potensi Energi Surya di Wilayah Pesisir"),
            ResearchField::EnvironmentEnergy
        );
        assert_eq!(
            infer_field("Perawatan Mesin Produksi Berbasis Jadwal"),
            ResearchField::EngineeringIndustry
        );
        assert_eq!(infer_field("Sejarah Kota Tua"), ResearchField::Multidisciplinary);
    }

    #[test]
    fn ai_does_not_match_inside_words() {
        // "rantai" and "pantai" contain "ai" but are not the term.
        assert_eq!(
            infer_field("Rantai Pasok Ikan di Daerah Pantai"),
            ResearchField::Multidisciplinary
        );
    }

    #[test]
    fn long_title_with_optimasi_is_advanced() {
        let title = pad_to("Optimasi Rute Distribusi", 150);
        assert_eq!(title.chars().count(), 150);
        assert_eq!(infer_complexity(&title), Complexity::Advanced);
    }

    #[test]
    fn advanced_vocabulary_beats_beginner_vocabulary() {
        assert_eq!(
            infer_complexity("Survey Arsitektur Neural untuk Citra Medis Resolusi Rendah"),
            Complexity::Advanced
        );
    }

    #[test]
    fn beginner_by_vocabulary_or_short_length() {
        assert_eq!(
            infer_complexity("Pengenalan Pola Tulisan Tangan Menggunakan Metode Sederhana"),
            Complexity::Beginner
        );
        assert_eq!(infer_complexity("Sejarah Kota Tua"), Complexity::Beginner);
    }

    #[test]
    fn plain_fifty_char_title_defaults() {
        let title = "Kajian Pola Perilaku Warga pada Kota Kecil Pesisir";
        assert_eq!(title.chars().count(), 50);
        let meta = infer_metadata(title);
        assert_eq!(meta.field, ResearchField::Multidisciplinary);
        assert_eq!(meta.complexity, Complexity::Intermediate);
        assert_eq!(meta.keywords, vec!["Penelitian", "Inovasi"]);
    }

    #[test]
    fn keywords_take_matched_terms_then_defaults() {
        let keywords =
            extract_keywords("Analisis Dampak Penggunaan AI terhadap Produktivitas Mahasiswa");
        assert_eq!(keywords, vec!["AI", "Penelitian", "Inovasi"]);

        let keywords = extract_keywords(
            "Sistem Informasi Berbasis Android dan IoT dengan Machine Learning untuk UMKM",
        );
        assert_eq!(
            keywords,
            vec!["Machine Learning", "IoT", "Sistem Informasi", "Penelitian", "Inovasi"]
        );
    }

    #[test]
    fn machine_learning_does_not_pull_in_deep_learning() {
        let keywords = extract_keywords("Prediksi Harga Rumah dengan Machine Learning");
        assert!(keywords.contains(&"Machine Learning".to_string()));
        assert!(!keywords.contains(&"Deep Learning".to_string()));
        assert!(!keywords.contains(&"E-Learning".to_string()));
    }

    #[test]
    fn keyword_cap_keeps_defaults() {
        let keywords = extract_keywords_with_cap(
            "Sistem Informasi Berbasis Android dan IoT dengan Machine Learning untuk UMKM",
            3,
        );
        assert_eq!(keywords, vec!["Machine Learning", "Penelitian", "Inovasi"]);
    }

    #[test]
    fn keywords_never_empty_or_over_cap() {
        for title in ["", "x", "Blockchain Big Data AI IoT Chatbot NLP Android Website"] {
            let keywords = extract_keywords(title);
            assert!(!keywords.is_empty());
            assert!(keywords.len() <= 5);
        }
    }

    #[test]
    fn explicit_field_labels() {
        assert_eq!(
            parse_field_label("Kecerdasan Buatan"),
            Some(ResearchField::ArtificialIntelligence)
        );
        assert_eq!(parse_field_label("kesehatan."), Some(ResearchField::Health));
        assert_eq!(
            parse_field_label("Ilmu Pendidikan Dasar"),
            Some(ResearchField::Education)
        );
        assert_eq!(
            parse_field_label("Multidisiplin"),
            Some(ResearchField::Multidisciplinary)
        );
        assert_eq!(parse_field_label("Astronomi"), None);
        assert_eq!(parse_field_label("  "), None);
    }

    #[test]
    fn explicit_complexity_labels() {
        assert_eq!(parse_complexity_label("Sedang"), Some(Complexity::Intermediate));
        assert_eq!(parse_complexity_label("Pemula"), Some(Complexity::Beginner));
        assert_eq!(
            parse_complexity_label("Lanjutan (advanced)"),
            Some(Complexity::Advanced)
        );
        assert_eq!(parse_complexity_label("???"), None);
    }

    #[test]
    fn fallback_templates() {
        let d = fallback_description(
            "Implementasi Chatbot Layanan Akademik",
            ResearchField::ArtificialIntelligence,
        );
        assert!(d.starts_with("Penelitian ini berfokus pada penerapan"));
        assert!(d.ends_with("bidang kecerdasan buatan."));

        let d = fallback_description(
            "Analisis Kepuasan Pelanggan",
            ResearchField::EconomicsBusiness,
        );
        assert!(d.starts_with("Penelitian ini melakukan analisis"));

        let d = fallback_description("Sejarah Kota Tua", ResearchField::Multidisciplinary);
        assert!(d.starts_with("Penelitian mengenai \"Sejarah Kota Tua\""));
    }
}
