//! Fixed word lists driving heading acceptance and metadata inference.
//!
//! Lists mix Indonesian and English because the assistant answers in either.

use judul_core::ResearchField;
use once_cell::sync::Lazy;
use regex::Regex;

/// Research-method nouns that mark a heading as a research title.
pub const RESEARCH_TERMS: &[&str] = &[
    "analisis",
    "implementasi",
    "pengembangan",
    "perancangan",
    "rancang bangun",
    "penerapan",
    "evaluasi",
    "pengaruh",
    "dampak",
    "studi",
    "optimasi",
    "prediksi",
    "klasifikasi",
    "deteksi",
    "sistem",
    "model",
    "metode",
    "strategi",
    "efektivitas",
    "machine learning",
    "deep learning",
    "analysis",
    "implementation",
    "development",
    "design",
    "evaluation",
    "impact",
    "effect",
    "study",
    "prediction",
    "classification",
    "detection",
    "framework",
    "optimization",
];

/// Label prefixes and instructional phrases that are never titles or descriptions.
/// Matched case-insensitively on word boundaries of the normalized line.
pub const EXCLUSION_PHRASES: &[&str] = &[
    "deskripsi:",
    "description:",
    "bidang:",
    "field:",
    "kompleksitas:",
    "tingkat:",
    "complexity:",
    "level:",
    "durasi:",
    "duration:",
    "estimasi waktu:",
    "kata kunci:",
    "keywords:",
    "keyword:",
    "pilih judul",
    "klik pada",
    "klik judul",
    "silakan pilih",
    "berikut adalah",
    "berikut beberapa",
    "here are",
    "click on",
];

/// Field keyword families in priority order. The first family that matches wins.
pub const FIELD_FAMILIES: &[(ResearchField, &[&str])] = &[
    (
        ResearchField::ArtificialIntelligence,
        &[
            "ai",
            "artificial intelligence",
            "kecerdasan buatan",
            "machine learning",
            "deep learning",
            "neural",
            "nlp",
            "natural language",
            "computer vision",
            "chatbot",
            "llm",
            "reinforcement learning",
        ],
    ),
    (
        ResearchField::InformationTechnology,
        &[
            "sistem informasi",
            "aplikasi",
            "software",
            "perangkat lunak",
            "website",
            "web",
            "android",
            "mobile",
            "database",
            "basis data",
            "jaringan",
            "cloud",
            "iot",
            "internet of things",
            "keamanan siber",
            "cybersecurity",
            "blockchain",
            "teknologi informasi",
        ],
    ),
    (
        ResearchField::EconomicsBusiness,
        &[
            "ekonomi",
            "bisnis",
            "umkm",
            "pemasaran",
            "marketing",
            "keuangan",
            "finance",
            "fintech",
            "e-commerce",
            "manajemen",
            "akuntansi",
            "investasi",
            "perbankan",
        ],
    ),
    (
        ResearchField::Health,
        &[
            "kesehatan",
            "health",
            "medis",
            "medical",
            "pasien",
            "patient",
            "rumah sakit",
            "hospital",
            "penyakit",
            "disease",
            "gizi",
            "telemedicine",
        ],
    ),
    (
        ResearchField::Education,
        &[
            "pendidikan",
            "education",
            "pembelajaran",
            "learning",
            "sekolah",
            "school",
            "siswa",
            "mahasiswa",
            "student",
            "guru",
            "teacher",
            "kurikulum",
            "e-learning",
        ],
    ),
    (
        ResearchField::EnvironmentEnergy,
        &[
            "lingkungan",
            "environment",
            "energi",
            "energy",
            "surya",
            "solar",
            "terbarukan",
            "renewable",
            "limbah",
            "waste",
            "emisi",
            "iklim",
            "climate",
            "sampah",
        ],
    ),
    (
        ResearchField::EngineeringIndustry,
        &[
            "teknik",
            "engineering",
            "industri",
            "industry",
            "manufaktur",
            "manufacturing",
            "mesin",
            "konstruksi",
            "robot",
            "otomasi",
            "produksi",
        ],
    ),
];

pub const ADVANCED_TERMS: &[&str] = &[
    "optimasi",
    "neural",
    "quantum",
    "advanced",
    "hybrid",
    "blockchain",
    "big data",
    "reinforcement learning",
];

pub const BEGINNER_TERMS: &[&str] = &[
    "survey",
    "overview",
    "pengenalan",
    "dasar",
    "basic",
    "fundamental",
];

/// Technical terms offered as keywords, in priority order.
pub const TECH_TERMS: &[&str] = &[
    "AI",
    "Machine Learning",
    "Deep Learning",
    "Neural Network",
    "NLP",
    "Computer Vision",
    "Chatbot",
    "IoT",
    "Blockchain",
    "Big Data",
    "Data Mining",
    "Cloud Computing",
    "Sistem Informasi",
    "Website",
    "Android",
    "Mobile",
    "E-Commerce",
    "Fintech",
    "UMKM",
    "Digital Marketing",
    "Cybersecurity",
    "Telemedicine",
    "E-Learning",
    "Energi Terbarukan",
    "Smart City",
];

/// Always appended to inferred keywords; also the full list when nothing matched.
pub const DEFAULT_KEYWORDS: [&str; 2] = ["Penelitian", "Inovasi"];

/// Build a case-insensitive whole-word alternation over `terms`.
pub(crate) fn term_regex<S: AsRef<str>>(terms: &[S]) -> Result<Regex, regex::Error> {
    let alternation = terms
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    if alternation.is_empty() {
        // Matches nothing.
        return Regex::new(r"[^\s\S]");
    }
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
}

/// Build a case-insensitive alternation over `phrases`, anchored on a word
/// boundary at each end that starts or ends with a word character.
/// "bidang:" matches at a word start; "here are" does not match inside "where are".
pub(crate) fn phrase_regex<S: AsRef<str>>(phrases: &[S]) -> Result<Regex, regex::Error> {
    let alternation = phrases
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .map(|p| {
            let starts_word = p.chars().next().is_some_and(char::is_alphanumeric);
            let ends_word = p.chars().last().is_some_and(char::is_alphanumeric);
            format!(
                "{}{}{}",
                if starts_word { r"\b" } else { "" },
                regex::escape(p),
                if ends_word { r"\b" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join("|");
    if alternation.is_empty() {
        return Regex::new(r"[^\s\S]");
    }
    Regex::new(&format!("(?i)(?:{})", alternation))
}

pub(crate) static RESEARCH_RE: Lazy<Regex> = Lazy::new(|| term_regex(RESEARCH_TERMS).unwrap());

pub(crate) static EXCLUSION_RE: Lazy<Regex> =
    Lazy::new(|| phrase_regex(EXCLUSION_PHRASES).unwrap());

pub(crate) static ADVANCED_RE: Lazy<Regex> = Lazy::new(|| term_regex(ADVANCED_TERMS).unwrap());

pub(crate) static BEGINNER_RE: Lazy<Regex> = Lazy::new(|| term_regex(BEGINNER_TERMS).unwrap());

pub(crate) static FIELD_RES: Lazy<Vec<(ResearchField, Regex)>> = Lazy::new(|| {
    FIELD_FAMILIES
        .iter()
        .map(|(field, terms)| (*field, term_regex(*terms).unwrap()))
        .collect()
});
