//! End-to-end parsing of realistic assistant responses, including the
//! session flow that consumes the parsed output.

use judul_core::{AssistantResponse, ChatSession, ResearchMode};
use judul_parsing::{
    Complexity, MetadataPrecedence, ParsingConfigBuilder, ResearchField, ResponseExtractor,
    detect_command, parse_response,
};

const RESPONSE: &str = "\
Tentu! Berikut beberapa judul penelitian di bidang AI yang bisa Anda pertimbangkan:

1. **Implementasi Deep Learning untuk Deteksi Penyakit pada Daun Tomat**
   Penelitian ini menggunakan CNN untuk mengklasifikasikan citra daun tomat.
   - Bidang: Kecerdasan Buatan
   - Kompleksitas: Lanjutan
   - Durasi: 8-10 bulan
   - Kata Kunci: Deep Learning, CNN, Pertanian

2. **Pengembangan Chatbot Layanan Informasi Akademik Berbasis NLP**
   Chatbot yang menjawab pertanyaan mahasiswa tentang jadwal dan administrasi.

3. **Studi Perbandingan Algoritma Klasifikasi Teks Berita Berbahasa Indonesia**
   Membandingkan Naive Bayes, SVM, dan IndoBERT pada korpus berita lokal.

Referensi yang bisa membantu:
- Google Scholar: https://scholar.google.com
- [Garuda](https://garuda.kemdikbud.go.id)

Silakan pilih judul yang paling menarik!";

#[test]
fn test_multi_title_response() {
    let parsed = parse_response(RESPONSE);
    let titles: Vec<&str> = parsed
        .suggestions
        .iter()
        .map(|s| s.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Implementasi Deep Learning untuk Deteksi Penyakit pada Daun Tomat",
            "Pengembangan Chatbot Layanan Informasi Akademik Berbasis NLP",
            "Studi Perbandingan Algoritma Klasifikasi Teks Berita Berbahasa Indonesia",
        ]
    );

    let first = &parsed.suggestions[0];
    assert_eq!(first.field, ResearchField::ArtificialIntelligence);
    assert_eq!(first.complexity, Complexity::Advanced);
    assert_eq!(first.estimated_duration, "8-10 bulan");
    assert_eq!(first.keywords, vec!["Deep Learning", "CNN", "Pertanian"]);
    assert_eq!(
        first.description,
        "Penelitian ini menggunakan CNN untuk mengklasifikasikan citra daun tomat."
    );

    let second = &parsed.suggestions[1];
    assert_eq!(second.field, ResearchField::ArtificialIntelligence);
    assert_eq!(second.complexity, Complexity::Intermediate);
    assert_eq!(second.estimated_duration, "6-8 bulan");
    assert_eq!(
        second.keywords,
        vec!["NLP", "Chatbot", "Penelitian", "Inovasi"]
    );

    let third = &parsed.suggestions[2];
    assert_eq!(
        third.description,
        "Membandingkan Naive Bayes, SVM, dan IndoBERT pada korpus berita lokal."
    );

    let links: Vec<(&str, &str)> = parsed
        .links
        .iter()
        .map(|l| (l.label.as_str(), l.href.as_str()))
        .collect();
    assert_eq!(
        links,
        vec![
            ("Google Scholar", "https://scholar.google.com"),
            ("Garuda", "https://garuda.kemdikbud.go.id"),
        ]
    );
}

#[test]
fn test_inferred_precedence_overrides_labels() {
    let config = ParsingConfigBuilder::new()
        .precedence(MetadataPrecedence::Inferred)
        .build()
        .unwrap();
    let parsed = ResponseExtractor::with_config(config).parse_response(RESPONSE);
    let first = &parsed.suggestions[0];
    // Title text has no advanced vocabulary and is under the advanced length.
    assert_eq!(first.complexity, Complexity::Intermediate);
    // The labeled duration is still used; only field/complexity/keywords are inferred.
    assert_eq!(first.estimated_duration, "8-10 bulan");
}

#[test]
fn test_suggestions_serialize_with_wire_names() {
    let parsed = parse_response(RESPONSE);
    let json = serde_json::to_value(&parsed.suggestions[0]).unwrap();
    assert_eq!(json["field"], "Kecerdasan Buatan");
    assert_eq!(json["complexity"], "advanced");
    assert_eq!(json["estimatedDuration"], "8-10 bulan");
    assert!(json["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(json["keywords"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_reparse_yields_fresh_ids() {
    let a = parse_response(RESPONSE);
    let b = parse_response(RESPONSE);
    assert_eq!(a.suggestions.len(), b.suggestions.len());
    assert_ne!(a.suggestions[0].id, b.suggestions[0].id);
}

#[test]
fn test_session_flow() {
    let extractor = ResponseExtractor::new();
    let mut session = ChatSession::new();

    let input = "Tolong carikan judul penelitian tentang AI untuk pertanian";
    session.push_user(input, detect_command(input));
    assert_eq!(
        session.mode(),
        &ResearchMode::AwaitingTitles {
            topic: "AI untuk pertanian".to_string()
        }
    );

    let parsed = extractor.parse_response(RESPONSE);
    session.apply_reply(AssistantResponse::from_text(RESPONSE), parsed);
    assert_eq!(session.mode(), &ResearchMode::ReviewingTitles);
    assert_eq!(session.suggestions().len(), 3);

    session.push_user("pilih 2", detect_command("pilih 2"));
    assert_eq!(session.mode(), &ResearchMode::TitleSelected);
    assert_eq!(
        session.selected().map(|s| s.title.as_str()),
        Some("Pengembangan Chatbot Layanan Informasi Akademik Berbasis NLP")
    );

    // A plain follow-up keeps the list and the selection.
    let reply = "Pilihan yang bagus! Mulailah dari studi literatur.";
    session.push_user("terima kasih", detect_command("terima kasih"));
    session.apply_reply(
        AssistantResponse::from_text(reply),
        extractor.parse_response(reply),
    );
    assert_eq!(session.suggestions().len(), 3);
    assert!(session.selected().is_some());
    assert_eq!(session.messages().len(), 5);
}
