use memsearch_core::chunk::Chunk;
use memsearch_core::corpus::CorpusLayout;
use memsearch_core::tfidf::{rank_chunks, search, Idf, TfIdfOptions};
use std::fs;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use tempfile::tempdir;

fn chunk(file: &str, heading: &str, text: &str) -> Chunk {
    Chunk { file: file.into(), heading: heading.into(), text: text.into(), start_line: 2, end_line: 2 }
}

fn opts_at(now: OffsetDateTime) -> TfIdfOptions {
    TfIdfOptions { now, ..TfIdfOptions::default() }
}

#[test]
fn end_to_end_lessons_chunk() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("memory")).unwrap();
    fs::write(dir.path().join("memory/2026-01-30.md"), "## lessons\n- learned that retries need backoff").unwrap();
    // raw idf is ln(N/df): with a single chunk every term scores ln(1) = 0
    fs::write(dir.path().join("MEMORY.md"), "# Projects\nnotes about the dashboard redesign\n").unwrap();

    let hits = search(&CorpusLayout::new(dir.path()), "retries backoff", &TfIdfOptions::default());
    assert_eq!(hits.len(), 1);
    let hit = &hits[0];
    assert_eq!(hit.chunk.file, "memory/2026-01-30.md");
    assert_eq!(hit.chunk.heading, "lessons");
    assert_eq!((hit.chunk.start_line, hit.chunk.end_line), (2, 2));
    assert!(hit.matched_terms.contains(&"retries".to_string()));
    assert!(hit.matched_terms.contains(&"backoff".to_string()));

    let json = serde_json::to_value(&hits).unwrap();
    assert_eq!(json[0]["heading"], "lessons");
    assert_eq!(json[0]["startLine"], 2);
    assert_eq!(json[0]["matchedTerms"][0], "retries");
}

#[test]
fn single_file_corpus_needs_smoothed_idf() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("memory")).unwrap();
    fs::write(dir.path().join("memory/2026-01-30.md"), "## lessons\n- learned that retries need backoff").unwrap();
    let layout = CorpusLayout::new(dir.path());

    assert!(search(&layout, "retries backoff", &TfIdfOptions::default()).is_empty());

    let smoothed = TfIdfOptions { idf: Idf::Smoothed, ..TfIdfOptions::default() };
    let hits = search(&layout, "retries backoff", &smoothed);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].chunk.heading, "lessons");
    assert_eq!(hits[0].matched_terms, vec!["retries", "backoff"]);
}

#[test]
fn heading_match_scores_higher() {
    let now = datetime!(2026-03-01 12:00 UTC);
    let chunks = vec![
        chunk("a.md", "retries", "retries backoff policy"),
        chunk("b.md", "notes", "retries backoff policy"),
        chunk("c.md", "misc", "unrelated"),
    ];
    let hits = rank_chunks(chunks, "retries", &opts_at(now));
    assert_eq!(hits[0].chunk.file, "a.md");
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn recent_file_scores_higher() {
    let now = datetime!(2026-03-01 12:00 UTC);
    let chunks = vec![
        chunk("memory/2025-12-31.md", "log", "webhook retries"),
        chunk("memory/2026-03-01.md", "log", "webhook retries"),
        chunk("memory/notes.md", "other", "dashboard"),
    ];
    let hits = rank_chunks(chunks, "webhook", &opts_at(now));
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].chunk.file, "memory/2026-03-01.md");
    assert!((hits[0].score - 2.0 * hits[1].score).abs() < 1e-12);
}

#[test]
fn raising_term_frequency_never_lowers_score() {
    let now = datetime!(2026-03-01 12:00 UTC);
    let mut previous = 0.0;
    for repeats in 1..6 {
        let text = format!("{} jitter policy", vec!["backoff"; repeats].join(" "));
        let chunks = vec![chunk("a.md", "", &text), chunk("b.md", "", "unrelated words")];
        let score = rank_chunks(chunks, "backoff", &opts_at(now))[0].score;
        assert!(score >= previous, "{repeats}: {score} < {previous}");
        previous = score;
    }
}

#[test]
fn empty_queries_return_nothing() {
    let chunks = vec![chunk("a.md", "", "webhook"), chunk("b.md", "", "other")];
    let opts = opts_at(OffsetDateTime::now_utc());
    assert!(rank_chunks(chunks.clone(), "", &opts).is_empty());
    assert!(rank_chunks(chunks, "the and of", &opts).is_empty());
}

#[test]
fn truncates_and_orders() {
    let now = datetime!(2026-03-01 12:00 UTC);
    let mut chunks: Vec<Chunk> = (0..20).map(|i| chunk(&format!("f{i:02}.md"), "", "webhook")).collect();
    chunks.push(chunk("z.md", "", "other"));
    let opts = TfIdfOptions { max_results: 5, ..opts_at(now) };
    let hits = rank_chunks(chunks, "webhook", &opts);
    assert_eq!(hits.len(), 5);
    let files: Vec<&str> = hits.iter().map(|h| h.chunk.file.as_str()).collect();
    assert_eq!(files, vec!["f00.md", "f01.md", "f02.md", "f03.md", "f04.md"]);
}

#[test]
fn today_beats_sixty_days_ago_with_real_clock() {
    let now = OffsetDateTime::now_utc();
    let today = now.date();
    let old = (now - Duration::days(60)).date();
    let chunks = vec![
        chunk(&format!("memory/{old}.md"), "", "deploy notes"),
        chunk(&format!("memory/{today}.md"), "", "deploy notes"),
        chunk("MEMORY.md", "", "unrelated"),
    ];
    let hits = rank_chunks(chunks, "deploy", &opts_at(now));
    assert_eq!(hits[0].chunk.file, format!("memory/{today}.md"));
    assert!(hits[0].score > hits[1].score);
}
