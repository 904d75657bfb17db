//! TF-IDF passage ranking.
//!
//! Every call re-reads the corpus and re-chunks it; nothing is persisted.
//! A chunk's score is the sum over query terms of
//! `tf / total_terms × idf`, plus 0.3 of the same quantity for indexed terms
//! that share a prefix with a query term. The sum is then boosted when
//! several query terms match exactly, when query terms appear in the
//! heading, and when the chunk comes from a recently dated file.

use crate::chunk::{chunk_markdown, Chunk};
use crate::corpus::CorpusLayout;
use crate::tokenizer::tokenize_passage;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub const DEFAULT_MAX_RESULTS: usize = 15;

const PREFIX_WEIGHT: f64 = 0.3;
const MULTI_TERM_BONUS: f64 = 0.5;
const HEADING_BOOST: f64 = 1.5;
const MIN_PREFIX_TERM_LEN: usize = 3;

lazy_static! {
    static ref FILE_DATE: Regex = Regex::new(r"([0-9]{4}-[0-9]{2}-[0-9]{2})").expect("valid regex");
}

/// Inverse document frequency variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Idf {
    /// `ln(N / df)`
    #[default]
    Raw,
    /// `ln(1 + N / df)`; terms present in every chunk still contribute.
    Smoothed,
}

impl Idf {
    fn weight(self, num_chunks: f64, df: usize) -> f64 {
        let ratio = num_chunks / df.max(1) as f64;
        match self {
            Idf::Raw => ratio.ln(),
            Idf::Smoothed => (1.0 + ratio).ln(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TfIdfOptions {
    pub max_results: usize,
    pub idf: Idf,
    /// Reference time for the recency boost.
    pub now: OffsetDateTime,
}

impl Default for TfIdfOptions {
    fn default() -> Self {
        Self { max_results: DEFAULT_MAX_RESULTS, idf: Idf::Raw, now: OffsetDateTime::now_utc() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassageHit {
    #[serde(flatten)]
    pub chunk: Chunk,
    pub score: f64,
    /// Query terms found verbatim in the chunk.
    pub matched_terms: Vec<String>,
    /// Chunk terms that matched a query term by prefix.
    pub partial_terms: Vec<String>,
}

struct TermStats {
    tf: BTreeMap<String, usize>,
    total: usize,
}

impl TermStats {
    fn of(chunk: &Chunk) -> Self {
        let terms = tokenize_passage(&format!("{} {}", chunk.text, chunk.heading));
        let mut tf = BTreeMap::new();
        for t in &terms {
            *tf.entry(t.clone()).or_insert(0) += 1;
        }
        Self { tf, total: terms.len() }
    }

    fn frequency(&self, term: &str) -> f64 {
        self.tf.get(term).copied().unwrap_or(0) as f64 / self.total.max(1) as f64
    }
}

/// Chunk every readable corpus file. Unreadable files are skipped with a warning.
pub fn load_chunks(layout: &CorpusLayout) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for source in layout.sources() {
        match fs::read_to_string(&source.path) {
            Ok(content) => chunks.extend(chunk_markdown(&content, &source.name)),
            Err(err) => tracing::warn!(file = %source.name, error = %err, "skipping unreadable file"),
        }
    }
    chunks
}

/// Chunk the corpus and rank it against `query`.
pub fn search(layout: &CorpusLayout, query: &str, opts: &TfIdfOptions) -> Vec<PassageHit> {
    rank_chunks(load_chunks(layout), query, opts)
}

/// Multiplier for a file name carrying a `YYYY-MM-DD` date.
pub fn recency_boost(file: &str, now: OffsetDateTime) -> f64 {
    let Some(m) = FILE_DATE.find(file) else {
        return 1.0;
    };
    let Ok(date) = Date::parse(m.as_str(), format_description!("[year]-[month]-[day]")) else {
        return 1.0;
    };
    let days_ago = (now - date.midnight().assume_utc()).as_seconds_f64() / 86_400.0;
    if days_ago < 1.0 {
        2.0
    } else if days_ago < 3.0 {
        1.5
    } else if days_ago < 7.0 {
        1.2
    } else if days_ago < 30.0 {
        1.1
    } else {
        1.0
    }
}

/// Score `chunks` against `query`, dropping chunks that score zero. Ties are
/// broken by file name, then start line.
pub fn rank_chunks(chunks: Vec<Chunk>, query: &str, opts: &TfIdfOptions) -> Vec<PassageHit> {
    let mut query_terms: Vec<String> = Vec::new();
    for t in tokenize_passage(query) {
        if !query_terms.contains(&t) {
            query_terms.push(t);
        }
    }
    if query_terms.is_empty() {
        return Vec::new();
    }

    let stats: Vec<TermStats> = chunks.iter().map(TermStats::of).collect();
    let mut df: HashMap<&str, usize> = HashMap::new();
    for s in &stats {
        for term in s.tf.keys() {
            *df.entry(term.as_str()).or_insert(0) += 1;
        }
    }
    let n = chunks.len() as f64;
    let idf = |term: &str| opts.idf.weight(n, df.get(term).copied().unwrap_or(1));

    let mut hits = Vec::new();
    for (chunk, s) in chunks.into_iter().zip(&stats) {
        let mut score = 0.0;
        let mut matched_terms = Vec::new();
        let mut partial_terms: Vec<String> = Vec::new();

        for qt in &query_terms {
            if s.tf.contains_key(qt) {
                score += s.frequency(qt) * idf(qt.as_str());
                matched_terms.push(qt.clone());
            }
            for t in s.tf.keys() {
                if t != qt && t.len() >= MIN_PREFIX_TERM_LEN && (t.starts_with(qt.as_str()) || qt.starts_with(t.as_str())) {
                    score += s.frequency(t) * idf(t.as_str()) * PREFIX_WEIGHT;
                    if !partial_terms.contains(t) {
                        partial_terms.push(t.clone());
                    }
                }
            }
        }

        if matched_terms.len() > 1 {
            score *= 1.0 + matched_terms.len() as f64 * MULTI_TERM_BONUS;
        }
        let heading_terms = tokenize_passage(&chunk.heading);
        for qt in &query_terms {
            if heading_terms.contains(qt) {
                score *= HEADING_BOOST;
            }
        }
        score *= recency_boost(&chunk.file, opts.now);

        if score > 0.0 {
            hits.push(PassageHit { chunk, score, matched_terms, partial_terms });
        }
    }

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.chunk.file.cmp(&b.chunk.file))
            .then_with(|| a.chunk.start_line.cmp(&b.chunk.start_line))
    });
    hits.truncate(opts.max_results);
    hits
}
