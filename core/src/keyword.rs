//! Keyword search over the persisted line index.
//!
//! Query terms are expanded through the synonym table, matched exactly and
//! by bounded substring overlap, and scored per `(file, line)`:
//!
//! * exact posting: `frequency × 2`
//! * partial posting: `frequency × 0.5`
//! * either weight is halved again when the term came from synonym expansion
//!
//! Each line's total is then multiplied by `1 + 0.5 × distinct matched terms`.

use crate::provider::IndexProvider;
use crate::query_log::QueryLog;
use crate::synonyms;
use crate::tokenizer::tokenize;
use crate::{Index, Posting};
use anyhow::Result;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Query terms shorter than this never match partially.
pub const MIN_PARTIAL_LEN: usize = 4;
/// Minimum `shorter / longer` length ratio for a partial match.
pub const MIN_PARTIAL_RATIO: f64 = 0.7;

const EXACT_WEIGHT: f64 = 2.0;
const PARTIAL_WEIGHT: f64 = 0.5;
const SYNONYM_FACTOR: f64 = 0.5;
const CO_OCCURRENCE_BONUS: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordHit {
    pub file: String,
    pub line: usize,
    pub context: String,
    pub score: f64,
    pub matched_terms: Vec<String>,
}

/// `indexed` is a partial match for `term` when one contains the other and
/// their lengths are within the ratio bound.
pub fn is_partial_match(term: &str, indexed: &str) -> bool {
    let (a, b) = (term.len(), indexed.len());
    let (shorter, longer) = (a.min(b), a.max(b));
    if longer == 0 || (shorter as f64) / (longer as f64) < MIN_PARTIAL_RATIO {
        return false;
    }
    indexed.contains(term) || term.contains(indexed)
}

struct Accumulator<'a> {
    score: f64,
    context: &'a str,
    matched: Vec<&'a str>,
}

fn accumulate<'a>(
    lines: &mut BTreeMap<(&'a str, usize), Accumulator<'a>>,
    posting: &'a Posting,
    term: &'a str,
    weight: f64,
) {
    let acc = lines.entry((posting.file.as_str(), posting.line)).or_insert_with(|| Accumulator {
        score: 0.0,
        context: posting.context.as_str(),
        matched: Vec::new(),
    });
    acc.score += f64::from(posting.frequency) * weight;
    if !acc.matched.contains(&term) {
        acc.matched.push(term);
    }
}

/// Rank lines of `index` against `query`. Ties are broken by file name,
/// then line number.
pub fn search(index: &Index, query: &str, max_results: usize) -> Vec<KeywordHit> {
    let query_terms = tokenize(query);
    if query_terms.is_empty() {
        return Vec::new();
    }
    let originals: HashSet<&str> = query_terms.iter().map(String::as_str).collect();
    let expanded = synonyms::expand(&query_terms);

    let mut lines: BTreeMap<(&str, usize), Accumulator> = BTreeMap::new();
    for term in &expanded {
        let synonym_factor = if originals.contains(term.as_str()) { 1.0 } else { SYNONYM_FACTOR };
        if let Some(postings) = index.terms.get(term) {
            for posting in postings {
                accumulate(&mut lines, posting, term, EXACT_WEIGHT * synonym_factor);
            }
        }
        if term.len() >= MIN_PARTIAL_LEN {
            for (indexed, postings) in &index.terms {
                if is_partial_match(term, indexed) {
                    for posting in postings {
                        accumulate(&mut lines, posting, term, PARTIAL_WEIGHT * synonym_factor);
                    }
                }
            }
        }
    }

    let mut hits: Vec<KeywordHit> = lines
        .into_iter()
        .map(|((file, line), acc)| KeywordHit {
            file: file.to_owned(),
            line,
            context: acc.context.to_owned(),
            score: acc.score * (1.0 + acc.matched.len() as f64 * CO_OCCURRENCE_BONUS),
            matched_terms: acc.matched.into_iter().map(str::to_owned).collect(),
        })
        .collect();
    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.file.cmp(&b.file))
            .then_with(|| a.line.cmp(&b.line))
    });
    hits.truncate(max_results);
    hits
}

/// Obtain the index from `provider`, search it, and record the query in
/// `log` whatever the outcome.
pub fn search_logged<P: IndexProvider + ?Sized>(
    provider: &P,
    log: &QueryLog,
    query: &str,
    max_results: usize,
) -> Result<Vec<KeywordHit>> {
    let result = provider.index().map(|index| search(&index, query, max_results));
    log.append(query, result.as_ref().map(Vec::len).unwrap_or(0));
    result
}
