use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::tokenizer::tokenize;

/// Bumped whenever the persisted layout changes; older files are rebuilt.
pub const INDEX_VERSION: u32 = 1;

/// Characters of line text kept on each posting.
pub const CONTEXT_CHARS: usize = 100;

/// One (term, file, line) occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    #[serde(rename = "freq")]
    pub frequency: u32,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub lines: usize,
    /// RFC 3339 modification time of the file when it was indexed.
    pub updated: String,
}

/// Line-level inverted index over the notes corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub version: u32,
    pub terms: BTreeMap<String, Vec<Posting>>,
    pub files: BTreeMap<String, FileMeta>,
    pub built: String,
}

impl Index {
    pub fn new() -> Self {
        Self { version: INDEX_VERSION, ..Self::default() }
    }

    /// Index every line of `content` under the logical name `file`.
    pub fn add_document(&mut self, file: &str, content: &str, updated: String) {
        let lines: Vec<&str> = content.split('\n').collect();
        self.files.insert(file.to_owned(), FileMeta { lines: lines.len(), updated });

        for (idx, line) in lines.iter().enumerate() {
            let terms = tokenize(line);
            let mut counts: HashMap<&str, u32> = HashMap::new();
            let mut first_seen: Vec<&str> = Vec::new();
            for term in &terms {
                let n = counts.entry(term.as_str()).or_insert(0);
                if *n == 0 {
                    first_seen.push(term.as_str());
                }
                *n += 1;
            }
            if counts.is_empty() {
                continue;
            }
            let context: String = line.trim().chars().take(CONTEXT_CHARS).collect();
            for term in first_seen {
                let frequency = counts[term];
                self.terms.entry(term.to_owned()).or_default().push(Posting {
                    file: file.to_owned(),
                    line: idx + 1,
                    frequency,
                    context: context.clone(),
                });
            }
        }
    }

    /// Order every posting list by descending frequency. The sort is stable,
    /// so equal frequencies keep file/line insertion order.
    pub fn finish(&mut self) {
        for postings in self.terms.values_mut() {
            postings.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        }
    }

    pub fn num_postings(&self) -> usize {
        self.terms.values().map(Vec::len).sum()
    }

    /// Same terms and files, ignoring the build stamp.
    pub fn same_content(&self, other: &Index) -> bool {
        self.terms == other.terms && self.files == other.files
    }
}
