//! Heading-scoped markdown chunker.
//!
//! Splits a document into [`Chunk`]s at every heading of level 1 to 4. The
//! text before the first heading forms its own chunk with an empty heading.
//! Chunks whose body is blank after trimming are dropped. Boundaries are
//! exact: no merging and no overlap.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"^#{1,4}\s").expect("valid regex");
    static ref HEADING_MARKER: Regex = Regex::new(r"^#+\s*").expect("valid regex");
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    pub file: String,
    pub heading: String,
    pub text: String,
    /// First body line, 1-based.
    pub start_line: usize,
    /// Last body line, 1-based, inclusive.
    pub end_line: usize,
}

pub fn is_heading(line: &str) -> bool {
    HEADING.is_match(line)
}

/// Split `content` into heading-scoped chunks attributed to `file`.
pub fn chunk_markdown(content: &str, file: &str) -> Vec<Chunk> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut chunks = Vec::new();
    let mut heading = String::new();
    let mut body: Vec<&str> = Vec::new();
    let mut start_line = 1;

    for (i, &line) in lines.iter().enumerate() {
        if is_heading(line) {
            flush(&mut chunks, file, &heading, &body, start_line, i);
            heading = HEADING_MARKER.replace(line, "").trim().to_string();
            body.clear();
            start_line = i + 2;
        } else {
            body.push(line);
        }
    }
    flush(&mut chunks, file, &heading, &body, start_line, lines.len());
    chunks
}

fn flush(chunks: &mut Vec<Chunk>, file: &str, heading: &str, body: &[&str], start_line: usize, end_line: usize) {
    let text = body.join("\n");
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    chunks.push(Chunk {
        file: file.to_string(),
        heading: heading.to_string(),
        text: text.to_string(),
        start_line,
        end_line,
    });
}
