//! Full rebuild of the keyword index from the corpus.

use crate::corpus::CorpusLayout;
use crate::persist::save_index;
use crate::{rfc3339, Index};
use anyhow::Result;
use std::fs;
use time::OffsetDateTime;

/// Read, tokenize and index every corpus file. Files that cannot be read
/// are skipped with a warning; a missing corpus yields an empty index.
pub fn build_index(layout: &CorpusLayout) -> Index {
    let mut index = Index::new();
    let built = OffsetDateTime::now_utc();

    for source in layout.sources() {
        let content = match fs::read_to_string(&source.path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(file = %source.name, error = %err, "skipping unreadable file");
                continue;
            }
        };
        let updated = fs::metadata(&source.path)
            .and_then(|m| m.modified())
            .map(OffsetDateTime::from)
            .unwrap_or(built);
        index.add_document(&source.name, &content, rfc3339(updated));
    }

    index.finish();
    index.built = rfc3339(built);
    tracing::info!(num_terms = index.terms.len(), num_files = index.files.len(), "index built");
    index
}

/// Build and persist. Only a failure to write the index file is an error.
pub fn rebuild(layout: &CorpusLayout) -> Result<Index> {
    let index = build_index(layout);
    save_index(&layout.index_path(), &index)?;
    Ok(index)
}
