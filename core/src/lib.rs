//! Local search over a corpus of dated markdown notes.
//!
//! Two retrieval strategies share one tokenizer and stopword list:
//!
//! * [`keyword`]: a persisted line-level inverted index ([`Index`]) with
//!   synonym expansion and bounded substring matching, rebuilt wholesale by
//!   [`builder`].
//! * [`tfidf`]: heading-scoped passages ([`chunk`]) ranked per query with
//!   TF-IDF, heading and recency boosts, recomputed on every call.

pub mod builder;
pub mod chunk;
pub mod corpus;
pub mod error;
pub mod index;
pub mod keyword;
pub mod persist;
pub mod provider;
pub mod query_log;
pub mod synonyms;
pub mod tfidf;
pub mod tokenizer;

pub use error::IndexError;
pub use index::*;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub(crate) fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| "".into())
}
