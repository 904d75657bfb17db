//! Fixed synonym table used to broaden keyword queries.
//!
//! Lookups work in both directions: a canonical key expands to its related
//! terms, and a related term expands back to every key that lists it.
//! Expansion is a single hop.

const SYNONYMS: &[(&str, &[&str])] = &[
    ("api", &["endpoint", "service", "rest", "route", "server"]),
    ("db", &["database", "postgres", "sql", "neon", "storage"]),
    ("ui", &["interface", "frontend", "dashboard", "page", "view"]),
    ("error", &["bug", "issue", "problem", "fail", "fix", "broken"]),
    ("config", &["configuration", "settings", "setup", "env", "options"]),
    ("auth", &["authentication", "login", "credentials", "key", "token"]),
    ("deploy", &["deployment", "release", "ship", "vercel", "railway", "publish"]),
    ("test", &["testing", "spec", "check", "verify", "validate"]),
    ("docs", &["documentation", "readme", "guide", "reference", "manual"]),
    ("task", &["todo", "backlog", "work", "item", "job"]),
    ("memory", &["context", "recall", "remember", "store", "knowledge"]),
    ("search", &["find", "query", "lookup", "index", "locate"]),
    ("script", &["tool", "utility", "automation", "command"]),
    ("webhook", &["hook", "callback", "notify", "event"]),
    ("project", &["repo", "codebase", "workspace", "app"]),
    ("build", &["compile", "create", "make", "generate"]),
    ("run", &["execute", "start", "launch", "invoke"]),
    ("status", &["state", "health", "condition", "info"]),
    ("log", &["history", "record", "entry", "journal"]),
    ("commit", &["save", "push", "version", "change"]),
];

/// Related terms for a canonical key, if `term` is one.
pub fn related(term: &str) -> Option<&'static [&'static str]> {
    SYNONYMS.iter().find(|(key, _)| *key == term).map(|(_, rel)| *rel)
}

/// Canonical keys whose related list contains `term`.
pub fn canonical_keys(term: &str) -> impl Iterator<Item = &'static str> + '_ {
    SYNONYMS
        .iter()
        .filter(move |(_, rel)| rel.contains(&term))
        .map(|(key, _)| *key)
}

/// Union of the input terms, their related terms and their canonical keys.
/// Input order comes first; the result has no duplicates.
pub fn expand(terms: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |t: &str| {
        if !out.iter().any(|o| o == t) {
            out.push(t.to_owned());
        }
    };
    for term in terms {
        push(term);
    }
    for term in terms {
        if let Some(rel) = related(term) {
            rel.iter().for_each(|r| push(r));
        }
        for key in canonical_keys(term) {
            push(key);
        }
    }
    out
}
