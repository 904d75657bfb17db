//! Where the notes live.
//!
//! A corpus is a workspace root plus a fixed layout: one top-level notes
//! file, two flat directories of markdown files and a short allow-list of
//! extra documents. Files are addressed by logical names relative to the
//! root (`memory/2026-01-30.md`), always with `/` separators.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Environment variable consulted when no workspace root is given.
pub const WORKSPACE_ENV: &str = "MEMSEARCH_WORKSPACE";

pub const DEFAULT_EXTRA_FILES: &[&str] = &[
    "QUICKREF.md",
    "AGENTS.md",
    "monetization-plan.md",
    "projects/context-memory/PLAN.md",
    "projects/context-memory/README.md",
    "scripts/README.md",
];

#[derive(Debug, Clone)]
pub struct CorpusLayout {
    pub root: PathBuf,
    pub notes_file: String,
    pub notes_dir: String,
    pub tasks_dir: String,
    pub extra_files: Vec<String>,
    pub index_file: String,
    pub query_log_file: String,
}

/// A corpus document that exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub path: PathBuf,
}

impl CorpusLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            notes_file: "MEMORY.md".into(),
            notes_dir: "memory".into(),
            tasks_dir: "tasks".into(),
            extra_files: DEFAULT_EXTRA_FILES.iter().map(|s| s.to_string()).collect(),
            index_file: "memory/keyword-index.json".into(),
            query_log_file: "memory/search-log.jsonl".into(),
        }
    }

    /// Root from an explicit argument, else `$MEMSEARCH_WORKSPACE`, else `.`.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let root = explicit
            .or_else(|| std::env::var_os(WORKSPACE_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(root)
    }

    pub fn with_extra_files<I: IntoIterator<Item = String>>(mut self, extra: I) -> Self {
        self.extra_files.extend(extra);
        self
    }

    pub fn index_path(&self) -> PathBuf { self.root.join(&self.index_file) }
    pub fn query_log_path(&self) -> PathBuf { self.root.join(&self.query_log_file) }

    /// Every existing corpus file, in a stable order: notes file, notes
    /// directory, tasks directory, extras. Missing locations contribute nothing.
    pub fn sources(&self) -> Vec<SourceFile> {
        let mut files = Vec::new();
        let notes = self.root.join(&self.notes_file);
        if notes.is_file() {
            files.push(SourceFile { name: self.notes_file.clone(), path: notes });
        }
        files.extend(self.markdown_in(&self.notes_dir));
        files.extend(self.markdown_in(&self.tasks_dir));
        for rel in &self.extra_files {
            let path = self.root.join(rel);
            if path.is_file() && !files.iter().any(|f| &f.name == rel) {
                files.push(SourceFile { name: rel.clone(), path });
            }
        }
        files
    }

    fn markdown_in(&self, dir: &str) -> Vec<SourceFile> {
        WalkDir::new(self.root.join(dir))
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter_map(|e| {
                let file_name = e.file_name().to_str()?;
                if !file_name.ends_with(".md") {
                    return None;
                }
                Some(SourceFile { name: format!("{dir}/{file_name}"), path: e.path().to_path_buf() })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn enumerates_layout_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("memory")).unwrap();
        fs::create_dir_all(root.join("tasks")).unwrap();
        fs::create_dir_all(root.join("scripts")).unwrap();
        fs::write(root.join("MEMORY.md"), "top").unwrap();
        fs::write(root.join("memory/2026-01-31.md"), "b").unwrap();
        fs::write(root.join("memory/2026-01-30.md"), "a").unwrap();
        fs::write(root.join("memory/keyword-index.json"), "{}").unwrap();
        fs::write(root.join("tasks/backlog.md"), "t").unwrap();
        fs::write(root.join("scripts/README.md"), "s").unwrap();
        fs::write(root.join("unlisted.md"), "u").unwrap();

        let names: Vec<String> = CorpusLayout::new(root).sources().into_iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec!["MEMORY.md", "memory/2026-01-30.md", "memory/2026-01-31.md", "tasks/backlog.md", "scripts/README.md"]
        );
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let layout = CorpusLayout::new(dir.path().join("nope"));
        assert!(layout.sources().is_empty());
    }

    #[test]
    fn extra_files_extend_allow_list() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ideas.md"), "i").unwrap();
        let layout = CorpusLayout::new(dir.path()).with_extra_files(vec!["ideas.md".to_string()]);
        assert_eq!(layout.sources()[0].name, "ideas.md");
    }
}
