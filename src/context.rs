//! System-context assembly for remote queries.
//!
//! A query like "explain cli.rs" should reach the model with the current
//! directory listing and the referenced file contents attached. File
//! references are recognized syntactically, validated against the snapshot
//! (or the disk, for files the cache has not seen yet), and capped so the
//! context stays small.

use crate::snapshot::DirectorySnapshot;
use crate::textutil::truncate_chars_with_suffix;
use regex::Regex;
use tracing::debug;

/// At most this many referenced files are included per query.
pub const MAX_CONTEXT_FILES: usize = 2;
/// Per-file content cap, in characters.
pub const MAX_FILE_CHARS: usize = 1500;
/// Marker appended when file content was truncated.
const TRUNCATION_MARKER: &str = "...";

/// Builds the system-context string for remote queries.
pub struct ContextAssembler {
    /// Word/path characters followed by a dot-extension suffix.
    file_pattern: Regex,
    /// Fixed model identifier; there is no per-query model selection.
    model: String,
}

impl ContextAssembler {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            file_pattern: Regex::new(r"[\w./-]+\.\w+").expect("static filename pattern must compile"),
            model: model.into(),
        }
    }

    /// Produce `(model_id, context_string)` for one query.
    ///
    /// Files referenced in the query that exist on disk but are unknown to
    /// the snapshot are registered into it as discovered entries.
    pub fn assemble(&self, query: &str, snapshot: &mut DirectorySnapshot) -> (String, String) {
        let references = self.find_file_references(query, snapshot);
        let included = &references[..references.len().min(MAX_CONTEXT_FILES)];
        debug!(?included, "assembling remote context");

        let mut parts = vec![
            format!("Current directory: {}", snapshot.current_path().display()),
            "Available files and directories (hidden excluded):".to_string(),
        ];

        if let Some(err) = snapshot.list_error() {
            parts.push(format!("- error accessing directory: {err}"));
        } else {
            let mut any = false;
            for (name, entry) in snapshot.entries() {
                if name.starts_with('.') {
                    continue;
                }
                let marker = if entry.is_dir { "/" } else { "" };
                parts.push(format!("- {name}{marker}"));
                any = true;
            }
            if !any {
                parts.push("- (empty)".to_string());
            }
        }

        if !included.is_empty() {
            parts.push("\nRelevant file content:".to_string());
            for name in included {
                match snapshot.file_content(name) {
                    Some(content) => {
                        let capped =
                            truncate_chars_with_suffix(&content, MAX_FILE_CHARS, TRUNCATION_MARKER);
                        parts.push(format!("\n--- {name} ---\n{capped}\n--- End {name} ---"));
                    }
                    None => parts.push(format!("\n(could not read content of {name})")),
                }
            }
        }

        (self.model.clone(), parts.join("\n"))
    }

    /// Scan the query for filename-shaped substrings that resolve to files.
    ///
    /// Order is first-seen scan order, deduplicated. A candidate is kept when
    /// the snapshot knows it as a non-directory entry, or when it exists as a
    /// regular file under the current path (registered as discovered).
    fn find_file_references(&self, query: &str, snapshot: &mut DirectorySnapshot) -> Vec<String> {
        let mut found = Vec::new();
        for candidate in self.file_pattern.find_iter(query) {
            let candidate = candidate.as_str();
            if found.iter().any(|name| name == candidate) {
                continue;
            }
            if snapshot.is_file_entry(candidate) {
                found.push(candidate.to_string());
            } else if snapshot.current_path().join(candidate).is_file() {
                snapshot.register_discovered_file(candidate);
                found.push(candidate.to_string());
            }
        }
        found
    }
}
