//! Cached snapshot of one directory and the filesystem operations behind the
//! local command set.
//!
//! The snapshot holds the immediate (non-recursive) children of
//! `current_path` as of the last refresh. Mutating operations update the
//! cache optimistically (one entry added or removed, no re-listing); a full
//! `refresh` is the only operation that reconciles the cache with disk, and
//! it runs after every successful navigation.

use crate::error::{FsError, LocalError, UsageError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const TREE_SPACE: &str = "    ";
const TREE_BRANCH: &str = "│   ";
const TREE_TEE: &str = "├── ";
const TREE_LAST: &str = "└── ";

/// Hidden sentinel entry recorded when the directory itself cannot be listed.
const LIST_ERROR_SENTINEL: &str = ".error";

/// Default recursion bound for tree rendering.
pub const DEFAULT_TREE_DEPTH: usize = 3;

/// Lazy per-entry content cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentState {
    /// Content has not been read yet.
    Unloaded,
    /// UTF-8 content loaded from disk (or known at creation time).
    Loaded(String),
    /// A previous load attempt failed; the reason is kept for display.
    Failed(String),
}

/// One cached directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub is_dir: bool,
    pub content: ContentState,
}

impl EntryInfo {
    fn file() -> Self {
        Self {
            is_dir: false,
            content: ContentState::Unloaded,
        }
    }

    fn dir() -> Self {
        Self {
            is_dir: true,
            content: ContentState::Unloaded,
        }
    }
}

/// What `remove` actually deleted, for message phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removed {
    File,
    BrokenLink,
    EmptyDir,
}

/// Non-recursive cache of one directory's entries.
#[derive(Debug)]
pub struct DirectorySnapshot {
    current_path: PathBuf,
    entries: BTreeMap<String, EntryInfo>,
}

impl DirectorySnapshot {
    /// Create a snapshot rooted at `initial` and list it immediately.
    pub fn new(initial: PathBuf) -> Self {
        let mut snapshot = Self {
            current_path: initial,
            entries: BTreeMap::new(),
        };
        snapshot.refresh();
        snapshot
    }

    /// The sole mutable anchor of navigation state.
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// Cached entries, keyed by name (sorted).
    pub fn entries(&self) -> &BTreeMap<String, EntryInfo> {
        &self.entries
    }

    /// Failure description recorded when the directory could not be listed.
    pub fn list_error(&self) -> Option<&str> {
        match self.entries.get(LIST_ERROR_SENTINEL) {
            Some(EntryInfo {
                content: ContentState::Failed(msg),
                ..
            }) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// True when the snapshot knows `name` as a non-directory entry.
    pub fn is_file_entry(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|entry| !entry.is_dir)
    }

    /// Register a file discovered outside a refresh (e.g. referenced in a
    /// query) without re-listing the directory.
    pub fn register_discovered_file(&mut self, name: &str) {
        self.entries
            .entry(name.to_string())
            .or_insert_with(EntryInfo::file);
    }

    // -----------------------------------------------------------------------
    // Refresh
    // -----------------------------------------------------------------------

    /// Re-list the immediate children of `current_path`, replacing all cached
    /// entries. Never fails; failures are recorded in the cache instead.
    pub fn refresh(&mut self) {
        self.entries.clear();
        let listing = match fs::read_dir(&self.current_path) {
            Ok(listing) => listing,
            Err(e) => {
                self.entries.insert(
                    LIST_ERROR_SENTINEL.to_string(),
                    EntryInfo {
                        is_dir: false,
                        content: ContentState::Failed(format!("cannot list directory: {e}")),
                    },
                );
                return;
            }
        };

        for entry in listing {
            let Ok(entry) = entry else {
                continue;
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follows symlinks, so a link to a directory counts as one.
            let info = match fs::metadata(entry.path()) {
                Ok(meta) => EntryInfo {
                    is_dir: meta.is_dir(),
                    content: ContentState::Unloaded,
                },
                // A child we cannot stat is cached as an unreadable non-directory.
                Err(e) => EntryInfo {
                    is_dir: false,
                    content: ContentState::Failed(e.to_string()),
                },
            };
            self.entries.insert(name, info);
        }
        debug!(path = %self.current_path.display(), entries = self.entries.len(), "snapshot refreshed");
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Change `current_path` to the resolved target and refresh.
    ///
    /// On any failure the prior path and entries are left untouched.
    pub fn navigate(&mut self, target: &str) -> Result<(), LocalError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(UsageError("Usage: cd <directory>".to_string()).into());
        }

        let resolved = if target == ".." {
            self.current_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.current_path.clone())
        } else if target == "~" || target == "$HOME" {
            dirs::home_dir()
                .ok_or_else(|| FsError::Other("home directory is not available".to_string()))?
        } else {
            let joined = if Path::new(target).is_absolute() {
                PathBuf::from(target)
            } else {
                self.current_path.join(target)
            };
            normalize_path(&joined)
        };

        let described = format!("{target} (resolved to {})", resolved.display());
        let meta = fs::metadata(&resolved).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(described.clone()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(described.clone()),
            _ => FsError::Other(format!("{described}: {e}")),
        })?;
        if !meta.is_dir() {
            return Err(FsError::NotADirectory(described).into());
        }
        // Probe read+traverse access before committing the path change.
        fs::read_dir(&resolved).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => {
                FsError::PermissionDenied(resolved.display().to_string())
            }
            _ => FsError::Other(format!("{}: {e}", resolved.display())),
        })?;

        debug!(from = %self.current_path.display(), to = %resolved.display(), "navigate");
        self.current_path = resolved;
        self.refresh();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Create / remove
    // -----------------------------------------------------------------------

    /// Create an empty file named `name` directly inside `current_path`.
    pub fn create_file(&mut self, name: &str) -> Result<(), LocalError> {
        validate_entry_name(name)?;
        let path = self.current_path.join(name);
        if path.symlink_metadata().is_ok() {
            return Err(FsError::AlreadyExists(name.to_string()).into());
        }
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| FsError::from_io(&e, name))?;
        self.entries.insert(
            name.to_string(),
            EntryInfo {
                is_dir: false,
                content: ContentState::Loaded(String::new()),
            },
        );
        Ok(())
    }

    /// Create a directory named `name` directly inside `current_path`.
    pub fn create_dir(&mut self, name: &str) -> Result<(), LocalError> {
        validate_entry_name(name)?;
        let path = self.current_path.join(name);
        if path.symlink_metadata().is_ok() {
            return Err(FsError::AlreadyExists(name.to_string()).into());
        }
        fs::create_dir_all(&path).map_err(|e| FsError::from_io(&e, name))?;
        self.entries.insert(name.to_string(), EntryInfo::dir());
        Ok(())
    }

    /// Remove a file, symbolic link, or empty directory named `name`.
    ///
    /// A dangling symbolic link counts as present and is removed as a link.
    pub fn remove(&mut self, name: &str) -> Result<Removed, LocalError> {
        validate_entry_name(name)?;
        let path = self.current_path.join(name);
        let meta = path
            .symlink_metadata()
            .map_err(|_| FsError::NotFound(name.to_string()))?;

        let removed = if meta.file_type().is_symlink() {
            let dangling = fs::metadata(&path).is_err();
            fs::remove_file(&path).map_err(|e| FsError::from_io(&e, name))?;
            if dangling {
                Removed::BrokenLink
            } else {
                Removed::File
            }
        } else if meta.is_dir() {
            let mut children = fs::read_dir(&path).map_err(|e| FsError::from_io(&e, name))?;
            if children.next().is_some() {
                return Err(FsError::NotEmpty(name.to_string()).into());
            }
            fs::remove_dir(&path).map_err(|e| FsError::from_io(&e, name))?;
            Removed::EmptyDir
        } else {
            fs::remove_file(&path).map_err(|e| FsError::from_io(&e, name))?;
            Removed::File
        };

        self.entries.remove(name);
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Content cache
    // -----------------------------------------------------------------------

    /// Load and cache the UTF-8 content of a known file entry.
    ///
    /// Returns `None` for directories, unknown entries, and entries whose
    /// load failed (the failure is cached so disk is probed at most once).
    pub fn file_content(&mut self, name: &str) -> Option<String> {
        let path = self.current_path.join(name);
        let entry = self.entries.get_mut(name)?;
        if entry.is_dir {
            return None;
        }
        match &entry.content {
            ContentState::Loaded(text) => Some(text.clone()),
            ContentState::Failed(_) => None,
            ContentState::Unloaded => match fs::read_to_string(&path) {
                Ok(text) => {
                    entry.content = ContentState::Loaded(text.clone());
                    Some(text)
                }
                Err(e) => {
                    entry.content = ContentState::Failed(e.to_string());
                    None
                }
            },
        }
    }

    // -----------------------------------------------------------------------
    // Tree rendering
    // -----------------------------------------------------------------------

    /// Depth-bounded, sorted, hidden-excluded tree of the current directory.
    pub fn list_tree(&self, max_depth: usize) -> Vec<String> {
        let mut lines = Vec::new();
        build_tree_lines(&self.current_path, "", 0, max_depth, &mut lines);
        lines
    }
}

/// Reject names that could escape `current_path`.
fn validate_entry_name(name: &str) -> Result<(), UsageError> {
    if name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(UsageError(format!(
            "invalid name: {name} (must be a plain entry name, no path separators or '..')"
        )));
    }
    Ok(())
}

/// Collapse `.` and `..` segments without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn build_tree_lines(
    dir: &Path,
    prefix: &str,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<String>,
) {
    let listing = match fs::read_dir(dir) {
        Ok(listing) => listing,
        Err(_) => {
            out.push(format!("{prefix}{TREE_LAST}[error reading directory]"));
            return;
        }
    };

    let mut names: Vec<String> = listing
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();

    let count = names.len();
    for (idx, name) in names.iter().enumerate() {
        let last = idx + 1 == count;
        let connector = if last { TREE_LAST } else { TREE_TEE };
        let child = dir.join(name);
        let (label, is_dir) = match fs::metadata(&child) {
            Ok(meta) => (name.clone(), meta.is_dir()),
            Err(_) => (format!("{name} [permission error]"), false),
        };
        let marker = if is_dir { "/" } else { "" };
        out.push(format!("{prefix}{connector}{label}{marker}"));

        if is_dir && depth < max_depth {
            let extension = if last { TREE_SPACE } else { TREE_BRANCH };
            build_tree_lines(
                &child,
                &format!("{prefix}{extension}"),
                depth + 1,
                max_depth,
                out,
            );
        }
    }
}
