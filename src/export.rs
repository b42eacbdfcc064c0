//! Exporting notes to a directory of Markdown files.
//!
//! Each note is written to `"<title> (<short id>).md"`. The short id lets a
//! later export recognise its own files: unchanged notes are skipped,
//! retitled notes have their file renamed, and files whose note is gone can
//! be archived.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR, Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{NoteRecord, ShortId};

/// Matches exported filenames, capturing the short id.
pub const FILENAME_PATTERN: &str = r"^.*\s\(([0-9a-f]{7})\)\.md$";

/// Errors about the export destination itself.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to inspect {}", path.display())]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What happened to a single note during export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    Written,
    Unchanged,
}

/// Counts of export actions, logged when an export finishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub written: usize,
    pub renamed: usize,
    pub unchanged: usize,
    pub archived: usize,
}

/// Writes notes into a directory, tracking files from earlier exports.
#[derive(Debug)]
pub struct Exporter {
    directory: PathBuf,
    mapping: HashMap<ShortId, String>,
    summary: ExportSummary,
}

impl Exporter {
    /// Indexes the previously-exported files in `directory`.
    ///
    /// Only files directly inside `directory` are considered.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        ensure_directory(&directory)?;

        let pattern = Regex::new(FILENAME_PATTERN).context("Invalid export filename pattern")?;
        let mut mapping = HashMap::new();

        for file in list_files(&directory)? {
            if let Some(captures) = pattern.captures(&file) {
                mapping.insert(ShortId::new(&captures[1]), file);
            }
        }

        debug!(
            directory = %directory.display(),
            exported = mapping.len(),
            "indexed export directory"
        );

        Ok(Self {
            directory,
            mapping,
            summary: ExportSummary::default(),
        })
    }

    /// The directory notes are exported into.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Counts of actions taken so far.
    pub fn summary(&self) -> ExportSummary {
        self.summary
    }

    /// Returns the filename a note was previously exported under, if known.
    pub fn exported_filename(&self, id: &ShortId) -> Option<&str> {
        self.mapping.get(id).map(String::as_str)
    }

    /// Returns true when the note's text differs from its exported file, or
    /// when it has never been exported.
    pub fn is_changed(&self, record: &NoteRecord) -> Result<bool> {
        let Some(filename) = self.mapping.get(&record.short_id) else {
            return Ok(true);
        };

        let path = self.directory.join(filename);
        let old = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;

        Ok(Sha256::digest(&old) != Sha256::digest(record.text.as_bytes()))
    }

    /// Returns the previous filename when the note was exported under a
    /// different title.
    pub fn is_renamed(&self, record: &NoteRecord) -> Option<&str> {
        let old = self.exported_filename(&record.short_id)?;
        let renamed = old != build_filename(record) && old != build_safe_filename(record);
        renamed.then_some(old)
    }

    /// Exports one note, renaming its old file first when the title changed.
    pub fn write(&mut self, record: &NoteRecord) -> Result<ExportOutcome> {
        if let Some(old) = self.is_renamed(record).map(str::to_string) {
            self.rename(record, &old);
        }

        if !self.is_changed(record)? {
            self.summary.unchanged += 1;
            return Ok(ExportOutcome::Unchanged);
        }

        info!(id = %record.short_id, title = %record.title, "exporting");

        let preferred = build_filename(record);
        let filename = match fs::write(self.directory.join(&preferred), &record.text) {
            Ok(()) => preferred,
            Err(e) => {
                debug!(error = %e, file = %preferred, "falling back to safe filename");
                let safe = build_safe_filename(record);
                let path = self.directory.join(&safe);
                fs::write(&path, &record.text)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                safe
            }
        };

        self.mapping.insert(record.short_id.clone(), filename);
        self.summary.written += 1;
        Ok(ExportOutcome::Written)
    }

    /// Returns exported files whose note is not in `live`, sorted by name.
    pub fn stale_files(&self, live: &HashSet<ShortId>) -> Vec<PathBuf> {
        let mut stale: Vec<PathBuf> = self
            .mapping
            .iter()
            .filter(|(id, _)| !live.contains(*id))
            .map(|(_, file)| self.directory.join(file))
            .collect();
        stale.sort();
        stale
    }

    /// Moves exported files whose note is not in `live` into `trash`.
    ///
    /// Returns the new locations of the moved files.
    pub fn archive(&mut self, live: &HashSet<ShortId>, trash: &Path) -> Result<Vec<PathBuf>> {
        ensure_directory(trash)?;

        let mut stale: Vec<(ShortId, String)> = self
            .mapping
            .iter()
            .filter(|(id, _)| !live.contains(*id))
            .map(|(id, file)| (id.clone(), file.clone()))
            .collect();
        stale.sort_by(|a, b| a.1.cmp(&b.1));

        let mut moved = Vec::with_capacity(stale.len());
        for (id, file) in stale {
            let from = self.directory.join(&file);
            let to = trash.join(&file);
            info!(file = %from.display(), "archiving");
            fs::rename(&from, &to).with_context(|| {
                format!("Failed to move {} to {}", from.display(), to.display())
            })?;

            self.mapping.remove(&id);
            self.summary.archived += 1;
            moved.push(to);
        }

        Ok(moved)
    }

    fn rename(&mut self, record: &NoteRecord, old: &str) {
        let new = build_filename(record);
        let from = self.directory.join(old);
        let to = self.directory.join(&new);

        match fs::rename(&from, &to) {
            Ok(()) => {
                info!(from = %old, to = %new, "renamed export");
                self.mapping.insert(record.short_id.clone(), new);
                self.summary.renamed += 1;
            }
            Err(e) => warn!(error = %e, file = %from.display(), "could not rename export"),
        }
    }
}

/// The filename a note is exported under.
///
/// Path separators in the title are percent-encoded so the file stays in
/// the export directory.
pub fn build_filename(record: &NoteRecord) -> String {
    filename_for(&record.title, &record.short_id)
}

/// The export filename for a note with `title` and `id`.
pub fn filename_for(title: &str, id: &ShortId) -> String {
    let encoded_sep = urlencoding::encode(MAIN_SEPARATOR_STR);
    let safe_title = title.replace(MAIN_SEPARATOR, &encoded_sep);
    format!("{safe_title} ({id}).md")
}

/// A fully percent-encoded filename, used when the preferred one cannot be
/// written.
pub fn build_safe_filename(record: &NoteRecord) -> String {
    format!("{} ({}).md", urlencoding::encode(&record.title), record.short_id)
}

/// Lists the names of regular files directly inside `directory`.
pub fn list_files(directory: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(directory)
        .with_context(|| format!("Failed to list {}", directory.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", directory.display()))?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(name) => debug!(file = ?name, "skipping non-UTF-8 filename"),
        }
    }
    files.sort();
    Ok(files)
}

/// Fails with an [`ExportError`] unless `path` is an existing directory.
pub fn ensure_directory(path: &Path) -> Result<(), ExportError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ExportError::NotADirectory(path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ExportError::MissingDirectory(path.to_path_buf()))
        }
        Err(source) => Err(ExportError::Inspect {
            path: path.to_path_buf(),
            source,
        }),
    }
}
