//! extract
//!
//! Safe metadata extraction from revision files.
//!
//! # Design
//!
//! Each revision file declares two fields, `revision_id` and `revises_id`.
//! Extraction is a restricted key-value scan over the file's lines: a line of
//! the form `key = value` or `key: value` assigns a field, values may be
//! single- or double-quoted, a trailing `#` comment is ignored, and `None`,
//! `null`, `~` or an empty value mean "absent" (only meaningful for
//! `revises_id`). The first occurrence of each field wins.
//!
//! Files are never executed or interpreted; extraction reads text only.
//!
//! # Error contract
//!
//! A file without both fields is a per-file failure. The caller decides
//! whether that aborts the whole run (the default) or skips the file
//! ([`ScanOptions::skip_missing`]). Violations of the chain invariants are
//! detected later, by [`crate::core::chain::build`].

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::config::DIR_CONFIG_FILE;
use crate::core::types::{Record, RevisionId, TypeError};

/// Errors from extracting metadata out of a single file.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("missing {field} in '{path}'")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("invalid {field} in '{path}': {source}")]
    InvalidId {
        path: PathBuf,
        field: &'static str,
        source: TypeError,
    },
}

/// Errors from scanning a directory.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read directory '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Options controlling a directory scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// File extensions eligible for scanning; empty means all files.
    pub extensions: Vec<String>,
    /// Skip files whose metadata cannot be extracted instead of failing.
    pub skip_missing: bool,
}

/// Result of a directory scan.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Extracted records, in enumeration order.
    pub records: Vec<Record>,
    /// Files skipped under [`ScanOptions::skip_missing`], with the reason.
    pub skipped: Vec<(String, ExtractError)>,
}

/// Extract the revision record from a single file.
///
/// The record's `filename` is the file's name, not its full path.
///
/// # Errors
///
/// - [`ExtractError::Io`] if the file cannot be read
/// - [`ExtractError::MissingField`] if either field is absent
/// - [`ExtractError::InvalidId`] if an id value fails validation
pub fn extract_record(path: &Path) -> Result<Record, ExtractError> {
    let content = fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut revision_id: Option<&str> = None;
    let mut revises_id: Option<Option<&str>> = None;

    for line in content.lines() {
        if let Some(value) = field_value(line, "revision_id") {
            revision_id.get_or_insert(value.unwrap_or(""));
        } else if let Some(value) = field_value(line, "revises_id") {
            if revises_id.is_none() {
                revises_id = Some(value);
            }
        }
        if revision_id.is_some() && revises_id.is_some() {
            break;
        }
    }

    let revision_id = match revision_id {
        Some(value) if !value.is_empty() => {
            RevisionId::new(value).map_err(|source| ExtractError::InvalidId {
                path: path.to_path_buf(),
                field: "revision_id",
                source,
            })?
        }
        _ => {
            return Err(ExtractError::MissingField {
                path: path.to_path_buf(),
                field: "revision_id",
            })
        }
    };

    let revises_id = match revises_id {
        Some(Some(value)) => {
            Some(
                RevisionId::new(value).map_err(|source| ExtractError::InvalidId {
                    path: path.to_path_buf(),
                    field: "revises_id",
                    source,
                })?,
            )
        }
        Some(None) => None,
        None => {
            return Err(ExtractError::MissingField {
                path: path.to_path_buf(),
                field: "revises_id",
            })
        }
    };

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Record::new(filename, revision_id, revises_id))
}

/// Parse `key = value` / `key: value` for one field name.
///
/// Returns `None` when the line does not assign `field`, `Some(None)` when it
/// assigns an absent value, and `Some(Some(value))` otherwise.
fn field_value<'a>(line: &'a str, field: &str) -> Option<Option<&'a str>> {
    let rest = line.trim_start().strip_prefix(field)?;
    let rest = rest.trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))?;
    Some(parse_value(rest.trim()))
}

/// Unquote a value, drop any trailing `#` comment, and map absent spellings
/// to `None`.
fn parse_value(raw: &str) -> Option<&str> {
    let unquoted = match quoted_inner(raw, '\'').or_else(|| quoted_inner(raw, '"')) {
        Some(inner) => inner,
        // Unquoted values end at a trailing comment, if any.
        None => match raw.find('#') {
            Some(pos) => raw[..pos].trim_end(),
            None => raw,
        },
    };

    match unquoted {
        "" | "None" | "null" | "~" => None,
        value => Some(value),
    }
}

/// The text between a leading quote and its closing match, ignoring anything
/// after the closing quote.
fn quoted_inner(raw: &str, quote: char) -> Option<&str> {
    let rest = raw.strip_prefix(quote)?;
    rest.find(quote).map(|end| &rest[..end])
}

/// Scan a directory for revision files and extract their records.
///
/// Enumeration is deterministic: regular files in lexicographic filename
/// order. Dotfiles and the directory's own `filament.toml` are skipped, as
/// are files outside the extension filter.
pub fn scan_directory(dir: &Path, options: &ScanOptions) -> Result<ScanOutcome, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ScanError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && is_eligible(&path, options) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut outcome = ScanOutcome {
        records: Vec::with_capacity(paths.len()),
        skipped: Vec::new(),
    };
    for path in paths {
        match extract_record(&path) {
            Ok(record) => outcome.records.push(record),
            Err(err @ ExtractError::Io { .. }) => return Err(err.into()),
            Err(err) if options.skip_missing => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                outcome.skipped.push((name, err));
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(outcome)
}

/// Whether a file participates in the scan.
fn is_eligible(path: &Path, options: &ScanOptions) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('.') || name == DIR_CONFIG_FILE {
        return false;
    }
    if options.extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| options.extensions.iter().any(|e| e == ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("write test file");
        path
    }

    mod extract_record {
        use super::*;

        #[test]
        fn python_style_assignments() {
            let temp = TempDir::new().expect("temp dir");
            let path = write(
                temp.path(),
                "rev2.py",
                "revision_id = 'rev2'\nrevises_id = 'rev1'\n",
            );

            let record = extract_record(&path).expect("extract");
            assert_eq!(record.filename, "rev2.py");
            assert_eq!(record.revision_id.as_str(), "rev2");
            assert_eq!(record.revises_id.unwrap().as_str(), "rev1");
        }

        #[test]
        fn root_uses_none_spelling() {
            let temp = TempDir::new().expect("temp dir");
            let path = write(
                temp.path(),
                "rev1.py",
                "revision_id = 'rev1'\nrevises_id = None\n",
            );

            let record = extract_record(&path).expect("extract");
            assert!(record.is_root());
        }

        #[test]
        fn colon_form_and_double_quotes() {
            let temp = TempDir::new().expect("temp dir");
            let path = write(
                temp.path(),
                "rev.md",
                "revision_id: \"draft-3\"\nrevises_id: null\n",
            );

            let record = extract_record(&path).expect("extract");
            assert_eq!(record.revision_id.as_str(), "draft-3");
            assert!(record.revises_id.is_none());
        }

        #[test]
        fn unquoted_values() {
            let temp = TempDir::new().expect("temp dir");
            let path = write(temp.path(), "r", "revision_id = r7\nrevises_id = r6\n");

            let record = extract_record(&path).expect("extract");
            assert_eq!(record.revision_id.as_str(), "r7");
            assert_eq!(record.revises_id.unwrap().as_str(), "r6");
        }

        #[test]
        fn trailing_comments_are_ignored() {
            let temp = TempDir::new().expect("temp dir");
            let path = write(
                temp.path(),
                "rev2.py",
                "revision_id = 'rev2'  # second draft\nrevises_id = None  # 'None' marks the root\n",
            );

            let record = extract_record(&path).expect("extract");
            assert_eq!(record.revision_id.as_str(), "rev2");
            assert!(record.is_root());
        }

        #[test]
        fn unquoted_value_ends_at_a_comment() {
            let temp = TempDir::new().expect("temp dir");
            let path = write(
                temp.path(),
                "r",
                "revision_id = r7 # latest\nrevises_id = r6\n",
            );

            let record = extract_record(&path).expect("extract");
            assert_eq!(record.revision_id.as_str(), "r7");
        }

        #[test]
        fn first_occurrence_wins() {
            let temp = TempDir::new().expect("temp dir");
            let path = write(
                temp.path(),
                "r",
                "revision_id = 'a'\nrevision_id = 'b'\nrevises_id = None\n",
            );

            let record = extract_record(&path).expect("extract");
            assert_eq!(record.revision_id.as_str(), "a");
        }

        #[test]
        fn surrounding_code_is_ignored_not_executed() {
            let temp = TempDir::new().expect("temp dir");
            let path = write(
                temp.path(),
                "rev.py",
                "import os\n\nrevision_id = 'rev9'\nrevises_id = 'rev8'\n\nprint('hi')\n",
            );

            let record = extract_record(&path).expect("extract");
            assert_eq!(record.revision_id.as_str(), "rev9");
        }

        #[test]
        fn missing_revision_id_fails() {
            let temp = TempDir::new().expect("temp dir");
            let path = write(temp.path(), "r", "revises_id = 'rev1'\n");

            let err = extract_record(&path).unwrap_err();
            assert!(matches!(
                err,
                ExtractError::MissingField {
                    field: "revision_id",
                    ..
                }
            ));
        }

        #[test]
        fn missing_revises_id_fails() {
            let temp = TempDir::new().expect("temp dir");
            let path = write(temp.path(), "r", "revision_id = 'rev1'\n");

            let err = extract_record(&path).unwrap_err();
            assert!(matches!(
                err,
                ExtractError::MissingField {
                    field: "revises_id",
                    ..
                }
            ));
        }

        #[test]
        fn absent_revision_id_is_missing() {
            let temp = TempDir::new().expect("temp dir");
            let path = write(temp.path(), "r", "revision_id = None\nrevises_id = None\n");

            let err = extract_record(&path).unwrap_err();
            assert!(matches!(
                err,
                ExtractError::MissingField {
                    field: "revision_id",
                    ..
                }
            ));
        }

        #[test]
        fn invalid_id_is_surfaced() {
            let temp = TempDir::new().expect("temp dir");
            let path = write(
                temp.path(),
                "r",
                "revision_id = 'has space'\nrevises_id = None\n",
            );

            let err = extract_record(&path).unwrap_err();
            assert!(matches!(
                err,
                ExtractError::InvalidId {
                    field: "revision_id",
                    ..
                }
            ));
        }
    }

    mod scan_directory {
        use super::*;

        fn revision_file(dir: &Path, name: &str, revision: &str, revises: Option<&str>) {
            let revises = match revises {
                Some(id) => format!("'{}'", id),
                None => "None".to_string(),
            };
            write(
                dir,
                name,
                &format!("revision_id = '{}'\nrevises_id = {}\n", revision, revises),
            );
        }

        #[test]
        fn enumerates_in_filename_order() {
            let temp = TempDir::new().expect("temp dir");
            revision_file(temp.path(), "c.py", "r3", Some("r2"));
            revision_file(temp.path(), "a.py", "r1", None);
            revision_file(temp.path(), "b.py", "r2", Some("r1"));

            let outcome =
                scan_directory(temp.path(), &ScanOptions::default()).expect("scan");
            let names: Vec<_> = outcome.records.iter().map(|r| r.filename.as_str()).collect();
            assert_eq!(names, vec!["a.py", "b.py", "c.py"]);
        }

        #[test]
        fn skips_dotfiles_and_config() {
            let temp = TempDir::new().expect("temp dir");
            revision_file(temp.path(), "a.py", "r1", None);
            write(temp.path(), ".filament.lock", "");
            write(temp.path(), "filament.toml", "[sequence]\nseparator = \"-\"\n");

            let outcome =
                scan_directory(temp.path(), &ScanOptions::default()).expect("scan");
            assert_eq!(outcome.records.len(), 1);
        }

        #[test]
        fn extension_filter() {
            let temp = TempDir::new().expect("temp dir");
            revision_file(temp.path(), "a.py", "r1", None);
            revision_file(temp.path(), "b.md", "r2", Some("r1"));

            let options = ScanOptions {
                extensions: vec!["py".to_string()],
                skip_missing: false,
            };
            let outcome = scan_directory(temp.path(), &options).expect("scan");
            assert_eq!(outcome.records.len(), 1);
            assert_eq!(outcome.records[0].filename, "a.py");
        }

        #[test]
        fn missing_metadata_is_fatal_by_default() {
            let temp = TempDir::new().expect("temp dir");
            revision_file(temp.path(), "a.py", "r1", None);
            write(temp.path(), "notes.py", "just some text\n");

            let result = scan_directory(temp.path(), &ScanOptions::default());
            assert!(matches!(
                result,
                Err(ScanError::Extract(ExtractError::MissingField { .. }))
            ));
        }

        #[test]
        fn skip_missing_collects_skipped_files() {
            let temp = TempDir::new().expect("temp dir");
            revision_file(temp.path(), "a.py", "r1", None);
            write(temp.path(), "notes.py", "just some text\n");

            let options = ScanOptions {
                extensions: vec![],
                skip_missing: true,
            };
            let outcome = scan_directory(temp.path(), &options).expect("scan");
            assert_eq!(outcome.records.len(), 1);
            assert_eq!(outcome.skipped.len(), 1);
            assert_eq!(outcome.skipped[0].0, "notes.py");
        }

        #[test]
        fn not_a_directory_is_an_error() {
            let temp = TempDir::new().expect("temp dir");
            let file = write(temp.path(), "a.py", "");

            let result = scan_directory(&file, &ScanOptions::default());
            assert!(matches!(result, Err(ScanError::NotADirectory { .. })));
        }

        #[test]
        fn empty_directory_yields_no_records() {
            let temp = TempDir::new().expect("temp dir");
            let outcome =
                scan_directory(temp.path(), &ScanOptions::default()).expect("scan");
            assert!(outcome.records.is_empty());
        }
    }
}
