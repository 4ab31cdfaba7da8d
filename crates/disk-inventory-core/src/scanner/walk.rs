use crate::error::Error;
use crate::model::SelectedFile;
use crate::progress::ProgressReporter;
use glob::Pattern;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Component, Path};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error};
use walkdir::{DirEntry, WalkDir};

const PROGRESS_EVERY: usize = 500;

/// Walk `root` and list every regular file the way a folder picker would:
/// each path is relative to the root's parent, so its first segment is the
/// root folder's own name.
///
/// Entries matching an ignore glob, and hidden entries when `skip_hidden`
/// is set, are pruned together with everything below them. Symlinks are
/// not followed. Unreadable entries are logged and skipped.
pub fn collect_selected_files(
    root: &Path,
    ignore_globs: &[&str],
    skip_hidden: bool,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<SelectedFile>, Error> {
    if !root.exists() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Path '{}' does not exist", root.display()),
        )));
    }
    if !root.is_dir() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Path '{}' is not a directory", root.display()),
        )));
    }

    // Name the selection after the folder as given; a symlinked root keeps
    // its own name. `.` and `..` have none, so those use the resolved path.
    let canonical = fs::canonicalize(root)?;
    let root_name = match root.file_name() {
        Some(_) => root_folder_name(root),
        None => root_folder_name(&canonical),
    };
    let root = canonical;

    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    reporter.on_scan_start(&root.to_string_lossy());

    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !is_pruned(entry, &ignore_patterns, skip_hidden)
        });

    let mut entries: Vec<DirEntry> = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                if err.io_error().map(|e| e.kind()) == Some(io::ErrorKind::PermissionDenied) {
                    error!(
                        "Access denied reading {}: {}",
                        err.path().map(|p| p.display().to_string()).unwrap_or_default(),
                        err
                    );
                    continue;
                }
                return Err(Error::Walk(err));
            }
        };

        if entry.file_type().is_file() {
            let found = entries.len() + 1;
            if found % PROGRESS_EVERY == 0 {
                reporter.on_scan_progress(found, &entry.path().to_string_lossy());
            }
            entries.push(entry);
        }
    }

    let files: Vec<SelectedFile> = entries
        .par_iter()
        .filter_map(|entry| {
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    error!(
                        "Error getting metadata for {}: {}",
                        entry.path().display(),
                        err
                    );
                    return None;
                }
            };

            Some(SelectedFile {
                relative_path: relative_path(&root_name, &root, entry.path()),
                size_bytes: metadata.len(),
                last_modified_epoch_ms: metadata
                    .modified()
                    .map(epoch_millis)
                    .unwrap_or_default(),
            })
        })
        .collect();

    debug!(
        "Collected {} files under {} ({} skipped)",
        files.len(),
        root.display(),
        entries.len() - files.len()
    );

    Ok(files)
}

fn is_pruned(entry: &DirEntry, ignore_patterns: &[Pattern], skip_hidden: bool) -> bool {
    if skip_hidden {
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || name.starts_with('$') {
            return true;
        }
    }
    ignore_patterns
        .iter()
        .any(|pattern| pattern.matches_path(entry.path()))
}

fn root_folder_name(root: &Path) -> String {
    match root.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        // Filesystem or drive root: fall back to its printable form.
        None => {
            let printable = root.to_string_lossy();
            let trimmed = printable.trim_matches(|c| c == '/' || c == '\\');
            if trimmed.is_empty() {
                "root".to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}

fn relative_path(root_name: &str, root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut segments = vec![root_name.to_string()];
    segments.extend(rel.components().filter_map(|c| match c {
        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
        _ => None,
    }));
    segments.join("/")
}

fn epoch_millis(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_millis() as i64,
        Err(e) => -(e.duration().as_millis() as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_starts_with_root_name() {
        let root = Path::new("/data/Backup");
        let path = Path::new("/data/Backup/Docs/2024/a.txt");
        assert_eq!(relative_path("Backup", root, path), "Backup/Docs/2024/a.txt");
    }

    #[test]
    fn test_epoch_millis_before_epoch_is_negative() {
        let before = UNIX_EPOCH - std::time::Duration::from_millis(1500);
        assert_eq!(epoch_millis(before), -1500);
    }

    #[test]
    fn test_root_folder_name_fallback() {
        assert_eq!(root_folder_name(Path::new("/srv/media")), "media");
        assert_eq!(root_folder_name(Path::new("/")), "root");
    }
}
