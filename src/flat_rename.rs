//! Numbering of a single flat folder as `E01`, `E02`, ...
//!
//! Only the dominant entry type is renamed. When the two most common types
//! are equally frequent (typically one video and one subtitle format) both
//! are renamed, each with its own counter.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::rename_engine::{PlanError, RenameOperation};

/// Type key under which directories are counted.
pub const FOLDER_TYPE: &str = "folder";

#[derive(Debug, Clone)]
struct FlatEntry {
    path: PathBuf,
    entry_type: String,
}

/// Suffix with its dot, exactly as written (`.MKV` and `.mkv` differ).
fn suffix(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy()),
        _ => String::new(),
    }
}

fn read_entries(folder: &Path) -> Result<Vec<FlatEntry>, PlanError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(folder).map_err(|source| PlanError::io(folder, source))? {
        let path = entry.map_err(|source| PlanError::io(folder, source))?.path();
        let entry_type = if path.is_dir() {
            FOLDER_TYPE.to_string()
        } else {
            suffix(&path)
        };
        entries.push(FlatEntry { path, entry_type });
    }

    entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(entries)
}

/// Entry types ranked by count, ties in order of first appearance.
fn rank_types(entries: &[FlatEntry]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|(entry_type, _)| *entry_type == entry.entry_type) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.entry_type.clone(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The most common type, or the top two when they are tied.
pub fn select_types(ranked: &[(String, usize)]) -> Vec<String> {
    match ranked {
        [first, second, ..] if first.1 == second.1 => vec![first.0.clone(), second.0.clone()],
        [first, ..] => vec![first.0.clone()],
        [] => Vec::new(),
    }
}

pub fn count_entry_types(folder: &Path) -> Result<Vec<(String, usize)>, PlanError> {
    Ok(rank_types(&read_entries(folder)?))
}

pub fn plan_flat_folder(folder: &Path) -> Result<Vec<RenameOperation>, PlanError> {
    let entries = read_entries(folder)?;
    let ranked = rank_types(&entries);
    for (entry_type, count) in &ranked {
        debug!("{count:>4} x {entry_type:?}");
    }

    let mut operations = Vec::new();
    for entry_type in select_types(&ranked) {
        let matching = entries.iter().filter(|entry| entry.entry_type == entry_type);
        for (index, entry) in matching.enumerate() {
            let mut new_name = format!("E{:02}", index + 1);
            if entry_type != FOLDER_TYPE {
                new_name.push_str(&entry_type);
            }

            let new_path = folder.join(new_name);
            if entry.path != new_path {
                debug!("{} -> {}", entry.path.display(), new_path.display());
                operations.push(RenameOperation::new(entry.path.clone(), new_path));
            }
        }
    }

    Ok(operations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(pairs: &[(&str, usize)]) -> Vec<(String, usize)> {
        pairs.iter().map(|(t, c)| ((*t).to_string(), *c)).collect()
    }

    #[test]
    fn test_select_types_tie_takes_both() {
        let selected = select_types(&ranked(&[(".mp4", 10), (".srt", 10), (".nfo", 1)]));
        assert_eq!(selected, vec![".mp4", ".srt"]);
    }

    #[test]
    fn test_select_types_single_winner() {
        assert_eq!(select_types(&ranked(&[(".mkv", 3), (".srt", 2)])), vec![".mkv"]);
        assert_eq!(select_types(&ranked(&[("folder", 1)])), vec!["folder"]);
        assert!(select_types(&[]).is_empty());
    }

    #[test]
    fn test_suffix_keeps_case() {
        assert_eq!(suffix(Path::new("a.MKV")), ".MKV");
        assert_eq!(suffix(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(suffix(Path::new(".hidden")), "");
        assert_eq!(suffix(Path::new("plain")), "");
    }
}
