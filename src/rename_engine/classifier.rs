use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{PlanError, SUBTITLE_EXTENSIONS, VIDEO_EXTENSIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Episode,
    Subtitle,
}

/// Files of one folder split by kind, each list sorted by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub episodes: Vec<PathBuf>,
    pub subtitles: Vec<PathBuf>,
}

/// Lowercased extension with its leading dot, or an empty string.
pub fn dotted_extension(path: &Path) -> String {
    match path.extension().map(|ext| ext.to_string_lossy().to_lowercase()) {
        Some(ext) if !ext.is_empty() => format!(".{ext}"),
        _ => String::new(),
    }
}

pub fn classify_path(path: &Path) -> Result<EntryKind, PlanError> {
    let extension = dotted_extension(path);
    let bare = extension.trim_start_matches('.');

    if VIDEO_EXTENSIONS.contains(&bare) {
        Ok(EntryKind::Episode)
    } else if SUBTITLE_EXTENSIONS.contains(&bare) {
        Ok(EntryKind::Subtitle)
    } else {
        Err(PlanError::UnexpectedFileExtension {
            path: path.to_path_buf(),
            extension,
        })
    }
}

/// Partition file paths into episodes and subtitles.
///
/// The first file with an unrecognised extension aborts classification.
pub fn classify_entries<I>(files: I) -> Result<Classification, PlanError>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut classification = Classification::default();

    for path in files {
        match classify_path(&path)? {
            EntryKind::Episode => {
                debug!("Episode candidate: {}", path.display());
                classification.episodes.push(path);
            }
            EntryKind::Subtitle => {
                debug!("Subtitle candidate: {}", path.display());
                classification.subtitles.push(path);
            }
        }
    }

    sort_by_file_name(&mut classification.episodes);
    sort_by_file_name(&mut classification.subtitles);
    Ok(classification)
}

pub(crate) fn sort_by_file_name(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
}

/// Regular files directly inside `dir`, sorted by name.
pub(crate) fn list_files(dir: &Path) -> Result<Vec<PathBuf>, PlanError> {
    list_entries(dir, Path::is_file)
}

/// Subdirectories directly inside `dir`, sorted by name.
pub(crate) fn list_dirs(dir: &Path) -> Result<Vec<PathBuf>, PlanError> {
    list_entries(dir, Path::is_dir)
}

fn list_entries(dir: &Path, keep: fn(&Path) -> bool) -> Result<Vec<PathBuf>, PlanError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|source| PlanError::io(dir, source))? {
        let entry = entry.map_err(|source| PlanError::io(dir, source))?;
        let path = entry.path();
        if keep(&path) {
            paths.push(path);
        }
    }

    sort_by_file_name(&mut paths);
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_match_is_case_insensitive() {
        assert_eq!(classify_path(Path::new("a.MKV")).unwrap(), EntryKind::Episode);
        assert_eq!(classify_path(Path::new("a.Mp4")).unwrap(), EntryKind::Episode);
        assert_eq!(classify_path(Path::new("a.SRT")).unwrap(), EntryKind::Subtitle);
        assert_eq!(classify_path(Path::new("a.idx")).unwrap(), EntryKind::Subtitle);
    }

    #[test]
    fn test_unexpected_extension_carries_path_and_extension() {
        match classify_path(Path::new("/show/S1/notes.TXT")) {
            Err(PlanError::UnexpectedFileExtension { path, extension }) => {
                assert_eq!(path, PathBuf::from("/show/S1/notes.TXT"));
                assert_eq!(extension, ".txt");
            }
            other => panic!("expected UnexpectedFileExtension, got {other:?}"),
        }
    }

    #[test]
    fn test_file_without_extension_is_unexpected() {
        let result = classify_path(Path::new("README"));
        assert!(matches!(
            result,
            Err(PlanError::UnexpectedFileExtension { ref extension, .. }) if extension.is_empty()
        ));

        let result = classify_path(Path::new(".DS_Store"));
        assert!(matches!(result, Err(PlanError::UnexpectedFileExtension { .. })));
    }

    #[test]
    fn test_classify_entries_sorts_each_kind() {
        let files = vec![
            PathBuf::from("s/b.mkv"),
            PathBuf::from("s/b.srt"),
            PathBuf::from("s/a.mkv"),
            PathBuf::from("s/a.srt"),
        ];
        let classification = classify_entries(files).unwrap();

        assert_eq!(
            classification.episodes,
            vec![PathBuf::from("s/a.mkv"), PathBuf::from("s/b.mkv")]
        );
        assert_eq!(
            classification.subtitles,
            vec![PathBuf::from("s/a.srt"), PathBuf::from("s/b.srt")]
        );
    }

    #[test]
    fn test_classify_entries_aborts_on_first_unexpected() {
        let files = vec![PathBuf::from("a.mkv"), PathBuf::from("cover.jpg")];
        assert!(classify_entries(files).is_err());
    }
}
