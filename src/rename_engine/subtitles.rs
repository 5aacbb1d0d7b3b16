use std::collections::{BTreeMap, VecDeque};
use std::ffi::OsString;
use std::path::PathBuf;

/// Subtitle files sharing one stem, e.g. `ep1.srt` and `ep1.sub`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleGroup {
    pub stem: OsString,
    pub files: Vec<PathBuf>,
}

/// Bucket paths by file stem. Order within a bucket follows the input order.
pub fn group_subtitles(paths: &[PathBuf]) -> BTreeMap<OsString, Vec<PathBuf>> {
    let mut groups: BTreeMap<OsString, Vec<PathBuf>> = BTreeMap::new();
    for path in paths {
        let stem = path.file_stem().unwrap_or_default().to_os_string();
        groups.entry(stem).or_default().push(path.clone());
    }
    groups
}

/// Groups in lexicographic stem order, ready to be popped one per episode.
pub fn ordered_groups(paths: &[PathBuf]) -> VecDeque<SubtitleGroup> {
    group_subtitles(paths)
        .into_iter()
        .map(|(stem, files)| SubtitleGroup { stem, files })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_with_same_stem_share_a_group() {
        let paths = vec![
            PathBuf::from("s/ep1.srt"),
            PathBuf::from("s/ep1.sub"),
            PathBuf::from("s/ep1.idx"),
            PathBuf::from("s/ep2.srt"),
        ];
        let groups = group_subtitles(&paths);

        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[&OsString::from("ep1")],
            vec![
                PathBuf::from("s/ep1.srt"),
                PathBuf::from("s/ep1.sub"),
                PathBuf::from("s/ep1.idx"),
            ]
        );
    }

    #[test]
    fn test_only_final_extension_is_stripped() {
        let paths = vec![PathBuf::from("ep1.en.srt"), PathBuf::from("ep1.fr.srt")];
        let groups = ordered_groups(&paths);

        let stems: Vec<_> = groups.iter().map(|group| group.stem.clone()).collect();
        assert_eq!(stems, vec![OsString::from("ep1.en"), OsString::from("ep1.fr")]);
    }

    #[test]
    fn test_groups_are_ordered_by_stem() {
        let paths = vec![
            PathBuf::from("c.srt"),
            PathBuf::from("a.srt"),
            PathBuf::from("B.srt"),
        ];
        let stems: Vec<_> = ordered_groups(&paths).into_iter().map(|group| group.stem).collect();

        assert_eq!(
            stems,
            vec![OsString::from("B"), OsString::from("a"), OsString::from("c")]
        );
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(ordered_groups(&[]).is_empty());
    }
}
