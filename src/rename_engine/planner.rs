use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::classifier::{EntryKind, classify_entries, classify_path, list_dirs, list_files};
use super::subtitles::ordered_groups;
use super::{PlanError, RenameOperation, SUBS_FOLDER};
use crate::naming::{episode_file_name, season_dir_name};

/// Renames for every season folder under `root`, each season's files
/// followed by the season folder itself.
///
/// Seasons are numbered from 1 in folder-name order. The first error
/// discards everything planned so far.
pub fn plan_series(root: &Path, series_name: &str) -> Result<Vec<RenameOperation>, PlanError> {
    let mut operations = Vec::new();

    for (index, season_dir) in list_dirs(root)?.into_iter().enumerate() {
        let season = index + 1;
        debug!("Season {season}: {}", season_dir.display());

        operations.extend(plan_season(&season_dir, series_name, season)?);

        let new_season_dir = root.join(season_dir_name(series_name, season));
        if season_dir != new_season_dir {
            operations.push(RenameOperation::new(season_dir, new_season_dir));
        }
    }

    Ok(operations)
}

/// Renames for the files of one season folder and its `subs` folder.
///
/// Episodes and subtitle groups are paired by position only: the n-th
/// episode in name order gets the n-th stem group. Surplus groups are left
/// alone, and episodes past the last group get no subtitle renames.
pub fn plan_season(
    season_dir: &Path,
    series_name: &str,
    season: usize,
) -> Result<Vec<RenameOperation>, PlanError> {
    let classification = classify_entries(list_files(season_dir)?)?;
    let mut groups = ordered_groups(&classification.subtitles);
    let mut operations = Vec::new();

    for (index, episode_path) in classification.episodes.iter().enumerate() {
        let episode = index + 1;
        push_rename(&mut operations, episode_path, season_dir, series_name, season, episode);

        if let Some(group) = groups.pop_front() {
            for subtitle_path in &group.files {
                push_rename(&mut operations, subtitle_path, season_dir, series_name, season, episode);
            }
        }
    }

    if !groups.is_empty() {
        debug!(
            "{} subtitle group(s) without an episode in {}",
            groups.len(),
            season_dir.display()
        );
    }

    let subs_dir = season_dir.join(SUBS_FOLDER);
    if subs_dir.is_dir() {
        operations.extend(plan_subs_folder(&subs_dir, series_name, season)?);
    }

    Ok(operations)
}

/// The `subs` folder is numbered on its own, in stem order, without
/// checking it against the episodes of the season.
fn plan_subs_folder(
    subs_dir: &Path,
    series_name: &str,
    season: usize,
) -> Result<Vec<RenameOperation>, PlanError> {
    let mut subtitles: Vec<PathBuf> = Vec::new();
    for path in list_files(subs_dir)? {
        match classify_path(&path)? {
            EntryKind::Subtitle => subtitles.push(path),
            EntryKind::Episode => {
                warn!("Ignoring video file in subtitle folder: {}", path.display());
            }
        }
    }

    let mut operations = Vec::new();
    for (index, group) in ordered_groups(&subtitles).into_iter().enumerate() {
        for subtitle_path in &group.files {
            push_rename(&mut operations, subtitle_path, subs_dir, series_name, season, index + 1);
        }
    }

    Ok(operations)
}

fn push_rename(
    operations: &mut Vec<RenameOperation>,
    path: &Path,
    dir: &Path,
    series_name: &str,
    season: usize,
    episode: usize,
) {
    let new_path = dir.join(episode_file_name(series_name, season, episode, path.extension()));
    if path != new_path {
        debug!("{} -> {}", path.display(), new_path.display());
        operations.push(RenameOperation::new(path, new_path));
    }
}
