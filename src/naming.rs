//! Canonical `Series_S##_E##` names.

use std::ffi::{OsStr, OsString};

use regex::Regex;

/// `Series_S01`. Indices of 100 and above widen instead of truncating.
pub fn season_dir_name(series_name: &str, season: usize) -> String {
    format!("{series_name}_S{season:02}")
}

/// `Series_S01_E02` without any extension.
pub fn episode_base_name(series_name: &str, season: usize, episode: usize) -> String {
    format!("{series_name}_S{season:02}_E{episode:02}")
}

/// `Series_S01_E02.ext`, keeping the extension exactly as given.
///
/// The extension is appended rather than set with `Path::with_extension`,
/// since a series name may itself contain dots.
pub fn episode_file_name(
    series_name: &str,
    season: usize,
    episode: usize,
    extension: Option<&OsStr>,
) -> OsString {
    let mut name = OsString::from(episode_base_name(series_name, season, episode));
    if let Some(extension) = extension {
        name.push(".");
        name.push(extension);
    }
    name
}

/// Season and episode recovered from a canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalName {
    pub series: String,
    pub season: u32,
    pub episode: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct CanonicalNameParser {
    pattern: Regex,
}

impl CanonicalNameParser {
    pub fn new() -> Result<Self, regex::Error> {
        let pattern = Regex::new(
            r"^(?P<series>.+)_S(?P<season>\d{2,})(?:_E(?P<episode>\d{2,}))?(?:\.[^.]*)?$",
        )?;
        Ok(Self { pattern })
    }

    pub fn parse(&self, name: &str) -> Option<CanonicalName> {
        let captures = self.pattern.captures(name)?;
        let season = captures.name("season")?.as_str().parse().ok()?;
        let episode = match captures.name("episode") {
            Some(episode) => Some(episode.as_str().parse().ok()?),
            None => None,
        };

        Some(CanonicalName {
            series: captures.name("series")?.as_str().to_string(),
            season,
            episode,
        })
    }
}
