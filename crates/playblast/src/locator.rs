//! Versioned scene lookup
//!
//! The studio tree stores every scene under
//! `<scenes_root>/<episode>/<scene>/<stage>/` as `<scene>_<stage>_<version>.ma`.

use std::path::{Path, PathBuf};

use crate::error::{PlayblastError, Result};
use crate::request::episode_of;

/// Maps a scene identifier, stage and optional version to a scene file
pub trait SceneLocator {
    /// Path where the scene is expected. The path is not required to exist.
    fn resolve(&self, scene: &str, stage: &str, version: Option<&str>) -> Result<PathBuf>;
}

/// Locator for the `<root>/<episode>/<scene>/<stage>/` layout
#[derive(Debug, Clone)]
pub struct VersionedLayout {
    root: PathBuf,
}

impl VersionedLayout {
    /// Layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn stage_dir(&self, scene: &str, stage: &str) -> PathBuf {
        self.root.join(episode_of(scene)).join(scene).join(stage)
    }

    /// Highest `<scene>_<stage>_v<N>.ma` in `dir`
    fn latest_version(dir: &Path, scene: &str, stage: &str) -> Result<Option<PathBuf>> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PlayblastError::io(dir, e)),
        };
        let prefix = format!("{scene}_{stage}_");
        let mut best: Option<(u32, PathBuf)> = None;

        for entry in entries {
            let entry = entry.map_err(|e| PlayblastError::io(dir, e))?;
            let name = entry.file_name();
            let Some(number) = name
                .to_str()
                .and_then(|n| n.strip_prefix(&prefix))
                .and_then(|n| n.strip_suffix(".ma"))
                .and_then(parse_version)
            else {
                continue;
            };
            if best.as_ref().map_or(true, |(n, _)| number > *n) {
                best = Some((number, entry.path()));
            }
        }

        Ok(best.map(|(_, path)| path))
    }
}

impl SceneLocator for VersionedLayout {
    fn resolve(&self, scene: &str, stage: &str, version: Option<&str>) -> Result<PathBuf> {
        let dir = self.stage_dir(scene, stage);
        match version.filter(|v| !v.is_empty()) {
            Some(version) => Ok(dir.join(format!("{scene}_{stage}_{version}.ma"))),
            None => match Self::latest_version(&dir, scene, stage)? {
                Some(path) => Ok(path),
                None => Ok(dir.join(format!("{scene}_{stage}.ma"))),
            },
        }
    }
}

/// Numeric part of a `v012`-style version tag
fn parse_version(tag: &str) -> Option<u32> {
    tag.strip_prefix(['v', 'V'])?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn test_explicit_version() {
        let layout = VersionedLayout::new("/scenes");
        let path = layout.resolve("EP01_003", "animation", Some("v004")).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/scenes/EP01/EP01_003/animation/EP01_003_animation_v004.ma")
        );
    }

    #[test]
    fn test_latest_version_is_picked() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("EP01/EP01_003/animation");
        for name in [
            "EP01_003_animation_v002.ma",
            "EP01_003_animation_v010.ma",
            "EP01_003_animation_v009.ma",
            "EP01_003_animation_vbad.ma",
            "EP01_003_layout_v099.ma",
        ] {
            touch(&dir.join(name));
        }

        let layout = VersionedLayout::new(root.path());
        let path = layout.resolve("EP01_003", "animation", None).unwrap();
        assert_eq!(path, dir.join("EP01_003_animation_v010.ma"));
    }

    #[test]
    fn test_unversioned_fallback() {
        let root = tempfile::tempdir().unwrap();
        let layout = VersionedLayout::new(root.path());

        let path = layout.resolve("EP02_010", "layout", Some("")).unwrap();
        assert_eq!(path, root.path().join("EP02/EP02_010/layout/EP02_010_layout.ma"));
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("v012"), Some(12));
        assert_eq!(parse_version("V3"), Some(3));
        assert_eq!(parse_version("012"), None);
    }
}
