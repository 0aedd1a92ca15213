//! Output directory layout and preparation

use std::path::{Path, PathBuf};

use crate::error::{PlayblastError, Result};

/// Output directory for a scene.
///
/// An explicit directory wins; otherwise the layout is
/// `<output_root>/<episode>/<scene>[_<version>]/<stage>/`, lowercasing the
/// version and stage.
pub fn output_dir(
    output_root: &Path,
    explicit: Option<&Path>,
    scene: &str,
    episode: &str,
    version: Option<&str>,
    stage: &str,
) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    let mut leaf = scene.to_string();
    if let Some(version) = version.filter(|v| !v.is_empty()) {
        leaf.push('_');
        leaf.push_str(&version.to_lowercase());
    }
    output_root
        .join(episode)
        .join(leaf)
        .join(stage.to_lowercase())
}

/// Create `dir` if needed and remove everything inside it.
///
/// Returns how many entries were removed.
pub fn prepare_output_dir(dir: &Path) -> Result<usize> {
    std::fs::create_dir_all(dir).map_err(|e| PlayblastError::io(dir, e))?;

    let mut removed = 0;
    for entry in std::fs::read_dir(dir).map_err(|e| PlayblastError::io(dir, e))? {
        let entry = entry.map_err(|e| PlayblastError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| PlayblastError::io(&path, e))?;
        let removal = if file_type.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        removal.map_err(|e| PlayblastError::io(&path, e))?;
        log::trace!("Removed {}", path.display());
        removed += 1;
    }

    log::info!("Output directory {} cleaned ({} entries removed)", dir.display(), removed);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let dir = output_dir(
            Path::new("/out"),
            None,
            "EP01_003_anim",
            "EP01",
            Some("V002"),
            "Animation",
        );
        assert_eq!(dir, PathBuf::from("/out/EP01/EP01_003_anim_v002/animation"));
    }

    #[test]
    fn test_empty_version_is_omitted() {
        let dir = output_dir(Path::new("/out"), None, "EP01_003", "EP01", Some(""), "layout");
        assert_eq!(dir, PathBuf::from("/out/EP01/EP01_003/layout"));
    }

    #[test]
    fn test_explicit_dir_wins() {
        let dir = output_dir(
            Path::new("/out"),
            Some(Path::new("/tmp/mine")),
            "EP01_003",
            "EP01",
            Some("v1"),
            "animation",
        );
        assert_eq!(dir, PathBuf::from("/tmp/mine"));
    }

    #[test]
    fn test_prepare_empties_populated_dir() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("frames");
        std::fs::create_dir_all(dir.join("nested/deeper")).unwrap();
        std::fs::write(dir.join("EP01_003.0001.png"), b"png").unwrap();
        std::fs::write(dir.join("nested/deeper/stale.png"), b"png").unwrap();

        assert_eq!(prepare_output_dir(&dir).unwrap(), 2);
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_prepare_creates_missing_dir() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("a/b/c");

        assert_eq!(prepare_output_dir(&dir).unwrap(), 0);
        assert!(dir.is_dir());
    }
}
