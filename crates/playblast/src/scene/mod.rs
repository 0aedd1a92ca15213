//! Scene compatibility check and in-place sanitization
//!
//! Scenes saved by a newer authoring tool reference a color-management config
//! the target renderer rejects. [`SceneValidator`] detects such scenes by their
//! header and strips the offending lines, leaving every other byte untouched.

mod markers;

pub use markers::MarkerSet;

use markers::contains;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::config::SceneConfig;
use crate::error::{PlayblastError, Result};

/// Result of a sanitization pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Number of lines removed from the file
    pub removed: usize,
}

/// Checks scene headers and strips incompatible configuration lines
#[derive(Debug, Clone)]
pub struct SceneValidator {
    version_marker: Vec<u8>,
    denylist: MarkerSet,
}

impl SceneValidator {
    /// Create a validator for the given version marker and denylist
    pub fn new(version_marker: impl Into<String>, denylist: MarkerSet) -> Self {
        Self {
            version_marker: version_marker.into().into_bytes(),
            denylist,
        }
    }

    /// Create a validator from scene configuration
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.version_marker.clone(), MarkerSet::new(&config.denylist))
    }

    /// Whether any line of the scene contains the expected version marker.
    ///
    /// Failing to open the file is an error; a read failure part way through
    /// counts as incompatible.
    pub fn is_compatible(&self, path: &Path) -> Result<bool> {
        let file = File::open(path).map_err(|e| PlayblastError::io(path, e))?;
        let mut reader = BufReader::new(file);
        let mut line = Vec::new();

        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    if contains(&line, &self.version_marker) {
                        return Ok(true);
                    }
                }
                Err(e) => {
                    log::warn!("Stopped reading {} while checking version: {}", path.display(), e);
                    return Ok(false);
                }
            }
        }
    }

    /// Rewrite the scene without any line matching the denylist.
    ///
    /// The new content goes to a temporary file next to the scene which then
    /// replaces the original, so an interrupted run leaves the original intact.
    pub fn sanitize(&self, path: &Path) -> Result<SanitizeReport> {
        let source = File::open(path).map_err(|e| PlayblastError::io(path, e))?;
        let permissions = source
            .metadata()
            .map_err(|e| PlayblastError::io(path, e))?
            .permissions();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| PlayblastError::io(dir, e))?;
        let mut reader = BufReader::new(source);
        let mut writer = BufWriter::new(temp);
        let mut line = Vec::new();
        let mut removed = 0;

        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|e| PlayblastError::io(path, e))?;
            if read == 0 {
                break;
            }
            if self.denylist.matches(&line) {
                removed += 1;
            } else {
                writer
                    .write_all(&line)
                    .map_err(|e| PlayblastError::io(path, e))?;
            }
        }

        let temp = writer
            .into_inner()
            .map_err(|e| PlayblastError::io(path, e.into_error()))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| PlayblastError::io(temp.path(), e))?;
        std::fs::set_permissions(temp.path(), permissions)
            .map_err(|e| PlayblastError::io(temp.path(), e))?;
        temp.persist(path)
            .map_err(|e| PlayblastError::io(path, e.error))?;

        log::info!("Cleaned scene {} ({} lines removed)", path.display(), removed);
        Ok(SanitizeReport { removed })
    }

    /// Sanitize the scene only when its header is not compatible
    pub fn ensure_compatible(&self, path: &Path) -> Result<Option<SanitizeReport>> {
        if self.is_compatible(path)? {
            log::debug!("Scene {} is compatible, leaving it untouched", path.display());
            return Ok(None);
        }
        self.sanitize(path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> SceneValidator {
        SceneValidator::new("requires maya \"2020\"", MarkerSet::new(["OpenColorIO"]))
    }

    fn write_scene(dir: &Path, contents: &str) -> std::path::PathBuf {
        let path = dir.join("EP01_003_anim.ma");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_sanitize_drops_marked_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path(), "keep\nuses OpenColorIO config\nkeep2\n");

        let report = validator().sanitize(&path).unwrap();
        assert_eq!(report.removed, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep\nkeep2\n");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path(), "keep\nuses OpenColorIO config\nkeep2");

        validator().sanitize(&path).unwrap();
        let once = std::fs::read(&path).unwrap();
        let report = validator().sanitize(&path).unwrap();

        assert_eq!(report.removed, 0);
        assert_eq!(std::fs::read(&path).unwrap(), once);
        assert_eq!(once, b"keep\nkeep2");
    }

    #[test]
    fn test_sanitize_preserves_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path(), "a\r\nOpenColorIO\r\nb\r\n");

        validator().sanitize(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\r\nb\r\n");
    }

    #[test]
    fn test_sanitize_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path(), "OpenColorIO\n");

        validator().sanitize(&path).unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(std::fs::read(&path).unwrap().is_empty());
    }

    #[test]
    fn test_is_compatible() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path(), "//Maya ASCII scene\nrequires maya \"2020\";\n");
        assert!(validator().is_compatible(&path).unwrap());

        let path = write_scene(dir.path(), "//Maya ASCII scene\nrequires maya \"2023\";\n");
        assert!(!validator().is_compatible(&path).unwrap());
    }

    #[test]
    fn test_is_compatible_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = validator()
            .is_compatible(&dir.path().join("missing.ma"))
            .unwrap_err();
        assert!(matches!(err, PlayblastError::Io { .. }));
    }

    #[test]
    fn test_ensure_compatible_skips_compatible_scene() {
        let dir = tempfile::tempdir().unwrap();
        let contents = "requires maya \"2020\";\nuses OpenColorIO config\n";
        let path = write_scene(dir.path(), contents);

        assert_eq!(validator().ensure_compatible(&path).unwrap(), None);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn test_ensure_compatible_cleans_incompatible_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path(), "requires maya \"2023\";\nuses OpenColorIO config\n");

        let report = validator().ensure_compatible(&path).unwrap();
        assert_eq!(report, Some(SanitizeReport { removed: 1 }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "requires maya \"2023\";\n");
    }

    #[test]
    fn test_from_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(
            dir.path(),
            "createNode camera;\ncolorManagementPrefs -e -cfp \"/studio/config.ocio\";\n",
        );

        let validator = SceneValidator::from_config(&SceneConfig::default());
        let report = validator.ensure_compatible(&path).unwrap();
        assert_eq!(report, Some(SanitizeReport { removed: 1 }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "createNode camera;\n");
    }
}
