//! Configuration system
//!
//! Every path and renderer setting the pipeline needs lives in
//! [`PlayblastConfig`], which is handed to the pipeline explicitly. Files are
//! loaded through the [`Config`] trait in either TOML or RON.

pub use serde::{Deserialize, Serialize};

use std::path::{Path, PathBuf};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match Format::of(path)? {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level configuration for one playblast run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayblastConfig {
    /// Studio path conventions
    pub paths: PathsConfig,
    /// Renderer executable and shell
    pub renderer: RendererConfig,
    /// Render globals written into the pre-render script
    pub globals: RenderGlobals,
    /// Scene compatibility checks
    pub scene: SceneConfig,
}

impl Config for PlayblastConfig {}

/// Filesystem roots used to locate scenes and place output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Renderer workspace (project) directory
    pub home_workspace: PathBuf,
    /// Root under which per-episode output directories are created
    pub output_root: PathBuf,
    /// Root of the versioned scene tree
    pub scenes_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            home_workspace: PathBuf::from("/mnt/projects/i4k"),
            output_root: PathBuf::from("/mnt/projects/i4k/out"),
            scenes_root: PathBuf::from("/mnt/projects/i4k/scenes"),
        }
    }
}

/// External renderer invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Batch render executable
    pub binary: PathBuf,
    /// Shell used to interpret the generated command
    pub shell: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("/usr/autodesk/maya2020/bin/Render"),
            shell: "sh".to_string(),
        }
    }
}

/// Render-global attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderGlobals {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Numeric image format code (32 = PNG)
    pub image_format: u32,
    /// Zero padding of the frame number
    pub extension_padding: u32,
}

impl Default for RenderGlobals {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            image_format: 32,
            extension_padding: 4,
        }
    }
}

/// Scene header and sanitization settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Header text that marks a scene as compatible with the target renderer
    pub version_marker: String,
    /// Lines containing any of these substrings are stripped from incompatible scenes
    pub denylist: Vec<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            version_marker: "requires maya \"2020\"".to_string(),
            denylist: vec![
                "colorManagementPrefs".to_string(),
                "OpenColorIO".to_string(),
                ".ocio".to_string(),
            ],
        }
    }
}
