//! Render request model

use std::path::PathBuf;

/// Default production stage
pub const DEFAULT_STAGE: &str = "animation";

/// Episode identifier of a scene: everything before the first `_`
pub fn episode_of(scene: &str) -> &str {
    scene.split('_').next().unwrap_or(scene)
}

/// Raw inputs for one run, before any path resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneArgs {
    /// Scene identifier
    pub scene: String,
    /// Explicit scene file, bypassing the locator
    pub scene_path: Option<PathBuf>,
    /// Scene version, e.g. `v012`
    pub version: Option<String>,
    /// Production stage
    pub stage: String,
    /// Camera override; `None` text means no override
    pub camera: Option<String>,
    /// Explicit output directory
    pub out: Option<PathBuf>,
    /// Whether textures are displayed
    pub textured: bool,
}

impl SceneArgs {
    /// Arguments for `scene` with every other option at its default
    pub fn new(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            scene_path: None,
            version: None,
            stage: DEFAULT_STAGE.to_string(),
            camera: None,
            out: None,
            textured: true,
        }
    }
}

/// A fully resolved render request. Built once, never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    scene: String,
    episode: String,
    stage: String,
    version: Option<String>,
    camera_override: Option<String>,
    textured: bool,
    scene_path: PathBuf,
    output_directory: PathBuf,
}

impl RenderRequest {
    /// Assemble a request from raw arguments and the resolved paths
    pub fn new(args: SceneArgs, scene_path: PathBuf, output_directory: PathBuf) -> Self {
        Self {
            episode: episode_of(&args.scene).to_string(),
            scene: args.scene,
            stage: args.stage,
            version: args.version,
            camera_override: args.camera,
            textured: args.textured,
            scene_path,
            output_directory,
        }
    }

    /// Scene identifier
    pub fn scene(&self) -> &str {
        &self.scene
    }

    /// Episode identifier derived from the scene
    pub fn episode(&self) -> &str {
        &self.episode
    }

    /// Production stage
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Scene version, if one was requested
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Camera override as given on the command line
    pub fn camera_override(&self) -> Option<&str> {
        self.camera_override.as_deref()
    }

    /// Whether textures are displayed
    pub fn textured(&self) -> bool {
        self.textured
    }

    /// Scene file to render
    pub fn scene_path(&self) -> &std::path::Path {
        &self.scene_path
    }

    /// Directory receiving the rendered frames
    pub fn output_directory(&self) -> &std::path::Path {
        &self.output_directory
    }

    /// Output directory joined with the scene name; the renderer's file prefix
    pub fn output_prefix(&self) -> PathBuf {
        self.output_directory.join(&self.scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_of() {
        assert_eq!(episode_of("EP01_003_anim"), "EP01");
        assert_eq!(episode_of("EP01_003"), "EP01");
        assert_eq!(episode_of("_003"), "");
        assert_eq!(episode_of("EP07"), "EP07");
    }

    #[test]
    fn test_request_derives_episode_and_prefix() {
        let mut args = SceneArgs::new("EP01_003_anim");
        args.version = Some("V002".to_string());
        let request = RenderRequest::new(
            args,
            PathBuf::from("/scenes/EP01_003_anim.ma"),
            PathBuf::from("/out/EP01/EP01_003_anim_v002/animation"),
        );

        assert_eq!(request.episode(), "EP01");
        assert_eq!(request.stage(), DEFAULT_STAGE);
        assert_eq!(request.version(), Some("V002"));
        assert!(request.textured());
        assert_eq!(
            request.output_prefix(),
            PathBuf::from("/out/EP01/EP01_003_anim_v002/animation/EP01_003_anim")
        );
    }
}
