//! Render command construction
//!
//! Turns resolved paths and render parameters into the single shell command
//! that runs the batch renderer with a generated pre-render script. The script
//! disables every camera, picks the active one, applies the render globals and
//! lets the renderer batch-render the scene passed as the last argument.

mod script;

pub use script::{mel_string, shell_quote, MelScript};

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{RenderGlobals, RendererConfig};

/// Camera override value meaning "no override"
pub const NO_CAMERA_SENTINEL: &str = "None";

/// Fully built shell command, handed to the process runner as-is
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderCommand(String);

impl RenderCommand {
    #[cfg(test)]
    pub(crate) fn from_raw(text: &str) -> Self {
        Self(text.to_string())
    }

    /// Command text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inputs of a single render command
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec<'a> {
    /// Scene file rendered by the batch renderer
    pub scene_path: &'a Path,
    /// Output directory plus file name prefix for frames
    pub output_prefix: &'a Path,
    /// Renderer workspace opened before rendering
    pub workspace: &'a Path,
    /// Scene identifier, e.g. `EP01_003_anim`
    pub scene_id: &'a str,
    /// Episode identifier, e.g. `EP01`
    pub episode_id: &'a str,
    /// Requested camera; empty or `None` means no override
    pub camera_override: Option<&'a str>,
    /// Whether textures are displayed
    pub textured: bool,
}

/// Active camera selection embedded in the script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraChoice {
    /// Explicitly requested camera
    Override(String),
    /// First camera whose name starts with the episode, else the fallback name
    EpisodePrefix {
        /// Camera used when no scene camera matches the episode
        fallback: String,
    },
}

impl CameraChoice {
    /// Resolve the selection for a spec
    pub fn for_spec(spec: &CommandSpec<'_>) -> Self {
        match effective_override(spec.camera_override) {
            Some(camera) => Self::Override(camera.to_string()),
            None => Self::EpisodePrefix {
                fallback: fallback_camera(spec.scene_id, spec.episode_id),
            },
        }
    }
}

/// Override camera, unless it is empty or the `None` sentinel
pub fn effective_override(camera: Option<&str>) -> Option<&str> {
    camera.filter(|c| !c.is_empty() && *c != NO_CAMERA_SENTINEL)
}

/// Camera name used when nothing in the scene matches the episode:
/// `<episode>_<second scene token>Shape`
pub fn fallback_camera(scene_id: &str, episode_id: &str) -> String {
    let shot = scene_id.split('_').nth(1).unwrap_or_default();
    format!("{episode_id}_{shot}Shape")
}

/// Builds [`RenderCommand`]s for the hardware renderer
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    binary: PathBuf,
    globals: RenderGlobals,
}

impl CommandBuilder {
    /// Builder for a renderer binary and set of render globals
    pub fn new(renderer: &RendererConfig, globals: RenderGlobals) -> Self {
        Self {
            binary: renderer.binary.clone(),
            globals,
        }
    }

    /// Build the shell command for `spec`. Output depends on the inputs only.
    pub fn build(&self, spec: &CommandSpec<'_>) -> RenderCommand {
        let script = self.pre_render_script(spec);
        RenderCommand(format!(
            "{} -r hw2 -proj {} -preRender {} {}",
            shell_quote(&path_text(&self.binary)),
            shell_quote(&path_text(spec.workspace)),
            shell_quote(&script.to_source()),
            shell_quote(&path_text(spec.scene_path)),
        ))
    }

    /// The MEL executed by the renderer before the scene is rendered
    pub fn pre_render_script(&self, spec: &CommandSpec<'_>) -> MelScript {
        let camera = CameraChoice::for_spec(spec);
        let mut script = MelScript::new();

        script
            .declare_string("HOME", &path_text(spec.workspace))
            .declare_string("OUT_DIR", &path_text(spec.output_prefix))
            .declare_string("SCENE", spec.scene_id)
            .declare_string("EPISODE", spec.episode_id)
            .declare_int("ARG_TEXTURED", i64::from(spec.textured))
            .push("workspace -o $HOME")
            .push("string $cams[] = `ls -type \"camera\"`")
            .push("string $camName = \"\"");

        match &camera {
            CameraChoice::Override(name) => {
                script
                    .push("for ($cam in $cams) { setAttr($cam + \".rnd\", 0); }")
                    .push(format!("$camName = {}", mel_string(name)));
            }
            CameraChoice::EpisodePrefix { fallback } => {
                script
                    .push(
                        "for ($cam in $cams) { setAttr($cam + \".rnd\", 0); \
                         if (size($camName) == 0 && startsWith($cam, $EPISODE)) { $camName = $cam; } }",
                    )
                    .push(format!(
                        "if (size($camName) == 0) {{ $camName = {}; }}",
                        mel_string(fallback)
                    ));
            }
        }

        let g = self.globals;
        script
            .push(
                "print(\"tPlayblast for \" + $SCENE + \" using camera \" + $camName + \
                 \". Textured: \" + $ARG_TEXTURED + \"\\n\")",
            )
            .push("setAttr($camName + \".rnd\", 1)")
            .set_attr_string("defaultRenderGlobals.ren", "mayaHardware2")
            .set_attr("defaultResolution.width", g.width)
            .set_attr("defaultResolution.height", g.height)
            .set_attr("defaultRenderGlobals.imageFormat", g.image_format)
            .set_attr("defaultRenderGlobals.outFormatControl", 0)
            .set_attr("defaultRenderGlobals.animation", 1)
            .set_attr("defaultRenderGlobals.putFrameBeforeExt", 1)
            .set_attr("defaultRenderGlobals.extensionPadding", g.extension_padding)
            .set_attr("defaultRenderGlobals.byFrame", 1)
            .set_attr("defaultRenderGlobals.byFrameStep", 1)
            .set_attr("defaultRenderGlobals.startFrame", "`playbackOptions -query -minTime`")
            .set_attr("defaultRenderGlobals.endFrame", "`playbackOptions -query -maxTime`")
            .push("setAttr \"defaultRenderGlobals.imageFilePrefix\" -type \"string\" $OUT_DIR")
            .set_attr("defaultRenderGlobals.periodInExt", 1)
            .set_attr("defaultRenderGlobals.useMayaFileName", 0)
            .set_attr("hardwareRenderingGlobals.motionBlurEnable", 0);

        script
    }
}

fn path_text(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
