//! One playblast run: resolve, prepare, build, render

use std::path::Path;

use crate::command::{CommandBuilder, CommandSpec, RenderCommand};
use crate::config::PlayblastConfig;
use crate::error::{PlayblastError, Result};
use crate::locator::SceneLocator;
use crate::output::{output_dir, prepare_output_dir};
use crate::request::{episode_of, RenderRequest, SceneArgs};
use crate::runner::{CommandRunner, RenderOutcome};
use crate::scene::SceneValidator;

/// Drives a single scene through the renderer
pub struct Playblast<L, R> {
    config: PlayblastConfig,
    locator: L,
    runner: R,
}

impl<L: SceneLocator, R: CommandRunner> Playblast<L, R> {
    /// Pipeline over an explicit configuration, locator and runner
    pub fn new(config: PlayblastConfig, locator: L, runner: R) -> Self {
        Self {
            config,
            locator,
            runner,
        }
    }

    /// Turn raw arguments into a request.
    ///
    /// Fails with [`PlayblastError::Usage`] when no scene is given or the scene
    /// sits inside the output directory (which is emptied before rendering),
    /// and with [`PlayblastError::SceneNotFound`] when the scene file does not
    /// exist.
    pub fn resolve(&self, args: SceneArgs) -> Result<RenderRequest> {
        if args.scene.trim().is_empty() {
            return Err(PlayblastError::Usage("Scene is not provided.".to_string()));
        }

        let scene_path = match &args.scene_path {
            Some(path) => path.clone(),
            None => self
                .locator
                .resolve(&args.scene, &args.stage, args.version.as_deref())?,
        };
        if !scene_path.exists() {
            return Err(PlayblastError::SceneNotFound(scene_path));
        }
        log::info!("Input path: {}", scene_path.display());

        let output_directory = output_dir(
            &self.config.paths.output_root,
            args.out.as_deref(),
            &args.scene,
            episode_of(&args.scene),
            args.version.as_deref(),
            &args.stage,
        );
        if scene_inside(&scene_path, &output_directory)? {
            return Err(PlayblastError::Usage(format!(
                "Scene {} is inside the output directory {}, which is emptied before rendering",
                scene_path.display(),
                output_directory.display()
            )));
        }
        log::info!("Output path: {}", output_directory.join(&args.scene).display());

        Ok(RenderRequest::new(args, scene_path, output_directory))
    }

    /// Clear the output directory, make the scene compatible and build the
    /// render command. Nothing is spawned.
    pub fn prepare(&self, request: &RenderRequest) -> Result<RenderCommand> {
        prepare_output_dir(request.output_directory())?;

        SceneValidator::from_config(&self.config.scene).ensure_compatible(request.scene_path())?;

        let output_prefix = request.output_prefix();
        let spec = CommandSpec {
            scene_path: request.scene_path(),
            output_prefix: &output_prefix,
            workspace: &self.config.paths.home_workspace,
            scene_id: request.scene(),
            episode_id: request.episode(),
            camera_override: request.camera_override(),
            textured: request.textured(),
        };
        Ok(CommandBuilder::new(&self.config.renderer, self.config.globals).build(&spec))
    }

    /// Prepare and render, blocking until the renderer exits
    pub fn run(&self, request: &RenderRequest) -> Result<RenderOutcome> {
        let command = self.prepare(request)?;
        log::info!("Rendering {} ...", request.scene());
        let outcome = self.runner.run(&command)?;
        if outcome.success() {
            log::info!("Render of {} finished", request.scene());
        } else {
            log::error!(
                "Renderer exited with {:?} for {}",
                outcome.exit_code,
                request.scene()
            );
        }
        Ok(outcome)
    }
}

/// Whether `scene` lives somewhere below `dir`. A directory that does not
/// exist yet cannot contain an existing scene.
fn scene_inside(scene: &Path, dir: &Path) -> Result<bool> {
    let dir = match dir.canonicalize() {
        Ok(dir) => dir,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(PlayblastError::io(dir, e)),
    };
    let scene = scene
        .canonicalize()
        .map_err(|e| PlayblastError::io(scene, e))?;
    Ok(scene.starts_with(dir))
}
