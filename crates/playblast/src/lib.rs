//! # Playblast
//!
//! Renders one versioned scene through the hardware batch renderer.
//!
//! ## Flow
//!
//! 1. Resolve the scene file and output directory ([`Playblast::resolve`])
//! 2. Empty the output directory
//! 3. Strip color-management lines from scenes saved by a newer tool version
//! 4. Build the renderer command with its generated pre-render script
//! 5. Run it and hand back stdout, stderr and the exit code
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use playblast::prelude::*;
//!
//! fn main() -> Result<(), PlayblastError> {
//!     let config = PlayblastConfig::default();
//!     let locator = VersionedLayout::new(&config.paths.scenes_root);
//!     let runner = ShellRunner::new(config.renderer.shell.clone());
//!     let blast = Playblast::new(config, locator, runner);
//!
//!     let request = blast.resolve(SceneArgs::new("EP01_003_anim"))?;
//!     let outcome = blast.run(&request)?;
//!     println!("{}", String::from_utf8_lossy(&outcome.stdout));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod command;
pub mod config;
pub mod flag;
pub mod locator;
pub mod output;
pub mod request;
pub mod runner;
pub mod scene;

mod error;
mod pipeline;

pub use error::{PlayblastError, Result};
pub use pipeline::Playblast;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        command::{CommandBuilder, CommandSpec, RenderCommand},
        config::{Config, PlayblastConfig},
        locator::{SceneLocator, VersionedLayout},
        request::{RenderRequest, SceneArgs},
        runner::{CommandRunner, RenderOutcome, ShellRunner},
        scene::SceneValidator,
        Playblast, PlayblastError,
    };
}
