//! Command-line definition
//!
//! Flags keep their historical single-dash spelling (`-scene EP01_003`);
//! [`normalize_args`] rewrites those to the `--scene` form clap expects.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use playblast::flag::parse_bool;
use playblast::request::{SceneArgs, DEFAULT_STAGE};

const LONG_FLAGS: &[&str] = &[
    "scene",
    "scene_path",
    "scene_version",
    "step",
    "cam",
    "out",
    "occlusion",
    "textured",
    "config",
    "dry_run",
    "help",
    "version",
];

/// Options that steer the tool itself rather than the render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Configuration file, if one was given
    pub config: Option<PathBuf>,
    /// Print the command instead of running it
    pub dry_run: bool,
    /// Occlusion pass requested (not supported)
    pub occlusion: bool,
}

pub fn command() -> Command {
    Command::new("tplayblast")
        .about("Renders one versioned scene through the hardware batch renderer")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("scene")
                .long("scene")
                .value_name("SCENE")
                .help("Scene to playblast, e.g. EP01_003_anim"),
        )
        .arg(
            Arg::new("scene_path")
                .long("scene_path")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Scene file to use instead of the versioned lookup"),
        )
        .arg(
            Arg::new("scene_version")
                .long("scene_version")
                .value_name("VERSION")
                .help("Scene version to playblast (latest when omitted)"),
        )
        .arg(
            Arg::new("step")
                .long("step")
                .value_name("STAGE")
                .default_value(DEFAULT_STAGE)
                .help("Production stage of the scene"),
        )
        .arg(
            Arg::new("cam")
                .long("cam")
                .value_name("CAMERA")
                .help("Active camera ('None' selects automatically)"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Output directory"),
        )
        .arg(bool_arg("occlusion", "no", "Make an occlusion playblast"))
        .arg(bool_arg("textured", "yes", "Display textures or not"))
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Configuration file (.toml or .ron)"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry_run")
                .action(ArgAction::SetTrue)
                .help("Prepare everything and print the renderer command without running it"),
        )
}

fn bool_arg(name: &'static str, default: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("BOOL")
        .num_args(0..=1)
        .default_value(default)
        .default_missing_value("yes")
        .value_parser(parse_bool)
        .help(help)
}

/// Rewrite `-flag` to `--flag` for every known long flag
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = text.strip_prefix('-') else {
                return arg;
            };
            let name = rest.split('=').next().unwrap_or(rest);
            if !rest.starts_with('-') && LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

/// Render arguments from parsed matches; a missing scene becomes empty and is
/// rejected by the pipeline
pub fn scene_args(matches: &ArgMatches) -> SceneArgs {
    let scene = matches.get_one::<String>("scene").cloned().unwrap_or_default();
    SceneArgs {
        scene_path: matches.get_one::<PathBuf>("scene_path").cloned(),
        version: matches.get_one::<String>("scene_version").cloned(),
        stage: matches
            .get_one::<String>("step")
            .cloned()
            .unwrap_or_else(|| DEFAULT_STAGE.to_string()),
        camera: matches.get_one::<String>("cam").cloned(),
        out: matches.get_one::<PathBuf>("out").cloned(),
        textured: matches.get_one::<bool>("textured").copied().unwrap_or(true),
        ..SceneArgs::new(scene)
    }
}

pub fn run_options(matches: &ArgMatches) -> RunOptions {
    RunOptions {
        config: matches.get_one::<PathBuf>("config").cloned(),
        dry_run: matches.get_flag("dry_run"),
        occlusion: matches.get_one::<bool>("occlusion").copied().unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ArgMatches, clap::Error> {
        let args = std::iter::once("tplayblast")
            .chain(args.iter().copied())
            .map(OsString::from);
        command().try_get_matches_from(normalize_args(args))
    }

    #[test]
    fn test_normalize_single_dash() {
        let args = ["tplayblast", "-scene", "EP01_003", "-textured=no", "--out", "/x", "-x", "-1"]
            .map(OsString::from);
        let normalized = normalize_args(args);
        assert_eq!(
            normalized,
            ["tplayblast", "--scene", "EP01_003", "--textured=no", "--out", "/x", "-x", "-1"]
                .map(OsString::from)
        );
    }

    #[test]
    fn test_defaults() {
        let matches = parse(&["-scene", "EP01_003_anim"]).unwrap();
        let args = scene_args(&matches);
        assert_eq!(args, SceneArgs::new("EP01_003_anim"));

        let options = run_options(&matches);
        assert_eq!(
            options,
            RunOptions {
                config: None,
                dry_run: false,
                occlusion: false
            }
        );
    }

    #[test]
    fn test_all_flags() {
        let matches = parse(&[
            "-scene",
            "EP01_003_anim",
            "-scene_version",
            "V002",
            "-step",
            "layout",
            "-cam",
            "camMain",
            "-out",
            "/tmp/frames",
            "-textured",
            "N",
            "-occlusion",
            "-dry_run",
        ])
        .unwrap();
        let args = scene_args(&matches);
        assert_eq!(args.version.as_deref(), Some("V002"));
        assert_eq!(args.stage, "layout");
        assert_eq!(args.camera.as_deref(), Some("camMain"));
        assert_eq!(args.out, Some(PathBuf::from("/tmp/frames")));
        assert!(!args.textured);

        let options = run_options(&matches);
        assert!(options.occlusion);
        assert!(options.dry_run);
    }

    #[test]
    fn test_missing_scene_is_left_to_pipeline() {
        let matches = parse(&[]).unwrap();
        assert_eq!(scene_args(&matches).scene, "");
    }

    #[test]
    fn test_invalid_bool_is_usage_error() {
        let err = parse(&["-scene", "EP01_003", "-textured", "maybe"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
