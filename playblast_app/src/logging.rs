//! Logging setup

/// Initialize the logging system.
///
/// Logs go to stderr at `info` unless `RUST_LOG` says otherwise, leaving
/// stdout to the renderer's own output.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}
