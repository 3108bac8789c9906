use log::LevelFilter;

/// Initialize logging for crossfill.
///
/// Logs at `Debug` when `debug_enabled` is set, `Info` otherwise; `RUST_LOG`
/// overrides both when present. Safe to call more than once (later calls are
/// no-ops), which lets tests and binaries share it.
pub fn init_logger(debug_enabled: bool) {
    use std::env;
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    if builder.try_init().is_ok() {
        log::debug!("logger initialized at {level:?} level");
    }
}
