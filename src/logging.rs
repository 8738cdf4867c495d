use std::path::{Path, PathBuf};

pub const LOG_TARGET_STARTUP: &str = "g_breathing::startup";

/// Log directory in the user config folder
///
/// - macOS: ~/Library/Application Support/GBreathing/logs/
/// - Windows: %APPDATA%/GBreathing/logs/
/// - Linux: ~/.config/GBreathing/logs/
pub fn log_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("GBreathing").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Pick the log directory from the `log_dir` config entry.
/// Relative entries sit under the installation directory; no entry means [`log_dir`].
pub fn resolve_log_dir(configured: Option<&str>, install_dir: &Path) -> PathBuf {
    match configured.map(str::trim).filter(|dir| !dir.is_empty()) {
        Some(dir) if Path::new(dir).is_absolute() => PathBuf::from(dir),
        Some(dir) => install_dir.join(dir),
        None => log_dir(),
    }
}

/// Initialize tracing with file rotation
///
/// Log rotation:
/// - Daily rotation (new file each day)
/// - Files named: g-breathing.YYYY-MM-DD.log
///
/// Log output:
/// - Debug builds: Console + File
/// - Release builds: File only
///
/// `RUST_LOG` wins over `default_level`; an unparsable level falls back to `warn`.
pub fn initialize_tracing(log_dir: &Path, default_level: &str) {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(log_dir, "g-breathing.log");

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // stdin carries G-load samples, so the console layer writes to stderr
    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!("Log directory: {}", log_dir.display());
}

pub fn log_runtime_environment() {
    use sysinfo::System;

    let version = env!("CARGO_PKG_VERSION");
    let os_name = System::long_os_version()
        .or_else(System::name)
        .unwrap_or_else(|| "Unknown OS".to_string());
    let kernel = System::kernel_version().unwrap_or_else(|| "Unknown Kernel".to_string());
    let architecture = std::env::consts::ARCH;

    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Starting GBreathing v{} on ({})",
        version,
        architecture
    );
    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Operating System: {} (kernel {})",
        os_name,
        kernel
    );
}
