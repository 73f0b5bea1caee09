use std::path::{Path, PathBuf};
use std::sync::Once;
use std::{env, fs};

use dirs::home_dir;

use crate::errors::LeaveError;

const DEFAULT_DIR_NAME: &str = ".leave_core";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("leave_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.leave_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("LEAVE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn ensure_dir(path: &Path) -> Result<(), LeaveError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
