//! Default values shared by the CLI commands.

use std::path::{Path, PathBuf};

/// Environment variable overriding the registry home.
pub const HOME_ENV: &str = "LAYOUT_CASCADE_HOME";

/// Build queue file inside the registry home.
pub const QUEUE_FILENAME: &str = "queue.jsonl";

/// Returns the default registry home directory.
///
/// Uses the platform data directory:
/// - Linux: `~/.local/share/layout-cascade`
/// - macOS: `~/Library/Application Support/layout-cascade`
/// - Windows: `{FOLDERID_RoamingAppData}\layout-cascade`
///
/// Falls back to `.layout-cascade` in the current directory if the platform
/// data directory cannot be determined.
pub fn default_home() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("layout-cascade"))
        .unwrap_or_else(|| PathBuf::from(".layout-cascade"))
}

/// Build queue of a registry home.
pub fn queue_path(home: &Path) -> PathBuf {
    home.join(QUEUE_FILENAME)
}
