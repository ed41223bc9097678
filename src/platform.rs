// Probe Browser platform abstraction
// Provides platform-specific paths for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/probe-browser` (or `$XDG_CONFIG_HOME/probe-browser`)
/// - **macOS**: `~/Library/Application Support/ProbeBrowser`
/// - **Windows**: `%APPDATA%/ProbeBrowser`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| home_dir().join(".config"))
            .join("probe-browser")
    }
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("ProbeBrowser")
    }
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(home_dir)
            .join("ProbeBrowser")
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        home_dir().join(".probe-browser")
    }
}

/// Returns the platform-specific data directory (the SQLite store lives here).
///
/// - **Linux**: `~/.local/share/probe-browser` (or `$XDG_DATA_HOME/probe-browser`)
/// - **macOS**: `~/Library/Application Support/ProbeBrowser`
/// - **Windows**: `%APPDATA%/ProbeBrowser`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| home_dir().join(".local").join("share"))
            .join("probe-browser")
    }
    #[cfg(not(target_os = "linux"))]
    {
        get_config_dir()
    }
}

/// Returns the platform-specific downloads directory used as the default
/// save location for transfers.
pub fn get_downloads_dir() -> PathBuf {
    std::env::var_os("XDG_DOWNLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join("Downloads"))
}
