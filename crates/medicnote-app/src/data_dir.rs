// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::{Path, PathBuf};

/// Return the application data directory. Not created here; a missing
/// settings file renders with placeholders.
pub fn data_dir() -> PathBuf {
    data_dir_from(
        std::env::var_os("XDG_DATA_HOME").as_deref().map(Path::new),
        std::env::var_os("HOME").as_deref().map(Path::new),
    )
}

/// Default location of the doctor/clinic settings document.
pub fn default_settings_path() -> PathBuf {
    data_dir().join("settings.json")
}

/// Default location of the render config.
pub fn default_config_path() -> PathBuf {
    data_dir().join("render.json")
}

fn data_dir_from(xdg: Option<&Path>, home: Option<&Path>) -> PathBuf {
    // Try XDG data dir, then fallback to home
    let base = match (xdg, home) {
        (Some(xdg), _) => xdg.to_path_buf(),
        (None, Some(home)) => home.join(".local").join("share"),
        // Last resort
        (None, None) => PathBuf::from("/tmp"),
    };
    base.join("medicnote")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let dir = data_dir_from(Some(Path::new("/xdg")), Some(Path::new("/home/a")));
        assert_eq!(dir, PathBuf::from("/xdg/medicnote"));
    }

    #[test]
    fn home_fallback() {
        let dir = data_dir_from(None, Some(Path::new("/home/a")));
        assert_eq!(dir, PathBuf::from("/home/a/.local/share/medicnote"));
        assert_eq!(data_dir_from(None, None), PathBuf::from("/tmp/medicnote"));
    }
}
