// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::{Path, PathBuf};

/// Return the application data directory, creating it if needed.
pub fn data_dir() -> PathBuf {
    let dir = base_dir().join("lastfix");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(path = %dir.display(), error = %e, "could not create data dir");
    }
    dir
}

fn base_dir() -> PathBuf {
    resolve_base(
        std::env::var_os("XDG_DATA_HOME").as_deref().map(Path::new),
        std::env::var_os("HOME").as_deref().map(Path::new),
    )
}

/// XDG data dir, then `~/.local/share`, then the temp dir.
fn resolve_base(xdg: Option<&Path>, home: Option<&Path>) -> PathBuf {
    if let Some(xdg) = xdg.filter(|p| !p.as_os_str().is_empty()) {
        return xdg.to_path_buf();
    }
    if let Some(home) = home {
        return home.join(".local").join("share");
    }
    std::env::temp_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins() {
        let base = resolve_base(Some(Path::new("/xdg")), Some(Path::new("/home/u")));
        assert_eq!(base, PathBuf::from("/xdg"));
    }

    #[test]
    fn home_fallback() {
        let base = resolve_base(None, Some(Path::new("/home/u")));
        assert_eq!(base, PathBuf::from("/home/u/.local/share"));
    }

    #[test]
    fn empty_xdg_is_ignored() {
        let base = resolve_base(Some(Path::new("")), Some(Path::new("/home/u")));
        assert_eq!(base, PathBuf::from("/home/u/.local/share"));
    }
}
