// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Default output directory resolution.

use std::path::{Path, PathBuf};

use urkunde_core::error::Result;

/// Return a subdirectory of the urkunde data dir (e.g. "certificates"),
/// creating it if needed.
pub fn data_subdir(name: &str) -> Result<PathBuf> {
    let dir = base_dir(
        std::env::var_os("XDG_DATA_HOME").as_deref().map(Path::new),
        std::env::var_os("HOME").as_deref().map(Path::new),
    )
    .join("urkunde")
    .join(name);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// XDG data dir, then `~/.local/share`, then the working directory.
fn base_dir(xdg: Option<&Path>, home: Option<&Path>) -> PathBuf {
    match (xdg, home) {
        (Some(xdg), _) if !xdg.as_os_str().is_empty() => xdg.to_path_buf(),
        (_, Some(home)) => home.join(".local").join("share"),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let dir = base_dir(Some(Path::new("/data")), Some(Path::new("/home/u")));
        assert_eq!(dir, PathBuf::from("/data"));
    }

    #[test]
    fn home_fallback_uses_local_share() {
        let dir = base_dir(None, Some(Path::new("/home/u")));
        assert_eq!(dir, PathBuf::from("/home/u/.local/share"));
        let dir = base_dir(Some(Path::new("")), Some(Path::new("/home/u")));
        assert_eq!(dir, PathBuf::from("/home/u/.local/share"));
    }

    #[test]
    fn no_environment_means_working_directory() {
        assert_eq!(base_dir(None, None), PathBuf::from("."));
    }
}
