//! Config file location.
//!
//! Lookup order: `--dir`, then `$XDG_CONFIG_HOME/moviedeck`, then
//! `$HOME/.config/moviedeck`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

const APP_DIR: &str = "moviedeck";
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path from `dir` and the process environment.
///
/// # Errors
///
/// Returns an error if `dir` is `None` and neither `XDG_CONFIG_HOME` nor
/// `HOME` yields an absolute directory.
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    config_path_from(
        dir,
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// Environment-free core of [`resolve_config_path`].
///
/// Relative or empty `XDG_CONFIG_HOME` values are ignored, as the XDG base
/// directory rules require.
fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    let base = xdg_config_home
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| {
            home.map(PathBuf::from)
                .filter(|p| p.is_absolute())
                .map(|h| h.join(".config"))
        });

    let Some(base) = base else {
        bail!("cannot locate config directory: set XDG_CONFIG_HOME or HOME, or pass --dir");
    };
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}
