//! Config file location and symlink checks.

use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BATCH_RENAME_CONFIG";

/// OS-appropriate default config path.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(mut base) = config_dir() {
        base.push("batch_rename");
        base.push("config.xml");
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("batch_rename")
                .join("config.xml")
        })
    }
}

/// Config file named by `BATCH_RENAME_CONFIG`, made absolute against the working directory.
pub fn env_config_path() -> Option<PathBuf> {
    let raw = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty())?;
    let p = PathBuf::from(raw);
    if p.is_absolute() {
        return Some(p);
    }
    Some(env::current_dir().map(|cwd| cwd.join(&p)).unwrap_or(p))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
