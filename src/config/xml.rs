//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - `BATCH_RENAME_CONFIG` names an explicit file, which must exist; otherwise the
//!   OS default path is used when present.
//!
//! Notes:
//! - Unknown XML fields are an error, to surface misconfigurations early.
//! - Values are trimmed before parsing.

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::{default_config_path, env_config_path};
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    force: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    verbose: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    whole_name: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    lower_extension: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    zero_pad: Option<bool>,
}

// Booleans written by hand tend to carry whitespace and other spellings.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = opt else { return Ok(None) };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "yes" | "1" => Ok(Some(true)),
        "false" | "no" | "0" => Ok(Some(false)),
        other => Err(serde::de::Error::custom(format!("invalid boolean '{other}'"))),
    }
}

// Map XmlConfig onto a Config; absent fields keep their current value.
fn apply_xml(parsed: XmlConfig, cfg: &mut Config) -> Result<()> {
    if let Some(s) = parsed.log_level.as_deref() {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }
    if let Some(v) = parsed.force {
        cfg.force = v;
    }
    if let Some(v) = parsed.verbose {
        cfg.verbose = v;
    }
    if let Some(v) = parsed.whole_name {
        cfg.naming.whole_name = v;
    }
    if let Some(v) = parsed.lower_extension {
        cfg.naming.lower_extension = v;
    }
    if let Some(v) = parsed.zero_pad {
        cfg.naming.zero_pad = v;
    }
    Ok(())
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    let mut cfg = Config::default();
    apply_xml(parsed, &mut cfg).with_context(|| format!("invalid value in '{}'", path.display()))?;
    Ok(cfg)
}

/// The config file that applies to this run, if any.
/// An explicit `BATCH_RENAME_CONFIG` is returned whether or not it exists.
pub fn config_file_location() -> Option<PathBuf> {
    env_config_path().or_else(default_config_path)
}

/// Load the effective config file.
/// Returns Ok(None) when no explicit file is named and the default one is absent.
pub fn load_config() -> Result<Option<Config>> {
    if let Some(path) = env_config_path() {
        debug!(path = %path.display(), "loading config from environment");
        return load_config_from_xml_path(&path).map(Some);
    }
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    debug!(path = %path.display(), "loading default config");
    load_config_from_xml_path(&path).map(Some)
}
