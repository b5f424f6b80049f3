// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration serialization and deserialization.
//!
//! This module reads and writes the configuration file in JSON or YAML,
//! chosen by file extension.

use crate::error::{Result, ZoneError};
use crate::models::config::AppConfig;
use crate::models::zone::Zone;
use serde::Serialize;
use std::path::Path;

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

/// Load a configuration, naming and coloring any zones that need it.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ZoneError::ConfigMissing(path.to_path_buf()),
        _ => ZoneError::Io(e),
    })?;

    let malformed = |reason: String| ZoneError::ConfigMalformed {
        path: path.to_path_buf(),
        reason,
    };
    let mut config: AppConfig = match Format::of(path) {
        Format::Json => serde_json::from_str(&text).map_err(|e| malformed(e.to_string()))?,
        Format::Yaml => serde_yaml::from_str(&text).map_err(|e| malformed(e.to_string()))?,
    };
    config.normalize();

    log::info!(
        "Configuration loaded from '{}' ({} zones)",
        path.display(),
        config.frames.len()
    );
    Ok(config)
}

/// Load a configuration, falling back to the documented defaults when the
/// file is missing or unreadable.
pub fn load_config_or_default(path: &Path) -> AppConfig {
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            log::warn!("Using default configuration...");
            AppConfig::default()
        }
    }
}

fn to_json_pretty<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `config` to `path`.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let write_error = |reason: String| ZoneError::ConfigWrite {
        path: path.to_path_buf(),
        reason,
    };
    let text = match Format::of(path) {
        Format::Json => to_json_pretty(config).map_err(|e| write_error(e.to_string()))?,
        Format::Yaml => serde_yaml::to_string(config).map_err(|e| write_error(e.to_string()))?,
    };
    std::fs::write(path, text).map_err(|e| write_error(e.to_string()))?;

    log::info!(
        "Configuration saved to '{}' ({} zones)",
        path.display(),
        config.frames.len()
    );
    Ok(())
}

/// Persist `zones` as the zone list of `config`, leaving every other key
/// as it was.
pub fn save_zones(config: &mut AppConfig, zones: Vec<Zone>, path: &Path) -> Result<()> {
    config.frames = zones;
    save_config(config, path)
}
