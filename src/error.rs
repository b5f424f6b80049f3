// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types shared by the configuration, video and editing layers.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZoneError {
    #[error("Config file '{}' not found", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Error parsing config file '{}': {reason}", path.display())]
    ConfigMalformed { path: PathBuf, reason: String },

    #[error("Failed to save configuration to '{}': {reason}", path.display())]
    ConfigWrite { path: PathBuf, reason: String },

    #[error("Video file not found: {}", .0.display())]
    VideoNotFound(PathBuf),

    #[error("Could not open video file {}: {reason}", path.display())]
    VideoUnopenable { path: PathBuf, reason: String },

    #[error("Video read failed: {0}")]
    VideoRead(String),

    #[error("Invalid value '{input}' for {field}")]
    InvalidFieldInput { field: &'static str, input: String },

    #[error("No zones defined")]
    EmptyZoneSet,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl ZoneError {
    /// Whether the session can carry on after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidFieldInput { .. } | Self::EmptyZoneSet)
    }
}

pub type Result<T> = std::result::Result<T, ZoneError>;
