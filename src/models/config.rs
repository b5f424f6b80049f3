// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persisted configuration.
//!
//! The configuration file carries the video path, playback settings and the
//! zone list. Keys this program does not know about are kept and written
//! back untouched.

use super::zone::{Zone, ZoneRecord};
use crate::util::color::assign_missing_colors;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

pub const DEFAULT_VIDEO_PATH: &str = "sample_video.mp4";
pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;

fn default_video_path() -> String {
    DEFAULT_VIDEO_PATH.to_string()
}

fn default_window_width() -> u32 {
    DEFAULT_WINDOW_WIDTH
}

fn default_window_height() -> u32 {
    DEFAULT_WINDOW_HEIGHT
}

fn default_true() -> bool {
    true
}

/// Zone list, naming each unnamed zone after its position.
fn deserialize_frames<'de, D>(deserializer: D) -> Result<Vec<Zone>, D::Error>
where
    D: Deserializer<'de>,
{
    let records = Vec::<ZoneRecord>::deserialize(deserializer)?;
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(i, record)| record.into_zone(i))
        .collect())
}

/// Complete configuration for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_video_path")]
    pub video_path: String,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_true")]
    pub fps_display: bool,
    #[serde(default)]
    pub draw_frames: bool,
    #[serde(default, deserialize_with = "deserialize_frames")]
    pub frames: Vec<Zone>,
    /// Unrecognised top-level keys, passed through on save.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            video_path: DEFAULT_VIDEO_PATH.to_string(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            fps_display: true,
            draw_frames: false,
            frames: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }
}

impl AppConfig {
    /// Give every uncolored zone a batch color. Names are settled while
    /// parsing, so an explicitly empty name stays empty.
    pub fn normalize(&mut self) {
        let assigned = assign_missing_colors(&mut self.frames);
        if assigned > 0 {
            log::info!("Assigned colors to {} zone(s) without one", assigned);
        }
    }

    pub fn video_path(&self) -> PathBuf {
        PathBuf::from(&self.video_path)
    }

    /// Target display size for playback; a zero dimension disables resizing.
    pub fn display_size(&self) -> Option<(u32, u32)> {
        if self.window_width > 0 && self.window_height > 0 {
            Some((self.window_width, self.window_height))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::zone::{Color, Point};

    #[test]
    fn test_defaults_for_missing_keys() {
        let config: AppConfig = serde_json::from_str(r#"{"video_path": "mice.mp4"}"#).unwrap();
        assert_eq!(config.video_path, "mice.mp4");
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, 600);
        assert!(config.fps_display);
        assert!(!config.draw_frames);
        assert!(config.frames.is_empty());
        assert!(config.extra.is_empty());

        let bare: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(bare.video_path, DEFAULT_VIDEO_PATH);
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let config: AppConfig =
            serde_json::from_str(r#"{"video_path": "a.mp4", "threshold": 0.25, "notes": {"by": "lab"}}"#)
                .unwrap();
        assert_eq!(config.extra["threshold"], 0.25);
        assert_eq!(config.extra["notes"]["by"], "lab");

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["threshold"], 0.25);
        assert_eq!(value["notes"]["by"], "lab");
        assert_eq!(value["video_path"], "a.mp4");
    }

    #[test]
    fn test_normalize_assigns_missing_colors() {
        let mut config = AppConfig::default();
        config.frames = vec![
            Zone::new("", Point::new(0, 0), Point::new(10, 10)),
            Zone::new("Kept", Point::new(0, 0), Point::new(10, 10)).with_color(Color([1, 2, 3])),
        ];
        config.normalize();

        assert_eq!(config.frames[0].name, "");
        assert!(config.frames[0].color.is_some());
        assert_eq!(config.frames[1].name, "Kept");
        assert_eq!(config.frames[1].color, Some(Color([1, 2, 3])));
    }

    #[test]
    fn test_only_absent_names_get_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"frames": [
                {"top_left": [0, 0], "bottom_right": [5, 5]},
                {"name": "", "top_left": [0, 0], "bottom_right": [5, 5]},
                {"name": "Arm", "top_left": [0, 0], "bottom_right": [5, 5]},
                {"top_left": [0, 0], "bottom_right": [5, 5]}
            ]}"#,
        )
        .unwrap();
        let names: Vec<&str> = config.frames.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, ["Frame_1", "", "Arm", "Frame_4"]);
    }

    #[test]
    fn test_display_size() {
        let mut config = AppConfig::default();
        assert_eq!(config.display_size(), Some((800, 600)));
        config.window_width = 0;
        assert_eq!(config.display_size(), None);
    }
}
