// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback information overlay.

use super::raster::{draw_text, fill_rect, text_size, Frame};
use crate::models::zone::{Color, Point};

const HUD_SCALE: u32 = 2;
const BANNER_SCALE: u32 = 4;
const LINE_HEIGHT: i32 = 25;

/// What the player reports in the corner of each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HudInfo {
    /// Frames shown since the start (or last restart).
    pub frame: usize,
    pub total_frames: usize,
    pub fps: f64,
    /// Number of zones drawn, when overlays are on.
    pub overlays: Option<usize>,
    pub paused: bool,
}

impl HudInfo {
    /// Playback time of the current frame in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        if self.fps > 0.0 {
            self.frame as f64 / self.fps
        } else {
            0.0
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Frame: {}/{}", self.frame, self.total_frames),
            format!("Time: {:.2}s", self.elapsed_seconds()),
            format!("FPS: {:.1}", self.fps),
        ];
        if let Some(count) = self.overlays {
            lines.push(format!("Overlays: {} frames", count));
        }
        lines
    }
}

/// Draw the info block bottom-left, and a centered banner while paused.
pub fn draw_hud(frame: &mut Frame, info: &HudInfo) {
    let width = frame.width() as i32;
    let height = frame.height() as i32;
    let lines = info.lines();
    let start_y = height - lines.len() as i32 * LINE_HEIGHT - 10;

    for (i, line) in lines.iter().enumerate() {
        let baseline = start_y + i as i32 * LINE_HEIGHT;
        let (text_w, text_h) = text_size(line, HUD_SCALE);
        fill_rect(
            frame,
            Point::new(5, baseline - 20),
            Point::new(text_w + 15, baseline + 5),
            Color::BLACK,
        );
        draw_text(frame, 10, baseline - text_h, line, Color::GREEN, HUD_SCALE);
    }

    if info.paused {
        let text = "PAUSED";
        let (text_w, text_h) = text_size(text, BANNER_SCALE);
        let x = (width - text_w) / 2;
        let baseline = height / 2;
        fill_rect(
            frame,
            Point::new(x - 10, baseline - 40),
            Point::new(x + text_w + 10, baseline + 10),
            Color::BLACK,
        );
        draw_text(frame, x, baseline - text_h, text, Color::RED, BANNER_SCALE);
    }
}
