// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Display transforms.
//!
//! [`Viewport`] is the editor's zoom and pan: it only changes how the
//! composited frame is resampled and where it is placed on screen. Zone
//! coordinates are never touched.
//!
//! [`PlaybackScale`] is the player's resize-to-window. It scales the frame
//! and a throwaway copy of the zones together so overlays stay aligned.

use super::raster::Frame;
use crate::models::zone::{Point, Zone};
use crate::util::geometry::scale_zone;
use image::imageops::{self, FilterType};

pub const MIN_ZOOM: f64 = 0.2;
pub const MAX_ZOOM: f64 = 5.0;
pub const ZOOM_STEP: f64 = 1.2;

/// Position and size of the zoomed frame on the display surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: u32,
    pub height: u32,
}

/// Zoom factor and pan offset (screen pixels) for the editing display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    /// Zoom as a whole percentage, for display.
    pub fn zoom_percent(&self) -> i32 {
        (self.zoom * 100.0) as i32
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Back to 100% with no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Video pixel to screen position.
    pub fn to_screen(&self, point: Point) -> (f64, f64) {
        (
            point.x as f64 * self.zoom + self.pan_x,
            point.y as f64 * self.zoom + self.pan_y,
        )
    }

    /// Screen position back to (fractional) video pixels.
    pub fn to_video(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.pan_x) / self.zoom, (y - self.pan_y) / self.zoom)
    }

    /// Size of a `width` x `height` frame after zooming.
    pub fn scaled_size(&self, width: u32, height: u32) -> (u32, u32) {
        (
            ((width as f64 * self.zoom) as u32).max(1),
            ((height as f64 * self.zoom) as u32).max(1),
        )
    }

    /// Resample the composited frame by the zoom factor.
    pub fn apply(&self, frame: &Frame) -> Frame {
        if self.zoom == 1.0 {
            return frame.clone();
        }
        let (width, height) = self.scaled_size(frame.width(), frame.height());
        imageops::resize(frame, width, height, FilterType::Triangle)
    }

    /// Where a zoomed frame lands on the display surface.
    pub fn placement(&self, zoomed_width: u32, zoomed_height: u32) -> ScreenRect {
        ScreenRect {
            x: self.pan_x,
            y: self.pan_y,
            width: zoomed_width,
            height: zoomed_height,
        }
    }
}

/// Resize from video resolution to a fixed window size, per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackScale {
    pub width: u32,
    pub height: u32,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl PlaybackScale {
    /// `None` when there is no target size or the video size is unknown.
    pub fn new(video_width: u32, video_height: u32, target: Option<(u32, u32)>) -> Option<Self> {
        let (width, height) = target?;
        if video_width == 0 || video_height == 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            scale_x: width as f64 / video_width as f64,
            scale_y: height as f64 / video_height as f64,
        })
    }

    pub fn frame(&self, frame: &Frame) -> Frame {
        if frame.dimensions() == (self.width, self.height) {
            return frame.clone();
        }
        imageops::resize(frame, self.width, self.height, FilterType::Triangle)
    }

    /// Scaled copies of `zones` for drawing over a resized frame.
    pub fn zones(&self, zones: &[Zone]) -> Vec<Zone> {
        zones
            .iter()
            .map(|z| scale_zone(z, self.scale_x, self.scale_y))
            .collect()
    }
}
