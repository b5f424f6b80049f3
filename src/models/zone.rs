// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zone data structures.
//!
//! This module defines the core data structures for representing
//! named, colored, rotatable rectangles in video pixel coordinates.

use serde::{Deserialize, Serialize};

/// A 2D point in video pixel coordinates, persisted as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [i32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// A color triple in the video's native B, G, R channel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255]);
    pub const BLACK: Color = Color([0, 0, 0]);
    /// Selection highlight.
    pub const YELLOW: Color = Color([0, 255, 255]);
    pub const GREEN: Color = Color([0, 255, 0]);
    pub const RED: Color = Color([0, 0, 255]);

    /// Build from RGB components, reordering into B, G, R.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color([b, g, r])
    }

    pub fn channels(&self) -> [u8; 3] {
        self.0
    }
}

fn zero_rotation() -> f64 {
    0.0
}

/// A named, colored rectangle that may be rotated about its own center.
///
/// `top_left` and `bottom_right` are taken as given: an inverted or empty
/// box is legal and still renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ZoneRecord")]
pub struct Zone {
    pub name: String,
    pub top_left: Point,
    pub bottom_right: Point,
    /// Degrees in [-180, 180], clockwise-positive with y pointing down.
    #[serde(rename = "rotation")]
    pub rotation_degrees: f64,
    /// Unset until a color generator fills it.
    pub color: Option<Color>,
}

/// A zone as stored on disk, where only the corners are required.
///
/// An absent (or null) name is kept apart from an empty one so that only
/// absent names are replaced by the positional default.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneRecord {
    #[serde(default)]
    name: Option<String>,
    top_left: Point,
    bottom_right: Point,
    #[serde(rename = "rotation", default = "zero_rotation")]
    rotation_degrees: f64,
    #[serde(default)]
    color: Option<Color>,
}

impl ZoneRecord {
    /// The zone at position `index` of a zone list.
    pub fn into_zone(self, index: usize) -> Zone {
        let name = self.name.unwrap_or_else(|| Zone::default_name(index));
        Zone {
            name,
            top_left: self.top_left,
            bottom_right: self.bottom_right,
            rotation_degrees: self.rotation_degrees,
            color: self.color,
        }
    }
}

impl From<ZoneRecord> for Zone {
    /// Outside of a list there is no position, so an absent name is empty.
    fn from(record: ZoneRecord) -> Self {
        Zone {
            name: record.name.unwrap_or_default(),
            top_left: record.top_left,
            bottom_right: record.bottom_right,
            rotation_degrees: record.rotation_degrees,
            color: record.color,
        }
    }
}

impl Zone {
    /// Create an unrotated, uncolored zone.
    pub fn new(name: impl Into<String>, top_left: Point, bottom_right: Point) -> Self {
        Self {
            name: name.into(),
            top_left,
            bottom_right,
            rotation_degrees: 0.0,
            color: None,
        }
    }

    /// Default label for the zone at `index` in the sequence.
    pub fn default_name(index: usize) -> String {
        format!("Frame_{}", index + 1)
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Color used for drawing; white stands in until one is assigned.
    pub fn display_color(&self) -> Color {
        self.color.unwrap_or(Color::WHITE)
    }
}
