// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module computes the corners of rotated rectangles and the
//! coordinate scaling used when zones are drawn over a resized frame.

use crate::models::zone::{Point, Zone};

/// Sine and cosine of an angle in degrees.
///
/// The angle is reduced to [0, 360) first and quarter turns are exact, so
/// `θ` and `θ + 360` agree and axis-aligned results survive truncation.
fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let reduced = degrees.rem_euclid(360.0);
    if reduced == 0.0 {
        (0.0, 1.0)
    } else if reduced == 90.0 {
        (1.0, 0.0)
    } else if reduced == 180.0 {
        (0.0, -1.0)
    } else if reduced == 270.0 {
        (-1.0, 0.0)
    } else {
        reduced.to_radians().sin_cos()
    }
}

/// Corners of the rectangle spanned by `top_left`/`bottom_right`, rotated
/// by `rotation_degrees` about its center.
///
/// Corners come back in the order top-left, top-right, bottom-right,
/// bottom-left of the unrotated box. Coordinates are truncated toward zero,
/// not rounded.
pub fn rotated_corners(top_left: Point, bottom_right: Point, rotation_degrees: f64) -> [Point; 4] {
    let (x1, y1) = (top_left.x as f64, top_left.y as f64);
    let (x2, y2) = (bottom_right.x as f64, bottom_right.y as f64);
    let cx = (x1 + x2) / 2.0;
    let cy = (y1 + y2) / 2.0;

    let (sin, cos) = sin_cos_degrees(rotation_degrees);
    let rotate = |x: f64, y: f64| {
        let (dx, dy) = (x - cx, y - cy);
        let rx = dx * cos - dy * sin;
        let ry = dx * sin + dy * cos;
        Point::new((rx + cx) as i32, (ry + cy) as i32)
    };

    [rotate(x1, y1), rotate(x2, y1), rotate(x2, y2), rotate(x1, y2)]
}

/// Corners of a zone.
pub fn zone_corners(zone: &Zone) -> [Point; 4] {
    rotated_corners(zone.top_left, zone.bottom_right, zone.rotation_degrees)
}

/// Arithmetic mean of the corners, truncated.
pub fn centroid(corners: &[Point; 4]) -> Point {
    let sx: f64 = corners.iter().map(|p| p.x as f64).sum();
    let sy: f64 = corners.iter().map(|p| p.y as f64).sum();
    Point::new((sx / 4.0) as i32, (sy / 4.0) as i32)
}

/// Scale a point per axis, truncating.
pub fn scale_point(point: Point, scale_x: f64, scale_y: f64) -> Point {
    Point::new(
        (point.x as f64 * scale_x) as i32,
        (point.y as f64 * scale_y) as i32,
    )
}

/// A copy of `zone` with both endpoints scaled; rotation, name and color
/// are unchanged.
pub fn scale_zone(zone: &Zone, scale_x: f64, scale_y: f64) -> Zone {
    Zone {
        top_left: scale_point(zone.top_left, scale_x, scale_y),
        bottom_right: scale_point(zone.bottom_right, scale_x, scale_y),
        ..zone.clone()
    }
}
