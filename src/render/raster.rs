// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pixel-level drawing primitives.
//!
//! Frames are 3-channel 8-bit buffers holding the video's native B, G, R
//! channel order. Everything here clips to the frame bounds, so shapes may
//! extend past the edges.

use crate::models::zone::{Color, Point};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{ImageBuffer, Rgb, RgbImage};

/// A video frame; channel order is B, G, R despite the `Rgb` pixel type.
pub type Frame = RgbImage;

/// Glyph cell size of the bitmap font at scale 1.
const GLYPH_SIZE: i32 = 8;

/// A blank frame filled with `color`.
pub fn solid_frame(width: u32, height: u32, color: Color) -> Frame {
    ImageBuffer::from_pixel(width, height, Rgb(color.channels()))
}

/// Swap the first and third channels in place, converting between RGB
/// and the native B, G, R order.
pub fn swap_red_blue(image: &mut RgbImage) {
    for pixel in image.pixels_mut() {
        pixel.0.swap(0, 2);
    }
}

#[inline]
fn put(frame: &mut Frame, x: i64, y: i64, color: Color) {
    if x >= 0 && y >= 0 && x < frame.width() as i64 && y < frame.height() as i64 {
        frame.put_pixel(x as u32, y as u32, Rgb(color.channels()));
    }
}

/// Solid disc of the given integer radius.
fn draw_disc(frame: &mut Frame, cx: i64, cy: i64, radius: i64, color: Color) {
    if radius <= 0 {
        put(frame, cx, cy, color);
        return;
    }
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put(frame, cx + dx, cy + dy, color);
            }
        }
    }
}

/// The part of segment `a`-`b` inside the box `min`..=`max` (Liang-Barsky),
/// or `None` when the segment misses it.
fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    min: (f64, f64),
    max: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let edges = [
        (-dx, a.0 - min.0),
        (dx, max.0 - a.0),
        (-dy, a.1 - min.1),
        (dy, max.1 - a.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}

/// Straight segment from `a` to `b`, `thickness` pixels wide.
///
/// The segment is clipped to the frame (grown by the pen radius) first, so
/// only visible pixels are walked whatever the endpoints are.
pub fn draw_line(frame: &mut Frame, a: Point, b: Point, thickness: u32, color: Color) {
    let radius = (thickness / 2) as i64;
    let pad = radius as f64;
    let bounds_max = (
        frame.width() as f64 - 1.0 + pad,
        frame.height() as f64 - 1.0 + pad,
    );
    let Some((start, end)) = clip_segment(
        (a.x as f64, a.y as f64),
        (b.x as f64, b.y as f64),
        (-pad, -pad),
        bounds_max,
    ) else {
        return;
    };

    let (mut x, mut y) = (start.0.round() as i64, start.1.round() as i64);
    let (x1, y1) = (end.0.round() as i64, end.1.round() as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        draw_disc(frame, x, y, radius, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Closed outline through `points`.
pub fn draw_polygon(frame: &mut Frame, points: &[Point], thickness: u32, color: Color) {
    for (i, &start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        draw_line(frame, start, end, thickness, color);
    }
}

/// Fill the interior of the polygon through `points` (even-odd rule,
/// sampled at pixel centers).
pub fn fill_polygon(frame: &mut Frame, points: &[Point], color: Color) {
    if points.len() < 3 || frame.width() == 0 || frame.height() == 0 {
        return;
    }
    let max_x = frame.width() as f64 - 1.0;
    let min_y = points.iter().map(|p| p.y as i64).min().unwrap_or(0).max(0);
    let max_y = points
        .iter()
        .map(|p| p.y as i64)
        .max()
        .unwrap_or(0)
        .min(frame.height() as i64 - 1);

    let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
    for y in min_y..=max_y {
        let yc = y as f64 + 0.5;
        crossings.clear();
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            let (ay, by) = (a.y as f64, b.y as f64);
            if (ay <= yc && by > yc) || (by <= yc && ay > yc) {
                let t = (yc - ay) / (by - ay);
                let (ax, bx) = (a.x as f64, b.x as f64);
                crossings.push(ax + t * (bx - ax));
            }
        }
        crossings.sort_by(|l, r| l.total_cmp(r));

        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil().max(0.0);
            let end = ((span[1] - 0.5).ceil() - 1.0).min(max_x);
            if start > end {
                continue;
            }
            for x in start as i64..=end as i64 {
                put(frame, x, y, color);
            }
        }
    }
}

/// Axis-aligned filled rectangle between two inclusive corners, clipped
/// to the frame.
pub fn fill_rect(frame: &mut Frame, top_left: Point, bottom_right: Point, color: Color) {
    let x0 = top_left.x.min(bottom_right.x).max(0) as i64;
    let x1 = (top_left.x.max(bottom_right.x) as i64).min(frame.width() as i64 - 1);
    let y0 = top_left.y.min(bottom_right.y).max(0) as i64;
    let y1 = (top_left.y.max(bottom_right.y) as i64).min(frame.height() as i64 - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            put(frame, x, y, color);
        }
    }
}

/// Per-pixel `a * alpha + b * beta`, rounded and saturated.
///
/// Both frames must have the same dimensions.
pub fn add_weighted(a: &Frame, alpha: f64, b: &Frame, beta: f64) -> Frame {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    let mut out = a.clone();
    for (dst, src) in out.iter_mut().zip(b.as_raw()) {
        let mixed = *dst as f64 * alpha + *src as f64 * beta;
        *dst = mixed.round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Width and height of `text` drawn at `scale`.
pub fn text_size(text: &str, scale: u32) -> (i32, i32) {
    let scale = scale.max(1) as i32;
    (text.chars().count() as i32 * GLYPH_SIZE * scale, GLYPH_SIZE * scale)
}

/// Bitmap text with its top-left corner at (`x`, `y`).
pub fn draw_text(frame: &mut Frame, x: i32, y: i32, text: &str, color: Color, scale: u32) {
    let scale = scale.max(1) as i64;
    let glyph_size = GLYPH_SIZE as i64;
    let y = y as i64;
    let mut cursor_x = x as i64;
    for ch in text.chars() {
        let glyph = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?'));
        if let Some(glyph) = glyph {
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..glyph_size {
                    if (bits >> col) & 1 == 0 {
                        continue;
                    }
                    let px = cursor_x + col * scale;
                    let py = y + row as i64 * scale;
                    for sy in 0..scale {
                        for sx in 0..scale {
                            put(frame, px + sx, py + sy, color);
                        }
                    }
                }
            }
        }
        cursor_x += glyph_size * scale;
    }
}

/// Text centered on `center`: a white halo first, then black on top.
pub fn draw_outlined_text(frame: &mut Frame, center: Point, text: &str, scale: u32) {
    let (w, h) = text_size(text, scale);
    let x = center.x.saturating_sub(w / 2);
    let y = center.y.saturating_sub(h / 2);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx != 0 || dy != 0 {
                draw_text(
                    frame,
                    x.saturating_add(dx),
                    y.saturating_add(dy),
                    text,
                    Color::WHITE,
                    scale,
                );
            }
        }
    }
    draw_text(frame, x, y, text, Color::BLACK, scale);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(frame: &Frame, x: u32, y: u32) -> [u8; 3] {
        frame.get_pixel(x, y).0
    }

    #[test]
    fn test_swap_red_blue() {
        let mut image = solid_frame(2, 1, Color([1, 2, 3]));
        swap_red_blue(&mut image);
        assert_eq!(px(&image, 1, 0), [3, 2, 1]);
    }

    #[test]
    fn test_fill_rectangle_interior_only() {
        let mut frame = solid_frame(40, 40, Color::BLACK);
        let square = [
            Point::new(10, 10),
            Point::new(20, 10),
            Point::new(20, 20),
            Point::new(10, 20),
        ];
        fill_polygon(&mut frame, &square, Color::WHITE);

        assert_eq!(px(&frame, 15, 15), [255; 3]);
        assert_eq!(px(&frame, 10, 10), [255; 3]);
        assert_eq!(px(&frame, 9, 15), [0; 3]);
        assert_eq!(px(&frame, 25, 15), [0; 3]);
        assert_eq!(px(&frame, 15, 25), [0; 3]);
    }

    #[test]
    fn test_fill_clips_to_frame() {
        let mut frame = solid_frame(10, 10, Color::BLACK);
        let big = [
            Point::new(-50, -50),
            Point::new(50, -50),
            Point::new(50, 50),
            Point::new(-50, 50),
        ];
        fill_polygon(&mut frame, &big, Color::GREEN);
        assert!(frame.pixels().all(|p| p.0 == Color::GREEN.0));
    }

    #[test]
    fn test_degenerate_polygon_fills_nothing() {
        let mut frame = solid_frame(10, 10, Color::BLACK);
        fill_polygon(&mut frame, &[Point::new(5, 5); 4], Color::WHITE);
        assert!(frame.pixels().all(|p| p.0 == [0; 3]));
    }

    #[test]
    fn test_line_thickness() {
        let mut thin = solid_frame(20, 20, Color::BLACK);
        draw_line(&mut thin, Point::new(2, 10), Point::new(17, 10), 2, Color::RED);
        assert_eq!(px(&thin, 10, 10), Color::RED.0);
        assert_eq!(px(&thin, 10, 11), Color::RED.0);
        assert_eq!(px(&thin, 10, 12), [0; 3]);

        let mut thick = solid_frame(20, 20, Color::BLACK);
        draw_line(&mut thick, Point::new(2, 10), Point::new(17, 10), 4, Color::RED);
        assert_eq!(px(&thick, 10, 12), Color::RED.0);
        assert_eq!(px(&thick, 10, 13), [0; 3]);
    }

    #[test]
    fn test_far_endpoints_are_clipped() {
        let mut frame = solid_frame(64, 48, Color::BLACK);
        draw_line(&mut frame, Point::new(0, 10), Point::new(2_000_000_000, 10), 2, Color::RED);
        assert_eq!(px(&frame, 0, 10), Color::RED.0);
        assert_eq!(px(&frame, 63, 10), Color::RED.0);
        assert_eq!(px(&frame, 30, 12), [0; 3]);

        draw_line(&mut frame, Point::new(i32::MIN, 30), Point::new(i32::MAX, 30), 4, Color::GREEN);
        assert_eq!(px(&frame, 5, 30), Color::GREEN.0);

        // entirely outside: nothing drawn
        let mut untouched = solid_frame(64, 48, Color::BLACK);
        draw_line(&mut untouched, Point::new(-900, -5), Point::new(900, -5), 2, Color::RED);
        assert!(untouched.pixels().all(|p| p.0 == [0; 3]));
    }

    #[test]
    fn test_fill_with_extreme_coordinates() {
        let mut frame = solid_frame(10, 10, Color::BLACK);
        let huge = [
            Point::new(i32::MIN, 2),
            Point::new(i32::MAX, 2),
            Point::new(i32::MAX, 6),
            Point::new(i32::MIN, 6),
        ];
        fill_polygon(&mut frame, &huge, Color::WHITE);
        assert_eq!(px(&frame, 0, 3), [255; 3]);
        assert_eq!(px(&frame, 9, 5), [255; 3]);
        assert_eq!(px(&frame, 5, 7), [0; 3]);

        fill_rect(&mut frame, Point::new(i32::MIN, 8), Point::new(i32::MAX, 8), Color::RED);
        assert_eq!(px(&frame, 4, 8), Color::RED.0);
    }

    #[test]
    fn test_add_weighted() {
        let a = solid_frame(2, 2, Color([100, 200, 0]));
        let b = solid_frame(2, 2, Color([200, 0, 250]));
        let out = add_weighted(&a, 0.7, &b, 0.3);
        // 70 + 60, 140 + 0, 0 + 75
        assert_eq!(px(&out, 1, 1), [130, 140, 75]);
    }

    #[test]
    fn test_add_weighted_of_identical_frames_is_identity() {
        let mut a = solid_frame(3, 1, Color::BLACK);
        a.put_pixel(0, 0, Rgb([1, 128, 255]));
        a.put_pixel(1, 0, Rgb([17, 99, 254]));
        assert_eq!(add_weighted(&a, 0.7, &a, 0.3), a);
    }

    #[test]
    fn test_text_extent() {
        assert_eq!(text_size("Cage", 2), (64, 16));
        let mut frame = solid_frame(40, 20, Color::WHITE);
        draw_text(&mut frame, 0, 0, "I", Color::BLACK, 1);
        assert!(frame.pixels().any(|p| p.0 == [0; 3]));
        assert!(frame.enumerate_pixels().all(|(x, y, p)| p.0 == [255; 3] || (x < 8 && y < 8)));
    }

    #[test]
    fn test_outlined_text_uses_both_colors() {
        let mut frame = solid_frame(60, 30, Color::GREEN);
        draw_outlined_text(&mut frame, Point::new(30, 15), "Ab", 1);
        assert!(frame.pixels().any(|p| p.0 == Color::WHITE.0));
        assert!(frame.pixels().any(|p| p.0 == Color::BLACK.0));
    }
}
