// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zone overlay compositing.
//!
//! Outlines go straight onto the output, fills onto a separate working
//! copy, and the two are blended once for the whole frame before labels
//! are drawn on top.

use super::raster::{add_weighted, draw_outlined_text, draw_polygon, fill_polygon, Frame};
use crate::models::zone::{Color, Zone};
use crate::util::geometry::{centroid, zone_corners};

/// Weight of the outlined frame in the final blend.
pub const FRAME_WEIGHT: f64 = 0.7;
/// Weight of the filled working copy in the final blend.
pub const FILL_WEIGHT: f64 = 0.3;

pub const OUTLINE_THICKNESS: u32 = 2;
pub const SELECTED_OUTLINE_THICKNESS: u32 = 4;
pub const SELECTED_OUTLINE_COLOR: Color = Color::YELLOW;

/// Glyph scale for zone labels.
pub const LABEL_SCALE: u32 = 2;

/// Render `zones` over a copy of `frame`, highlighting `selected`.
///
/// The result depends only on the arguments.
pub fn composite(frame: &Frame, zones: &[Zone], selected: Option<usize>) -> Frame {
    if zones.is_empty() {
        return frame.clone();
    }

    let mut outlined = frame.clone();
    let mut filled = frame.clone();
    let mut label_anchors = Vec::with_capacity(zones.len());

    for (i, zone) in zones.iter().enumerate() {
        let corners = zone_corners(zone);
        let color = zone.display_color();

        if selected == Some(i) {
            draw_polygon(&mut outlined, &corners, SELECTED_OUTLINE_THICKNESS, SELECTED_OUTLINE_COLOR);
        } else {
            draw_polygon(&mut outlined, &corners, OUTLINE_THICKNESS, color);
        }
        fill_polygon(&mut filled, &corners, color);
        label_anchors.push(centroid(&corners));
    }

    let mut output = add_weighted(&outlined, FRAME_WEIGHT, &filled, FILL_WEIGHT);
    for (zone, anchor) in zones.iter().zip(label_anchors) {
        draw_outlined_text(&mut output, anchor, &zone.name, LABEL_SCALE);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::zone::Point;
    use crate::render::raster::solid_frame;

    fn gray_frame() -> Frame {
        solid_frame(200, 200, Color([100, 100, 100]))
    }

    fn square(color: Color) -> Zone {
        Zone::new("", Point::new(50, 50), Point::new(150, 150)).with_color(color)
    }

    #[test]
    fn test_no_zones_returns_input() {
        let frame = gray_frame();
        assert_eq!(composite(&frame, &[], None), frame);
    }

    #[test]
    fn test_input_is_not_modified() {
        let frame = gray_frame();
        let before = frame.clone();
        let _ = composite(&frame, &[square(Color::RED)], Some(0));
        assert_eq!(frame, before);
    }

    #[test]
    fn test_fill_is_blended() {
        let frame = gray_frame();
        let out = composite(&frame, &[square(Color([0, 0, 200]))], None);

        // 0.7 * 100 + 0.3 * fill
        assert_eq!(out.get_pixel(80, 120).0, [70, 70, 130]);
        assert_eq!(out.get_pixel(10, 10).0, [100, 100, 100]);
    }

    fn blend(outline: u8, fill: u8) -> u8 {
        (outline as f64 * FRAME_WEIGHT + fill as f64 * FILL_WEIGHT).round() as u8
    }

    #[test]
    fn test_outline_colors() {
        let frame = gray_frame();
        let zone = square(Color::GREEN);

        let plain = composite(&frame, &[zone.clone()], None);
        assert_eq!(plain.get_pixel(100, 50).0, [0, 255, 0]);

        let highlighted = composite(&frame, &[zone], Some(0));
        // yellow outline over the green fill
        assert_eq!(
            highlighted.get_pixel(100, 50).0,
            [blend(0, 0), blend(255, 255), blend(255, 0)]
        );
        // the thicker outline reaches two pixels out, past the fill
        assert_eq!(
            highlighted.get_pixel(100, 48).0,
            [blend(0, 100), blend(255, 100), blend(255, 100)]
        );
        assert_eq!(plain.get_pixel(100, 48).0, [100, 100, 100]);
    }

    #[test]
    fn test_label_drawn_at_centroid() {
        let frame = gray_frame();
        let mut zone = square(Color([0, 0, 200]));
        zone.name = "Nest".to_string();
        let out = composite(&frame, &[zone], None);

        let near_center = |p: &[u8; 3]| *p == Color::WHITE.0 || *p == Color::BLACK.0;
        let hits = (84..116)
            .flat_map(|x| (90..110).map(move |y| (x, y)))
            .filter(|&(x, y)| near_center(&out.get_pixel(x, y).0))
            .count();
        assert!(hits > 0);
    }

    #[test]
    fn test_zones_far_past_the_frame() {
        let frame = solid_frame(64, 48, Color([100, 100, 100]));

        let long = Zone::new("", Point::new(0, 0), Point::new(2_000_000_000, 10))
            .with_color(Color::GREEN);
        let out = composite(&frame, &[long], None);
        assert_eq!(out.get_pixel(30, 0).0, [0, 255, 0]);
        assert_eq!(out.get_pixel(30, 5).0, [blend(100, 0), blend(100, 255), blend(100, 0)]);
        assert_eq!(out.get_pixel(30, 20).0, [100, 100, 100]);

        let wide = Zone::new("", Point::new(-20_000_000, 5), Point::new(20_000_000, 20))
            .with_color(Color::RED);
        let out = composite(&frame, &[wide], None);
        assert_eq!(out.get_pixel(30, 12).0, [blend(100, 0), blend(100, 0), blend(100, 255)]);
        assert_eq!(out.get_pixel(63, 20).0, Color::RED.0);
        assert_eq!(out.get_pixel(30, 30).0, [100, 100, 100]);
    }

    #[test]
    fn test_repeatable() {
        let frame = gray_frame();
        let zones = vec![
            square(Color::RED).with_rotation(30.0),
            Zone::new("B", Point::new(120, 20), Point::new(20, 120)).with_color(Color::GREEN),
        ];
        assert_eq!(composite(&frame, &zones, Some(1)), composite(&frame, &zones, Some(1)));
    }
}
