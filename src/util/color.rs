// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zone color generation.
//!
//! Two generators live here and they are not interchangeable:
//! [`color_for_index`] colors a zone the operator has just created, while
//! [`batch_colors`] (through [`assign_missing_colors`]) colors the zones a
//! configuration file left without one.

use crate::models::zone::{Color, Zone};

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618033988749895;

/// Convert HSV (all components in [0, 1]) to RGB in [0, 1].
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// HSV to a native-order color, truncating each channel.
fn hsv_to_color(h: f64, s: f64, v: f64) -> Color {
    let (r, g, b) = hsv_to_rgb(h, s, v);
    Color::from_rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Color for a zone created at `index`, spaced along the golden-ratio hue
/// sequence.
pub fn color_for_index(index: usize) -> Color {
    let hue = (index as f64 * GOLDEN_RATIO_CONJUGATE) % 1.0;
    hsv_to_color(hue, 0.8, 0.9)
}

/// `count` colors with evenly spaced hues and alternating saturation/value.
pub fn batch_colors(count: usize) -> Vec<Color> {
    (0..count)
        .map(|i| {
            let hue = i as f64 / count as f64;
            let saturation = 0.8 + (i % 2) as f64 * 0.2;
            let value = 0.9 + (i % 3) as f64 * 0.1;
            hsv_to_color(hue, saturation, value.min(1.0))
        })
        .collect()
}

/// Color every zone whose color is unset, in the order those zones appear.
///
/// Zones that already carry a color are left alone, and the batch is sized
/// to the uncolored subset only. Returns how many zones were colored.
pub fn assign_missing_colors(zones: &mut [Zone]) -> usize {
    let missing = zones.iter().filter(|z| z.color.is_none()).count();
    if missing == 0 {
        return 0;
    }

    let mut colors = batch_colors(missing).into_iter();
    for zone in zones.iter_mut().filter(|z| z.color.is_none()) {
        zone.color = colors.next();
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::zone::Point;
    use std::collections::HashSet;

    fn zone(color: Option<Color>) -> Zone {
        let mut zone = Zone::new("z", Point::new(0, 0), Point::new(1, 1));
        zone.color = color;
        zone
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (1.0, 0.0, 0.0));
        assert_eq!(hsv_to_rgb(0.5, 1.0, 1.0), (0.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(0.3, 0.0, 0.4), (0.4, 0.4, 0.4));
    }

    #[test]
    fn test_index_color_is_deterministic() {
        assert_eq!(color_for_index(7), color_for_index(7));
        assert_eq!(color_for_index(0), Color([45, 45, 229]));
    }

    #[test]
    fn test_first_ten_index_colors_are_distinct() {
        let colors: HashSet<Color> = (0..10).map(color_for_index).collect();
        assert_eq!(colors.len(), 10);
    }

    #[test]
    fn test_batch_of_two() {
        let colors = batch_colors(2);
        // hue 0.0, s 0.8, v 0.9
        assert_eq!(colors[0], Color([45, 45, 229]));
        // hue 0.5, s 1.0, v 1.0
        assert_eq!(colors[1], Color([255, 255, 0]));
    }

    #[test]
    fn test_assign_only_touches_uncolored_zones() {
        let existing = Color([9, 8, 7]);
        let mut zones = vec![zone(None), zone(Some(existing)), zone(None)];

        let assigned = assign_missing_colors(&mut zones);

        let expected = batch_colors(2);
        assert_eq!(assigned, 2);
        assert_eq!(zones[0].color, Some(expected[0]));
        assert_eq!(zones[1].color, Some(existing));
        assert_eq!(zones[2].color, Some(expected[1]));
    }

    #[test]
    fn test_assign_with_nothing_missing() {
        let mut zones = vec![zone(Some(Color::WHITE))];
        assert_eq!(assign_missing_colors(&mut zones), 0);
        assert_eq!(zones[0].color, Some(Color::WHITE));
    }
}
