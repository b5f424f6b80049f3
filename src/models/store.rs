// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The ordered zone collection edited by the operator.
//!
//! Sequence order is the drawing order: later zones are drawn on top.

use super::zone::{Point, Zone};
use crate::util::color::color_for_index;

/// A single-field change to one zone.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneEdit {
    Name(String),
    TopLeftX(i32),
    TopLeftY(i32),
    BottomRightX(i32),
    BottomRightY(i32),
    Rotation(f64),
}

impl ZoneEdit {
    fn apply(self, zone: &mut Zone) {
        match self {
            ZoneEdit::Name(name) => zone.name = name,
            ZoneEdit::TopLeftX(x) => zone.top_left.x = x,
            ZoneEdit::TopLeftY(y) => zone.top_left.y = y,
            ZoneEdit::BottomRightX(x) => zone.bottom_right.x = x,
            ZoneEdit::BottomRightY(y) => zone.bottom_right.y = y,
            ZoneEdit::Rotation(degrees) => zone.rotation_degrees = degrees,
        }
    }
}

/// Ordered zones plus the current selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneStore {
    zones: Vec<Zone>,
    selected: Option<usize>,
}

impl ZoneStore {
    /// Wrap a loaded zone list, selecting the first zone if there is one.
    pub fn new(zones: Vec<Zone>) -> Self {
        let selected = if zones.is_empty() { None } else { Some(0) };
        Self { zones, selected }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Zone> {
        self.zones.get(index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_zone(&self) -> Option<&Zone> {
        self.selected.and_then(|i| self.zones.get(i))
    }

    /// Add a zone at the end and select it. Returns its index.
    pub fn append(&mut self, zone: Zone) -> usize {
        self.zones.push(zone);
        let index = self.zones.len() - 1;
        self.selected = Some(index);
        index
    }

    /// Add a zone with the default name, placement and color for the next
    /// index, sized to a quarter of the video (at most 200 px per side).
    pub fn append_default(&mut self, video_width: u32, video_height: u32) -> usize {
        let index = self.zones.len();
        let width = (video_width / 4).min(200) as i32;
        let height = (video_height / 4).min(200) as i32;
        let zone = Zone::new(
            Zone::default_name(index),
            Point::new(100, 100),
            Point::new(100 + width, 100 + height),
        )
        .with_color(color_for_index(index));
        self.append(zone)
    }

    /// Remove the zone at `index`; a no-op returning `None` when the index
    /// is out of range or the store is empty.
    ///
    /// The selection keeps its index when still valid, otherwise moves to
    /// the last zone.
    pub fn remove(&mut self, index: usize) -> Option<Zone> {
        if index >= self.zones.len() {
            return None;
        }
        let removed = self.zones.remove(index);
        self.selected = match (self.selected, self.zones.len()) {
            (_, 0) => None,
            (Some(sel), len) if sel >= len => Some(len - 1),
            (Some(sel), _) => Some(sel),
            (None, _) => Some(0),
        };
        Some(removed)
    }

    /// Apply one edit to the zone at `index`. Returns `false` without
    /// touching anything if there is no such zone.
    pub fn update(&mut self, index: usize, edit: ZoneEdit) -> bool {
        match self.zones.get_mut(index) {
            Some(zone) => {
                edit.apply(zone);
                true
            }
            None => false,
        }
    }

    /// Select the zone at `index`; ignored when out of bounds.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.zones.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Swap in a whole new zone list, e.g. after reloading from disk.
    pub fn replace_all(&mut self, zones: Vec<Zone>) {
        *self = Self::new(zones);
    }

    /// Owned copy of the zone list for persisting.
    pub fn to_vec(&self) -> Vec<Zone> {
        self.zones.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::zone::Color;

    fn zone(name: &str) -> Zone {
        Zone::new(name, Point::new(0, 0), Point::new(10, 10))
    }

    #[test]
    fn test_new_selects_first() {
        assert_eq!(ZoneStore::new(vec![zone("a")]).selected(), Some(0));
        assert_eq!(ZoneStore::new(Vec::new()).selected(), None);
    }

    #[test]
    fn test_append_default_zone() {
        let mut store = ZoneStore::new(vec![zone("a")]);
        let index = store.append_default(640, 480);

        assert_eq!(index, 1);
        assert_eq!(store.selected(), Some(1));
        let added = store.get(1).unwrap();
        assert_eq!(added.name, "Frame_2");
        assert_eq!(added.top_left, Point::new(100, 100));
        assert_eq!(added.bottom_right, Point::new(260, 220));
        assert_eq!(added.rotation_degrees, 0.0);
        assert_eq!(added.color, Some(color_for_index(1)));
    }

    #[test]
    fn test_append_default_caps_size_on_large_video() {
        let mut store = ZoneStore::default();
        store.append_default(1920, 1080);
        assert_eq!(store.get(0).unwrap().bottom_right, Point::new(300, 300));
    }

    #[test]
    fn test_remove_reclamps_selection() {
        let mut store = ZoneStore::new(vec![zone("a"), zone("b"), zone("c")]);
        store.select(2);
        assert_eq!(store.remove(2).unwrap().name, "c");
        assert_eq!(store.selected(), Some(1));

        store.select(0);
        store.remove(0);
        assert_eq!(store.selected(), Some(0));
        assert_eq!(store.selected_zone().unwrap().name, "b");
    }

    #[test]
    fn test_removing_last_zone_leaves_noops() {
        let mut store = ZoneStore::new(vec![zone("only")]);
        assert!(store.remove(0).is_some());
        assert!(store.is_empty());
        assert_eq!(store.selected(), None);

        assert!(store.remove(0).is_none());
        assert!(!store.select(0));
        assert!(!store.update(0, ZoneEdit::Name("x".into())));
        assert!(store.is_empty());
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn test_update_single_fields() {
        let mut store = ZoneStore::new(vec![zone("a")]);
        assert!(store.update(0, ZoneEdit::TopLeftX(5)));
        assert!(store.update(0, ZoneEdit::BottomRightY(-3)));
        assert!(store.update(0, ZoneEdit::Rotation(-90.0)));
        assert!(store.update(0, ZoneEdit::Name("Arena".into())));

        let z = store.get(0).unwrap();
        assert_eq!(z.top_left, Point::new(5, 0));
        assert_eq!(z.bottom_right, Point::new(10, -3));
        assert_eq!(z.rotation_degrees, -90.0);
        assert_eq!(z.name, "Arena");
        assert!(!store.update(3, ZoneEdit::TopLeftY(1)));
    }

    #[test]
    fn test_select_out_of_bounds_is_ignored() {
        let mut store = ZoneStore::new(vec![zone("a"), zone("b")]);
        store.select(1);
        assert!(!store.select(9));
        assert_eq!(store.selected(), Some(1));
    }

    #[test]
    fn test_replace_all() {
        let mut store = ZoneStore::new(vec![zone("a"), zone("b")]);
        store.select(1);
        store.replace_all(vec![zone("c").with_color(Color::BLACK)]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.selected(), Some(0));
        assert_eq!(store.get(0).unwrap().name, "c");
    }
}
