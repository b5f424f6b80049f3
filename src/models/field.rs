// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editable numeric zone fields.
//!
//! Each field gets one [`FieldControl`] that backs both a slider and a
//! text entry. Changing a control yields the [`ZoneEdit`] to apply, which
//! is how the editor learns about the change.

use super::store::ZoneEdit;
use super::zone::Zone;
use crate::error::{Result, ZoneError};

/// The numeric fields of a zone the operator can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    TopLeftX,
    TopLeftY,
    BottomRightX,
    BottomRightY,
    Rotation,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::TopLeftX,
        NumericField::TopLeftY,
        NumericField::BottomRightX,
        NumericField::BottomRightY,
        NumericField::Rotation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NumericField::TopLeftX => "Top-Left X",
            NumericField::TopLeftY => "Top-Left Y",
            NumericField::BottomRightX => "Bottom-Right X",
            NumericField::BottomRightY => "Bottom-Right Y",
            NumericField::Rotation => "Rotation (degrees)",
        }
    }

    /// Valid range for a video of the given size.
    pub fn range(self, video_width: u32, video_height: u32) -> (i32, i32) {
        match self {
            NumericField::TopLeftX | NumericField::BottomRightX => (0, video_width as i32),
            NumericField::TopLeftY | NumericField::BottomRightY => (0, video_height as i32),
            NumericField::Rotation => (-180, 180),
        }
    }

    /// Current value of this field on `zone`.
    pub fn read(self, zone: &Zone) -> i32 {
        match self {
            NumericField::TopLeftX => zone.top_left.x,
            NumericField::TopLeftY => zone.top_left.y,
            NumericField::BottomRightX => zone.bottom_right.x,
            NumericField::BottomRightY => zone.bottom_right.y,
            NumericField::Rotation => zone.rotation_degrees as i32,
        }
    }

    pub fn edit(self, value: i32) -> ZoneEdit {
        match self {
            NumericField::TopLeftX => ZoneEdit::TopLeftX(value),
            NumericField::TopLeftY => ZoneEdit::TopLeftY(value),
            NumericField::BottomRightX => ZoneEdit::BottomRightX(value),
            NumericField::BottomRightY => ZoneEdit::BottomRightY(value),
            NumericField::Rotation => ZoneEdit::Rotation(value as f64),
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Current value, valid range and entry text for one numeric field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldControl {
    pub field: NumericField,
    pub value: i32,
    pub min: i32,
    pub max: i32,
    /// Contents of the text entry; may hold unparsed input.
    pub text: String,
}

impl FieldControl {
    pub fn new(field: NumericField, min: i32, max: i32) -> Self {
        Self {
            field,
            value: min.max(0).min(max),
            min,
            max,
            text: min.max(0).min(max).to_string(),
        }
    }

    /// Show `value` without emitting a change.
    pub fn sync(&mut self, value: i32) {
        self.value = value;
        self.text = value.to_string();
    }

    /// The slider moved to `value`.
    pub fn slide(&mut self, value: i32) -> ZoneEdit {
        let value = value.clamp(self.min, self.max);
        self.sync(value);
        self.field.edit(value)
    }

    /// Commit the text entry.
    ///
    /// Out-of-range numbers are clamped and the text rewritten. Anything
    /// that does not parse is rejected and the last valid value restored.
    pub fn submit(&mut self) -> Result<ZoneEdit> {
        let input = self.text.trim();
        match input.parse::<i32>() {
            Ok(parsed) => {
                let value = parsed.clamp(self.min, self.max);
                self.sync(value);
                Ok(self.field.edit(value))
            }
            Err(_) => {
                let err = ZoneError::InvalidFieldInput {
                    field: self.field.label(),
                    input: input.to_string(),
                };
                self.text = self.value.to_string();
                Err(err)
            }
        }
    }
}

/// One control per [`NumericField`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldControls {
    controls: [FieldControl; 5],
}

impl FieldControls {
    pub fn new(video_width: u32, video_height: u32) -> Self {
        let controls = NumericField::ALL.map(|field| {
            let (min, max) = field.range(video_width, video_height);
            FieldControl::new(field, min, max)
        });
        Self { controls }
    }

    pub fn get(&self, field: NumericField) -> &FieldControl {
        &self.controls[field.slot()]
    }

    pub fn get_mut(&mut self, field: NumericField) -> &mut FieldControl {
        &mut self.controls[field.slot()]
    }

    /// Refresh every control from `zone`.
    pub fn sync_from(&mut self, zone: &Zone) {
        for control in &mut self.controls {
            control.sync(control.field.read(zone));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::zone::Point;

    #[test]
    fn test_ranges_follow_video_size() {
        let controls = FieldControls::new(640, 480);
        let x = controls.get(NumericField::BottomRightX);
        assert_eq!((x.min, x.max), (0, 640));
        let y = controls.get(NumericField::TopLeftY);
        assert_eq!((y.min, y.max), (0, 480));
        let r = controls.get(NumericField::Rotation);
        assert_eq!((r.min, r.max), (-180, 180));
        assert_eq!(r.value, 0);
    }

    #[test]
    fn test_sync_from_zone() {
        let mut controls = FieldControls::new(640, 480);
        let zone = Zone::new("z", Point::new(5, 6), Point::new(70, 80)).with_rotation(-30.0);
        controls.sync_from(&zone);

        assert_eq!(controls.get(NumericField::TopLeftX).text, "5");
        assert_eq!(controls.get(NumericField::BottomRightY).value, 80);
        assert_eq!(controls.get(NumericField::Rotation).value, -30);
    }

    #[test]
    fn test_submit_clamps_and_resyncs() {
        let mut control = FieldControl::new(NumericField::Rotation, -180, 180);
        control.text = "400".to_string();

        assert_eq!(control.submit().unwrap(), ZoneEdit::Rotation(180.0));
        assert_eq!(control.value, 180);
        assert_eq!(control.text, "180");
    }

    #[test]
    fn test_submit_rejects_non_numeric() {
        let mut control = FieldControl::new(NumericField::TopLeftX, 0, 640);
        control.sync(42);
        control.text = "4x2".to_string();

        let err = control.submit().unwrap_err();
        assert!(matches!(err, ZoneError::InvalidFieldInput { .. }));
        assert_eq!(control.value, 42);
        assert_eq!(control.text, "42");
    }

    #[test]
    fn test_slide_updates_text() {
        let mut control = FieldControl::new(NumericField::BottomRightY, 0, 480);
        assert_eq!(control.slide(120), ZoneEdit::BottomRightY(120));
        assert_eq!(control.text, "120");
        assert_eq!(control.slide(999), ZoneEdit::BottomRightY(480));
    }
}
