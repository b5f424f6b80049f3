// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zone list and properties panel.
//!
//! Lists the zones, and for the selected one shows its name plus a slider
//! and a numeric entry per editable field.

use crate::editor::EditorSession;
use crate::models::field::NumericField;

/// Result of properties panel interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertiesAction {
    None,
    Select(usize),
    Add,
    Delete,
    Rename(String),
    Slide(NumericField, i32),
    Submit(NumericField),
}

/// Display the properties panel.
///
/// `name_buffer` holds the name entry between frames.
pub fn show(
    ui: &mut egui::Ui,
    session: &mut EditorSession,
    name_buffer: &mut String,
) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Zones");
    ui.separator();

    let selected = session.store().selected();
    egui::ScrollArea::vertical()
        .max_height(200.0)
        .show(ui, |ui| {
            for (i, label) in session.zone_labels().into_iter().enumerate() {
                if ui.selectable_label(selected == Some(i), label).clicked() {
                    action = PropertiesAction::Select(i);
                }
            }
        });

    ui.horizontal(|ui| {
        if ui.button("➕ Add Frame").clicked() {
            action = PropertiesAction::Add;
        }
        if ui
            .add_enabled(selected.is_some(), egui::Button::new("🗑 Delete Frame"))
            .clicked()
        {
            action = PropertiesAction::Delete;
        }
    });

    ui.separator();

    if selected.is_none() {
        ui.label(egui::RichText::new("No zone selected").weak());
        return action;
    }

    ui.label("Name:");
    if ui.text_edit_singleline(name_buffer).changed() {
        action = PropertiesAction::Rename(name_buffer.clone());
    }

    ui.add_space(8.0);

    for field in NumericField::ALL {
        let control = session.control(field);
        let (mut value, min, max) = (control.value, control.min, control.max);

        ui.label(field.label());
        ui.horizontal(|ui| {
            let slider = egui::Slider::new(&mut value, min..=max).show_value(false);
            if ui.add(slider).changed() {
                action = PropertiesAction::Slide(field, value);
            }

            let entry = egui::TextEdit::singleline(session.entry_text_mut(field)).desired_width(60.0);
            if ui.add(entry).lost_focus() {
                action = PropertiesAction::Submit(field);
            }
        });
    }

    action
}
