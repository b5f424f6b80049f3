// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with frame, zoom and file actions.

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    RandomFrame,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Save,
    ResetToOriginal,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, zoom_label: &str, frame_label: &str) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("🎲 Random Frame").clicked() {
            action = ToolbarAction::RandomFrame;
        }
        ui.label(frame_label);

        ui.separator();

        if ui.button("🔍+ Zoom In").clicked() {
            action = ToolbarAction::ZoomIn;
        }
        if ui.button("🔍- Zoom Out").clicked() {
            action = ToolbarAction::ZoomOut;
        }
        if ui.button("Reset Zoom").clicked() {
            action = ToolbarAction::ResetZoom;
        }
        ui.label(zoom_label);

        ui.separator();

        if ui.button("💾 Save Config").clicked() {
            action = ToolbarAction::Save;
        }
        if ui.button("↺ Reset to Original").clicked() {
            action = ToolbarAction::ResetToOriginal;
        }

        ui.separator();
        ui.label(
            egui::RichText::new("Drag to pan, scroll to zoom")
                .italics()
                .weak(),
        );
    });

    action
}
