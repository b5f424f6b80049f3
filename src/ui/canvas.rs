// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas showing the composited frame.
//!
//! The frame arrives already zoomed; the canvas only places it at the pan
//! offset and reports drags and scrolling back to the session.

use crate::render::viewport::ScreenRect;

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    None,
    Pan(f64, f64),
    ZoomIn,
    ZoomOut,
}

/// Display the canvas area and handle mouse interactions.
pub fn show(
    ui: &mut egui::Ui,
    texture: &Option<egui::TextureHandle>,
    placement: ScreenRect,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();
    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        let (rect, response) = ui.allocate_exact_size(available_size, egui::Sense::drag());
        let painter = ui.painter_at(rect);

        match texture {
            Some(texture) => {
                let image_rect = egui::Rect::from_min_size(
                    rect.min + egui::vec2(placement.x as f32, placement.y as f32),
                    egui::vec2(placement.width as f32, placement.height as f32),
                );
                painter.image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "No frame loaded",
                    egui::FontId::proportional(16.0),
                    egui::Color32::from_gray(180),
                );
            }
        }

        if response.dragged() {
            let delta = response.drag_delta();
            if delta != egui::Vec2::ZERO {
                action = CanvasAction::Pan(delta.x as f64, delta.y as f64);
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll > 0.1 {
                action = CanvasAction::ZoomIn;
            } else if scroll < -0.1 {
                action = CanvasAction::ZoomOut;
            }
        }
    });

    action
}
