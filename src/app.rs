// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor window and egui App implementation.
//!
//! This module wires the toolbar, properties panel and canvas to an
//! [`EditorSession`], re-rendering the frame after every change and asking
//! for confirmation before destructive actions.

use crate::editor::EditorSession;
use crate::error::ZoneError;
use crate::render::raster::swap_red_blue;
use crate::ui::{canvas, properties, toolbar};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Ask a yes/no question in a native dialog.
fn confirm(title: &str, description: &str) -> bool {
    let answer = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::YesNo)
        .show();
    matches!(answer, MessageDialogResult::Yes)
}

/// Show an error in a native dialog.
pub fn show_error(title: &str, description: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}

fn show_info(title: &str, description: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Main editor state.
pub struct EditorApp {
    session: EditorSession,

    /// Rendered frame for display
    texture: Option<egui::TextureHandle>,

    /// Set whenever the rendered frame is out of date
    needs_render: bool,

    /// Name entry contents for the selected zone
    name_buffer: String,
}

impl EditorApp {
    pub fn new(session: EditorSession) -> Self {
        let mut app = Self {
            session,
            texture: None,
            needs_render: true,
            name_buffer: String::new(),
        };
        app.sync_name();
        app
    }

    fn sync_name(&mut self) {
        self.name_buffer = self
            .session
            .store()
            .selected_zone()
            .map(|zone| zone.name.clone())
            .unwrap_or_default();
    }

    /// Log recoverable problems; report anything else to the operator.
    fn report(&self, result: Result<(), ZoneError>) {
        match result {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => log::warn!("{}", e),
            Err(e) => {
                log::error!("{}", e);
                show_error("Error", &e.to_string());
            }
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let mut frame = self.session.render();
        swap_red_blue(&mut frame);
        let size = [frame.width() as usize, frame.height() as usize];
        let image = egui::ColorImage::from_rgb(size, frame.as_raw());

        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("frame", image, egui::TextureOptions::LINEAR));
            }
        }
        self.needs_render = false;
    }

    fn handle_toolbar(&mut self, action: toolbar::ToolbarAction) {
        use toolbar::ToolbarAction;

        match action {
            ToolbarAction::RandomFrame => {
                let result = self
                    .session
                    .load_random_frame(&mut rand::thread_rng())
                    .map(|_| ());
                self.report(result);
            }
            ToolbarAction::ZoomIn => self.session.zoom_in(),
            ToolbarAction::ZoomOut => self.session.zoom_out(),
            ToolbarAction::ResetZoom => self.session.reset_zoom(),
            ToolbarAction::Save => match self.session.save() {
                Ok(()) => show_info(
                    "Success",
                    &format!(
                        "Configuration saved to {}",
                        self.session.config_path().display()
                    ),
                ),
                Err(e) => self.report(Err(e)),
            },
            ToolbarAction::ResetToOriginal => {
                if confirm(
                    "Confirm Reset",
                    "Reset to original configuration? All changes will be lost.",
                ) {
                    let result = self.session.reset_to_original();
                    self.report(result);
                    self.sync_name();
                }
            }
            ToolbarAction::None => return,
        }
        self.needs_render = true;
    }

    fn handle_properties(&mut self, action: properties::PropertiesAction) {
        use properties::PropertiesAction;

        match action {
            PropertiesAction::Select(index) => {
                self.session.select_zone(index);
                self.sync_name();
            }
            PropertiesAction::Add => {
                self.session.add_zone();
                self.sync_name();
            }
            PropertiesAction::Delete => {
                let name = self.name_buffer.clone();
                if confirm("Confirm Delete", &format!("Delete frame '{}'?", name)) {
                    let result = self.session.delete_selected().map(|_| ());
                    self.report(result);
                    self.sync_name();
                }
            }
            PropertiesAction::Rename(name) => {
                let result = self.session.edit_name(&name);
                self.report(result);
            }
            PropertiesAction::Slide(field, value) => {
                let result = self.session.slide(field, value);
                self.report(result);
            }
            PropertiesAction::Submit(field) => {
                let result = self.session.submit_entry(field);
                self.report(result);
            }
            PropertiesAction::None => return,
        }
        self.needs_render = true;
    }

    fn handle_canvas(&mut self, action: canvas::CanvasAction) {
        use canvas::CanvasAction;

        match action {
            // placement only, no resample
            CanvasAction::Pan(dx, dy) => self.session.pan(dx, dy),
            CanvasAction::ZoomIn => {
                self.session.zoom_in();
                self.needs_render = true;
            }
            CanvasAction::ZoomOut => {
                self.session.zoom_out();
                self.needs_render = true;
            }
            CanvasAction::None => {}
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let zoom_label = self.session.zoom_label();
            let frame_label = format!(
                "Frame {}/{}",
                self.session.frame_index(),
                self.session.video_info().frame_count
            );
            let action = toolbar::show(ui, &zoom_label, &frame_label);
            self.handle_toolbar(action);
        });

        let properties_action = egui::SidePanel::right("properties")
            .default_width(280.0)
            .show(ctx, |ui| {
                properties::show(ui, &mut self.session, &mut self.name_buffer)
            })
            .inner;
        self.handle_properties(properties_action);

        if self.needs_render || self.texture.is_none() {
            self.refresh_texture(ctx);
        }

        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let placement = self.texture.as_ref().map(|t| {
                    let [width, height] = t.size();
                    self.session.viewport().placement(width as u32, height as u32)
                });
                match placement {
                    Some(placement) => canvas::show(ui, &self.texture, placement),
                    None => canvas::CanvasAction::None,
                }
            })
            .inner;
        self.handle_canvas(canvas_action);

        if self.needs_render {
            ctx.request_repaint();
        }
    }
}

impl Drop for EditorApp {
    fn drop(&mut self) {
        self.session.close();
    }
}
