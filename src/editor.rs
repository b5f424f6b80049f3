// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editing session state.
//!
//! [`EditorSession`] owns everything one editing window works on: the
//! configuration and where it came from, the zone store, the viewport, the
//! field controls and the video frame being drawn over. Every mutation is
//! followed by a fresh [`EditorSession::render`] from the UI.

use crate::error::{Result, ZoneError};
use crate::io::media::{open_video, read_frame_at, VideoInfo, VideoSource};
use crate::io::serialization::{load_config, save_zones};
use crate::models::config::AppConfig;
use crate::models::field::{FieldControl, FieldControls, NumericField};
use crate::models::store::{ZoneEdit, ZoneStore};
use crate::models::zone::Zone;
use crate::render::compositor::composite;
use crate::render::raster::Frame;
use crate::render::viewport::Viewport;
use rand::Rng;
use std::path::{Path, PathBuf};

pub struct EditorSession {
    config: AppConfig,
    config_path: PathBuf,
    store: ZoneStore,
    viewport: Viewport,
    controls: FieldControls,
    video: Box<dyn VideoSource>,
    frame: Frame,
    frame_index: usize,
}

impl EditorSession {
    /// Load the configuration at `config_path` and open its video.
    pub fn open(config_path: &Path) -> Result<Self> {
        let config = load_config(config_path)?;
        let video = open_video(&config.video_path())?;
        Self::new(config, config_path, video, &mut rand::thread_rng())
    }

    /// Start a session on an already opened video, showing a random frame.
    pub fn new(
        config: AppConfig,
        config_path: &Path,
        mut video: Box<dyn VideoSource>,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let info = video.info();
        let (frame_index, frame) = read_random_frame(video.as_mut(), rng)?;
        let store = ZoneStore::new(config.frames.clone());
        let mut session = Self {
            config,
            config_path: config_path.to_path_buf(),
            store,
            viewport: Viewport::default(),
            controls: FieldControls::new(info.width, info.height),
            video,
            frame,
            frame_index,
        };
        session.sync_controls();
        Ok(session)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn store(&self) -> &ZoneStore {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn video_info(&self) -> VideoInfo {
        self.video.info()
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn control(&self, field: NumericField) -> &FieldControl {
        self.controls.get(field)
    }

    /// Entry text of a field, for the UI to edit in place before
    /// [`submit_entry`](Self::submit_entry).
    pub fn entry_text_mut(&mut self, field: NumericField) -> &mut String {
        &mut self.controls.get_mut(field).text
    }

    /// `"<n>. <name>"` for every zone, in drawing order.
    pub fn zone_labels(&self) -> Vec<String> {
        self.store
            .zones()
            .iter()
            .enumerate()
            .map(|(i, zone)| format!("{}. {}", i + 1, zone.name))
            .collect()
    }

    pub fn zoom_label(&self) -> String {
        format!("Zoom: {}%", self.viewport.zoom_percent())
    }

    /// Show a different random frame of the video.
    pub fn load_random_frame(&mut self, rng: &mut impl Rng) -> Result<usize> {
        let (index, frame) = read_random_frame(self.video.as_mut(), rng)?;
        self.frame = frame;
        self.frame_index = index;
        Ok(index)
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
    }

    /// Move the view by a drag delta in screen pixels.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    pub fn select_zone(&mut self, index: usize) -> bool {
        let selected = self.store.select(index);
        if selected {
            self.sync_controls();
        }
        selected
    }

    /// Add a zone with default placement and select it.
    pub fn add_zone(&mut self) -> usize {
        let info = self.video.info();
        let index = self.store.append_default(info.width, info.height);
        self.sync_controls();
        log::info!("Added new frame: {}", self.store.zones()[index].name);
        index
    }

    /// Remove the selected zone.
    pub fn delete_selected(&mut self) -> Result<Zone> {
        let index = self.store.selected().ok_or(ZoneError::EmptyZoneSet)?;
        let removed = self.store.remove(index).ok_or(ZoneError::EmptyZoneSet)?;
        self.sync_controls();
        log::info!("Deleted frame: {}", removed.name);
        Ok(removed)
    }

    pub fn edit_name(&mut self, name: &str) -> Result<()> {
        self.apply(ZoneEdit::Name(name.to_string()))
    }

    /// The slider for `field` moved to `value`.
    pub fn slide(&mut self, field: NumericField, value: i32) -> Result<()> {
        self.require_selection()?;
        let edit = self.controls.get_mut(field).slide(value);
        self.apply(edit)
    }

    /// Commit the text entry of `field`. Unparsable input is dropped and
    /// the last valid value shown again.
    pub fn submit_entry(&mut self, field: NumericField) -> Result<()> {
        self.require_selection()?;
        match self.controls.get_mut(field).submit() {
            Ok(edit) => self.apply(edit),
            Err(e) if e.is_recoverable() => {
                log::warn!("{}", e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Write the current zones back to the configuration file.
    pub fn save(&mut self) -> Result<()> {
        save_zones(&mut self.config, self.store.to_vec(), &self.config_path)
    }

    /// Discard in-memory edits and reload zones from the configuration file.
    pub fn reset_to_original(&mut self) -> Result<()> {
        let config = load_config(&self.config_path)?;
        self.store.replace_all(config.frames.clone());
        self.config = config;
        self.sync_controls();
        log::info!("Reset to original configuration");
        Ok(())
    }

    /// The current frame with overlays, before zooming.
    pub fn composite(&self) -> Frame {
        composite(&self.frame, self.store.zones(), self.store.selected())
    }

    /// The current frame with overlays, resampled for the viewport.
    pub fn render(&self) -> Frame {
        self.viewport.apply(&self.composite())
    }

    /// Give the video back. Further reads fail.
    pub fn close(&mut self) {
        self.video.release();
    }

    fn require_selection(&self) -> Result<usize> {
        self.store.selected().ok_or(ZoneError::EmptyZoneSet)
    }

    fn apply(&mut self, edit: ZoneEdit) -> Result<()> {
        let index = self.require_selection()?;
        if !self.store.update(index, edit) {
            return Err(ZoneError::EmptyZoneSet);
        }
        self.sync_controls();
        Ok(())
    }

    fn sync_controls(&mut self) {
        if let Some(zone) = self.store.selected_zone() {
            self.controls.sync_from(zone);
        }
    }
}

fn read_random_frame(video: &mut dyn VideoSource, rng: &mut impl Rng) -> Result<(usize, Frame)> {
    let frame_count = video.info().frame_count.max(1);
    let index = rng.gen_range(0..frame_count);
    let frame = read_frame_at(video, index)?
        .ok_or_else(|| ZoneError::VideoRead(format!("could not read frame {}", index)))?;
    log::info!("Loaded frame {}", index);
    Ok((index, frame))
}
