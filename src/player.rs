// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video playback with zone overlays.
//!
//! [`Player`] is the playback state machine. [`run_playback`] drives it in a
//! blocking loop against a [`VideoSource`] and a [`PlaybackDisplay`], which
//! shows frames and turns key presses into [`PlayerCommand`]s.

use crate::error::Result;
use crate::io::media::{VideoInfo, VideoSource};
use crate::models::config::AppConfig;
use crate::models::zone::Zone;
use crate::render::compositor::composite;
use crate::render::hud::{draw_hud, HudInfo};
use crate::render::raster::{swap_red_blue, Frame};
use crate::render::viewport::PlaybackScale;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Quit,
    TogglePause,
    Step,
    Restart,
    ToggleOverlay,
}

impl PlayerCommand {
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'q' => Some(PlayerCommand::Quit),
            'p' => Some(PlayerCommand::TogglePause),
            's' => Some(PlayerCommand::Step),
            'r' => Some(PlayerCommand::Restart),
            'f' => Some(PlayerCommand::ToggleOverlay),
            _ => None,
        }
    }
}

/// Whether the run loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Playback state, cursor and overlay flag for one run.
pub struct Player {
    zones: Vec<Zone>,
    info: VideoInfo,
    scale: Option<PlaybackScale>,
    fps_display: bool,
    state: PlaybackState,
    cursor: usize,
    show_overlays: bool,
    current: Option<Frame>,
}

impl Player {
    pub fn new(config: &AppConfig, info: VideoInfo) -> Self {
        Self {
            zones: config.frames.clone(),
            scale: PlaybackScale::new(info.width, info.height, config.display_size()),
            info,
            fps_display: config.fps_display,
            state: PlaybackState::Playing,
            cursor: 0,
            show_overlays: config.draw_frames,
            current: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Frames shown since the start or the last restart.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn show_overlays(&self) -> bool {
        self.show_overlays
    }

    /// Read the next frame. On end of stream the player moves to `Ended`
    /// and `false` is returned.
    pub fn advance(&mut self, source: &mut dyn VideoSource) -> Result<bool> {
        match source.read_frame()? {
            Some(frame) => {
                self.current = Some(frame);
                self.cursor += 1;
                Ok(true)
            }
            None => {
                log::info!("End of video reached");
                self.state = PlaybackState::Ended;
                Ok(false)
            }
        }
    }

    pub fn handle(&mut self, command: PlayerCommand, source: &mut dyn VideoSource) -> Result<Flow> {
        match command {
            PlayerCommand::Quit => {
                log::info!("Quitting playback");
                return Ok(Flow::Exit);
            }
            PlayerCommand::TogglePause => match self.state {
                PlaybackState::Playing => {
                    self.state = PlaybackState::Paused;
                    log::info!("Paused");
                }
                PlaybackState::Paused => {
                    self.state = PlaybackState::Playing;
                    log::info!("Resumed");
                }
                PlaybackState::Ended => log::debug!("Pause ignored after end of video"),
            },
            PlayerCommand::Step => {
                if self.state == PlaybackState::Paused {
                    if self.advance(source)? {
                        log::info!("Step forward: frame {}", self.cursor);
                    }
                } else {
                    log::debug!("Step ignored while not paused");
                }
            }
            PlayerCommand::Restart => {
                source.seek(0)?;
                self.cursor = 0;
                self.current = None;
                self.state = PlaybackState::Playing;
                log::info!("Restarted video");
            }
            PlayerCommand::ToggleOverlay => {
                self.show_overlays = !self.show_overlays;
                log::info!(
                    "Frame overlays: {}",
                    if self.show_overlays { "ON" } else { "OFF" }
                );
            }
        }
        Ok(Flow::Continue)
    }

    pub fn hud_info(&self) -> HudInfo {
        HudInfo {
            frame: self.cursor,
            total_frames: self.info.frame_count,
            fps: self.info.fps,
            overlays: self.show_overlays.then_some(self.zones.len()),
            paused: self.state == PlaybackState::Paused,
        }
    }

    /// The current frame as it should be shown: resized, overlaid and
    /// annotated. `None` before the first read.
    pub fn render(&self) -> Option<Frame> {
        let frame = self.current.as_ref()?;
        let (mut display, zones) = match &self.scale {
            Some(scale) => (scale.frame(frame), scale.zones(&self.zones)),
            None => (frame.clone(), self.zones.clone()),
        };
        if self.show_overlays {
            display = composite(&display, &zones, None);
        }
        if self.fps_display {
            draw_hud(&mut display, &self.hud_info());
        }
        Some(display)
    }

    /// How long the display may wait for a key; `None` blocks.
    pub fn poll_wait(&self) -> Option<Duration> {
        match self.state {
            PlaybackState::Paused => None,
            _ => Some(frame_interval(self.info.fps)),
        }
    }
}

/// Inter-frame delay for `fps`, at least one millisecond.
pub fn frame_interval(fps: f64) -> Duration {
    let millis = if fps > 0.0 { (1000.0 / fps) as u64 } else { 1 };
    Duration::from_millis(millis.max(1))
}

/// Somewhere to show playback frames and read commands from.
pub trait PlaybackDisplay {
    fn show(&mut self, frame: &Frame) -> Result<()>;

    /// Wait up to `wait` (forever when `None`) for a command.
    fn poll_command(&mut self, wait: Option<Duration>) -> Result<Option<PlayerCommand>>;
}

/// Play `source` with the zones and settings of `config` until the video
/// ends or the display asks to quit. The source is released on every path.
pub fn run_playback(
    config: &AppConfig,
    source: &mut dyn VideoSource,
    display: &mut dyn PlaybackDisplay,
) -> Result<()> {
    let mut player = Player::new(config, source.info());
    log::info!(
        "Controls: q=quit, p=pause/resume, s=step (paused), r=restart, f=toggle overlays"
    );
    let result = play_loop(&mut player, source, display);
    source.release();
    log::info!("Video playback ended after {} frames", player.cursor());
    result
}

fn play_loop(
    player: &mut Player,
    source: &mut dyn VideoSource,
    display: &mut dyn PlaybackDisplay,
) -> Result<()> {
    loop {
        if player.state() == PlaybackState::Playing && !player.advance(source)? {
            break;
        }
        if player.state() == PlaybackState::Ended {
            break;
        }
        if let Some(frame) = player.render() {
            display.show(&frame)?;
        }
        if let Some(command) = display.poll_command(player.poll_wait())? {
            if player.handle(command, source)? == Flow::Exit {
                break;
            }
        }
    }
    Ok(())
}

/// Display without a window: optionally writes every shown frame as a PNG.
pub struct HeadlessDisplay {
    output: Option<PathBuf>,
    shown: usize,
}

impl HeadlessDisplay {
    pub fn new(output: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = &output {
            std::fs::create_dir_all(dir)?;
            log::info!("Writing frames to {}", dir.display());
        }
        Ok(Self { output, shown: 0 })
    }

    pub fn frames_shown(&self) -> usize {
        self.shown
    }
}

impl PlaybackDisplay for HeadlessDisplay {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        if let Some(dir) = &self.output {
            let mut image = frame.clone();
            swap_red_blue(&mut image);
            image.save(dir.join(format!("frame_{:06}.png", self.shown)))?;
        }
        self.shown += 1;
        Ok(())
    }

    fn poll_command(&mut self, wait: Option<Duration>) -> Result<Option<PlayerCommand>> {
        // Nothing can resume a headless run once it blocks.
        Ok(wait.is_none().then_some(PlayerCommand::Quit))
    }
}

#[cfg(feature = "video-opencv")]
pub use highgui_display::HighguiDisplay;

#[cfg(feature = "video-opencv")]
mod highgui_display {
    use super::{PlaybackDisplay, PlayerCommand};
    use crate::error::{Result, ZoneError};
    use crate::render::raster::Frame;
    use opencv::{core, highgui, prelude::*};
    use std::time::Duration;

    fn display_error(e: opencv::Error) -> ZoneError {
        ZoneError::VideoRead(e.to_string())
    }

    /// OpenCV window with keyboard polling.
    pub struct HighguiDisplay {
        window: String,
    }

    impl HighguiDisplay {
        pub fn new(window: &str) -> Result<Self> {
            highgui::named_window(window, highgui::WINDOW_AUTOSIZE).map_err(display_error)?;
            Ok(Self {
                window: window.to_string(),
            })
        }
    }

    impl PlaybackDisplay for HighguiDisplay {
        fn show(&mut self, frame: &Frame) -> Result<()> {
            let mut mat = Mat::new_rows_cols_with_default(
                frame.height() as i32,
                frame.width() as i32,
                core::CV_8UC3,
                core::Scalar::all(0.0),
            )
            .map_err(display_error)?;
            mat.data_bytes_mut()
                .map_err(display_error)?
                .copy_from_slice(frame.as_raw());
            highgui::imshow(&self.window, &mat).map_err(display_error)
        }

        fn poll_command(&mut self, wait: Option<Duration>) -> Result<Option<PlayerCommand>> {
            let delay = wait.map(|d| d.as_millis().max(1) as i32).unwrap_or(0);
            let key = highgui::wait_key(delay).map_err(display_error)?;
            if key < 0 {
                return Ok(None);
            }
            Ok(char::from_u32((key & 0xFF) as u32).and_then(PlayerCommand::from_key))
        }
    }

    impl Drop for HighguiDisplay {
        fn drop(&mut self) {
            let _ = highgui::destroy_all_windows();
        }
    }
}
