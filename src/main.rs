// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! zonescope - zone overlays for behavioural video
//!
//! Draw named, colored, rotatable rectangular zones over frames of a video,
//! save them to a configuration file, and play the video back with the
//! zones composited on top.

mod app;
mod editor;
mod error;
mod io;
mod models;
mod player;
mod render;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::EditorApp;
use clap::{Parser, Subcommand};
use editor::EditorSession;
use io::media::open_video;
use io::serialization::{load_config_or_default, DEFAULT_CONFIG_PATH};
use player::{run_playback, PlaybackDisplay};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "zonescope", version)]
#[command(about = "Define zones over a video and play it back with overlays")]
struct Cli {
    /// Configuration file (JSON, or YAML by extension)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the zone editor
    Edit,
    /// Play the video with zone overlays
    Play {
        /// Write displayed frames as PNGs instead of opening a window
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Edit => edit(&cli.config),
        Command::Play { output } => play(&cli.config, output),
    }
}

fn edit(config_path: &Path) -> Result<()> {
    let session = match EditorSession::open(config_path) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            app::show_error("Error", &e.to_string());
            return Err(e).context("Failed to start the zone editor");
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Zone Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "zonescope",
        options,
        Box::new(|_cc| Ok(Box::new(EditorApp::new(session)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

fn play(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let config = load_config_or_default(config_path);
    let video_path = config.video_path();
    let mut source = open_video(&video_path).map_err(|e| {
        log::error!("{}", e);
        e
    })?;

    let mut display = playback_display(output)?;
    run_playback(&config, source.as_mut(), display.as_mut())
        .with_context(|| format!("Playback of {} failed", video_path.display()))
}

#[cfg(feature = "video-opencv")]
fn playback_display(output: Option<PathBuf>) -> Result<Box<dyn PlaybackDisplay>> {
    match output {
        Some(dir) => Ok(Box::new(player::HeadlessDisplay::new(Some(dir))?)),
        None => Ok(Box::new(player::HighguiDisplay::new("Video Player")?)),
    }
}

#[cfg(not(feature = "video-opencv"))]
fn playback_display(output: Option<PathBuf>) -> Result<Box<dyn PlaybackDisplay>> {
    if output.is_none() {
        log::warn!("Built without a video window; frames are rendered but not shown");
    }
    Ok(Box::new(player::HeadlessDisplay::new(output)?))
}
