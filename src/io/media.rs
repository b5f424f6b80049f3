// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading (image sequences and videos).
//!
//! This module opens frame sources, reports their frame count, rate and
//! resolution, and hands out frames in the native B, G, R order used by the
//! renderer. Video containers are decoded through OpenCV when the
//! `video-opencv` feature is enabled; directories of still images work
//! without it.

use crate::error::{Result, ZoneError};
use crate::render::raster::{swap_red_blue, Frame};
use std::path::{Path, PathBuf};

/// Nominal frame rate of an image sequence.
pub const DEFAULT_SEQUENCE_FPS: f64 = 30.0;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// Static properties of a frame source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    pub frame_count: usize,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
}

impl VideoInfo {
    pub fn duration_seconds(&self) -> f64 {
        if self.fps > 0.0 {
            self.frame_count as f64 / self.fps
        } else {
            0.0
        }
    }
}

/// A frame-addressable video resource.
///
/// `release` must be safe to call more than once; implementations also
/// release on drop so that every exit path gives the resource back.
pub trait VideoSource {
    fn info(&self) -> VideoInfo;

    /// Next frame, or `None` at end of stream.
    fn read_frame(&mut self) -> Result<Option<Frame>>;

    /// Position the source so the next read returns frame `index`.
    fn seek(&mut self, index: usize) -> Result<()>;

    fn release(&mut self);
}

/// Clamp a requested frame index to the valid range of a source.
pub fn clamp_frame_index(index: usize, frame_count: usize) -> usize {
    index.min(frame_count.saturating_sub(1))
}

/// Random access: seek to `index` (clamped) and read that frame.
pub fn read_frame_at(source: &mut dyn VideoSource, index: usize) -> Result<Option<Frame>> {
    let index = clamp_frame_index(index, source.info().frame_count);
    source.seek(index)?;
    source.read_frame()
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Load a still image as a native-order frame.
pub fn load_frame(path: &Path) -> Result<Frame> {
    let mut frame = image::open(path)?.to_rgb8();
    swap_red_blue(&mut frame);
    Ok(frame)
}

/// Still images played back as frames, ordered by file name.
pub struct ImageSequence {
    path: PathBuf,
    frames: Vec<PathBuf>,
    cursor: usize,
    info: VideoInfo,
    released: bool,
}

impl ImageSequence {
    /// Open a directory of images, or a single image as a one-frame video.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ZoneError::VideoNotFound(path.to_path_buf()));
        }
        let unopenable = |reason: String| ZoneError::VideoUnopenable {
            path: path.to_path_buf(),
            reason,
        };

        let frames = if path.is_dir() {
            let mut frames: Vec<PathBuf> = std::fs::read_dir(path)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|p| p.is_file() && is_image_file(p))
                .collect();
            frames.sort();
            frames
        } else if is_image_file(path) {
            vec![path.to_path_buf()]
        } else {
            return Err(unopenable("not an image or image directory".to_string()));
        };

        let first = frames
            .first()
            .ok_or_else(|| unopenable("no image frames found".to_string()))?;
        let (width, height) =
            image::image_dimensions(first).map_err(|e| unopenable(e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            info: VideoInfo {
                frame_count: frames.len(),
                fps: DEFAULT_SEQUENCE_FPS,
                width,
                height,
            },
            frames,
            cursor: 0,
            released: false,
        })
    }
}

impl VideoSource for ImageSequence {
    fn info(&self) -> VideoInfo {
        self.info
    }

    fn read_frame(&mut self) -> Result<Option<Frame>> {
        if self.released {
            return Ok(None);
        }
        let Some(path) = self.frames.get(self.cursor) else {
            return Ok(None);
        };
        let frame = load_frame(path)?;
        self.cursor += 1;
        Ok(Some(frame))
    }

    fn seek(&mut self, index: usize) -> Result<()> {
        self.cursor = index.min(self.frames.len());
        Ok(())
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.frames.clear();
            log::debug!("Released image sequence {}", self.path.display());
        }
    }
}

impl Drop for ImageSequence {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(feature = "video-opencv")]
mod capture {
    use super::{VideoInfo, VideoSource};
    use crate::error::{Result, ZoneError};
    use crate::render::raster::Frame;
    use opencv::{
        core::Mat,
        prelude::*,
        videoio::{self, VideoCapture},
    };
    use std::path::{Path, PathBuf};

    fn read_error(e: opencv::Error) -> ZoneError {
        ZoneError::VideoRead(e.to_string())
    }

    /// A video container decoded by OpenCV.
    pub struct CaptureSource {
        path: PathBuf,
        cap: VideoCapture,
        info: VideoInfo,
        released: bool,
    }

    impl CaptureSource {
        pub fn open(path: &Path) -> Result<Self> {
            let unopenable = |reason: String| ZoneError::VideoUnopenable {
                path: path.to_path_buf(),
                reason,
            };
            let filename = path
                .to_str()
                .ok_or_else(|| unopenable("path is not valid UTF-8".to_string()))?;
            let cap = VideoCapture::from_file(filename, videoio::CAP_ANY)
                .map_err(|e| unopenable(e.to_string()))?;
            if !cap.is_opened().map_err(|e| unopenable(e.to_string()))? {
                return Err(unopenable("decoder could not open the file".to_string()));
            }

            let prop = |id: i32| cap.get(id).map_err(read_error);
            let info = VideoInfo {
                frame_count: prop(videoio::CAP_PROP_FRAME_COUNT)?.max(0.0) as usize,
                fps: prop(videoio::CAP_PROP_FPS)?,
                width: prop(videoio::CAP_PROP_FRAME_WIDTH)?.max(0.0) as u32,
                height: prop(videoio::CAP_PROP_FRAME_HEIGHT)?.max(0.0) as u32,
            };

            Ok(Self {
                path: path.to_path_buf(),
                cap,
                info,
                released: false,
            })
        }
    }

    impl VideoSource for CaptureSource {
        fn info(&self) -> VideoInfo {
            self.info
        }

        fn read_frame(&mut self) -> Result<Option<Frame>> {
            if self.released {
                return Ok(None);
            }
            let mut mat = Mat::default();
            if !self.cap.read(&mut mat).map_err(read_error)? || mat.empty() {
                return Ok(None);
            }
            if !mat.is_continuous() {
                mat = mat.try_clone().map_err(read_error)?;
            }
            let (width, height) = (mat.cols() as u32, mat.rows() as u32);
            let bytes = mat.data_bytes().map_err(read_error)?.to_vec();
            Frame::from_raw(width, height, bytes)
                .map(Some)
                .ok_or_else(|| ZoneError::VideoRead("unexpected frame layout".to_string()))
        }

        fn seek(&mut self, index: usize) -> Result<()> {
            self.cap
                .set(videoio::CAP_PROP_POS_FRAMES, index as f64)
                .map_err(read_error)?;
            Ok(())
        }

        fn release(&mut self) {
            if !self.released {
                self.released = true;
                if let Err(e) = self.cap.release() {
                    log::warn!("Failed to release {}: {}", self.path.display(), e);
                }
                log::debug!("Released video capture {}", self.path.display());
            }
        }
    }

    impl Drop for CaptureSource {
        fn drop(&mut self) {
            self.release();
        }
    }
}

#[cfg(feature = "video-opencv")]
pub use capture::CaptureSource;

/// Open whatever `path` points at: an image directory or still image
/// directly, anything else through the video decoder.
pub fn open_video(path: &Path) -> Result<Box<dyn VideoSource>> {
    if !path.exists() {
        return Err(ZoneError::VideoNotFound(path.to_path_buf()));
    }

    let source: Box<dyn VideoSource> = if path.is_dir() || is_image_file(path) {
        Box::new(ImageSequence::open(path)?)
    } else {
        open_container(path)?
    };

    let info = source.info();
    log::info!(
        "Video loaded: {} ({} frames, {:.2} FPS, {:.2} seconds, {}x{})",
        path.display(),
        info.frame_count,
        info.fps,
        info.duration_seconds(),
        info.width,
        info.height
    );
    Ok(source)
}

#[cfg(feature = "video-opencv")]
fn open_container(path: &Path) -> Result<Box<dyn VideoSource>> {
    Ok(Box::new(CaptureSource::open(path)?))
}

#[cfg(not(feature = "video-opencv"))]
fn open_container(path: &Path) -> Result<Box<dyn VideoSource>> {
    log::warn!(
        "Cannot decode '{}': this build only reads image files and directories. \
         Rebuild with `cargo build --release --features video-opencv` for video containers.",
        path.display()
    );
    Err(ZoneError::VideoUnopenable {
        path: path.to_path_buf(),
        reason: "video decoding requires a build with `--features video-opencv`".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_sequence(dir: &Path, colors: &[[u8; 3]]) {
        for (i, rgb) in colors.iter().enumerate() {
            let image = RgbImage::from_pixel(8, 6, Rgb(*rgb));
            image.save(dir.join(format!("frame_{:03}.png", i))).unwrap();
        }
    }

    #[test]
    fn test_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_video(&dir.path().join("absent.mp4")).err().unwrap();
        assert!(matches!(err, ZoneError::VideoNotFound(_)));
    }

    #[test]
    fn test_unopenable_paths() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_video(dir.path()).err().unwrap();
        assert!(matches!(err, ZoneError::VideoUnopenable { .. }));

        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, "not a frame").unwrap();
        let err = ImageSequence::open(&notes).err().unwrap();
        assert!(matches!(err, ZoneError::VideoUnopenable { .. }));
    }

    #[cfg(not(feature = "video-opencv"))]
    #[test]
    fn test_container_error_names_the_feature() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("clip.mp4");
        std::fs::write(&clip, b"\x00\x00\x00\x18ftypmp42").unwrap();

        match open_video(&clip).err().unwrap() {
            ZoneError::VideoUnopenable { reason, .. } => {
                assert!(reason.contains("--features video-opencv"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_sequence_reads_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), &[[255, 0, 0], [0, 255, 0], [0, 0, 255]]);

        let mut source = open_video(dir.path()).unwrap();
        let info = source.info();
        assert_eq!(info.frame_count, 3);
        assert_eq!((info.width, info.height), (8, 6));
        assert_eq!(info.fps, DEFAULT_SEQUENCE_FPS);
        assert!((info.duration_seconds() - 0.1).abs() < 1e-9);

        // red on disk arrives as B, G, R
        let first = source.read_frame().unwrap().unwrap();
        assert_eq!(first.get_pixel(0, 0).0, [0, 0, 255]);
        assert!(source.read_frame().unwrap().is_some());
        assert!(source.read_frame().unwrap().is_some());
        assert!(source.read_frame().unwrap().is_none());
    }

    #[test]
    fn test_random_access_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), &[[10, 10, 10], [20, 20, 20], [30, 30, 30]]);
        let mut source = ImageSequence::open(dir.path()).unwrap();

        let frame = read_frame_at(&mut source, 1).unwrap().unwrap();
        assert_eq!(frame.get_pixel(0, 0).0, [20, 20, 20]);

        let frame = read_frame_at(&mut source, 99).unwrap().unwrap();
        assert_eq!(frame.get_pixel(0, 0).0, [30, 30, 30]);

        source.seek(0).unwrap();
        let frame = source.read_frame().unwrap().unwrap();
        assert_eq!(frame.get_pixel(0, 0).0, [10, 10, 10]);
    }

    #[test]
    fn test_release_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), &[[1, 2, 3]]);
        let mut source = ImageSequence::open(dir.path()).unwrap();

        source.release();
        source.release();
        assert!(source.read_frame().unwrap().is_none());
    }

    #[test]
    fn test_single_image_is_one_frame() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), &[[5, 6, 7]]);
        let source = ImageSequence::open(&dir.path().join("frame_000.png")).unwrap();
        assert_eq!(source.info().frame_count, 1);
    }

    #[test]
    fn test_clamp_frame_index() {
        assert_eq!(clamp_frame_index(5, 10), 5);
        assert_eq!(clamp_frame_index(10, 10), 9);
        assert_eq!(clamp_frame_index(3, 0), 0);
    }
}
