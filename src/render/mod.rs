// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame rendering: drawing primitives, zone overlays and display
//! transforms.

pub mod compositor;
pub mod hud;
pub mod raster;
pub mod viewport;

pub use raster::Frame;
