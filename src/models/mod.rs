// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zone records, their persisted configuration and the editing store.

pub mod config;
pub mod field;
pub mod store;
pub mod zone;
