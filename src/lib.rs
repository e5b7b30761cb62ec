// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot Room
//!
//! An interactive room scene: a cover-fitted background with clickable
//! hotspots, visit tracking, a one-time finale and an edit mode for
//! authoring hotspot geometry.

pub mod app;
pub mod io;
pub mod models;
pub mod ui;
pub mod util;
