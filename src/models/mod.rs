// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scene data and the state machines driving it.

pub mod blow;
pub mod capture;
pub mod content;
pub mod hotspot;
pub mod player;
pub mod project;
pub mod registry;
pub mod reveal;
pub mod scene;
pub mod schedule;
pub mod visit;
