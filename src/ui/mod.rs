// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the room.

pub mod canvas;
pub mod confetti;
pub mod hud;
pub mod intro;
pub mod modal;
pub mod photos;
pub mod player;
