// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O: scene files, images and the stand-ins for audio and microphone.

pub mod breath;
pub mod media;
pub mod playback;
pub mod serialization;
