// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! View state for the media shown inside an open modal.

/// Characters revealed per second by the letter typewriter.
pub const TYPEWRITER_CPS: f64 = 40.0;

/// Reveals a letter a few characters at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typewriter {
    started_at: f64,
    finished: bool,
}

impl Typewriter {
    pub fn new(started_at: f64) -> Self {
        Self {
            started_at,
            finished: false,
        }
    }

    /// Show the whole text immediately.
    pub fn skip(&mut self) {
        self.finished = true;
    }

    /// Prefix of `text` visible at `now`, cut on a character boundary.
    pub fn visible<'a>(&self, text: &'a str, now: f64) -> &'a str {
        if self.finished {
            return text;
        }
        let count = ((now - self.started_at).max(0.0) * TYPEWRITER_CPS) as usize;
        match text.char_indices().nth(count) {
            Some((byte, _)) => &text[..byte],
            None => text,
        }
    }

    pub fn is_done(&self, text: &str, now: f64) -> bool {
        self.visible(text, now).len() == text.len()
    }
}

/// Position in a photo carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    index: usize,
}

impl Carousel {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index % len + len - 1) % len;
        }
    }
}
