// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Confetti burst shown with the finale.
//!
//! Each burst is identified by a key. A new key replays the burst with fresh
//! random particles; the same key never replays.

const PARTICLES: usize = 80;
const LIFETIME: f64 = 3.0;
const COLORS: [egui::Color32; 6] = [
    egui::Color32::from_rgb(0x44, 0xcc, 0x66),
    egui::Color32::from_rgb(0xcc, 0xaa, 0x33),
    egui::Color32::from_rgb(0xcc, 0x44, 0x44),
    egui::Color32::from_rgb(0x44, 0x88, 0xcc),
    egui::Color32::from_rgb(0xcc, 0x44, 0xcc),
    egui::Color32::from_rgb(0x44, 0xcc, 0xcc),
];

#[derive(Debug, Clone, PartialEq)]
struct Particle {
    /// Horizontal start, fraction of the screen width.
    x: f32,
    size: f32,
    delay: f64,
    duration: f64,
    drift: f32,
    spin: f32,
    color: egui::Color32,
}

/// xorshift64, enough for decorative randomness.
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    /// Uniform in `0.0..max`.
    fn next(&mut self, max: f64) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 as f64 / u64::MAX as f64) * max
    }
}

#[derive(Debug, Default)]
pub struct Confetti {
    key: u64,
    started_at: f64,
    particles: Vec<Particle>,
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start burst `key` at `now`. Returns false for a key already played.
    pub fn trigger(&mut self, key: u64, now: f64) -> bool {
        if key == 0 || key == self.key {
            return false;
        }
        let mut rng = Rng::new(key.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ now.to_bits());
        self.particles = (0..PARTICLES)
            .map(|_| Particle {
                x: rng.next(1.0) as f32,
                size: 4.0 + rng.next(5.0) as f32,
                delay: rng.next(0.5),
                duration: 1.5 + rng.next(1.0),
                drift: 10.0 + rng.next(30.0) as f32,
                spin: 2.0 + rng.next(6.0) as f32,
                color: COLORS[rng.next(COLORS.len() as f64) as usize % COLORS.len()],
            })
            .collect();
        self.key = key;
        self.started_at = now;
        true
    }

    pub fn is_active(&self, now: f64) -> bool {
        !self.particles.is_empty() && now - self.started_at < LIFETIME
    }

    /// Paint the particles above everything else.
    pub fn paint(&self, ctx: &egui::Context, now: f64) {
        if !self.is_active(now) {
            return;
        }
        let screen = ctx.screen_rect();
        let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::Tooltip, egui::Id::new("confetti")));
        let elapsed = now - self.started_at;

        for p in &self.particles {
            let t = ((elapsed - p.delay) / p.duration) as f32;
            if !(0.0..=1.0).contains(&t) {
                continue;
            }
            let fall = 1.0 - (1.0 - t).powi(2);
            let x = screen.min.x + p.x * screen.width() + (t * p.spin).sin() * p.drift;
            let y = screen.min.y - p.size + fall * (screen.height() + 2.0 * p.size);
            let color = p.color.gamma_multiply(1.0 - t * 0.5);
            painter.rect_filled(
                egui::Rect::from_center_size(egui::pos2(x, y), egui::vec2(p.size, p.size * 0.6)),
                0.0,
                color,
            );
        }
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_does_not_replay() {
        let mut c = Confetti::new();
        assert!(!c.trigger(0, 1.0));
        assert!(c.trigger(1, 1.0));
        let first = c.particles.clone();
        assert_eq!(first.len(), PARTICLES);

        assert!(!c.trigger(1, 2.0));
        assert_eq!(c.particles, first);
    }

    #[test]
    fn test_new_key_gets_fresh_particles() {
        let mut c = Confetti::new();
        c.trigger(1, 1.0);
        let first = c.particles.clone();
        c.trigger(2, 1.0);
        assert_ne!(c.particles, first);
    }

    #[test]
    fn test_lifetime() {
        let mut c = Confetti::new();
        assert!(!c.is_active(0.0));
        c.trigger(1, 10.0);
        assert!(c.is_active(10.5));
        assert!(!c.is_active(10.0 + LIFETIME));
    }
}
