//! Per-vertex color generators.
//!
//! Generators are plain `FnMut() -> ColorRgba` closures. Stateful ones keep
//! their state in an explicit struct owned by the caller, so two rings (or
//! two tests) never share a hidden counter.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::annulus::VERTICES_PER_STEP;
use crate::color::ColorRgba;

/// Generator that always returns `color`.
pub fn solid(color: ColorRgba) -> impl FnMut() -> ColorRgba {
    move || color
}

/// Alternates opaque and fully transparent dashes along a ring.
///
/// The counter advances once per vertex. A dash covers `dash_steps` angular
/// steps (six vertices each), so dash boundaries never split a ribbon
/// segment. `offset` shifts the pattern by whole steps; bumping it every frame
/// makes the dashes crawl.
#[derive(Debug, Clone)]
pub struct DashPattern {
    color: ColorRgba,
    dash_steps: u64,
    offset: u64,
    counter: u64,
}

impl DashPattern {
    pub fn new(color: ColorRgba, dash_steps: u64) -> Self {
        Self {
            color,
            dash_steps: dash_steps.max(1),
            offset: 0,
            counter: 0,
        }
    }

    /// Starts the pattern `offset` steps in.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Restarts the vertex counter with a new step offset.
    pub fn reset(&mut self, offset: u64) {
        self.offset = offset;
        self.counter = 0;
    }

    /// Color for the next vertex.
    pub fn next_color(&mut self) -> ColorRgba {
        let step = self.counter / VERTICES_PER_STEP as u64 + self.offset;
        self.counter += 1;

        if (step / self.dash_steps) % 2 == 0 {
            self.color
        } else {
            ColorRgba::transparent()
        }
    }

    /// Borrows the pattern as a generator closure.
    pub fn generator(&mut self) -> impl FnMut() -> ColorRgba + '_ {
        move || self.next_color()
    }
}

/// Jitters a base color per vertex with a seeded PRNG.
///
/// The same seed reproduces the same sequence, which keeps screenshots
/// comparable between runs.
#[derive(Debug, Clone)]
pub struct NoiseColor {
    base: ColorRgba,
    amplitude: f32,
    rng: Pcg32,
}

impl NoiseColor {
    pub fn new(base: ColorRgba, amplitude: f32, seed: u64) -> Self {
        Self {
            base,
            amplitude: amplitude.abs(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn next_color(&mut self) -> ColorRgba {
        if self.amplitude == 0.0 {
            return self.base;
        }
        let a = self.amplitude;
        // Same offset on all channels: brightness noise, hue stays put.
        let delta = self.rng.random_range(-a..=a);
        ColorRgba::new(
            self.base.r + delta,
            self.base.g + delta,
            self.base.b + delta,
            self.base.a,
        )
        .clamped()
    }

    pub fn generator(&mut self) -> impl FnMut() -> ColorRgba + '_ {
        move || self.next_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annulus::annulus;

    const WHITE: ColorRgba = ColorRgba::white();

    #[test]
    fn solid_never_changes() {
        let mut g = solid(WHITE);
        assert!((0..10).all(|_| g() == WHITE));
    }

    // ── dash pattern ──────────────────────────────────────────────────────

    #[test]
    fn dash_alternates_every_dash_length() {
        let mut dash = DashPattern::new(WHITE, 2);
        let colors: Vec<ColorRgba> = (0..4 * 6).map(|_| dash.next_color()).collect();

        // Steps 0-1 opaque, steps 2-3 transparent.
        assert!(colors[..12].iter().all(|c| *c == WHITE));
        assert!(colors[12..].iter().all(|c| c.a == 0.0));
        assert_eq!(dash.counter, 24);
    }

    #[test]
    fn dash_keeps_whole_segments_uniform() {
        let mut dash = DashPattern::new(WHITE, 1);
        let mesh = annulus([0.0, 0.0, 0.0], 1.0, 1.1, 10, dash.generator());
        for segment in mesh.vertices().chunks(6) {
            assert!(segment.iter().all(|v| v.col == segment[0].col));
        }
    }

    #[test]
    fn dash_offset_shifts_pattern() {
        let mut a = DashPattern::new(WHITE, 1);
        let mut b = DashPattern::new(WHITE, 1).with_offset(1);
        assert_ne!(a.next_color(), b.next_color());
    }

    #[test]
    fn dash_reset_restarts_counter() {
        let mut dash = DashPattern::new(WHITE, 3);
        let first: Vec<_> = (0..36).map(|_| dash.next_color()).collect();
        dash.reset(0);
        let second: Vec<_> = (0..36).map(|_| dash.next_color()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn separate_patterns_do_not_share_state() {
        let mut a = DashPattern::new(WHITE, 1);
        let mut b = DashPattern::new(WHITE, 1);
        for _ in 0..6 {
            a.next_color();
        }
        assert_eq!(b.next_color(), WHITE);
        assert_eq!(a.next_color().a, 0.0);
    }

    // ── noise ─────────────────────────────────────────────────────────────

    #[test]
    fn noise_is_reproducible_per_seed() {
        let base = ColorRgba::rgb(0.3, 0.3, 0.3);
        let mut a = NoiseColor::new(base, 0.1, 7);
        let mut b = NoiseColor::new(base, 0.1, 7);
        for _ in 0..100 {
            assert_eq!(a.next_color(), b.next_color());
        }
    }

    #[test]
    fn noise_stays_within_amplitude() {
        let base = ColorRgba::rgb(0.5, 0.4, 0.3);
        let mut noise = NoiseColor::new(base, 0.05, 1);
        for _ in 0..1000 {
            let c = noise.next_color();
            assert!((c.r - base.r).abs() <= 0.05 + 1e-6);
            assert!((c.g - c.b - (base.g - base.b)).abs() < 1e-5);
            assert_eq!(c.a, 1.0);
        }
    }

    #[test]
    fn zero_amplitude_returns_base() {
        let base = ColorRgba::rgb(0.1, 0.2, 0.3);
        let mut noise = NoiseColor::new(base, 0.0, 42);
        assert_eq!(noise.next_color(), base);
    }
}
