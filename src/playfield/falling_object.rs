use rand::Rng;

use crate::config::GameConfig;
use crate::surface::Surface;

/// A circle dropping straight down at a constant per-tick speed.
#[derive(Clone, Debug, PartialEq)]
pub struct FallingObject {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    speed: f64, // fixed at spawn
}

impl FallingObject {
    /// Spawn at the top edge with x in [0, width - radius) and a speed from the
    /// configured range. Expects a validated config (non-empty ranges).
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, cfg: &GameConfig) -> Self {
        let radius = cfg.object_radius;
        Self {
            x: rng.gen_range(0.0..cfg.width - radius),
            y: 0.0,
            radius,
            speed: rng.gen_range(cfg.object_min_speed..cfg.object_max_speed),
        }
    }

    pub fn at(x: f64, y: f64, radius: f64, speed: f64) -> Self {
        Self { x, y, radius, speed }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Bottom edge, used by the catch test.
    pub fn bottom(&self) -> f64 {
        self.y + self.radius
    }

    pub fn advance<S: Surface + ?Sized>(&mut self, surface: &mut S, color: &str) {
        self.y += self.speed;
        surface.fill_circle(self.x, self.y, self.radius, color);
    }
}
