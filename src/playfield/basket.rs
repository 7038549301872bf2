use super::FallingObject;
use crate::config::GameConfig;
use crate::surface::{Rect, Surface};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Left,
    #[default]
    None,
    Right,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::None => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// The player's paddle. Only x moves; y is pinned near the bottom edge.
#[derive(Clone, Debug)]
pub struct Basket {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    speed: f64,
    direction: Direction,
    field_width: f64,
}

impl Basket {
    /// Centered horizontally, `basket_margin` above the bottom edge.
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            x: cfg.width / 2.0 - cfg.basket_width / 2.0,
            y: cfg.height - cfg.basket_height - cfg.basket_margin,
            width: cfg.basket_width,
            height: cfg.basket_height,
            speed: cfg.basket_speed,
            direction: Direction::None,
            field_width: cfg.width,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Step one tick in the current direction, clamp to the field, draw.
    pub fn advance<S: Surface + ?Sized>(&mut self, surface: &mut S, color: &str) {
        self.x += self.direction.sign() * self.speed;
        self.x = self.x.clamp(0.0, self.field_width - self.width);
        surface.fill_rect(self.rect(), color);
    }

    /// Caught once the object's bottom edge is past the basket top and its
    /// centre x lies strictly inside the basket span. Depth below the top is
    /// not checked, so a late object still counts while it is aligned.
    pub fn catches(&self, obj: &FallingObject) -> bool {
        obj.bottom() > self.y && obj.x > self.x && obj.x < self.x + self.width
    }
}
