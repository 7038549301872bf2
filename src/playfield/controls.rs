//! Keyboard → basket direction.

use super::Direction;
use crate::config::InputPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            _ => Key::Other,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Controls {
    policy: InputPolicy,
    left_held: bool,
    right_held: bool,
    last_pressed: Direction,
}

impl Controls {
    pub fn new(policy: InputPolicy) -> Self {
        Self { policy, left_held: false, right_held: false, last_pressed: Direction::None }
    }

    /// Returns the direction to apply, or `None` when the event changes nothing.
    pub fn key_down(&mut self, key: Key) -> Option<Direction> {
        let dir = match key {
            Key::Left => {
                self.left_held = true;
                Direction::Left
            }
            Key::Right => {
                self.right_held = true;
                Direction::Right
            }
            Key::Other => return None,
        };
        self.last_pressed = dir;
        Some(dir)
    }

    pub fn key_up(&mut self, key: Key) -> Option<Direction> {
        match key {
            Key::Left => self.left_held = false,
            Key::Right => self.right_held = false,
            Key::Other => {}
        }
        match self.policy {
            InputPolicy::AnyReleaseStops => Some(Direction::None),
            InputPolicy::TrackHeld => Some(self.held_direction()),
        }
    }

    fn held_direction(&self) -> Direction {
        match (self.left_held, self.right_held) {
            (true, true) => self.last_pressed,
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            (false, false) => Direction::None,
        }
    }
}
