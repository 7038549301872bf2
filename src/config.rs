//! Tunables for a game session. `GameConfig::default()` is the classic game:
//! a 600x400 field, one object every two seconds, an 80px basket.

use crate::error::{GameError, Result};

/// How key-up events affect the basket direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputPolicy {
    /// Releasing any key stops the basket, even if the other arrow is still held.
    #[default]
    AnyReleaseStops,
    /// Each arrow is tracked separately; the most recently pressed held arrow wins.
    TrackHeld,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct GameConfig {
    pub width: f64,
    pub height: f64,
    pub spawn_interval_ms: u32,

    pub basket_width: f64,
    pub basket_height: f64,
    pub basket_margin: f64, // gap between basket bottom and field bottom
    pub basket_speed: f64,  // px per tick
    pub basket_color: String,

    pub object_radius: f64,
    pub object_min_speed: f64, // inclusive
    pub object_max_speed: f64, // exclusive
    pub object_color: String,

    pub score_font: String,
    pub score_color: String,
    pub score_x: f64,
    pub score_y: f64,
    pub score_label: String,

    pub input: InputPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            spawn_interval_ms: 2000,
            basket_width: 80.0,
            basket_height: 20.0,
            basket_margin: 10.0,
            basket_speed: 5.0,
            basket_color: "blue".into(),
            object_radius: 20.0,
            object_min_speed: 2.0,
            object_max_speed: 5.0,
            object_color: "red".into(),
            score_font: "20px Arial".into(),
            score_color: "black".into(),
            score_x: 10.0,
            score_y: 30.0,
            score_label: "Score: ".into(),
            input: InputPolicy::AnyReleaseStops,
        }
    }
}

impl GameConfig {
    /// Reject geometry the game loop cannot work with. Random ranges must be
    /// non-empty or spawning would panic inside `gen_range`.
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: &str| -> Result<()> { Err(GameError::InvalidConfig(msg.to_string())) };
        if !(self.width > 0.0 && self.height > 0.0) {
            return bad("field must have a positive size");
        }
        if self.spawn_interval_ms == 0 {
            return bad("spawn interval is zero");
        }
        if !(self.basket_width > 0.0 && self.basket_width <= self.width) {
            return bad("basket must fit the field width");
        }
        if self.basket_height + self.basket_margin > self.height {
            return bad("basket must fit the field height");
        }
        if !(self.basket_speed >= 0.0) {
            return bad("basket speed must not be negative");
        }
        if !(self.object_radius > 0.0 && self.object_radius < self.width) {
            return bad("object radius must be positive and smaller than the field");
        }
        if !(self.object_min_speed > 0.0 && self.object_min_speed < self.object_max_speed) {
            return bad("object speed range is empty");
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_speed_range() {
        let cfg = GameConfig { object_min_speed: 3.0, object_max_speed: 3.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_basket_wider_than_field() {
        let cfg = GameConfig { basket_width: 700.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_interval() {
        let cfg = GameConfig { spawn_interval_ms: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_fills_missing_fields_from_default() {
        let cfg = GameConfig::from_json(r#"{ "spawn_interval_ms": 500, "input": "TrackHeld" }"#).unwrap();
        assert_eq!(cfg.spawn_interval_ms, 500);
        assert_eq!(cfg.input, InputPolicy::TrackHeld);
        assert_eq!(cfg.width, 600.0);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_is_validated() {
        assert!(GameConfig::from_json(r#"{ "object_radius": 0.0 }"#).is_err());
    }
}
