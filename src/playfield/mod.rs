//! Playfield: score, the basket and the live falling objects, plus the
//! per-frame update sequence. Host-agnostic; drawing goes through [`Surface`]
//! and timing is driven from outside (see `session`).

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::GameConfig;
use crate::error::Result;
use crate::surface::{Rect, Surface};

mod basket;
mod controls;
mod falling_object;

pub use basket::{Basket, Direction};
pub use controls::{Controls, Key};
pub use falling_object::FallingObject;

/// Running counters; informational only, no rule reads them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub spawned: u32,
    pub caught: u32,
    pub missed: u32, // fell out through the bottom edge
    pub ticks: u64,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub caught: u32,
    pub missed: u32,
}

pub struct Playfield {
    cfg: GameConfig,
    basket: Basket,
    objects: Vec<FallingObject>, // spawn order
    controls: Controls,
    score: u32,
    game_over: bool,
    stats: Stats,
    rng: SmallRng,
}

impl Playfield {
    pub fn new(cfg: GameConfig) -> Result<Self> {
        Self::with_rng(cfg, SmallRng::from_entropy())
    }

    /// Deterministic playfield for replays and tests.
    pub fn with_seed(cfg: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(cfg, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(cfg: GameConfig, rng: SmallRng) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            basket: Basket::new(&cfg),
            controls: Controls::new(cfg.input),
            objects: Vec::new(),
            score: 0,
            game_over: false,
            stats: Stats::default(),
            rng,
            cfg,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn objects(&self) -> &[FallingObject] {
        &self.objects
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// External termination hook. Nothing inside the game calls this.
    pub fn end(&mut self) {
        self.game_over = true;
    }

    /// Add one object at a random x along the top edge.
    pub fn spawn(&mut self) {
        let obj = FallingObject::spawn(&mut self.rng, &self.cfg);
        log::debug!("spawn x={:.1} speed={:.2}", obj.x, obj.speed());
        self.drop_object(obj);
    }

    /// Add a specific object, e.g. for scripted scenarios.
    pub fn drop_object(&mut self, obj: FallingObject) {
        self.objects.push(obj);
        self.stats.spawned += 1;
    }

    pub fn key_down(&mut self, key: Key) {
        if let Some(dir) = self.controls.key_down(key) {
            self.basket.set_direction(dir);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if let Some(dir) = self.controls.key_up(key) {
            self.basket.set_direction(dir);
        }
    }

    /// One frame: clear, move + draw basket, move + draw objects, drop the ones
    /// past the bottom edge, then resolve catches against what is left, and
    /// finally draw the score. Both removals filter the list so no object is
    /// skipped or evaluated twice.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> TickSummary {
        if self.game_over {
            return TickSummary::default();
        }
        let cfg = &self.cfg;
        surface.clear(Rect::new(0.0, 0.0, cfg.width, cfg.height));
        self.basket.advance(surface, &cfg.basket_color);

        let before = self.objects.len();
        self.objects.retain_mut(|obj| {
            obj.advance(surface, &cfg.object_color);
            obj.y <= cfg.height
        });
        let missed = (before - self.objects.len()) as u32;

        let basket = &self.basket;
        let before = self.objects.len();
        self.objects.retain(|obj| !basket.catches(obj));
        let caught = (before - self.objects.len()) as u32;

        if caught > 0 {
            self.score += caught;
            log::debug!("caught {caught}, score {}", self.score);
        }
        self.stats.caught += caught;
        self.stats.missed += missed;
        self.stats.ticks += 1;

        let label = format!("{}{}", cfg.score_label, self.score);
        surface.fill_text(&label, cfg.score_x, cfg.score_y, &cfg.score_font, &cfg.score_color);

        TickSummary { caught, missed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputPolicy;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn field() -> Playfield {
        Playfield::with_seed(GameConfig::default(), 42).unwrap()
    }

    #[test]
    fn live_count_tracks_spawns_without_catches() {
        let mut pf = field();
        let mut s = RecordingSurface::new();
        for n in 1..=5 {
            pf.spawn();
            for _ in 0..10 {
                let t = pf.tick(&mut s);
                assert_eq!(t, TickSummary::default());
            }
            assert_eq!(pf.objects().len(), n);
        }
        assert_eq!(pf.score(), 0);
        assert_eq!(pf.stats().spawned, 5);
    }

    #[test]
    fn catch_scores_and_removes() {
        let mut pf = field();
        let mut s = RecordingSurface::new();
        // bottom edge 353 + 20 > 370 after one step
        pf.drop_object(FallingObject::at(300.0, 350.0, 20.0, 3.0));
        let t = pf.tick(&mut s);
        assert_eq!(t, TickSummary { caught: 1, missed: 0 });
        assert_eq!(pf.score(), 1);
        assert!(pf.objects().is_empty());
        assert_eq!(s.last_text(), Some("Score: 1"));
    }

    #[test]
    fn exit_is_checked_before_catch() {
        let mut pf = field();
        let mut s = RecordingSurface::new();
        // aligned with the basket but falls past the bottom this tick
        pf.drop_object(FallingObject::at(300.0, 398.0, 20.0, 4.0));
        let t = pf.tick(&mut s);
        assert_eq!(t, TickSummary { caught: 0, missed: 1 });
        assert_eq!(pf.score(), 0);
    }

    #[test]
    fn adjacent_removals_are_not_skipped() {
        let mut pf = field();
        let mut s = RecordingSurface::new();
        pf.drop_object(FallingObject::at(50.0, 399.0, 20.0, 2.0)); // exits
        pf.drop_object(FallingObject::at(450.0, 399.0, 20.0, 2.0)); // exits
        pf.drop_object(FallingObject::at(290.0, 360.0, 20.0, 2.0)); // caught
        pf.drop_object(FallingObject::at(300.0, 360.0, 20.0, 2.0)); // caught
        pf.drop_object(FallingObject::at(100.0, 0.0, 20.0, 2.0)); // stays
        let t = pf.tick(&mut s);
        assert_eq!(t, TickSummary { caught: 2, missed: 2 });
        assert_eq!(pf.objects().len(), 1);
        assert_eq!(pf.objects()[0].x, 100.0);
    }

    #[test]
    fn tick_draw_order() {
        let mut pf = field();
        let mut s = RecordingSurface::new();
        pf.drop_object(FallingObject::at(100.0, 0.0, 20.0, 2.0));
        pf.tick(&mut s);
        let cmds = s.commands();
        assert_eq!(cmds.len(), 3);
        assert!(matches!(&cmds[0], DrawCommand::Rect { color, .. } if color == "blue"));
        assert!(matches!(&cmds[1], DrawCommand::Circle { color, .. } if color == "red"));
        assert!(matches!(
            &cmds[2],
            DrawCommand::Text { text, x, y, font, color }
                if text == "Score: 0" && *x == 10.0 && *y == 30.0 && font == "20px Arial" && color == "black"
        ));
        // next tick clears the previous frame first
        pf.tick(&mut s);
        assert_eq!(s.commands().len(), 3);
        assert_eq!(s.clear_count(), 2);
    }

    #[test]
    fn screen_holds_exactly_one_frame() {
        let mut pf = field();
        let mut s = RecordingSurface::new();
        pf.drop_object(FallingObject::at(50.0, 399.0, 20.0, 2.0)); // exits on the first tick
        pf.drop_object(FallingObject::at(450.0, 100.0, 20.0, 2.0));
        // the exiting object is still drawn on the tick it leaves
        pf.tick(&mut s);
        assert_eq!(pf.objects().len(), 1);
        assert_eq!(s.circles(), 2);
        for _ in 0..6 {
            pf.tick(&mut s);
            assert_eq!(s.circles(), pf.objects().len());
            assert_eq!(s.rects(), 1);
            assert_eq!(s.texts(), 1);
        }
        assert_eq!(pf.stats().missed, 1);
    }

    #[test]
    fn ended_field_does_not_tick() {
        let mut pf = field();
        let mut s = RecordingSurface::new();
        pf.spawn();
        pf.end();
        pf.tick(&mut s);
        assert!(pf.is_over());
        assert_eq!(s.clear_count(), 0);
        assert_eq!(pf.objects()[0].y, 0.0);
    }

    #[test]
    fn keys_steer_basket() {
        let mut pf = field();
        let mut s = RecordingSurface::new();
        pf.key_down(Key::Right);
        pf.tick(&mut s);
        assert_eq!(pf.basket().x, 265.0);
        pf.key_up(Key::Right);
        pf.tick(&mut s);
        assert_eq!(pf.basket().x, 265.0);
        pf.key_down(Key::Left);
        pf.tick(&mut s);
        assert_eq!(pf.basket().x, 260.0);
    }

    #[test]
    fn track_held_policy_is_wired() {
        let cfg = GameConfig { input: InputPolicy::TrackHeld, ..Default::default() };
        let mut pf = Playfield::with_seed(cfg, 1).unwrap();
        pf.key_down(Key::Left);
        pf.key_down(Key::Right);
        pf.key_up(Key::Right);
        assert_eq!(pf.basket().direction(), Direction::Left);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = GameConfig { object_radius: -1.0, ..Default::default() };
        assert!(Playfield::with_seed(cfg, 0).is_err());
    }
}
