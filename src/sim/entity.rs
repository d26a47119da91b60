//! Entities: the character, obstacles and the ground
//!
//! Every entity is a `Body` (shared geometry) plus an `EntityKind` carrying
//! only the state its variant needs. Variants implement `Behavior`; `Entity`
//! dispatches to them with an exhaustive match.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::intersects;
use super::physics;
use super::rect::Rect;
use super::state::{GameContext, Viewport};
use crate::consts::{CHARACTER_FRAMES, OBSTACLE_SPRITE, Z_CHARACTER, Z_GROUND, Z_OBSTACLE};
use crate::persistence::KvStore;
use crate::renderer::{Surface, colors};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Stable handle for an entity owned by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Geometry shared by all entities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner (px)
    pub pos: Vec2,
    /// Velocity (px/s)
    pub vel: Vec2,
    /// Width and height (px)
    pub size: Vec2,
    /// Hitbox fraction of the size on each axis, in (0, 1]
    pub hitbox_scale: Vec2,
    /// Draw/update priority (lower drawn first)
    pub z: i32,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, z: i32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            hitbox_scale: Vec2::ONE,
            z,
        }
    }

    pub fn with_hitbox_scale(mut self, scale: Vec2) -> Self {
        self.hitbox_scale = scale.clamp(Vec2::splat(f32::EPSILON), Vec2::ONE);
        self
    }

    /// Nominal bounds
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Collision hitbox, centered inside the nominal bounds
    pub fn bounding_box(&self) -> Rect {
        self.rect().scaled_about_center(self.hitbox_scale)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Result of an entity update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Keep,
    /// Remove the entity from the scene (and any tracking list)
    Despawn,
}

/// Everything an entity may read or write while updating
pub struct FrameContext<'a> {
    pub game: &'a mut GameContext,
    pub store: &'a mut dyn KvStore,
    pub tuning: &'a Tuning,
    pub ground_y: f32,
    /// The character's body as of this entity's turn
    pub player: Option<Body>,
}

/// Per-variant update/draw
pub trait Behavior {
    fn update(
        &mut self,
        body: &mut Body,
        dt_ms: f32,
        frame: &mut FrameContext<'_>,
    ) -> UpdateOutcome;
    fn draw(&self, body: &Body, surface: &mut dyn Surface);
}

/// Looping run-cycle frame counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    frame_count: usize,
    frame_duration_ms: f32,
    index: usize,
    elapsed_ms: f32,
}

impl Animation {
    pub fn new(frame_count: usize, frame_duration_ms: f32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame_duration_ms,
            index: 0,
            elapsed_ms: 0.0,
        }
    }

    /// Current frame index
    pub fn current(&self) -> usize {
        self.index
    }

    /// Move to the next frame once the current one has been shown long enough
    pub fn advance(&mut self, dt_ms: f32) {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms > self.frame_duration_ms {
            self.index = (self.index + 1) % self.frame_count;
            self.elapsed_ms = 0.0;
        }
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.elapsed_ms = 0.0;
    }

    /// Endless frame sequence starting at the current frame
    pub fn frames(&self) -> impl Iterator<Item = usize> {
        (0..self.frame_count).cycle().skip(self.index)
    }
}

/// The player: animated, gravity-driven, jumps on command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub animation: Animation,
    pub on_ground: bool,
}

impl Character {
    pub fn new(frame_duration_ms: f32) -> Self {
        Self {
            animation: Animation::new(CHARACTER_FRAMES.len(), frame_duration_ms),
            on_ground: false,
        }
    }

    /// Build the character entity body from tuning
    pub fn body(tuning: &Tuning, ground_y: f32) -> Body {
        let size = Vec2::from(tuning.character_size);
        let pos = Vec2::new(tuning.character_x, ground_y - size.y - tuning.character_drop);
        Body::new(pos, size, Z_CHARACTER).with_hitbox_scale(Vec2::from(tuning.character_hitbox))
    }

    /// Jump if standing on the ground. Returns true if the jump happened.
    pub fn jump(&mut self, body: &mut Body, velocity: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        body.vel.y = velocity;
        true
    }

    /// Put the character back on the ground line, at rest
    pub fn land(&mut self, body: &mut Body, ground_y: f32) {
        physics::place_on_ground(body, ground_y);
        self.on_ground = true;
    }
}

impl Behavior for Character {
    fn update(
        &mut self,
        body: &mut Body,
        dt_ms: f32,
        frame: &mut FrameContext<'_>,
    ) -> UpdateOutcome {
        if frame.game.is_over() {
            return UpdateOutcome::Keep;
        }
        self.animation.advance(dt_ms);
        self.on_ground = physics::step(body, dt_ms, frame.tuning.gravity, frame.ground_y);
        UpdateOutcome::Keep
    }

    fn draw(&self, body: &Body, surface: &mut dyn Surface) {
        let path = CHARACTER_FRAMES[self.animation.current() % CHARACTER_FRAMES.len()];
        surface.draw_image(path, body.rect());
    }
}

/// A scrolling spike: ends the run on contact, scores once when passed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub scored: bool,
}

impl Obstacle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(x: f32, y: f32, size: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::splat(size), Z_OBSTACLE)
    }
}

impl Behavior for Obstacle {
    fn update(
        &mut self,
        body: &mut Body,
        dt_ms: f32,
        frame: &mut FrameContext<'_>,
    ) -> UpdateOutcome {
        if frame.game.is_over() {
            return UpdateOutcome::Keep;
        }

        body.pos.x -= frame.game.speed * frame.tuning.scroll_frames(dt_ms);

        if let Some(player) = frame.player {
            if intersects(&player.bounding_box(), &body.bounding_box()) {
                frame.game.end_run(&mut *frame.store);
                return UpdateOutcome::Keep;
            }

            if !self.scored && body.right() < player.pos.x {
                self.scored = true;
                frame.game.award_point();
            }
        }

        if body.right() < 0.0 {
            UpdateOutcome::Despawn
        } else {
            UpdateOutcome::Keep
        }
    }

    fn draw(&self, body: &Body, surface: &mut dyn Surface) {
        surface.draw_image(OBSTACLE_SPRITE, body.rect());
    }
}

/// The ground strip: twice the viewport wide, wraps after one viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    pub wrap_width: f32,
}

impl Ground {
    pub fn new(wrap_width: f32) -> Self {
        Self { wrap_width }
    }

    pub fn body(viewport: Viewport, ground_y: f32) -> Body {
        Body::new(
            Vec2::new(0.0, ground_y),
            Vec2::new(viewport.width * 2.0, (viewport.height - ground_y).max(0.0)),
            Z_GROUND,
        )
    }
}

impl Behavior for Ground {
    fn update(
        &mut self,
        body: &mut Body,
        dt_ms: f32,
        frame: &mut FrameContext<'_>,
    ) -> UpdateOutcome {
        if frame.game.is_over() {
            return UpdateOutcome::Keep;
        }
        body.pos.x -= frame.game.speed * frame.tuning.scroll_frames(dt_ms);
        if body.pos.x <= -self.wrap_width {
            body.pos.x = 0.0;
        }
        UpdateOutcome::Keep
    }

    fn draw(&self, body: &Body, surface: &mut dyn Surface) {
        surface.fill_rect(body.rect(), colors::GROUND);
    }
}

/// Entity variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Character(Character),
    Obstacle(Obstacle),
    Ground(Ground),
}

/// A scene member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub body: Body,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: EntityId, body: Body, kind: EntityKind) -> Self {
        Self { id, body, kind }
    }

    pub fn bounding_box(&self) -> Rect {
        self.body.bounding_box()
    }

    pub fn z(&self) -> i32 {
        self.body.z
    }

    pub fn is_character(&self) -> bool {
        matches!(self.kind, EntityKind::Character(_))
    }

    pub fn update(&mut self, dt_ms: f32, frame: &mut FrameContext<'_>) -> UpdateOutcome {
        match &mut self.kind {
            EntityKind::Character(c) => c.update(&mut self.body, dt_ms, frame),
            EntityKind::Obstacle(o) => o.update(&mut self.body, dt_ms, frame),
            EntityKind::Ground(g) => g.update(&mut self.body, dt_ms, frame),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, settings: &Settings) {
        match &self.kind {
            EntityKind::Character(c) => c.draw(&self.body, surface),
            EntityKind::Obstacle(o) => o.draw(&self.body, surface),
            EntityKind::Ground(g) => g.draw(&self.body, surface),
        }

        if settings.show_hitboxes && !matches!(self.kind, EntityKind::Ground(_)) {
            surface.stroke_rect(self.bounding_box(), colors::HITBOX, 2.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScore;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };
    const GROUND_Y: f32 = 468.0;

    fn frame<'a>(
        game: &'a mut GameContext,
        store: &'a mut MemoryStore,
        tuning: &'a Tuning,
        player: Option<Body>,
    ) -> FrameContext<'a> {
        FrameContext {
            game,
            store,
            tuning,
            ground_y: GROUND_Y,
            player,
        }
    }

    fn grounded_player() -> Body {
        Body::new(Vec2::new(100.0, GROUND_Y - 64.0), Vec2::splat(64.0), Z_CHARACTER)
            .with_hitbox_scale(Vec2::splat(0.8))
    }

    #[test]
    fn test_animation_cycles() {
        let mut anim = Animation::new(3, 100.0);
        let mut seen = Vec::new();
        for _ in 0..7 {
            anim.advance(101.0);
            seen.push(anim.current());
        }
        assert_eq!(seen, vec![1, 2, 0, 1, 2, 0, 1]);
    }

    #[test]
    fn test_animation_waits_for_duration() {
        let mut anim = Animation::new(3, 100.0);
        anim.advance(60.0);
        assert_eq!(anim.current(), 0);
        anim.advance(60.0);
        assert_eq!(anim.current(), 1);
    }

    #[test]
    fn test_animation_frames_sequence() {
        let mut anim = Animation::new(3, 100.0);
        anim.advance(150.0);
        let frames: Vec<usize> = anim.frames().take(5).collect();
        assert_eq!(frames, vec![1, 2, 0, 1, 2]);
        anim.restart();
        assert_eq!(anim.frames().next(), Some(0));
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut body = grounded_player();
        let mut character = Character::new(100.0);
        assert!(!character.jump(&mut body, -900.0));
        assert_eq!(body.vel.y, 0.0);

        character.on_ground = true;
        assert!(character.jump(&mut body, -900.0));
        assert_eq!(body.vel.y, -900.0);
    }

    #[test]
    fn test_obstacle_scores_once() {
        let tuning = Tuning::default();
        let mut game = GameContext::new(5.0, HighScore::default());
        let mut store = MemoryStore::new();
        let player = grounded_player();

        // Right edge at 104, player left edge at 100: one scroll step passes it
        let mut body = Obstacle::body(54.0, GROUND_Y - 50.0, 50.0);
        let mut obstacle = Obstacle::new();
        let dt = crate::consts::REFERENCE_FRAME_MS;

        let mut ctx = frame(&mut game, &mut store, &tuning, Some(player));
        assert_eq!(obstacle.update(&mut body, dt, &mut ctx), UpdateOutcome::Keep);
        assert_eq!(ctx.game.score, 1);
        assert!(obstacle.scored);

        for _ in 0..5 {
            obstacle.update(&mut body, dt, &mut ctx);
        }
        assert_eq!(ctx.game.score, 1);
    }

    #[test]
    fn test_obstacle_despawns_offscreen() {
        let tuning = Tuning::default();
        let mut game = GameContext::new(5.0, HighScore::default());
        let mut store = MemoryStore::new();
        let mut body = Obstacle::body(-48.0, GROUND_Y - 50.0, 50.0);
        let mut obstacle = Obstacle::new();

        let mut ctx = frame(&mut game, &mut store, &tuning, None);
        let outcome = obstacle.update(&mut body, crate::consts::REFERENCE_FRAME_MS, &mut ctx);
        assert_eq!(outcome, UpdateOutcome::Despawn);
    }

    #[test]
    fn test_obstacle_collision_ends_run() {
        let tuning = Tuning::default();
        let mut game = GameContext::new(5.0, HighScore::default());
        game.score = 5;
        let mut store = MemoryStore::new();
        let player = grounded_player();
        let mut body = Obstacle::body(120.0, GROUND_Y - 50.0, 50.0);
        let mut obstacle = Obstacle::new();

        let mut ctx = frame(&mut game, &mut store, &tuning, Some(player));
        obstacle.update(&mut body, 16.0, &mut ctx);
        assert!(game.is_over());
        assert_eq!(game.high_score.best, 5);
        assert_eq!(store.get(crate::consts::HIGH_SCORE_KEY).unwrap(), Some(5));
    }

    #[test]
    fn test_frozen_when_game_over() {
        let tuning = Tuning::default();
        let mut game = GameContext::new(5.0, HighScore::default());
        let mut store = MemoryStore::new();
        game.end_run(&mut store);

        let mut body = Obstacle::body(300.0, GROUND_Y - 50.0, 50.0);
        let mut ground_body = Ground::body(VIEWPORT, GROUND_Y);
        let mut ctx = frame(&mut game, &mut store, &tuning, None);
        Obstacle::new().update(&mut body, 16.0, &mut ctx);
        Ground::new(VIEWPORT.width).update(&mut ground_body, 16.0, &mut ctx);
        assert_eq!(body.pos.x, 300.0);
        assert_eq!(ground_body.pos.x, 0.0);
    }

    #[test]
    fn test_ground_wraps() {
        let mut tuning = Tuning::default();
        tuning.frame_locked_scroll = true;
        let mut game = GameContext::new(5.0, HighScore::default());
        let mut store = MemoryStore::new();
        let mut body = Ground::body(VIEWPORT, GROUND_Y);
        body.pos.x = -797.0;
        let mut ground = Ground::new(VIEWPORT.width);

        let mut ctx = frame(&mut game, &mut store, &tuning, None);
        ground.update(&mut body, 16.0, &mut ctx);
        assert_eq!(body.pos.x, 0.0);
        ground.update(&mut body, 16.0, &mut ctx);
        assert_eq!(body.pos.x, -5.0);
    }

    proptest! {
        #[test]
        fn bounding_box_inside_bounds(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            w in 0.0f32..500.0,
            h in 0.0f32..500.0,
            sx in 0.01f32..=1.0,
            sy in 0.01f32..=1.0,
        ) {
            let body = Body::new(Vec2::new(x, y), Vec2::new(w, h), 0)
                .with_hitbox_scale(Vec2::new(sx, sy));
            let hitbox = body.bounding_box();
            let bounds = body.rect();
            // Allow for rounding in the centered offset
            let eps = 1e-3 * (1.0 + x.abs().max(y.abs()) + w + h);
            prop_assert!(hitbox.x >= bounds.x - eps);
            prop_assert!(hitbox.y >= bounds.y - eps);
            prop_assert!(hitbox.w <= bounds.w + eps);
            prop_assert!(hitbox.h <= bounds.h + eps);
            prop_assert!(hitbox.right() <= bounds.right() + eps);
            prop_assert!(hitbox.bottom() <= bounds.bottom() + eps);
        }
    }
}
