//! The runner world: scene, tracked obstacles, spawner and run state

use super::entity::{Body, Character, Entity, EntityId, EntityKind, Ground, Obstacle};
use super::scene::Scene;
use super::spawner::{ObstacleSpawn, Spawner};
use super::state::{GameContext, Viewport};
use crate::highscores::HighScore;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub viewport: Viewport,
    /// Y of the ground line
    pub ground_y: f32,
    pub game: GameContext,
    pub scene: Scene,
    /// Obstacles currently in the scene (spawn order)
    pub obstacles: Vec<EntityId>,
    pub character: EntityId,
    pub ground: EntityId,
    pub spawner: Spawner,
    next_id: u32,
    pause_overlay_pending: bool,
}

impl World {
    /// Build the world with its character and ground, spawner armed
    pub fn new(viewport: Viewport, tuning: Tuning, high_score: HighScore, seed: u64) -> Self {
        let ground_y = viewport.ground_y(tuning.ground_ratio);
        let mut world = Self {
            game: GameContext::new(tuning.base_speed, high_score),
            scene: Scene::new(),
            obstacles: Vec::new(),
            character: EntityId(0),
            ground: EntityId(0),
            spawner: Spawner::new(seed),
            viewport,
            ground_y,
            tuning,
            next_id: 1,
            pause_overlay_pending: false,
        };

        world.character = world.next_entity_id();
        world.scene.add(Entity::new(
            world.character,
            Character::body(&world.tuning, ground_y),
            EntityKind::Character(Character::new(world.tuning.frame_duration_ms)),
        ));

        world.ground = world.next_entity_id();
        world.scene.add(Entity::new(
            world.ground,
            Ground::body(viewport, ground_y),
            EntityKind::Ground(Ground::new(viewport.width)),
        ));

        world.spawner.start();
        log::info!(
            "World ready: {}x{}, ground at {}, seed {}",
            viewport.width,
            viewport.height,
            ground_y,
            seed
        );
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn character_body(&self) -> Option<&Body> {
        self.scene.get(self.character).map(|e| &e.body)
    }

    pub fn character_state(&self) -> Option<&Character> {
        match &self.scene.get(self.character)?.kind {
            EntityKind::Character(c) => Some(c),
            _ => None,
        }
    }

    /// Jump if the run is live and the character is grounded
    pub fn jump(&mut self) -> bool {
        if self.game.is_over() {
            return false;
        }
        let velocity = self.tuning.jump_velocity;
        match self.scene.get_mut(self.character) {
            Some(Entity {
                body,
                kind: EntityKind::Character(c),
                ..
            }) => c.jump(body, velocity),
            _ => false,
        }
    }

    /// Add one obstacle to the scene and the tracking list
    pub fn spawn_obstacle(&mut self, spawn: &ObstacleSpawn) -> EntityId {
        let id = self.next_entity_id();
        self.scene.add(Entity::new(
            id,
            Obstacle::body(spawn.x, spawn.y, spawn.size),
            EntityKind::Obstacle(Obstacle::new()),
        ));
        self.obstacles.push(id);
        id
    }

    /// One spawner firing: place what the spawner plans, then reschedule.
    ///
    /// Returns the number of obstacles placed.
    pub fn run_spawn_cycle(&mut self) -> usize {
        if self.game.is_over() {
            return 0;
        }

        let plan = self.spawner.plan(
            self.game.score,
            self.obstacles.len(),
            &self.tuning,
            self.viewport.width,
            self.ground_y,
        );
        for spawn in &plan {
            self.spawn_obstacle(spawn);
        }
        if !plan.is_empty() {
            log::debug!(
                "Spawned {} obstacle(s) at x={:.0}, x{:.2} size",
                plan.len(),
                plan[0].x,
                plan[0].multiplier
            );
        }

        let delay = self.spawner.reschedule(self.game.speed, &self.tuning);
        log::trace!("Next spawn in {:.0} ms", delay);
        plan.len()
    }

    /// Forget obstacles that left the scene
    pub fn untrack(&mut self, despawned: &[EntityId]) {
        self.obstacles.retain(|id| !despawned.contains(id));
    }

    /// GameOver → Running: clear obstacles, land the character, rewind the
    /// ground and restart the spawner
    pub fn reset(&mut self) {
        self.game.restart();

        for id in self.obstacles.drain(..) {
            self.scene.remove(id);
        }

        let ground_y = self.ground_y;
        if let Some(Entity {
            body,
            kind: EntityKind::Character(c),
            ..
        }) = self.scene.get_mut(self.character)
        {
            c.land(body, ground_y);
        }

        if let Some(ground) = self.scene.get_mut(self.ground) {
            ground.body.pos.x = 0.0;
        }

        self.spawner.cancel();
        self.spawner.start();
        log::info!("Run reset");
    }

    /// Freeze simulation and drawing; the pending spawn is held
    pub fn pause(&mut self) {
        if self.scene.is_running() {
            self.scene.stop();
            self.spawner.suspend();
            self.pause_overlay_pending = true;
            log::info!("Paused");
        }
    }

    /// Resume after `pause`; a live run picks up its spawn countdown
    pub fn resume(&mut self) {
        if !self.scene.is_running() {
            self.scene.start();
            self.pause_overlay_pending = false;
            if self.game.is_running() {
                self.spawner.resume();
            }
            log::info!("Resumed");
        }
    }

    /// True once per pause: the paused overlay still needs drawing
    pub fn take_pause_overlay(&mut self) -> bool {
        std::mem::take(&mut self.pause_overlay_pending)
    }

    pub fn toggle_pause(&mut self) {
        if self.scene.is_running() {
            self.pause();
        } else {
            self.resume();
        }
    }

    pub fn is_paused(&self) -> bool {
        !self.scene.is_running()
    }
}
