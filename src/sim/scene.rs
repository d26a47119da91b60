//! Scene graph (render group)
//!
//! Owns every entity. Update visits the entities present when the traversal
//! starts, so members may despawn (or be spawned) mid-frame without being
//! skipped or visited twice. Draw re-sorts by z each frame.

use super::entity::{Body, Entity, EntityId, FrameContext, UpdateOutcome};
use crate::renderer::Surface;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Scene {
    entities: Vec<Entity>,
    running: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            running: true,
        }
    }

    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    /// Remove an entity. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Members in their current order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Body of the (first) character in the scene
    pub fn player_body(&self) -> Option<Body> {
        self.entities
            .iter()
            .find(|e| e.is_character())
            .map(|e| e.body)
    }

    /// Update every member. Returns the ids that despawned.
    pub fn update(&mut self, dt_ms: f32, frame: &mut FrameContext<'_>) -> Vec<EntityId> {
        let mut despawned = Vec::new();
        if !self.running {
            return despawned;
        }

        let snapshot: Vec<EntityId> = self.entities.iter().map(|e| e.id).collect();
        for id in snapshot {
            frame.player = self.player_body();
            let Some(entity) = self.get_mut(id) else {
                continue;
            };
            if entity.update(dt_ms, frame) == UpdateOutcome::Despawn {
                self.remove(id);
                despawned.push(id);
            }
        }
        despawned
    }

    /// Draw back-to-front (stable sort on ascending z)
    pub fn draw(&mut self, surface: &mut dyn Surface, settings: &Settings) {
        if !self.running {
            return;
        }
        self.entities.sort_by_key(|e| e.z());
        for entity in &self.entities {
            entity.draw(surface, settings);
        }
    }
}
