//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! backends and platform APIs:
//! - Time arrives as a frame delta in milliseconds
//! - Seeded RNG only
//! - Entities are owned by the scene and referenced elsewhere by id

pub mod collision;
pub mod entity;
pub mod physics;
pub mod rect;
pub mod scene;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::intersects;
pub use entity::{
    Animation, Behavior, Body, Character, Entity, EntityId, EntityKind, FrameContext, Ground,
    Obstacle, UpdateOutcome,
};
pub use rect::Rect;
pub use scene::Scene;
pub use spawner::{ObstacleSpawn, SpawnTimer, Spawner, max_obstacles, size_multiplier};
pub use state::{GameContext, GamePhase, Viewport};
pub use tick::{TickInput, tick};
pub use world::World;
