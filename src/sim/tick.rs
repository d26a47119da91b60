//! Per-frame simulation step
//!
//! Order within a frame: input, speed ramp, entity updates, spawner.
//! Drawing happens after `tick` returns.

use super::entity::FrameContext;
use super::world::World;
use crate::persistence::KvStore;

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key (Space / Up)
    pub jump: bool,
    /// Click/tap: resume when paused, restart when over, otherwise jump
    pub pointer_down: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the world by one frame of `dt_ms`
pub fn tick(world: &mut World, input: &TickInput, dt_ms: f32, store: &mut dyn KvStore) {
    if input.pause {
        world.toggle_pause();
    }

    // Paused: nothing moves, nothing spawns. A click resumes and is consumed.
    if world.is_paused() {
        if input.pointer_down {
            world.resume();
        }
        return;
    }

    if input.pointer_down {
        if world.game.is_over() {
            world.reset();
        } else {
            world.jump();
        }
    }
    if input.jump {
        world.jump();
    }

    let frames = world.tuning.scroll_frames(dt_ms);
    world.game.accelerate(world.tuning.speed_ramp * frames);

    let was_running = world.game.is_running();
    let despawned = {
        let mut frame = FrameContext {
            game: &mut world.game,
            store,
            tuning: &world.tuning,
            ground_y: world.ground_y,
            player: None,
        };
        world.scene.update(dt_ms, &mut frame)
    };
    world.untrack(&despawned);

    if was_running && world.game.is_over() {
        // Spawning halts with the run; reset restarts it
        world.spawner.cancel();
    }

    if world.spawner.advance(dt_ms) {
        world.run_spawn_cycle();
    }
}
