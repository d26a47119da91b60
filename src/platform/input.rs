//! Input collection
//!
//! Browser events are translated into `InputEvent`s and folded into an
//! `InputState`, which remembers held keys and the pointer, and hands the
//! simulation one `TickInput` per frame.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Up,
    Escape,
    /// Hitbox overlay toggle
    H,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Self {
        match name {
            " " | "Spacebar" => Key::Space,
            "ArrowUp" | "Up" => Key::Up,
            "Escape" | "Esc" => Key::Escape,
            "h" | "H" => Key::H,
            _ => Key::Other,
        }
    }

    pub fn is_jump(&self) -> bool {
        matches!(self, Key::Space | Key::Up)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Canvas-relative position
    PointerDown(Vec2),
    PointerUp(Vec2),
    PointerMove(Vec2),
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
    /// Last known pointer position
    pub pointer: Option<Vec2>,
    pub pointer_held: bool,
    /// Commands collected since the last frame
    pending: TickInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                // Auto-repeat fires keydown again; only act on the first
                let fresh = self.pressed.insert(key);
                if key.is_jump() {
                    self.pending.jump = true;
                } else if key == Key::Escape && fresh {
                    self.pending.pause = true;
                }
            }
            InputEvent::KeyUp(key) => {
                self.pressed.remove(&key);
            }
            InputEvent::PointerDown(pos) => {
                self.pointer = Some(pos);
                self.pointer_held = true;
                self.pending.pointer_down = true;
            }
            InputEvent::PointerUp(pos) => {
                self.pointer = Some(pos);
                self.pointer_held = false;
            }
            InputEvent::PointerMove(pos) => {
                self.pointer = Some(pos);
            }
        }
    }

    /// Request a pause toggle on the next frame (tab hidden)
    pub fn request_pause(&mut self) {
        self.pending.pause = true;
    }

    /// Commands for this frame; clears them
    pub fn take_tick_input(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name(" "), Key::Space);
        assert_eq!(Key::from_key_name("ArrowUp"), Key::Up);
        assert_eq!(Key::from_key_name("Escape"), Key::Escape);
        assert_eq!(Key::from_key_name("H"), Key::H);
        assert_eq!(Key::from_key_name("a"), Key::Other);
    }

    #[test]
    fn test_key_tracking() {
        let mut input = InputState::new();
        input.handle(InputEvent::KeyDown(Key::Space));
        assert!(input.is_pressed(Key::Space));
        input.handle(InputEvent::KeyUp(Key::Space));
        assert!(!input.is_pressed(Key::Space));
    }

    #[test]
    fn test_commands_are_one_shot() {
        let mut input = InputState::new();
        input.handle(InputEvent::KeyDown(Key::Up));
        input.handle(InputEvent::PointerDown(Vec2::new(5.0, 6.0)));

        let tick = input.take_tick_input();
        assert!(tick.jump);
        assert!(tick.pointer_down);
        assert!(!tick.pause);
        assert_eq!(input.take_tick_input(), TickInput::default());
        assert!(input.pointer_held);
    }

    #[test]
    fn test_held_escape_toggles_once() {
        let mut input = InputState::new();
        input.handle(InputEvent::KeyDown(Key::Escape));
        input.handle(InputEvent::KeyDown(Key::Escape));
        assert!(input.take_tick_input().pause);
        input.handle(InputEvent::KeyDown(Key::Escape));
        assert!(!input.take_tick_input().pause);

        input.handle(InputEvent::KeyUp(Key::Escape));
        input.handle(InputEvent::KeyDown(Key::Escape));
        assert!(input.take_tick_input().pause);
    }

    #[test]
    fn test_pointer_tracking() {
        let mut input = InputState::new();
        input.handle(InputEvent::PointerMove(Vec2::new(1.0, 2.0)));
        assert_eq!(input.pointer, Some(Vec2::new(1.0, 2.0)));
        assert!(!input.pointer_held);

        input.handle(InputEvent::PointerDown(Vec2::new(3.0, 4.0)));
        input.handle(InputEvent::PointerUp(Vec2::new(3.0, 4.0)));
        assert!(!input.pointer_held);
        assert!(input.take_tick_input().pointer_down);
    }
}
