//! 2D rendering
//!
//! Everything draws through the `Surface` trait: a canvas 2D context on the
//! web, a call recorder in tests and headless runs.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod hud;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCall, RecordingSurface};

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{Rect, World};

/// RGBA, components in 0..=1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const GROUND: Color = [1.0, 1.0, 1.0, 1.0];
    pub const HITBOX: Color = [1.0, 0.0, 0.0, 1.0];
    pub const SCORE_TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const HIGH_SCORE_TEXT: Color = [0.0, 0.0, 0.0, 1.0];
    pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.5];
    pub const OVERLAY_TEXT: Color = [1.0, 1.0, 1.0, 1.0];
}

/// CSS `rgba()` string for a color
pub fn css_color(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub color: Color,
    pub align: TextAlign,
}

/// 2D drawing target
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);
    /// Draw the bitmap at `path` stretched into `dest`.
    ///
    /// Returns false (drawing nothing) while the bitmap is still loading.
    fn draw_image(&mut self, path: &str, dest: Rect) -> bool;
    /// `pos` is the text baseline anchor
    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
}

/// Draw one frame: scene back-to-front, then the HUD.
///
/// While paused the last frame stays on screen, dimmed once under a
/// resume prompt.
pub fn render(world: &mut World, settings: &Settings, surface: &mut dyn Surface) {
    if world.is_paused() {
        if world.take_pause_overlay() {
            hud::draw_paused(world.viewport, surface);
        }
        return;
    }
    surface.clear();
    world.scene.draw(surface, settings);
    if settings.show_hud {
        hud::draw_scores(&world.game, world.viewport, surface);
    }
    if world.game.is_over() {
        hud::draw_game_over(&world.game, world.viewport, surface);
    }
}
