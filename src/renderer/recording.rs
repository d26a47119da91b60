//! Surface that records draw calls instead of rasterizing them
//!
//! Used by tests and the headless native runner.

use std::collections::HashSet;

use glam::Vec2;

use super::{Color, Surface, TextStyle};
use crate::sim::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, width: f32 },
    Image { path: String, rect: Rect },
    Text { text: String, pos: Vec2, style: TextStyle },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    loaded: HashSet<String>,
    all_loaded: bool,
}

impl RecordingSurface {
    /// No bitmaps loaded yet: every image draw is skipped
    pub fn new() -> Self {
        Self::default()
    }

    /// Every bitmap counts as loaded
    pub fn all_loaded() -> Self {
        Self {
            all_loaded: true,
            ..Self::default()
        }
    }

    pub fn mark_loaded(&mut self, path: &str) {
        self.loaded.insert(path.to_string());
    }

    pub fn is_loaded(&self, path: &str) -> bool {
        self.all_loaded || self.loaded.contains(path)
    }

    /// Drop recorded calls, keeping the loaded set
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.calls.push(DrawCall::StrokeRect {
            rect,
            color,
            width: line_width,
        });
    }

    fn draw_image(&mut self, path: &str, dest: Rect) -> bool {
        if !self.is_loaded(path) {
            return false;
        }
        self.calls.push(DrawCall::Image {
            path: path.to_string(),
            rect: dest,
        });
        true
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
            style,
        });
    }
}
