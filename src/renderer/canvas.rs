//! Canvas 2D backend

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Color, Surface, TextStyle, css_color};
use crate::sim::Rect;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<String, HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        use wasm_bindgen::JsCast;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            images: HashMap::new(),
        })
    }

    /// Start loading bitmaps so they are ready by the first frames
    pub fn preload(&mut self, paths: &[&str]) {
        for path in paths {
            self.image(path);
        }
    }

    /// Cached image element for `path`, created (and loading) on first use
    fn image(&mut self, path: &str) -> Option<&HtmlImageElement> {
        if !self.images.contains_key(path) {
            let img = match HtmlImageElement::new() {
                Ok(img) => img,
                Err(e) => {
                    log::warn!("Could not create image for {}: {:?}", path, e);
                    return None;
                }
            };
            img.set_src(path);
            log::debug!("Loading {}", path);
            self.images.insert(path.to_string(), img);
        }
        self.images.get(path)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.ctx.set_stroke_style_str(&css_color(color));
        self.ctx.set_line_width(line_width as f64);
        self.ctx
            .stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn draw_image(&mut self, path: &str, dest: Rect) -> bool {
        let Some(img) = self.image(path).cloned() else {
            return false;
        };
        // Still loading (or failed): skip this frame
        if !img.complete() || img.natural_width() == 0 {
            return false;
        }
        match self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &img,
            dest.x as f64,
            dest.y as f64,
            dest.w as f64,
            dest.h as f64,
        ) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("drawImage failed for {}: {:?}", path, e);
                false
            }
        }
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.ctx.set_fill_style_str(&css_color(style.color));
        self.ctx.set_font(&format!("{}px Arial", style.size_px));
        self.ctx.set_text_align(style.align.as_str());
        if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("fillText failed: {:?}", e);
        }
    }
}
