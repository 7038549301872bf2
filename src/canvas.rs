//! [`Surface`] backed by a `CanvasRenderingContext2d`.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::surface::{Rect, Surface};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, region: Rect) {
        self.ctx.clear_rect(region.x, region.y, region.w, region.h);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.begin_path();
        self.ctx.arc(cx, cy, r, 0.0, std::f64::consts::TAU).ok();
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.set_font(font);
        self.ctx.fill_text(text, x, y).ok();
    }
}
