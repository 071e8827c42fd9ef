use skyline_core::{DrawSurface, Rgba};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Canvas 2D context as a [`DrawSurface`], in backing-store pixels.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self { canvas, ctx })
    }

    fn ellipse_path(&self, cx: f32, cy: f32, w: f32, h: f32) -> bool {
        self.ctx.begin_path();
        let (rx, ry) = ((w * 0.5).max(0.0) as f64, (h * 0.5).max(0.0) as f64);
        self.ctx
            .ellipse(cx as f64, cy as f64, rx, ry, 0.0, 0.0, TAU)
            .is_ok()
    }
}

impl DrawSurface for CanvasSurface {
    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn clear(&mut self, color: Rgba) {
        let (w, h) = (self.width() as f64, self.height() as f64);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32, color: Rgba) {
        if self.ellipse_path(cx, cy, w, h) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx.fill();
        }
    }

    fn stroke_ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32, weight: f32, color: Rgba) {
        if self.ellipse_path(cx, cy, w, h) {
            self.ctx.set_line_width(weight as f64);
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.stroke();
        }
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, weight: f32, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(x1 as f64, y1 as f64);
        self.ctx.line_to(x2 as f64, y2 as f64);
        self.ctx.set_line_width(weight as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.stroke();
    }

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba) {
        self.ctx.set_font(&format!("{}px monospace", size.round()));
        self.ctx.set_fill_style_str(&color.to_css());
        _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}
