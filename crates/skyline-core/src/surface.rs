/// Alpha is on the 0..=255 scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 255.0),
            ..self
        }
    }

    pub fn to_css(self) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.r,
            self.g,
            self.b,
            (self.a / 255.0).clamp(0.0, 1.0)
        )
    }
}

// Later calls occlude earlier ones.
pub trait DrawSurface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn clear(&mut self, color: Rgba);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba);
    fn fill_ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32, color: Rgba);
    fn stroke_ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32, weight: f32, color: Rgba);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, weight: f32, color: Rgba);
    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba);
}
