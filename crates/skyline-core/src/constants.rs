use crate::surface::Rgba;

// Shared visual tuning constants for the skyline and node network.

// Analyzer defaults
pub const DEFAULT_BINS: usize = 64;
pub const DEFAULT_SMOOTHING: f32 = 0.8;
pub const DEFAULT_MIN_DB: f32 = -100.0;
pub const DEFAULT_MAX_DB: f32 = -30.0;
pub const SPECTRUM_MAX: f32 = 255.0; // byte magnitude ceiling

// Palette
pub const BACKGROUND: Rgba = Rgba::new(10, 14, 23, 255.0); // dark navy
pub const BUILDING_COLOR: Rgba = Rgba::new(0, 243, 255, 150.0); // cyan
pub const WINDOW_COLOR: Rgba = Rgba::new(255, 255, 255, 50.0);
pub const NODE_COLOR: Rgba = Rgba::new(0, 255, 157, 255.0); // mint
pub const TEXT_COLOR: Rgba = Rgba::new(207, 231, 255, 220.0);

// Skyline
pub const BUILDING_ALPHA_MIN: f32 = 120.0;
pub const BUILDING_ALPHA_MAX: f32 = 210.0;
pub const WINDOW_INSET: f32 = 5.0; // horizontal inset of the window strip
pub const WINDOW_DROP: f32 = 10.0; // distance of the strip below the roof
pub const WINDOW_HEIGHT: f32 = 5.0;

// Node network
pub const NODE_ALPHA_MIN: f32 = 100.0;
pub const NODE_ALPHA_MAX: f32 = 255.0;
pub const NODE_PULSE_GROWTH: f32 = 5.0; // extra diameter at full treble
pub const HALO_WEIGHT_MIN: f32 = 0.5;
pub const HALO_WEIGHT_MAX: f32 = 2.5;
pub const HALO_ALPHA: f32 = 60.0;
pub const EDGE_ALPHA_MIN: f32 = 30.0;
pub const EDGE_ALPHA_MAX: f32 = 110.0;
pub const EDGE_WEIGHT_MIN: f32 = 0.5;
pub const EDGE_WEIGHT_MAX: f32 = 2.0;
pub const EDGE_STRENGTH_MIN: f32 = 0.3;
pub const LINK_FADE_DISTANCE: f32 = 150.0; // edges longer than this are drawn faint
pub const LINK_FADE_FLOOR: f32 = 0.35;

// Frame pacing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after tab switches / stalls

// Overlay
pub const OVERLAY_MARGIN: f32 = 14.0;
pub const OVERLAY_LINE_HEIGHT: f32 = 18.0;
pub const OVERLAY_TEXT_SIZE: f32 = 13.0;
