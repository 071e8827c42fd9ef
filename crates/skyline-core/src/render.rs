//! Draw passes for one frame, in occlusion order.

use crate::constants::*;
use crate::mapping::{map_energy, map_linear};
use crate::scene::SceneModel;
use crate::surface::DrawSurface;

pub fn draw_background(surface: &mut dyn DrawSurface) {
    surface.clear(BACKGROUND);
}

/// Placeholder frame shown before audio is available.
pub fn draw_placeholder(surface: &mut dyn DrawSurface, message: &str) {
    draw_background(surface);
    let x = surface.width() * 0.5 - message.len() as f32 * OVERLAY_TEXT_SIZE * 0.3;
    let y = surface.height() * 0.5;
    surface.text(message, x.max(OVERLAY_MARGIN), y, OVERLAY_TEXT_SIZE, TEXT_COLOR);
}

/// Buildings back to front, each with its window strip.
pub fn draw_skyline(surface: &mut dyn DrawSurface, scene: &SceneModel) {
    let h = scene.height();
    for b in &scene.buildings {
        let top = h - b.current_height;
        surface.fill_rect(b.x, top, b.width, b.current_height, b.color.with_alpha(b.alpha));
        let strip = b.width - 2.0 * WINDOW_INSET;
        if strip > 0.0 && b.current_height > WINDOW_DROP + WINDOW_HEIGHT {
            surface.fill_rect(
                b.x + WINDOW_INSET,
                top + WINDOW_DROP,
                strip,
                WINDOW_HEIGHT,
                WINDOW_COLOR,
            );
        }
    }
}

/// Edges first, then nodes on top so dots cover the line ends.
pub fn draw_network(surface: &mut dyn DrawSurface, scene: &SceneModel, treble: f32) {
    for edge in &scene.edges {
        let Some((a, b)) = scene.edge_endpoints(edge) else {
            continue;
        };
        let drive = treble * edge.strength;
        let fade = map_linear(
            a.distance(b),
            LINK_FADE_DISTANCE,
            LINK_FADE_DISTANCE * 3.0,
            1.0,
            LINK_FADE_FLOOR,
        );
        let alpha = map_energy(drive, EDGE_ALPHA_MIN, EDGE_ALPHA_MAX) * fade;
        let weight = map_energy(drive, EDGE_WEIGHT_MIN, EDGE_WEIGHT_MAX);
        surface.line(a.x, a.y, b.x, b.y, weight, NODE_COLOR.with_alpha(alpha));
    }
    for n in &scene.nodes {
        let d = n.diameter();
        let (x, y) = (n.position.x, n.position.y);
        surface.fill_ellipse(x, y, d, d, NODE_COLOR.with_alpha(n.alpha));
        let halo = d + 2.0 * n.halo_weight + 2.0;
        surface.stroke_ellipse(x, y, halo, halo, n.halo_weight, NODE_COLOR.with_alpha(HALO_ALPHA));
    }
}

pub fn draw_overlay(surface: &mut dyn DrawSurface, lines: &[String]) {
    for (i, line) in lines.iter().enumerate() {
        let y = OVERLAY_MARGIN + OVERLAY_TEXT_SIZE + i as f32 * OVERLAY_LINE_HEIGHT;
        surface.text(line, OVERLAY_MARGIN, y, OVERLAY_TEXT_SIZE, TEXT_COLOR);
    }
}
