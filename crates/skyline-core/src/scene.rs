//! Skyline buildings and the drifting node network.
//!
//! Geometry is generated once per surface size from a seeded RNG. Band-driven
//! attributes (`current_height`, `pulse`, ...) are derived every frame and never
//! fed back into the static fields.

use glam::Vec2;
use rand::prelude::*;
use std::ops::Range;

use crate::bands::{band_index, BandEnergy};
use crate::constants::*;
use crate::error::VisualizerError;
use crate::mapping::{map_energy, map_linear};
use crate::spectrum::SpectrumSnapshot;
use crate::surface::Rgba;

pub type NodeIndex = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub building_count: usize,
    /// Share of each building slot occupied by the building itself.
    pub building_width_fraction: f32,
    pub building_height: Range<f32>,
    /// Leading share of the spectrum the skyline samples, one bin per building slot.
    pub skyline_bin_fraction: f64,

    pub node_count: usize,
    pub node_size: Range<f32>,
    /// Maximum per-axis node speed in pixels per second.
    pub node_speed: f32,
    pub max_connections_per_node: usize,
    /// Spawn area as fractions of the surface width / height.
    pub node_x: Range<f32>,
    pub node_y: Range<f32>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            building_count: 20,
            building_width_fraction: 0.8,
            building_height: 50.0..200.0,
            skyline_bin_fraction: 0.25,
            node_count: 15,
            node_size: 5.0..15.0,
            node_speed: 30.0,
            max_connections_per_node: 3,
            node_x: 0.0..1.0,
            node_y: 0.0..0.5,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), VisualizerError> {
        if !(0.0..=1.0).contains(&self.building_width_fraction) {
            return Err(VisualizerError::invalid_range(
                "building_width_fraction outside [0, 1]",
            ));
        }
        if self.building_height.start > self.building_height.end
            || self.node_size.start > self.node_size.end
        {
            return Err(VisualizerError::invalid_range(
                "building_height / node_size must be ordered",
            ));
        }
        if self.node_count > 0 && self.max_connections_per_node == 0 {
            return Err(VisualizerError::invalid_range(
                "max_connections_per_node must be >= 1",
            ));
        }
        let unit = 0.0..=1.0;
        if !(unit.contains(&self.node_x.start)
            && unit.contains(&self.node_x.end)
            && unit.contains(&self.node_y.start)
            && unit.contains(&self.node_y.end))
        {
            return Err(VisualizerError::invalid_range(
                "node spawn area must be fractions in [0, 1]",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    pub x: f32,
    pub width: f32,
    pub base_height: f32,
    pub color: Rgba,

    // derived per frame
    pub current_height: f32,
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,

    // derived per frame
    /// Extra diameter from treble energy.
    pub pulse: f32,
    pub alpha: f32,
    pub halo_weight: f32,
}

impl Node {
    #[inline]
    pub fn diameter(&self) -> f32 {
        self.size + self.pulse
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub strength: f32,
}

/// Audio-derived input for one scene update.
#[derive(Clone, Copy, Debug)]
pub struct SceneInput<'a> {
    pub snapshot: &'a SpectrumSnapshot,
    pub bands: BandEnergy,
    pub dt_sec: f32,
}

#[derive(Clone, Debug)]
pub struct SceneModel {
    width: f32,
    height: f32,
    skyline_bin_fraction: f64,
    pub buildings: Vec<Building>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl SceneModel {
    /// Build the scene for a `width` x `height` surface.
    ///
    /// The same `seed`, size and config always produce the same geometry.
    pub fn new(width: f32, height: f32, config: &SceneConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let buildings = build_skyline(&mut rng, width, config);
        let nodes = build_nodes(&mut rng, width, height, config);
        let edges = build_edges(&mut rng, nodes.len(), config.max_connections_per_node);
        log::debug!(
            "[scene] {}x{} buildings={} nodes={} edges={}",
            width,
            height,
            buildings.len(),
            nodes.len(),
            edges.len()
        );
        Self {
            width,
            height,
            skyline_bin_fraction: config.skyline_bin_fraction,
            buildings,
            nodes,
            edges,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Lower edge of the node region; nodes stay in the upper half.
    #[inline]
    pub fn node_floor(&self) -> f32 {
        self.height * 0.5
    }

    pub fn matches_size(&self, width: f32, height: f32) -> bool {
        self.width == width && self.height == height
    }

    /// Advance node motion by `dt_sec` and re-derive every band-driven attribute.
    pub fn update(&mut self, input: SceneInput<'_>) {
        self.step_nodes(input.dt_sec);
        self.apply_bands(input.snapshot, input.bands);
    }

    /// Integrate velocities, reflecting off the region walls.
    pub fn step_nodes(&mut self, dt_sec: f32) {
        let dt = if dt_sec.is_finite() {
            dt_sec.clamp(0.0, MAX_FRAME_DT_SEC)
        } else {
            0.0
        };
        let (max_x, max_y) = (self.width, self.node_floor());
        for n in &mut self.nodes {
            n.position += n.velocity * dt;
            reflect_axis(&mut n.position.x, &mut n.velocity.x, max_x);
            reflect_axis(&mut n.position.y, &mut n.velocity.y, max_y);
        }
    }

    pub fn apply_bands(&mut self, snapshot: &SpectrumSnapshot, bands: BandEnergy) {
        let count = self.buildings.len() as f32;
        let skyline_bins = band_index(self.skyline_bin_fraction, snapshot.len()) as f32;
        let max_growth = self.height / 3.0;
        let alpha = map_energy(bands.mid, BUILDING_ALPHA_MIN, BUILDING_ALPHA_MAX);
        for (i, b) in self.buildings.iter_mut().enumerate() {
            let bin = map_linear(i as f32, 0.0, count, 0.0, skyline_bins).floor() as usize;
            let amp = if (bin as f32) < skyline_bins {
                snapshot.get(bin).unwrap_or(bands.bass)
            } else {
                bands.bass
            };
            b.current_height = b.base_height + map_energy(amp, 0.0, max_growth);
            b.alpha = alpha;
        }

        let pulse = map_energy(bands.treble, 0.0, NODE_PULSE_GROWTH);
        let node_alpha = map_energy(bands.treble, NODE_ALPHA_MIN, NODE_ALPHA_MAX);
        let halo = map_energy(bands.treble, HALO_WEIGHT_MIN, HALO_WEIGHT_MAX);
        for n in &mut self.nodes {
            n.pulse = pulse;
            n.alpha = node_alpha;
            n.halo_weight = halo;
        }
    }

    /// Endpoints of an edge, if both indices are valid.
    pub fn edge_endpoints(&self, edge: &Edge) -> Option<(Vec2, Vec2)> {
        let a = self.nodes.get(edge.from)?;
        let b = self.nodes.get(edge.to)?;
        Some((a.position, b.position))
    }
}

/// Keep `pos` inside `[0, max]` by mirroring it off the wall it crossed.
#[inline]
fn reflect_axis(pos: &mut f32, vel: &mut f32, max: f32) {
    if *pos < 0.0 {
        *pos = -*pos;
        *vel = vel.abs();
    } else if *pos > max {
        *pos = 2.0 * max - *pos;
        *vel = -vel.abs();
    }
    // a step longer than the region itself can overshoot the mirror
    *pos = pos.clamp(0.0, max.max(0.0));
}

#[inline]
fn uniform(rng: &mut StdRng, range: &Range<f32>) -> f32 {
    if range.end > range.start {
        rng.gen_range(range.start..range.end)
    } else {
        range.start
    }
}

fn build_skyline(rng: &mut StdRng, width: f32, config: &SceneConfig) -> Vec<Building> {
    if config.building_count == 0 {
        return Vec::new();
    }
    let slot = width / config.building_count as f32;
    let w = slot * config.building_width_fraction.clamp(0.0, 1.0);
    (0..config.building_count)
        .map(|i| {
            let base_height = uniform(rng, &config.building_height);
            Building {
                x: i as f32 * slot + (slot - w) * 0.5,
                width: w,
                base_height,
                color: BUILDING_COLOR,
                current_height: base_height,
                alpha: BUILDING_COLOR.a,
            }
        })
        .collect()
}

fn build_nodes(rng: &mut StdRng, width: f32, height: f32, config: &SceneConfig) -> Vec<Node> {
    let floor = height * 0.5;
    let xs = (config.node_x.start * width)..(config.node_x.end * width);
    let ys = (config.node_y.start * height).min(floor)..(config.node_y.end * height).min(floor);
    let speed = config.node_speed.abs();
    let speeds = -speed..speed;
    (0..config.node_count)
        .map(|_| {
            let position = Vec2::new(uniform(rng, &xs), uniform(rng, &ys));
            let velocity = Vec2::new(uniform(rng, &speeds), uniform(rng, &speeds));
            Node {
                position,
                velocity,
                size: uniform(rng, &config.node_size),
                pulse: 0.0,
                alpha: NODE_ALPHA_MIN,
                halo_weight: HALO_WEIGHT_MIN,
            }
        })
        .collect()
}

/// Random out-edges per node. Self-loop draws are skipped without a retry and
/// duplicates are kept, so `max_connections` only bounds the out-degree.
fn build_edges(rng: &mut StdRng, node_count: usize, max_connections: usize) -> Vec<Edge> {
    let mut edges = Vec::new();
    if node_count == 0 {
        return edges;
    }
    let max_connections = max_connections.max(1);
    for from in 0..node_count {
        let draws = rng.gen_range(1..=max_connections);
        for _ in 0..draws {
            let to = rng.gen_range(0..node_count);
            if to == from {
                continue;
            }
            let strength = rng.gen_range(EDGE_STRENGTH_MIN..=1.0);
            edges.push(Edge { from, to, strength });
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_axis_mirrors_and_flips() {
        let (mut p, mut v) = (-3.0, -2.0);
        reflect_axis(&mut p, &mut v, 100.0);
        assert_eq!((p, v), (3.0, 2.0));

        let (mut p, mut v) = (104.0, 5.0);
        reflect_axis(&mut p, &mut v, 100.0);
        assert_eq!((p, v), (96.0, -5.0));

        let (mut p, mut v) = (50.0, 5.0);
        reflect_axis(&mut p, &mut v, 100.0);
        assert_eq!((p, v), (50.0, 5.0));
    }

    #[test]
    fn single_node_has_no_edges() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(build_edges(&mut rng, 1, 4).is_empty());
        assert!(build_edges(&mut rng, 0, 4).is_empty());
    }

    #[test]
    fn uniform_handles_empty_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(uniform(&mut rng, &(4.0..4.0)), 4.0);
        let v = uniform(&mut rng, &(1.0..2.0));
        assert!((1.0..2.0).contains(&v));
    }
}
