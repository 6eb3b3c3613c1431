//! Procedural point clouds for each [`Silhouette`].
//!
//! # Shapes
//!
//! | Silhouette | Construction |
//! |------------|--------------|
//! | [`Silhouette::Heart`] | parametric heart curve, depth noise, scaled 0.15 |
//! | [`Silhouette::Flower`] | golden-angle phyllotaxis with wavy petals, scaled 0.8 |
//! | [`Silhouette::RingedPlanet`] | 70% sphere surface r=1.5, 30% tilted annulus 2.2..3.7 |
//! | [`Silhouette::SeatedFigure`] | head sphere, tapered torso, flattened base |
//! | [`Silhouette::FireworkBurst`] | sphere shells with radius 0.2..3.7 |
//!
//! Adding a shape means adding one `fn(&mut ShapeSampler, usize) -> Vec3` and
//! one arm in [`point_fn`].

use crate::sampler::ShapeSampler;
use crate::silhouette::Silhouette;
use glam::{Quat, Vec3};
use std::f32::consts::PI;

/// Golden angle in radians (approximation used by the flower spiral).
pub const GOLDEN_ANGLE: f32 = 2.39996;

/// Uniform scale applied to the raw heart curve.
const HEART_SCALE: f32 = 0.15;
const FLOWER_SCALE: f32 = 0.8;

/// Planet body radius.
pub const PLANET_RADIUS: f32 = 1.5;
/// Ring inner radius.
pub const RING_INNER: f32 = 2.2;
/// Ring outer radius.
pub const RING_OUTER: f32 = 3.7;
/// Fraction of ringed-planet points on the planet body.
pub const PLANET_FRACTION: f32 = 0.7;
const RING_HALF_THICKNESS: f32 = 0.05;
const RING_TILT_X: f32 = 0.4;
const RING_TILT_Z: f32 = 0.2;

const FIREWORK_MIN_RADIUS: f32 = 0.2;
const FIREWORK_MAX_RADIUS: f32 = 3.7;

/// An immutable generated point cloud for one silhouette at one particle count.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    silhouette: Silhouette,
    points: Vec<Vec3>,
}

impl PointSet {
    /// Silhouette these points approximate.
    pub fn silhouette(&self) -> Silhouette {
        self.silhouette
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Points as a flat `[x0, y0, z0, x1, ...]` slice of `len() * 3` floats.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }
}

type PointFn = fn(&mut ShapeSampler, usize) -> Vec3;

/// Per-particle generator for a silhouette.
fn point_fn(silhouette: Silhouette) -> PointFn {
    match silhouette {
        Silhouette::Heart => heart_point,
        Silhouette::Flower => flower_point,
        Silhouette::RingedPlanet => ringed_planet_point,
        Silhouette::SeatedFigure => seated_figure_point,
        Silhouette::FireworkBurst => firework_point,
        Silhouette::Unknown => origin_point,
    }
}

/// Generate `count` points for `silhouette`.
///
/// With `Some(seed)` the result is reproducible; `None` seeds from entropy.
/// [`Silhouette::Unknown`] yields `count` points at the origin.
pub fn generate(silhouette: Silhouette, count: usize, seed: Option<u64>) -> PointSet {
    let mut sampler = ShapeSampler::new(seed);
    generate_with(silhouette, count, &mut sampler)
}

/// Generate `count` points for `silhouette`, drawing from `sampler`.
pub fn generate_with(silhouette: Silhouette, count: usize, sampler: &mut ShapeSampler) -> PointSet {
    if !silhouette.is_known() && count > 0 {
        log::warn!("No generator for unknown silhouette; placing {} points at origin", count);
    }

    let point = point_fn(silhouette);
    let points = (0..count).map(|i| point(sampler, i)).collect();

    PointSet { silhouette, points }
}

/// Raw (unscaled) heart curve at parameter `t`, as `(x, y)`.
pub fn heart_curve(t: f32) -> (f32, f32) {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    (x, y)
}

fn heart_point(sampler: &mut ShapeSampler, _index: usize) -> Vec3 {
    let t = sampler.random_angle();
    let (x, y) = heart_curve(t);
    // Thickness
    let z = sampler.random_centered(2.5);

    Vec3::new(x, y, z) * HEART_SCALE
}

fn flower_point(sampler: &mut ShapeSampler, index: usize) -> Vec3 {
    let r = 3.0 * sampler.random().sqrt();
    let angle = index as f32 * GOLDEN_ANGLE;
    let y = sampler.random_centered(1.0) + (2.0 * r).sin() * 1.5;

    Vec3::new(r * angle.cos(), y, r * angle.sin()) * FLOWER_SCALE
}

fn ringed_planet_point(sampler: &mut ShapeSampler, _index: usize) -> Vec3 {
    if sampler.random() < PLANET_FRACTION {
        return sampler.random_on_sphere(PLANET_RADIUS);
    }

    let ring = sampler.random_on_annulus(RING_INNER, RING_OUTER, RING_HALF_THICKNESS);
    let tilt = Quat::from_rotation_z(RING_TILT_Z) * Quat::from_rotation_x(RING_TILT_X);
    tilt * ring
}

fn seated_figure_point(sampler: &mut ShapeSampler, _index: usize) -> Vec3 {
    let region = sampler.random();

    if region < 0.25 {
        // Head
        sampler.random_on_sphere(0.6) + Vec3::new(0.0, 1.8, 0.0)
    } else if region < 0.6 {
        // Torso, tapered toward the middle
        let theta = sampler.random_angle();
        let h = sampler.random_range(0.0, 2.0);
        let radius = 0.8 + (h * PI).sin() * 0.2;
        Vec3::new(radius * theta.cos(), h - 0.5, radius * theta.sin())
    } else {
        // Crossed legs as a flattened disk
        let angle = sampler.random_angle();
        let dist = sampler.random_range(0.0, 1.8);
        let height = sampler.random_centered(0.4);
        Vec3::new(angle.cos() * dist, height - 0.8, angle.sin() * dist)
    }
}

fn firework_point(sampler: &mut ShapeSampler, _index: usize) -> Vec3 {
    let radius = sampler.random_range(FIREWORK_MIN_RADIUS, FIREWORK_MAX_RADIUS);
    sampler.random_on_sphere(radius)
}

fn origin_point(_sampler: &mut ShapeSampler, _index: usize) -> Vec3 {
    Vec3::ZERO
}
