//! Seeded random source for shape generation.
//!
//! Generators never touch a global RNG. They draw from a [`ShapeSampler`]
//! handed in by the caller, so a fixed seed reproduces the same point set.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Random source with helpers for the geometric primitives the shapes use.
///
/// ```ignore
/// let mut sampler = ShapeSampler::from_seed(7);
/// let head = sampler.random_on_sphere(0.6) + Vec3::Y * 1.8;
/// ```
#[derive(Clone, Debug)]
pub struct ShapeSampler {
    rng: SmallRng,
}

impl ShapeSampler {
    /// Deterministic sampler for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Sampler seeded from OS entropy. Different every run.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, from entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    // ========== Random primitives ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.random()
    }

    /// Random f32 in `[-half_width, half_width)`.
    #[inline]
    pub fn random_centered(&mut self, half_width: f32) -> f32 {
        (self.random() - 0.5) * 2.0 * half_width
    }

    /// Random angle in `[0, 2π)`.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.random() * TAU
    }

    // ========== Position helpers ==========

    /// Random point on the surface of a sphere of given radius.
    ///
    /// Uniform by area: the polar angle comes from the inverse CDF on `cos φ`.
    pub fn random_on_sphere(&mut self, radius: f32) -> Vec3 {
        let theta = self.random_angle();
        let phi = (2.0 * self.random() - 1.0).clamp(-1.0, 1.0).acos();

        Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        )
    }

    /// Random point on a flat annulus in the XZ plane.
    ///
    /// Radius is uniform in `[inner, outer)`; y is uniform in `±half_thickness`.
    pub fn random_on_annulus(&mut self, inner: f32, outer: f32, half_thickness: f32) -> Vec3 {
        let angle = self.random_angle();
        let dist = self.random_range(inner, outer);

        Vec3::new(
            angle.cos() * dist,
            self.random_centered(half_thickness),
            angle.sin() * dist,
        )
    }
}
