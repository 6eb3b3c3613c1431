//! The per-frame morph engine.
//!
//! [`MorphEngine`] owns the live position buffer and moves it toward the
//! selected silhouette every tick:
//!
//! 1. Sanitize the config, the interaction factor and `delta_time`.
//! 2. Fetch the target [`PointSet`](crate::PointSet) from the [`ShapeCache`].
//! 3. Build one transform from the shape's motion effect and the expansion.
//! 4. Smooth every particle toward its transformed target, then jitter it.
//!
//! Particle `i` is the same particle in every silhouette, so a shape switch
//! morphs continuously from wherever the particles are.
//!
//! # Example
//!
//! ```ignore
//! let (mut writer, reader) = InteractionSignal::channel();
//! let mut engine = MorphEngine::new(6000);
//! let mut clock = FrameClock::new();
//!
//! loop {
//!     let dt = clock.tick();
//!     engine.advance(dt, &config, reader.snapshot());
//!     if engine.take_dirty() {
//!         upload(engine.as_flat());
//!     }
//! }
//! ```

use crate::cache::ShapeCache;
use crate::config::{expansion_gain, ConfigGuard, MorphConfig};
use crate::error::{ConfigError, Fault};
use crate::motion::{self, MOTION_PERIOD};
use crate::signal::InteractionState;
use crate::silhouette::Silhouette;
use glam::{Mat3, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Interaction factor above which particles start to drift.
pub const JITTER_THRESHOLD: f32 = 0.1;
/// Per-axis jitter half-width at full interaction.
pub const JITTER_AMPLITUDE: f32 = 0.025;

/// Particles per kernel chunk. Each chunk gets its own jitter RNG.
const CHUNK_SIZE: usize = 1024;

/// Everything the particle kernel needs for one tick.
#[derive(Clone, Copy, Debug)]
struct Step {
    /// Motion effect times expansion.
    transform: Mat3,
    /// Fraction of the remaining distance to cover, `0..=1`.
    alpha: f32,
    /// Jitter half-width, 0 when disabled.
    jitter: f32,
    seed: u64,
}

/// Live particle buffer and the state that drives it.
#[derive(Debug)]
pub struct MorphEngine {
    live: Vec<Vec3>,
    shapes: ShapeCache,
    guard: ConfigGuard,
    /// Seconds of motion time, accumulated in f64.
    elapsed: f64,
    silhouette: Option<Silhouette>,
    rng: SmallRng,
    dirty: bool,
    is_tracking: bool,
    faults: Vec<Fault>,
    rejected: Vec<ConfigError>,
}

impl MorphEngine {
    /// Engine with a zeroed buffer of `particle_count` points.
    pub fn new(particle_count: usize) -> Self {
        let initial = MorphConfig::default().with_particle_count(particle_count.max(1) as u32);

        Self {
            live: vec![Vec3::ZERO; particle_count],
            shapes: ShapeCache::new(),
            guard: ConfigGuard::new(&initial),
            elapsed: 0.0,
            silhouette: None,
            rng: SmallRng::from_entropy(),
            dirty: false,
            is_tracking: false,
            faults: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Make shape generation and jitter reproducible.
    ///
    /// Call before the first [`advance`](Self::advance); it replaces the cache.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.shapes = ShapeCache::new().with_seed(seed);
        self.rng = SmallRng::seed_from_u64(seed ^ 0xA5A5_5A5A_DEAD_BEEF);
        self
    }

    /// Advance the live buffer by `delta_time` seconds.
    ///
    /// Never fails. Bad input is recovered and reported via
    /// [`last_faults`](Self::last_faults). With `delta_time == 0` (or a
    /// non-finite/negative one) the buffer only changes if the particle count did.
    pub fn advance(&mut self, delta_time: f32, config: &MorphConfig, interaction: InteractionState) {
        self.faults.clear();

        let settings = self.guard.sanitize(config, &mut self.rejected);
        self.faults
            .extend(self.rejected.drain(..).map(Fault::InvalidConfiguration));

        let interaction = interaction.clamped();
        self.is_tracking = interaction.is_tracking;

        let dt = if delta_time.is_finite() && delta_time > 0.0 {
            delta_time
        } else {
            0.0
        };

        if settings.particle_count != self.live.len() {
            self.reallocate(settings.particle_count, settings.silhouette);
        }

        if self.silhouette != Some(settings.silhouette) {
            if let Some(previous) = self.silhouette {
                log::debug!("Morphing {} -> {}", previous, settings.silhouette);
            }
            self.silhouette = Some(settings.silhouette);
        }
        if !settings.silhouette.is_known() {
            self.faults.push(Fault::UnknownSilhouette);
        }

        if dt == 0.0 {
            return;
        }

        self.elapsed += dt as f64;
        let phase = (self.elapsed % MOTION_PERIOD) as f32;

        let mut expansion = 1.0 + interaction.factor * expansion_gain(settings.interaction_intensity);
        if !expansion.is_finite() {
            expansion = 1.0;
        }
        let mut transform = motion::transform_at(settings.silhouette, phase) * expansion;
        if !transform.is_finite() {
            transform = Mat3::IDENTITY;
        }

        let step = Step {
            transform,
            alpha: (settings.morph_speed * dt).min(1.0),
            jitter: if interaction.factor > JITTER_THRESHOLD {
                JITTER_AMPLITUDE * interaction.factor
            } else {
                0.0
            },
            seed: self.rng.gen(),
        };

        let target = self.shapes.get(settings.silhouette, settings.particle_count);
        let healed = run_kernel(&mut self.live, target.points(), &step);
        if healed > 0 {
            log::warn!("Reset {} non-finite particle(s) to their targets", healed);
            self.faults.push(Fault::NumericInstability { particles: healed });
        }

        log::trace!(
            "advance dt={:.4} alpha={:.3} expansion={:.3} jitter={:.4}",
            dt,
            step.alpha,
            expansion,
            step.jitter
        );
        self.dirty = true;
    }

    /// Snap every particle onto `silhouette`'s untransformed target.
    pub fn reset_to(&mut self, silhouette: Silhouette) {
        let target = self.shapes.get(silhouette, self.live.len());
        self.live.copy_from_slice(target.points());
        self.silhouette = Some(silhouette);
        self.dirty = true;
    }

    /// Replace the buffer after a particle-count change.
    fn reallocate(&mut self, count: usize, silhouette: Silhouette) {
        let previous = self.live.len();
        self.shapes.invalidate(previous);

        let target = self.shapes.get(silhouette, count);
        self.live = target.points().to_vec();
        self.dirty = true;

        log::debug!("Particle count {} -> {}, buffer reseeded from {}", previous, count, silhouette);
    }

    // ========== Renderer output ==========

    /// Current particle positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.live
    }

    /// Positions as `[x0, y0, z0, x1, ...]`, ready for a vertex buffer.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.live)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Whether the buffer changed since the last [`take_dirty`](Self::take_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Tracking flag from the last tick. Renderers pause auto-rotation while true.
    pub fn is_tracking(&self) -> bool {
        self.is_tracking
    }

    /// Last accepted particle radius.
    pub fn particle_radius(&self) -> f32 {
        self.guard.particle_radius()
    }

    // ========== Inspection ==========

    /// Total motion time advanced so far, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Silhouette used by the last tick.
    pub fn silhouette(&self) -> Option<Silhouette> {
        self.silhouette
    }

    /// Recovered faults from the last [`advance`](Self::advance).
    pub fn last_faults(&self) -> &[Fault] {
        &self.faults
    }

    pub fn shapes(&self) -> &ShapeCache {
        &self.shapes
    }

    /// Mutable access to the cache, e.g. to [`prefetch`](ShapeCache::prefetch).
    pub fn shapes_mut(&mut self) -> &mut ShapeCache {
        &mut self.shapes
    }
}

#[cfg(not(feature = "parallel"))]
fn run_kernel(live: &mut [Vec3], target: &[Vec3], step: &Step) -> usize {
    live.chunks_mut(CHUNK_SIZE)
        .zip(target.chunks(CHUNK_SIZE))
        .enumerate()
        .map(|(i, (live, target))| update_chunk(live, target, step, i))
        .sum()
}

#[cfg(feature = "parallel")]
fn run_kernel(live: &mut [Vec3], target: &[Vec3], step: &Step) -> usize {
    use rayon::prelude::*;

    live.par_chunks_mut(CHUNK_SIZE)
        .zip(target.par_chunks(CHUNK_SIZE))
        .enumerate()
        .map(|(i, (live, target))| update_chunk(live, target, step, i))
        .sum()
}

/// Update one chunk in place. Returns how many particles had to be reset.
fn update_chunk(live: &mut [Vec3], target: &[Vec3], step: &Step, chunk: usize) -> usize {
    let mut rng = (step.jitter > 0.0).then(|| {
        SmallRng::seed_from_u64(step.seed ^ (chunk as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    });
    let mut healed = 0;

    for (p, t) in live.iter_mut().zip(target) {
        let goal = step.transform * *t;
        *p += (goal - *p) * step.alpha;

        if let Some(rng) = rng.as_mut() {
            let offset = Vec3::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>()) - 0.5;
            *p += offset * (2.0 * step.jitter);
        }

        if !p.is_finite() {
            *p = if goal.is_finite() { goal } else { *t };
            healed += 1;
        }
    }

    healed
}
