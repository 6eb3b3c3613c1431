//! # zen-particles
//!
//! A point cloud that morphs between procedural silhouettes and breathes with
//! an external interaction signal.
//!
//! The crate is the simulation core only. A renderer draws the buffer; a
//! tracker produces the signal; a UI edits the [`MorphConfig`]. All three stay
//! outside this crate.
//!
//! ## Quick Start
//!
//! ```ignore
//! use zen_particles::prelude::*;
//!
//! let config = MorphConfig::default()
//!     .with_particle_count(6000)
//!     .with_silhouette(Silhouette::RingedPlanet);
//!
//! let (mut writer, reader) = InteractionSignal::channel();
//! let mut engine = MorphEngine::new(6000);
//! let mut clock = FrameClock::new();
//!
//! // Tracking thread: writer.push(raw_factor, hand_visible);
//!
//! loop {
//!     engine.advance(clock.tick(), &config, reader.snapshot());
//!     if engine.take_dirty() {
//!         renderer.upload_positions(engine.as_flat());
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Silhouettes
//!
//! | Silhouette | Motion effect |
//! |------------|---------------|
//! | [`Silhouette::Heart`] | none |
//! | [`Silhouette::Flower`] | none |
//! | [`Silhouette::RingedPlanet`] | slow spin about Y |
//! | [`Silhouette::SeatedFigure`] | none |
//! | [`Silhouette::FireworkBurst`] | pulsing scale |
//!
//! Each one is generated once per particle count and kept in the
//! [`ShapeCache`]. Particle `i` is the same particle in every shape, so
//! switching shapes morphs smoothly instead of reshuffling.
//!
//! ### Interaction
//!
//! The interaction factor (0 = closed, 1 = fully open) expands the target
//! shape by `1 + factor × 2.5 × intensity / 2.5`. Above 0.1 it also adds a
//! small random drift to every particle.
//!
//! ### Robustness
//!
//! [`MorphEngine::advance`] never fails. Bad config fields fall back to their
//! last good values, unknown shapes collapse to the origin, and non-finite
//! particles snap back to their targets. Each recovery is logged through the
//! `log` facade and reported in [`MorphEngine::last_faults`].

mod cache;
pub mod clock;
pub mod config;
mod engine;
pub mod error;
pub mod motion;
mod sampler;
pub mod shapes;
pub mod signal;
mod silhouette;

pub use cache::ShapeCache;
pub use clock::FrameClock;
pub use config::{ConfigGuard, MorphConfig, TickSettings};
pub use engine::{MorphEngine, JITTER_AMPLITUDE, JITTER_THRESHOLD};
pub use error::{ConfigError, Fault, UnknownSilhouette};
pub use glam::Vec3;
pub use sampler::ShapeSampler;
pub use shapes::{generate, generate_with, PointSet};
pub use signal::{InteractionSignal, InteractionState, SignalReader, SignalWriter};
pub use silhouette::Silhouette;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use zen_particles::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cache::ShapeCache;
    pub use crate::clock::FrameClock;
    pub use crate::config::MorphConfig;
    pub use crate::engine::MorphEngine;
    pub use crate::error::Fault;
    pub use crate::shapes::PointSet;
    pub use crate::signal::{InteractionSignal, InteractionState};
    pub use crate::silhouette::Silhouette;
    pub use crate::Vec3;
}
