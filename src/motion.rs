//! Time-based motion effects applied to target shapes.
//!
//! Every effect is a uniform linear transform of the whole shape, so the
//! engine evaluates it once per tick and folds the interaction expansion
//! into the same matrix before the particle loop.
//!
//! | Silhouette | Effect |
//! |------------|--------|
//! | [`Silhouette::FireworkBurst`] | pulse, scale `1 + 0.2·sin(2t)` |
//! | [`Silhouette::RingedPlanet`] | spin about Y at 0.2 rad/s |
//! | others | none |

use crate::silhouette::Silhouette;
use glam::{Mat3, Vec3};

/// Firework pulse angular frequency (rad/s).
const PULSE_RATE: f32 = 2.0;
/// Firework pulse amplitude.
const PULSE_AMPLITUDE: f32 = 0.2;
/// Planet spin rate (rad/s).
pub const PLANET_SPIN_RATE: f32 = 0.2;

/// Every effect repeats after this many seconds (10π: one spin, ten pulses).
pub const MOTION_PERIOD: f64 = 10.0 * std::f64::consts::PI;

/// Maps elapsed seconds to a shape transform.
pub type MotionFn = fn(f32) -> Mat3;

/// Motion effect for `silhouette`, if it has one.
pub fn motion_for(silhouette: Silhouette) -> Option<MotionFn> {
    match silhouette {
        Silhouette::FireworkBurst => Some(firework_pulse),
        Silhouette::RingedPlanet => Some(planet_spin),
        _ => None,
    }
}

/// Transform for `silhouette` at `elapsed`, identity when it has no effect.
pub fn transform_at(silhouette: Silhouette, elapsed: f32) -> Mat3 {
    motion_for(silhouette).map_or(Mat3::IDENTITY, |motion| motion(elapsed))
}

fn firework_pulse(elapsed: f32) -> Mat3 {
    let pulse = 1.0 + (elapsed * PULSE_RATE).sin() * PULSE_AMPLITUDE;
    Mat3::from_diagonal(Vec3::splat(pulse))
}

/// x' = x·cos − z·sin, z' = x·sin + z·cos.
fn planet_spin(elapsed: f32) -> Mat3 {
    let (sin, cos) = (elapsed * PLANET_SPIN_RATE).sin_cos();
    Mat3::from_cols(
        Vec3::new(cos, 0.0, sin),
        Vec3::Y,
        Vec3::new(-sin, 0.0, cos),
    )
}
