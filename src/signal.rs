//! Interaction signal handoff.
//!
//! The tracking collaborator runs on its own loop and produces a raw scalar
//! in `[0, 1]` plus an "is tracking" flag. [`SignalWriter`] smooths it and
//! publishes the latest value; the frame loop takes one [`InteractionState`]
//! snapshot per tick through [`SignalReader`].
//!
//! Both halves share a single `AtomicU64` holding the factor's bits and the
//! tracking flag, so a snapshot is one load and can never be torn.
//!
//! ```ignore
//! let (mut writer, reader) = InteractionSignal::channel();
//!
//! // Tracking thread
//! writer.push(pinch_distance, true);
//!
//! // Frame loop
//! engine.advance(dt, &config, reader.snapshot());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Low-pass factor applied to every raw sample.
pub const SMOOTHING: f32 = 0.1;

const TRACKING_BIT: u64 = 1 << 32;

/// One frame's view of the interaction signal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionState {
    /// Normalized openness/expansion, `0.0..=1.0`.
    pub factor: f32,
    /// Whether the tracker currently sees a hand.
    pub is_tracking: bool,
}

impl InteractionState {
    /// Snapshot with `factor` clamped into `[0, 1]` (NaN becomes 0).
    pub fn new(factor: f32, is_tracking: bool) -> Self {
        Self {
            factor: clamp_factor(factor),
            is_tracking,
        }
    }

    /// Idle state: no expansion, not tracking.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Copy of this state with the factor forced into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self::new(self.factor, self.is_tracking)
    }

    fn pack(self) -> u64 {
        let tracking = if self.is_tracking { TRACKING_BIT } else { 0 };
        tracking | self.factor.to_bits() as u64
    }

    fn unpack(bits: u64) -> Self {
        Self {
            factor: f32::from_bits(bits as u32),
            is_tracking: bits & TRACKING_BIT != 0,
        }
    }
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
pub fn clamp_factor(factor: f32) -> f32 {
    if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    }
}

/// Constructor namespace for the writer/reader pair.
pub struct InteractionSignal;

impl InteractionSignal {
    /// Create a connected writer and reader, starting idle.
    pub fn channel() -> (SignalWriter, SignalReader) {
        let cell = Arc::new(AtomicU64::new(InteractionState::idle().pack()));
        (
            SignalWriter {
                cell: Arc::clone(&cell),
                smoothed: 0.0,
            },
            SignalReader { cell },
        )
    }
}

/// Producer half. Owns the smoothing state.
#[derive(Debug)]
pub struct SignalWriter {
    cell: Arc<AtomicU64>,
    smoothed: f32,
}

impl SignalWriter {
    /// Feed a raw sample. It is clamped and smoothed
    /// (`s += (raw - s) * 0.1`) before being published.
    pub fn push(&mut self, raw: f32, is_tracking: bool) -> InteractionState {
        let raw = clamp_factor(raw);
        self.smoothed += (raw - self.smoothed) * SMOOTHING;
        self.publish(InteractionState::new(self.smoothed, is_tracking))
    }

    /// Publish a value without smoothing. Resets the smoother to it.
    pub fn push_raw(&mut self, factor: f32, is_tracking: bool) -> InteractionState {
        let state = InteractionState::new(factor, is_tracking);
        self.smoothed = state.factor;
        self.publish(state)
    }

    /// Current smoothed factor.
    pub fn smoothed(&self) -> f32 {
        self.smoothed
    }

    fn publish(&self, state: InteractionState) -> InteractionState {
        self.cell.store(state.pack(), Ordering::Release);
        state
    }
}

/// Consumer half. Cheap to clone; every clone sees the latest value.
#[derive(Clone, Debug)]
pub struct SignalReader {
    cell: Arc<AtomicU64>,
}

impl SignalReader {
    /// Latest published state.
    pub fn snapshot(&self) -> InteractionState {
        InteractionState::unpack(self.cell.load(Ordering::Acquire))
    }
}
