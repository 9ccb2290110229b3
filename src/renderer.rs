use std::fmt;
use std::time::Duration;

use crate::constants::{FRAME_INTERVAL, PROGRESS_FLOOR};
use crate::image::Image;
use crate::layout::BlockGeometry;
use crate::slice::Slice;
use crate::surface::Surface;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TransitionState {
    Running,   // More ticks needed
    Converged, // Final frame drawn, never stepped again
}

/// One in-flight animation of an image into a block.
///
/// The owner calls `step` once per `frame_interval` until it returns
/// `Converged`, and may drop the transition earlier to cancel it.
pub trait Transition: fmt::Debug {
    fn step(&mut self, surface: &mut dyn Surface) -> TransitionState;

    fn progress(&self) -> f64;

    /// Delay before the first step and between steps. Zero means "as soon as possible".
    fn frame_interval(&self) -> Duration {
        FRAME_INTERVAL
    }
}

/// Transition style: starts a new transition for every block change.
pub trait Renderer {
    fn begin(&self, block: &BlockGeometry, image: &Image, slice: Slice) -> Box<dyn Transition>;
}

impl<F> Renderer for F
where
    F: Fn(&BlockGeometry, &Image, Slice) -> Box<dyn Transition>,
{
    fn begin(&self, block: &BlockGeometry, image: &Image, slice: Slice) -> Box<dyn Transition> {
        self(block, image, slice)
    }
}

/// Exponential approach to 1 with a linear floor: `p += gain * (1 - p) + floor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    value: f64,
    gain: f64,
    floor: f64,
}

impl Progress {
    pub fn new(gain: f64) -> Self {
        Self::with_floor(gain, PROGRESS_FLOOR)
    }

    pub fn with_floor(gain: f64, floor: f64) -> Self {
        Self { value: 0.0, gain, floor }
    }

    /// Advance one tick; clamps at 1 and reports whether it got there.
    pub fn advance(&mut self) -> bool {
        self.value += self.gain * (1.0 - self.value) + self.floor;
        if self.value >= 1.0 {
            self.value = 1.0;
            return true;
        }
        false
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.value >= 1.0
    }
}
