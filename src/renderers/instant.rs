use std::time::Duration;

use crate::geometry::Rect;
use crate::image::Image;
use crate::layout::BlockGeometry;
use crate::renderer::{Renderer, Transition, TransitionState};
use crate::slice::Slice;
use crate::surface::Surface;

/// Zero-duration blit.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantRenderer;

impl Renderer for InstantRenderer {
    fn begin(&self, block: &BlockGeometry, image: &Image, slice: Slice) -> Box<dyn Transition> {
        Box::new(InstantTransition {
            image: *image,
            source: slice.rect(),
            destination: block.rect(),
            done: false,
        })
    }
}

#[derive(Debug)]
pub struct InstantTransition {
    image: Image,
    source: Rect,
    destination: Rect,
    done: bool,
}

impl Transition for InstantTransition {
    fn step(&mut self, surface: &mut dyn Surface) -> TransitionState {
        if !self.done {
            surface.draw_image(&self.image, self.source, self.destination, 1.0);
            self.done = true;
        }
        TransitionState::Converged
    }

    fn progress(&self) -> f64 {
        if self.done { 1.0 } else { 0.0 }
    }

    fn frame_interval(&self) -> Duration {
        Duration::ZERO
    }
}
