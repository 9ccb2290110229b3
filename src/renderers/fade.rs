use crate::constants::FADE_GAIN;
use crate::geometry::Rect;
use crate::image::Image;
use crate::layout::BlockGeometry;
use crate::renderer::{Progress, Renderer, Transition, TransitionState};
use crate::slice::Slice;
use crate::surface::Surface;

/// Cross-fade by overdraw: the whole slice is redrawn every tick with a
/// rising alpha, so the old image disappears under repeated layers.
#[derive(Debug, Default, Clone, Copy)]
pub struct FadeRenderer;

impl Renderer for FadeRenderer {
    fn begin(&self, block: &BlockGeometry, image: &Image, slice: Slice) -> Box<dyn Transition> {
        Box::new(FadeTransition {
            image: *image,
            source: slice.rect(),
            destination: block.rect(),
            alpha: Progress::new(FADE_GAIN),
        })
    }
}

#[derive(Debug)]
pub struct FadeTransition {
    image: Image,
    source: Rect,
    destination: Rect,
    alpha: Progress,
}

impl Transition for FadeTransition {
    fn step(&mut self, surface: &mut dyn Surface) -> TransitionState {
        let converged = self.alpha.advance();
        surface.draw_image(&self.image, self.source, self.destination, self.alpha.value() as f32);

        if converged {
            TransitionState::Converged
        } else {
            TransitionState::Running
        }
    }

    fn progress(&self) -> f64 {
        self.alpha.value()
    }
}
