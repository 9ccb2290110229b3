use crate::constants::SLIDE_GAIN;
use crate::geometry::Rect;
use crate::image::Image;
use crate::layout::BlockGeometry;
use crate::renderer::{Progress, Renderer, Transition, TransitionState};
use crate::slice::Slice;
use crate::surface::Surface;

/// Wipe-in from the block's left edge. The visible crop grows leftwards from
/// the slice's right edge while the destination grows rightwards.
#[derive(Debug, Default, Clone, Copy)]
pub struct SlideRenderer;

impl Renderer for SlideRenderer {
    fn begin(&self, block: &BlockGeometry, image: &Image, slice: Slice) -> Box<dyn Transition> {
        Box::new(SlideTransition {
            image: *image,
            slice: slice.rect(),
            block: block.rect(),
            coverage: Progress::new(SLIDE_GAIN),
        })
    }
}

#[derive(Debug)]
pub struct SlideTransition {
    image: Image,
    slice: Rect,
    block: Rect,
    coverage: Progress,
}

impl SlideTransition {
    // Offsets and widths are truncated to whole pixels every tick.
    fn frame(&self) -> (Rect, Rect) {
        let p = self.coverage.value();
        let source = Rect::new(
            (self.slice.x as f64 + self.slice.width as f64 * (1.0 - p)) as i32,
            self.slice.y,
            (self.slice.width as f64 * p) as u32,
            self.slice.height,
        );
        let destination = Rect::new(
            self.block.x,
            self.block.y,
            (self.block.width as f64 * p) as u32,
            self.block.height,
        );
        (source, destination)
    }
}

impl Transition for SlideTransition {
    fn step(&mut self, surface: &mut dyn Surface) -> TransitionState {
        let converged = self.coverage.advance();
        let (source, destination) = self.frame();
        surface.draw_image(&self.image, source, destination, 1.0);

        if converged {
            TransitionState::Converged
        } else {
            TransitionState::Running
        }
    }

    fn progress(&self) -> f64 {
        self.coverage.value()
    }
}
