use crate::geometry::Rect;
use crate::image::{Image, ImageId};

/// Immediate-mode drawing target.
///
/// `source` is in the image's pixel space, `destination` in surface pixels;
/// the image region is scaled to fill the destination and composited over
/// what is already there with the given `alpha` in `[0, 1]`.
pub trait Surface {
    fn draw_image(&mut self, image: &Image, source: Rect, destination: Rect, alpha: f32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub image: ImageId,
    pub source: Rect,
    pub destination: Rect,
    pub alpha: f32,
}

/// Headless surface that records every draw call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Surface for RecordingSurface {
    fn draw_image(&mut self, image: &Image, source: Rect, destination: Rect, alpha: f32) {
        self.calls.push(DrawCall {
            image: image.id(),
            source,
            destination,
            alpha,
        });
    }
}
