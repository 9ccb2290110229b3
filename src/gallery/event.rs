use crate::geometry::Point;
use crate::image::Image;
use crate::layout::BlockGeometry;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PointerKind {
    Enter,
    Leave,
    Press,
}

/// Pointer input as delivered by the host, in the host's coordinate space.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn enter() -> Self {
        Self { kind: PointerKind::Enter, position: Point::ZERO }
    }

    pub fn leave() -> Self {
        Self { kind: PointerKind::Leave, position: Point::ZERO }
    }

    pub fn press(x: f32, y: f32) -> Self {
        Self { kind: PointerKind::Press, position: Point::new(x, y) }
    }
}

/// What the click handler receives when a press lands on a block.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ClickEvent {
    pub pointer: PointerEvent,
    /// Press position relative to the surface's top-left corner.
    pub local: Point,
    pub block_index: usize,
    pub block: BlockGeometry,
    /// Image committed to the block at the time of the press.
    pub image: Option<Image>,
}

/// Observable status changes, drained by the host.
#[derive(Debug, PartialEq, Clone)]
pub enum GalleryEvent {
    SourceLoaded { source: usize, image: Image },
    SourceFailed { source: usize, reason: String },
    SourcesAbandoned { sources: Vec<usize> },
    Started { images: usize },
    LoadFailed,
    Paused,
    Resumed,
    BlockChanged { block: usize, image: Image },
    TransitionPreempted { block: usize },
    TransitionConverged { block: usize },
}
