//! Timed image-rotation wall: cycles loaded images through a fixed set of
//! rectangular blocks with pluggable transition animations.

pub mod config;
pub mod constants;
pub mod error;
pub mod gallery;
pub mod geometry;
pub mod image;
pub mod layout;
pub mod registry;
pub mod renderer;
pub mod renderers;
pub mod sequencer;
pub mod slice;
pub mod state;
pub mod surface;
pub mod timeline;

#[cfg(feature = "window")]
pub mod window;

pub use config::GalleryConfig;
pub use error::{GalleryError, Result};
pub use gallery::{ClickEvent, Gallery, GalleryEvent, PointerEvent, PointerKind};
pub use geometry::{Point, Position, Rect, Size};
pub use image::{Image, ImageId, ImageSet};
pub use layout::{Block, BlockGeometry, Layout};
pub use registry::RendererRegistry;
pub use renderer::{Renderer, Transition, TransitionState};
pub use slice::{Slice, compute_slice};
pub use state::GalleryState;
pub use surface::{DrawCall, RecordingSurface, Surface};
