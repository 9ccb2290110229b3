//! Built-in transition styles.

pub mod fade;
pub mod instant;
pub mod slide;

pub use fade::FadeRenderer;
pub use instant::InstantRenderer;
pub use slide::SlideRenderer;
