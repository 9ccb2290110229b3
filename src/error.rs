//! Error types for gallery configuration and runtime callbacks.

use std::path::PathBuf;

use thiserror::Error;

use crate::gallery::SourceStatus;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("layout must contain at least one block")]
    EmptyLayout,

    #[error("block {index} has a degenerate size: {width}x{height}")]
    DegenerateBlock { index: usize, width: u32, height: u32 },

    #[error("image has a degenerate size: {width}x{height}")]
    DegenerateImage { width: u32, height: u32 },

    #[error("no image sources configured")]
    NoSources,

    #[error("unknown renderer: {0}")]
    UnknownRenderer(String),

    #[error("unknown image source index: {0}")]
    UnknownSource(usize),

    #[error("image source {index} already settled as {status:?}")]
    SourceAlreadySettled { index: usize, status: SourceStatus },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
