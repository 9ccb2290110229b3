use crate::error::{GalleryError, Result};
use crate::geometry::Size;

/// Host-assigned handle the surface uses to find the pixel data of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub usize);

/// A loaded bitmap as seen by the gallery: an id and its pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image {
    id: ImageId,
    size: Size,
}

impl Image {
    pub fn new(id: ImageId, width: u32, height: u32) -> Result<Self> {
        let size = Size::new(width, height);
        if size.is_degenerate() {
            return Err(GalleryError::DegenerateImage { width, height });
        }
        Ok(Self { id, size })
    }

    #[must_use]
    pub fn id(&self) -> ImageId {
        self.id
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }
}

/// Images in the order their loads completed. Only ever grows.
#[derive(Debug, Default, Clone)]
pub struct ImageSet {
    images: Vec<Image>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, image: Image) {
        self.images.push(image);
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Image> {
        self.images.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Image> {
        self.images.iter()
    }
}
