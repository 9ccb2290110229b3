use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};
use crate::geometry::{Position, Rect, Size};
use crate::image::Image;

/// Where a block sits on the surface and how big it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockGeometry {
    pub position: Position,
    pub size: Size,
}

impl BlockGeometry {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    geometry: BlockGeometry,
    image: Option<Image>,
}

impl Block {
    #[must_use]
    pub fn geometry(&self) -> BlockGeometry {
        self.geometry
    }

    /// The image most recently handed to a renderer for this block.
    #[must_use]
    pub fn image(&self) -> Option<Image> {
        self.image
    }
}

/// Fixed, non-empty sequence of blocks. Never resized after construction.
#[derive(Debug, Clone)]
pub struct Layout {
    blocks: Vec<Block>,
}

impl Layout {
    pub fn new(geometries: Vec<BlockGeometry>) -> Result<Self> {
        if geometries.is_empty() {
            return Err(GalleryError::EmptyLayout);
        }

        if let Some((index, geometry)) = geometries
            .iter()
            .enumerate()
            .find(|(_, geometry)| geometry.size.is_degenerate())
        {
            return Err(GalleryError::DegenerateBlock {
                index,
                width: geometry.size.width,
                height: geometry.size.height,
            });
        }

        let blocks = geometries
            .into_iter()
            .map(|geometry| Block { geometry, image: None })
            .collect();

        Ok(Self { blocks })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn commit(&mut self, index: usize, image: Image) {
        if let Some(block) = self.blocks.get_mut(index) {
            block.image = Some(image);
        }
    }

    /// Row-major grid of `count` blocks covering `canvas`, with `gap` pixels
    /// between cells and around the border. Rows and columns are chosen so the
    /// cells roughly follow the canvas proportions.
    pub fn grid(count: usize, canvas: Size, gap: u32) -> Vec<BlockGeometry> {
        if count == 0 || canvas.is_degenerate() {
            return Vec::new();
        }

        // rows * (rows * display ratio) ~= count
        let display_ratio = canvas.width as f32 / canvas.height as f32;
        let rows = ((count as f32 / display_ratio).sqrt().ceil() as usize).max(1);
        let columns = count.div_ceil(rows).max(1);

        let cell_width = (canvas.width.saturating_sub(gap * (columns as u32 + 1)) / columns as u32).max(1);
        let cell_height = (canvas.height.saturating_sub(gap * (rows as u32 + 1)) / rows as u32).max(1);

        (0..count)
            .map(|i| {
                let column = (i % columns) as u32;
                let row = (i / columns) as u32;
                BlockGeometry::new(
                    (gap + column * (cell_width + gap)) as i32,
                    (gap + row * (cell_height + gap)) as i32,
                    cell_width,
                    cell_height,
                )
            })
            .collect()
    }
}
