use crate::geometry::{Position, Rect, Size};
use crate::image::Image;
use crate::layout::BlockGeometry;

/// Region of an image, in the image's pixel space, that gets scaled into a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub top_left: Position,
    pub size: Size,
}

impl Slice {
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.top_left, self.size)
    }
}

/// Largest centered region of `image` with the same proportions as `block`.
///
/// One image dimension is always kept whole: the height when the image is
/// relatively wider than the block, the width otherwise. Drawing the slice
/// into the block is then a uniform scale.
#[must_use]
pub fn compute_slice(block: &BlockGeometry, image: &Image) -> Slice {
    let (block_w, block_h) = (block.size.width as u64, block.size.height as u64);
    let (image_w, image_h) = (image.width() as u64, image.height() as u64);

    // image_w / image_h > block_w / block_h, without the division
    let is_image_flatter = image_w * block_h > block_w * image_h;

    if is_image_flatter {
        let width = scaled_extent(block_w, image_h, block_h).min(image_w);
        Slice {
            top_left: Position::new(((image_w - width) / 2) as i32, 0),
            size: Size::new(width as u32, image_h as u32),
        }
    } else {
        let height = scaled_extent(block_h, image_w, block_w).min(image_h);
        Slice {
            top_left: Position::new(0, ((image_h - height) / 2) as i32),
            size: Size::new(image_w as u32, height as u32),
        }
    }
}

/// round(extent * numerator / denominator), never below one pixel.
fn scaled_extent(extent: u64, numerator: u64, denominator: u64) -> u64 {
    let exact = extent as f64 * (numerator as f64 / denominator as f64);
    (exact.round() as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageId;

    fn image(width: u32, height: u32) -> Image {
        Image::new(ImageId(0), width, height).unwrap()
    }

    fn assert_valid(block: BlockGeometry, image: Image) {
        let slice = compute_slice(&block, &image);
        let bounds = Rect::new(0, 0, image.width(), image.height());
        assert!(
            bounds.contains_rect(&slice.rect()),
            "slice {slice:?} outside {}x{}",
            image.width(),
            image.height()
        );

        // slice.width / slice.height == block.width / block.height, within a pixel
        let expected_height =
            slice.size.width as f64 * block.size.height as f64 / block.size.width as f64;
        let expected_width =
            slice.size.height as f64 * block.size.width as f64 / block.size.height as f64;
        assert!(
            (expected_height - slice.size.height as f64).abs() <= 1.0
                || (expected_width - slice.size.width as f64).abs() <= 1.0,
            "slice {slice:?} does not match block {block:?}"
        );
    }

    #[test]
    fn test_square_image_into_wide_block() {
        let slice = compute_slice(&BlockGeometry::new(0, 0, 100, 50), &image(400, 400));

        assert_eq!(slice.top_left, Position::new(0, 100));
        assert_eq!(slice.size, Size::new(400, 200));
    }

    #[test]
    fn test_wide_image_into_square_block_is_horizontally_centered() {
        let slice = compute_slice(&BlockGeometry::new(10, 10, 50, 50), &image(300, 100));

        assert_eq!(slice.top_left, Position::new(100, 0));
        assert_eq!(slice.size, Size::new(100, 100));
    }

    #[test]
    fn test_equal_proportions_keep_whole_image() {
        let slice = compute_slice(&BlockGeometry::new(0, 0, 160, 90), &image(1920, 1080));

        assert_eq!(slice.top_left, Position::new(0, 0));
        assert_eq!(slice.size, Size::new(1920, 1080));
    }

    #[test]
    fn test_odd_remainder_floors_offset() {
        // height = round(50 * 101 / 100) = 51 (50.5 rounds up); y = floor((100 - 51) / 2) = 24
        let slice = compute_slice(&BlockGeometry::new(0, 0, 100, 50), &image(101, 100));

        assert_eq!(slice.size, Size::new(101, 51));
        assert_eq!(slice.top_left, Position::new(0, 24));
    }

    #[test]
    fn test_extreme_mismatch_never_yields_empty_slice() {
        let slice = compute_slice(&BlockGeometry::new(0, 0, 1, 1000), &image(1000, 1));

        assert_eq!(slice.size, Size::new(1, 1));
        assert_eq!(slice.top_left, Position::new(499, 0));
    }

    #[test]
    fn test_slices_are_contained_and_proportional() {
        let blocks = [
            BlockGeometry::new(0, 0, 100, 50),
            BlockGeometry::new(0, 0, 50, 100),
            BlockGeometry::new(0, 0, 33, 77),
            BlockGeometry::new(0, 0, 640, 480),
            BlockGeometry::new(0, 0, 1, 1),
        ];
        let images = [
            image(400, 400),
            image(1920, 1080),
            image(1080, 1920),
            image(17, 3),
            image(3, 17),
            image(999, 1000),
        ];

        for block in blocks {
            for image in images {
                assert_valid(block, image);
            }
        }
    }
}
