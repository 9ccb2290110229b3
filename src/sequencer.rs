/// Cyclic cursor over a collection whose length is supplied on every step.
///
/// Starts before the first element, so the first `advance` yields index 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct RingCounter {
    offset: Option<usize>,
}

impl RingCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step forward with wraparound. `None` when the collection is empty.
    pub fn advance(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let next = match self.offset {
            Some(offset) => (offset + 1) % len,
            None => 0,
        };
        self.offset = Some(next);
        Some(next)
    }
}

/// Round-robin choice of the next block and the next image. The two cycles
/// are independent: a block can receive any image, including the one it has.
#[derive(Debug, Default, Clone, Copy)]
pub struct RotationSequencer {
    blocks: RingCounter,
    images: RingCounter,
}

impl RotationSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_block(&mut self, layout_len: usize) -> Option<usize> {
        self.blocks.advance(layout_len)
    }

    pub fn next_image(&mut self, images_len: usize) -> Option<usize> {
        self.images.advance(images_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_indices_cycle() {
        let mut sequencer = RotationSequencer::new();
        let indices: Vec<_> = (0..7).filter_map(|_| sequencer.next_block(3)).collect();

        assert_eq!(indices, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_image_index_stays_in_range_while_set_grows() {
        let mut sequencer = RotationSequencer::new();
        let mut len = 1;

        for step in 0..50 {
            if step % 4 == 0 {
                len += 1;
            }
            let index = sequencer.next_image(len).unwrap();
            assert!(index < len, "index {index} out of range for {len}");
        }
    }

    #[test]
    fn test_counters_are_independent() {
        let mut sequencer = RotationSequencer::new();

        assert_eq!(sequencer.next_block(2), Some(0));
        assert_eq!(sequencer.next_block(2), Some(1));
        assert_eq!(sequencer.next_image(5), Some(0));
        assert_eq!(sequencer.next_block(2), Some(0));
        assert_eq!(sequencer.next_image(5), Some(1));
    }

    #[test]
    fn test_empty_collection_does_not_move_counter() {
        let mut counter = RingCounter::new();

        assert_eq!(counter.advance(0), None);
        assert_eq!(counter.advance(4), Some(0));
        assert_eq!(counter.advance(4), Some(1));
    }
}
