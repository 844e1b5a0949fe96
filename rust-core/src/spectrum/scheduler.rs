//! Hop boundary detection on a block stream

/// Decides once per block whether a new frame is due
///
/// Boundaries sit at `warmup + m * hop_size` samples (m >= 0). A block that
/// crosses several boundaries fires once.
#[derive(Debug, Clone)]
pub struct HopScheduler {
    hop_size: u64,
    warmup: u64,
    samples_ingested: u64,
    next_boundary: u64,
}

impl HopScheduler {
    /// # Arguments
    /// * `hop_size` - Samples between frames (> 0)
    /// * `warmup` - Samples needed before the first frame (largest window)
    pub fn new(hop_size: usize, warmup: usize) -> Self {
        Self {
            hop_size: hop_size as u64,
            warmup: warmup as u64,
            samples_ingested: 0,
            next_boundary: warmup as u64,
        }
    }

    /// Account for `block_len` new samples; true if a hop boundary was reached
    pub fn advance(&mut self, block_len: usize) -> bool {
        self.samples_ingested += block_len as u64;
        if self.samples_ingested < self.next_boundary {
            return false;
        }

        // Skip every boundary this block covered
        let crossed = (self.samples_ingested - self.next_boundary) / self.hop_size + 1;
        self.next_boundary += crossed * self.hop_size;
        true
    }

    /// Get total samples seen since creation or reset
    pub fn samples_ingested(&self) -> u64 {
        self.samples_ingested
    }

    /// Get samples needed before the first frame
    pub fn warmup(&self) -> u64 {
        self.warmup
    }

    /// Sample count at which the next frame fires
    pub fn next_boundary(&self) -> u64 {
        self.next_boundary
    }

    /// Return to the pre-warm-up state
    pub fn reset(&mut self) {
        self.samples_ingested = 0;
        self.next_boundary = self.warmup;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_points(hop: usize, warmup: usize, block: usize, blocks: usize) -> Vec<u64> {
        let mut scheduler = HopScheduler::new(hop, warmup);
        (0..blocks)
            .filter_map(|_| scheduler.advance(block).then(|| scheduler.samples_ingested()))
            .collect()
    }

    #[test]
    fn test_no_trigger_before_warmup() {
        let mut scheduler = HopScheduler::new(256, 1024);
        for _ in 0..7 {
            assert!(!scheduler.advance(128));
        }
        assert!(scheduler.advance(128));
        assert_eq!(scheduler.samples_ingested(), 1024);
    }

    #[test]
    fn test_hop_multiple_of_block() {
        assert_eq!(fire_points(256, 1024, 128, 14), vec![1024, 1280, 1536, 1792]);
    }

    #[test]
    fn test_block_larger_than_hop_coalesces() {
        // Four hop boundaries per block, one trigger each
        let points = fire_points(64, 512, 256, 5);
        assert_eq!(points, vec![512, 768, 1024, 1280]);
    }

    #[test]
    fn test_non_divisible_hop_fires_at_most_once_per_block() {
        let mut scheduler = HopScheduler::new(100, 256);
        let mut triggers = 0;
        let blocks = 100;
        for _ in 0..blocks {
            if scheduler.advance(64) {
                triggers += 1;
            }
        }
        let n = (blocks * 64) as i64;
        let expected = (n - 256) / 100 + 1;
        assert!((triggers as i64 - expected).abs() <= 1);
    }

    #[test]
    fn test_reset() {
        let mut scheduler = HopScheduler::new(4, 8);
        scheduler.advance(8);
        scheduler.reset();
        assert_eq!(scheduler.samples_ingested(), 0);
        assert_eq!(scheduler.next_boundary(), 8);
    }
}
