//! Per-band sliding sample window
//!
//! Fixed-size ring buffer (no allocations after construction) holding the
//! band's analysis window plus a lag tail. The lag keeps a short window
//! centred on the largest one: the snapshot is taken `lag` samples behind
//! the newest sample.

use crate::error::{DftError, Result};

/// Ring buffer of the most recent `window_size + lag` samples
pub struct SlidingSampleWindow {
    /// Sample storage, oldest sample at `cursor`
    buffer: Vec<f64>,

    /// Next write position (also the oldest sample once full)
    cursor: usize,

    window_size: usize,

    /// Samples between the end of the window and the newest sample
    lag: usize,

    /// Expected length of every appended block
    block_size: usize,
}

impl SlidingSampleWindow {
    /// Create a zero-filled window
    ///
    /// # Arguments
    /// * `window_size` - Samples returned by [`snapshot`](Self::snapshot)
    /// * `lag` - Samples between the window end and the newest sample
    /// * `block_size` - Length every appended block must have (`<= window_size`)
    pub fn new(window_size: usize, lag: usize, block_size: usize) -> Result<Self> {
        if window_size == 0 || block_size == 0 || block_size > window_size {
            return Err(DftError::Config(format!(
                "block size {} incompatible with window size {}",
                block_size, window_size
            )));
        }

        Ok(Self {
            buffer: vec![0.0; window_size + lag],
            cursor: 0,
            window_size,
            lag,
            block_size,
        })
    }

    /// Shift the window forward by one block, discarding the oldest samples
    pub fn append(&mut self, block: &[f64]) -> Result<()> {
        if block.len() != self.block_size {
            return Err(DftError::InvalidArgument(format!(
                "expected a block of {} samples, got {}",
                self.block_size,
                block.len()
            )));
        }

        let capacity = self.buffer.len();
        let mut remaining = block;
        while !remaining.is_empty() {
            let n = remaining.len().min(capacity - self.cursor);
            self.buffer[self.cursor..self.cursor + n].copy_from_slice(&remaining[..n]);
            self.cursor = (self.cursor + n) % capacity;
            remaining = &remaining[n..];
        }

        Ok(())
    }

    /// Copy the window into `out` in chronological order
    ///
    /// `out` must hold exactly `window_size` samples.
    pub fn snapshot_into(&self, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.window_size);

        // Oldest sample sits at the cursor; the window is the oldest
        // `window_size` samples, the remaining `lag` are newer.
        let start = self.cursor;
        let first = self.window_size.min(self.buffer.len() - start);
        out[..first].copy_from_slice(&self.buffer[start..start + first]);
        out[first..].copy_from_slice(&self.buffer[..self.window_size - first]);
    }

    /// Current window in chronological order
    pub fn snapshot(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.window_size];
        self.snapshot_into(&mut out);
        out
    }

    /// Zero the contents
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.cursor = 0;
    }

    /// Get window length in samples
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Get samples held after the window end
    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Get expected block length
    pub fn block_size(&self) -> usize {
        self.block_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(start: usize, len: usize) -> Vec<f64> {
        (start..start + len).map(|n| n as f64).collect()
    }

    #[test]
    fn test_window_keeps_latest_samples() {
        let mut window = SlidingSampleWindow::new(8, 0, 4).unwrap();

        window.append(&ramp(0, 4)).unwrap();
        assert_eq!(window.snapshot(), vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);

        window.append(&ramp(4, 4)).unwrap();
        assert_eq!(window.snapshot(), ramp(0, 8));

        window.append(&ramp(8, 4)).unwrap();
        assert_eq!(window.snapshot(), ramp(4, 8));
    }

    #[test]
    fn test_window_with_lag() {
        // 4-sample window trailing the newest sample by 2
        let mut window = SlidingSampleWindow::new(4, 2, 2).unwrap();
        for start in (0..10).step_by(2) {
            window.append(&ramp(start, 2)).unwrap();
        }
        // Ingested 0..10, newest is 9, window ends at 7
        assert_eq!(window.snapshot(), ramp(4, 4));
    }

    #[test]
    fn test_window_wraps_with_uneven_capacity() {
        // Capacity 7 does not divide into 3-sample blocks
        let mut window = SlidingSampleWindow::new(5, 2, 3).unwrap();
        for start in (0..30).step_by(3) {
            window.append(&ramp(start, 3)).unwrap();
        }
        // Newest is 29, lag 2 -> window is 23..=27
        assert_eq!(window.snapshot(), ramp(23, 5));
    }

    #[test]
    fn test_wrong_block_length_is_rejected() {
        let mut window = SlidingSampleWindow::new(8, 0, 4).unwrap();
        window.append(&ramp(0, 4)).unwrap();
        let before = window.snapshot();

        assert!(matches!(window.append(&ramp(0, 3)), Err(DftError::InvalidArgument(_))));
        assert_eq!(window.snapshot(), before);
    }

    #[test]
    fn test_block_larger_than_window_is_config_error() {
        assert!(matches!(SlidingSampleWindow::new(4, 0, 8), Err(DftError::Config(_))));
    }

    #[test]
    fn test_reset() {
        let mut window = SlidingSampleWindow::new(4, 0, 4).unwrap();
        window.append(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        window.reset();
        assert_eq!(window.snapshot(), vec![0.0; 4]);
    }
}
