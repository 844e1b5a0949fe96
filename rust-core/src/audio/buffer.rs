//! Lock-free sample queue feeding an engine in whole blocks
//!
//! A producer thread pushes chunks of any length; the consumer side pops
//! exact blocks and runs them through a [`HoppingGoertzelDft`], so the
//! engine itself never needs synchronization.

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

use crate::error::Result;
use crate::spectrum::HoppingGoertzelDft;

/// Single-producer / single-consumer sample queue
pub struct SampleQueue {
    producer: HeapProducer<f64>,
    consumer: HeapConsumer<f64>,
    capacity: usize,
}

impl SampleQueue {
    /// Create a queue holding up to `capacity` samples
    pub fn new(capacity: usize) -> Self {
        let rb = HeapRb::<f64>::new(capacity);
        let (producer, consumer) = rb.split();

        Self {
            producer,
            consumer,
            capacity,
        }
    }

    /// Split into the writing end and a block reader of `block_size` samples
    pub fn split(self, block_size: usize) -> (SampleProducer, BlockReader) {
        (
            SampleProducer {
                producer: self.producer,
            },
            BlockReader {
                consumer: self.consumer,
                block: vec![0.0; block_size],
            },
        )
    }

    /// Get buffer capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Writing end of a [`SampleQueue`]
pub struct SampleProducer {
    producer: HeapProducer<f64>,
}

impl SampleProducer {
    /// Write samples; returns how many fit (may be fewer when the queue is full)
    pub fn write(&mut self, samples: &[f64]) -> usize {
        self.producer.push_slice(samples)
    }

    /// Get free space in samples
    pub fn free_len(&self) -> usize {
        self.producer.free_len()
    }
}

/// Reading end of a [`SampleQueue`] that only ever pops whole blocks
pub struct BlockReader {
    consumer: HeapConsumer<f64>,
    block: Vec<f64>,
}

impl BlockReader {
    /// Pop the next full block, or `None` if fewer samples are queued
    pub fn next_block(&mut self) -> Option<&[f64]> {
        if self.consumer.len() < self.block.len() {
            return None;
        }
        self.consumer.pop_slice(&mut self.block);
        Some(&self.block)
    }

    /// Run every queued full block through `engine`
    ///
    /// Returns the number of frames assembled. A partial block stays queued.
    pub fn drain_into(&mut self, engine: &mut HoppingGoertzelDft) -> Result<usize> {
        let mut frames = 0;
        while let Some(block) = self.next_block() {
            if engine.process(block)? {
                frames += 1;
            }
        }
        Ok(frames)
    }

    /// Samples waiting in the queue
    pub fn queued(&self) -> usize {
        self.consumer.len()
    }

    /// Get block size
    pub fn block_size(&self) -> usize {
        self.block.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::{BandSpec, EngineConfig};

    fn engine(block: usize) -> HoppingGoertzelDft {
        let bands = vec![BandSpec::new(64, 0..4).unwrap()];
        HoppingGoertzelDft::new(EngineConfig::new(bands, 32, block).unwrap()).unwrap()
    }

    #[test]
    fn test_blocks_only_when_full() {
        let (mut producer, mut reader) = SampleQueue::new(64).split(8);

        assert_eq!(producer.write(&[1.0; 5]), 5);
        assert!(reader.next_block().is_none());

        producer.write(&[2.0; 5]);
        let block = reader.next_block().unwrap().to_vec();
        assert_eq!(block, vec![1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
        assert_eq!(reader.queued(), 2);
    }

    #[test]
    fn test_overflow_is_reported() {
        let (mut producer, _reader) = SampleQueue::new(10).split(4);
        let written = producer.write(&[0.0; 20]);
        assert!(written <= 10);
        assert_eq!(producer.free_len(), 10 - written);
    }

    #[test]
    fn test_drain_counts_frames() {
        let mut engine = engine(8);
        let (mut producer, mut reader) = SampleQueue::new(1024).split(8);

        // 64 warm-up + 2 hops of 32, plus a dangling partial block
        producer.write(&vec![0.25; 64 + 64 + 3]);
        assert_eq!(reader.drain_into(&mut engine).unwrap(), 3);
        assert_eq!(reader.queued(), 3);
        assert_eq!(engine.samples_ingested(), 128);
    }

    #[test]
    fn test_producer_on_another_thread() {
        let mut engine = engine(16);
        let (mut producer, mut reader) = SampleQueue::new(4096).split(16);

        let handle = std::thread::spawn(move || {
            let chunk = [0.5; 37];
            let mut sent = 0;
            while sent < 37 * 20 {
                sent += producer.write(&chunk[..(37 * 20 - sent).min(37)]);
            }
        });
        handle.join().unwrap();

        reader.drain_into(&mut engine).unwrap();
        // 740 samples -> 46 blocks of 16, 4 left over
        assert_eq!(engine.samples_ingested(), 736);
        assert_eq!(reader.queued(), 4);
    }
}
