use rtsan_standalone::{blocking, nonblocking};

use crate::{AudioFormat, AudioSource};

/// An expandable read-write, random-access byte source backed by memory.
///
/// Shares the read/position contract of [`MemorySampleBuffer`] over raw
/// encoded bytes, and additionally supports writing through the cursor:
/// writes overwrite existing data, grow the backing store when they run past
/// the end and zero-fill any gap left by a cursor placed beyond the data.
///
/// The looping algorithm only relies on the read/position contract; the
/// write path exists for callers that assemble their byte stream in place.
///
/// [`MemorySampleBuffer`]: crate::MemorySampleBuffer
pub struct MemoryByteBuffer {
    data: Vec<u8>,
    format: AudioFormat,
    position: usize,
}

impl MemoryByteBuffer {
    /// Creates an empty, expandable buffer for data of the given format.
    pub fn new(format: AudioFormat) -> Self {
        Self {
            data: Vec::new(),
            format,
            position: 0,
        }
    }

    /// Creates a buffer over pre-populated byte data.
    ///
    /// Do not use in real-time processes!
    #[blocking]
    pub fn from_data(format: AudioFormat, data: Vec<u8>) -> Self {
        Self {
            data,
            format,
            position: 0,
        }
    }

    /// Writes `src` at the cursor, overwriting existing data and growing the
    /// buffer as needed, then advances the cursor past the written bytes.
    ///
    /// A cursor placed beyond the current end leaves a zero-filled gap.
    ///
    /// Do not use in real-time processes!
    #[blocking]
    pub fn write(&mut self, src: &[u8]) {
        let end = self.position + src.len();
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[self.position..end].copy_from_slice(src);
        self.position = end;
    }

    /// Provides direct access to the stored bytes, independent of the
    /// cursor.
    #[nonblocking]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl AudioSource for MemoryByteBuffer {
    type Unit = u8;

    #[nonblocking]
    fn format(&self) -> AudioFormat {
        self.format
    }

    #[nonblocking]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[nonblocking]
    fn position(&self) -> usize {
        self.position
    }

    #[nonblocking]
    fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    #[nonblocking]
    fn units_per_frame(&self) -> usize {
        self.format.block_align()
    }

    #[nonblocking]
    fn read(&mut self, dest: &mut [u8]) -> usize {
        let n = dest.len().min(self.data.len().saturating_sub(self.position));
        dest[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcm_format() -> AudioFormat {
        AudioFormat::pcm(44_100, 2, 16)
    }

    #[test]
    fn test_read_advances_cursor() {
        let mut buffer = MemoryByteBuffer::from_data(pcm_format(), vec![1, 2, 3, 4, 5]);

        let mut out = [0u8; 3];
        assert_eq!(buffer.read(&mut out), 3);
        assert_eq!(out, [1, 2, 3]);
        assert_eq!(buffer.position(), 3);

        assert_eq!(buffer.read(&mut out), 2);
        assert_eq!(out[..2], [4, 5]);
        assert_eq!(buffer.read(&mut out), 0);
    }

    #[test]
    fn test_write_appends_and_overwrites() {
        let mut buffer = MemoryByteBuffer::new(pcm_format());
        assert!(buffer.is_empty());

        buffer.write(&[1, 2, 3, 4]);
        assert_eq!(buffer.data(), &[1, 2, 3, 4]);
        assert_eq!(buffer.position(), 4);

        buffer.set_position(2);
        buffer.write(&[9, 9, 9]);
        assert_eq!(buffer.data(), &[1, 2, 9, 9, 9]);
        assert_eq!(buffer.position(), 5);
    }

    #[test]
    fn test_write_past_end_zero_fills_gap() {
        let mut buffer = MemoryByteBuffer::from_data(pcm_format(), vec![1, 2]);

        buffer.set_position(5);
        buffer.write(&[7, 8]);
        assert_eq!(buffer.data(), &[1, 2, 0, 0, 0, 7, 8]);
        assert_eq!(buffer.len(), 7);
    }

    #[test]
    fn test_set_position_is_unclamped() {
        let mut buffer = MemoryByteBuffer::from_data(pcm_format(), vec![1, 2, 3]);

        buffer.set_position(10);
        let mut out = [0u8; 2];
        assert_eq!(buffer.read(&mut out), 0);
        assert_eq!(buffer.position(), 10);
    }

    #[test]
    fn test_units_per_frame_is_block_align() {
        let buffer = MemoryByteBuffer::new(pcm_format());
        // 2 channels at 2 bytes per sample.
        assert_eq!(buffer.units_per_frame(), 4);
    }
}
