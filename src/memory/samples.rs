use rtsan_standalone::{blocking, nonblocking};

use crate::{AudioFormat, AudioSource};

/// A read-only, random-access sample source whose backing store is memory.
///
/// The data is fixed at construction; only the read cursor moves. Reads copy
/// `min(requested, remaining)` samples and advance the cursor, so a cursor at
/// or past the end yields a 0-sample read instead of an error.
///
/// # Example
///
/// ```
/// use audio_loops::{AudioSource, MemorySampleBuffer};
///
/// let mut buffer = MemorySampleBuffer::new(vec![0.0, 1.0, 2.0], 44_100, 1);
///
/// let mut out = [0.0_f32; 2];
/// assert_eq!(buffer.read(&mut out), 2);
/// assert_eq!(out, [0.0, 1.0]);
/// assert_eq!(buffer.position(), 2);
/// ```
pub struct MemorySampleBuffer {
    data: Box<[f32]>,
    format: AudioFormat,
    position: usize,
}

impl MemorySampleBuffer {
    /// Creates a buffer over the given samples with a 32-bit IEEE float
    /// format built from `sample_rate` and `num_channels`.
    ///
    /// Do not use in real-time processes!
    #[blocking]
    pub fn new(data: Vec<f32>, sample_rate: u32, num_channels: u16) -> Self {
        Self::from_data(data, AudioFormat::ieee_float(sample_rate, num_channels))
    }

    /// Creates a buffer over the given samples with an explicit format.
    ///
    /// The format should describe IEEE-float data; it is carried through to
    /// consumers as-is.
    ///
    /// Do not use in real-time processes!
    #[blocking]
    pub fn from_data(data: Vec<f32>, format: AudioFormat) -> Self {
        Self {
            data: data.into_boxed_slice(),
            format,
            position: 0,
        }
    }

    /// Provides direct access to the stored samples, independent of the
    /// cursor.
    #[nonblocking]
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

impl AudioSource for MemorySampleBuffer {
    type Unit = f32;

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
        self.format.num_channels() as usize
    }

    #[nonblocking]
    fn read(&mut self, dest: &mut [f32]) -> usize {
        let n = dest.len().min(self.data.len().saturating_sub(self.position));
        dest[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        n
    }
}
