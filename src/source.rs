use num::Zero;

use crate::AudioFormat;

/// Represents the fixed-width element of a unit domain.
///
/// This trait is automatically implemented for any type that meets the
/// following requirements:
/// - `Copy`: the type can be copied by value efficiently
/// - `Zero`: the type has a zero value (silence, or a zero byte)
/// - `'static`: the type doesn't contain any non-static references
///
/// The two domains this crate instantiates are `f32` audio samples and raw
/// `u8` bytes.
pub trait Unit: Copy + Zero + 'static {}
impl<T> Unit for T where T: Copy + Zero + 'static {}

/// A unit-indexed, randomly addressable store of audio data with a movable
/// read cursor.
///
/// This is the capability the looping algorithm consumes: a finite sequence
/// of units, a cursor, and a bulk sequential read that copies
/// `min(requested, remaining)` units and advances the cursor. Implementations
/// never block and never fail; running past the end is reported as a short
/// read, and an out-of-range cursor simply yields 0 units on the next read.
pub trait AudioSource {
    /// The element type of this source's unit domain.
    type Unit: Unit;

    /// Returns the format of the stored audio data.
    fn format(&self) -> AudioFormat;

    /// Returns the length of the data in units.
    fn len(&self) -> usize;

    /// Returns `true` if the source holds no data.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current cursor position in units.
    fn position(&self) -> usize;

    /// Moves the cursor to `position`.
    ///
    /// No range check is performed here; setting the cursor at or past
    /// [`len`](AudioSource::len) makes the next [`read`](AudioSource::read)
    /// return 0 units.
    fn set_position(&mut self, position: usize);

    /// Returns the number of units that make up one audio frame.
    ///
    /// This is the channel count in the sample domain and the block
    /// alignment (channels × bytes per sample) in the byte domain.
    fn units_per_frame(&self) -> usize;

    /// Copies `min(dest.len(), len - position)` units starting at the cursor
    /// into `dest`, advances the cursor by the amount copied and returns it.
    ///
    /// Returns 0 when the cursor is at or past the end of the data.
    fn read(&mut self, dest: &mut [Self::Unit]) -> usize;
}
