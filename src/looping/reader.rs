use log::{debug, trace};
use parking_lot::Mutex;

use crate::{
    AudioFormat, AudioSource, Error, Result,
    memory::{MemoryByteBuffer, MemorySampleBuffer},
};

/// Loop-aware reader over the sample domain.
pub type LoopingSampleReader = LoopingReader<MemorySampleBuffer>;

/// Loop-aware reader over the byte domain.
pub type LoopingByteReader = LoopingReader<MemoryByteBuffer>;

/// Wraps an [`AudioSource`] and repeats a configurable sub-range of it (the
/// loop region) indefinitely, or plays through once, while tracking the
/// absolute playback position.
///
/// Loop bounds are inclusive: [`loop_end`](LoopingReader::loop_end) addresses
/// the last unit *inside* the loop. A single [`read`](LoopingReader::read)
/// wraps the cursor back to [`loop_start`](LoopingReader::loop_start) as
/// often as needed to fill the destination, so with looping enabled a read
/// always delivers the full amount requested.
///
/// With catch-up mode enabled the first read plays from wherever the cursor
/// already is and runs into the loop naturally; without it, a cursor outside
/// the loop window is snapped to the loop start on entry.
///
/// All state lives behind a single lock, making the reader shareable across
/// threads; the whole wrap-around fill is atomic with respect to concurrent
/// callers.
pub struct LoopingReader<S: AudioSource> {
    state: Mutex<State<S>>,
    catch_up: bool,
}

struct State<S> {
    source: S,
    loop_start: usize,
    loop_end: usize,
    enable_looping: bool,
}

impl<S: AudioSource> LoopingReader<S> {
    /// Creates a reader with looping enabled but no loop region configured.
    ///
    /// The bounds must be set, directly or via
    /// [`set_loop_from_frames`](LoopingReader::set_loop_from_frames), before
    /// a looping read is attempted, or the read fails with
    /// [`Error::InvalidLoopBounds`].
    pub fn new(source: S, catch_up: bool) -> Self {
        Self::with_loop(source, 0, 0, catch_up)
    }

    /// Creates a reader with looping enabled over the given region.
    ///
    /// `loop_start` and `loop_end` are inclusive unit offsets into `source`.
    pub fn with_loop(source: S, loop_start: usize, loop_end: usize, catch_up: bool) -> Self {
        Self {
            state: Mutex::new(State {
                source,
                loop_start,
                loop_end,
                enable_looping: true,
            }),
            catch_up,
        }
    }

    /// Returns the format of the underlying source.
    pub fn format(&self) -> AudioFormat {
        self.state.lock().source.format()
    }

    /// Returns the absolute playback position within the source.
    pub fn position(&self) -> usize {
        self.state.lock().source.position()
    }

    /// Moves the absolute playback position.
    pub fn set_position(&self, position: usize) {
        self.state.lock().source.set_position(position);
    }

    /// Returns the first unit inside the loop.
    pub fn loop_start(&self) -> usize {
        self.state.lock().loop_start
    }

    /// Sets the first unit inside the loop.
    pub fn set_loop_start(&self, loop_start: usize) {
        self.state.lock().loop_start = loop_start;
    }

    /// Returns the last unit inside the loop.
    pub fn loop_end(&self) -> usize {
        self.state.lock().loop_end
    }

    /// Sets the last unit inside the loop.
    pub fn set_loop_end(&self, loop_end: usize) {
        self.state.lock().loop_end = loop_end;
    }

    /// Returns whether looping is enabled.
    pub fn looping_enabled(&self) -> bool {
        self.state.lock().enable_looping
    }

    /// Enables or disables looping.
    ///
    /// With looping disabled the reader passes reads straight through to its
    /// source until the data runs out.
    pub fn set_looping_enabled(&self, enabled: bool) {
        self.state.lock().enable_looping = enabled;
    }

    /// Returns whether this reader was built in catch-up mode.
    pub fn catch_up(&self) -> bool {
        self.catch_up
    }

    /// Returns the playback position relative to the loop start.
    ///
    /// Negative while the cursor is still catching up from before the loop.
    pub fn loop_position(&self) -> i64 {
        let state = self.state.lock();
        state.source.position() as i64 - state.loop_start as i64
    }

    /// Returns the total count of units in the loop.
    ///
    /// Only meaningful once the bounds describe a valid region.
    pub fn loop_length(&self) -> usize {
        let state = self.state.lock();
        state.loop_end.saturating_sub(state.loop_start) + 1
    }

    /// Sets the loop bounds from a pair of frame indices, aligning them to
    /// whole frames of the source's unit domain.
    ///
    /// `first_frame` maps to its first unit, `last_frame` to its last unit,
    /// preserving the inclusive bound convention.
    pub fn set_loop_from_frames(&self, first_frame: usize, last_frame: usize) {
        let mut state = self.state.lock();
        let units_per_frame = state.source.units_per_frame();
        state.loop_start = first_frame * units_per_frame;
        state.loop_end = last_frame * units_per_frame + (units_per_frame - 1);
        debug!(
            "loop set from frames {first_frame}..={last_frame}: units {}..={}",
            state.loop_start, state.loop_end
        );
    }

    /// Consumes the reader and returns the underlying source.
    pub fn into_inner(self) -> S {
        self.state.into_inner().source
    }

    /// Fills `dest` from the source, wrapping the cursor back to the loop
    /// start whenever it crosses the loop end, and returns the number of
    /// units written.
    ///
    /// With looping enabled the result always equals `dest.len()` once the
    /// cursor is inside the loop window, no matter how many internal
    /// wrap-arounds that takes. With looping disabled the call is a plain
    /// pass-through to the source, including short reads at the end of the
    /// data.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLoopBounds`] when looping is enabled and the bounds do
    /// not describe a valid window inside the source. The reader state is
    /// left untouched.
    pub fn read(&self, dest: &mut [S::Unit]) -> Result<usize> {
        let mut state = self.state.lock();

        if !state.enable_looping {
            let n = state.source.read(dest);
            return Ok(n);
        }

        let len = state.source.len();
        let (loop_start, loop_end) = (state.loop_start, state.loop_end);
        if loop_end == 0 || loop_end >= len || loop_start >= len || loop_end <= loop_start {
            return Err(Error::InvalidLoopBounds {
                start: loop_start,
                end: loop_end,
                len,
            });
        }

        // Confine playback to the loop window, unless we are catching up.
        let position = state.source.position();
        if !self.catch_up && (position > loop_end || position < loop_start) {
            trace!("cursor {position} outside loop {loop_start}..={loop_end}, snapping to start");
            state.source.set_position(loop_start);
        }

        let mut total = 0;
        while total < dest.len() {
            // Clamps to 0 when catch-up left the cursor past the loop end.
            let remaining_in_loop = (loop_end + 1).saturating_sub(state.source.position());
            let chunk = (dest.len() - total).min(remaining_in_loop);

            let n = state.source.read(&mut dest[total..total + chunk]);
            if n == 0 {
                break;
            }
            total += n;

            if state.source.position() > loop_end {
                state.source.set_position(loop_start);
            }
        }

        Ok(total)
    }
}
