/// Errors produced by loop-aware readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The configured loop bounds do not describe a valid window inside the
    /// source: both bounds must lie within the data, the end must be
    /// non-zero and the start must come before the end.
    #[error("invalid loop bounds: start={start} end={end} for a source of {len} units")]
    InvalidLoopBounds {
        /// First unit inside the loop.
        start: usize,
        /// Last unit inside the loop.
        end: usize,
        /// Total length of the source in units.
        len: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
