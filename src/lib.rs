#![doc = include_str!("../README.md")]

pub use error::Error;
pub use error::Result;

pub use format::AudioFormat;
pub use format::SampleEncoding;

pub use source::AudioSource;
pub use source::Unit;

pub use memory::MemoryByteBuffer;
pub use memory::MemorySampleBuffer;

pub use looping::LoopingByteReader;
pub use looping::LoopingReader;
pub use looping::LoopingSampleReader;

mod error;
mod format;
pub mod looping;
pub mod memory;
mod source;
