//! Error taxonomy for the channel transforms.

use thiserror::Error;

use crate::buffer::SampleType;

/// Errors from channel packing and unpacking.
///
/// Every failure is fatal for the operation that raised it: no partial
/// output buffer is ever returned, and the core never recovers by resizing
/// or coercing sample types on its own.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PackingError {
    /// Pack-time sources disagree on width/height.
    #[error(
        "source {index} is {found_width}x{found_height} but source 0 is \
         {expected_width}x{expected_height}; resize sources to a common resolution before packing"
    )]
    DimensionMismatch {
        index: usize,
        expected_width: u32,
        expected_height: u32,
        found_width: u32,
        found_height: u32,
    },

    /// Pack-time sources disagree on sample type.
    #[error(
        "source {index} is {found} but source 0 is {expected}; convert sources to a common \
         sample type before packing"
    )]
    PrecisionMismatch {
        index: usize,
        expected: SampleType,
        found: SampleType,
    },

    /// Malformed channel map: duplicate slot or role, empty, too many
    /// entries, or entry count disagreeing with the source count.
    #[error("invalid channel map: {0}")]
    InvalidChannelMap(String),

    /// A channel map entry references a channel the buffer does not have.
    #[error("channel map references slot {slot} but only {channels} channel(s) are available")]
    SlotOutOfRange { slot: usize, channels: usize },

    /// A buffer with zero or more than four channels was requested.
    #[error("unsupported channel count {0} (must be 1..=4)")]
    UnsupportedChannelCount(usize),

    /// Sample data length disagrees with the buffer shape.
    #[error(
        "sample data holds {found} values but {width}x{height} with {channels} channel(s) \
         requires {expected}"
    )]
    SampleCountMismatch {
        width: u32,
        height: u32,
        channels: usize,
        expected: usize,
        found: usize,
    },
}
