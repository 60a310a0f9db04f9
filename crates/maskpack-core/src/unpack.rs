//! Split a multi-channel buffer into single-channel maps.

use crate::buffer::{ImageBuffer, Samples};
use crate::channel_map::ChannelMap;
use crate::error::PackingError;

/// Unpack one single-channel buffer per map entry, in map order.
///
/// Each entry `(role, slot)` copies channel `slot` of every pixel into a
/// fresh buffer of the same resolution and sample type. Channels of the
/// input that no entry references are silently dropped, which lets a caller
/// ignore e.g. an alpha channel used purely for masking.
pub fn unpack(packed: &ImageBuffer, map: &ChannelMap) -> Result<Vec<ImageBuffer>, PackingError> {
    for entry in map.entries() {
        if entry.slot.index() >= packed.channels() {
            return Err(PackingError::SlotOutOfRange {
                slot: entry.slot.index(),
                channels: packed.channels(),
            });
        }
    }

    map.entries()
        .iter()
        .map(|entry| {
            let slot = entry.slot.index();
            let channels = packed.channels();
            let samples = match packed.samples() {
                Samples::U8(data) => Samples::U8(extract_plane(data, channels, slot)),
                Samples::U16(data) => Samples::U16(extract_plane(data, channels, slot)),
                Samples::F32(data) => Samples::F32(extract_plane(data, channels, slot)),
            };
            ImageBuffer::from_samples(packed.width(), packed.height(), 1, samples)
        })
        .collect()
}

/// Copy channel `slot` out of interleaved pixel data.
fn extract_plane<T: Copy>(data: &[T], channels: usize, slot: usize) -> Vec<T> {
    data.chunks_exact(channels).map(|px| px[slot]).collect()
}
