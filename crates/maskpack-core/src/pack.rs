//! Combine single-channel maps into one multi-channel buffer.

use crate::buffer::{ImageBuffer, SampleType, Samples};
use crate::channel_map::ChannelMap;
use crate::error::PackingError;

/// Pack single-channel sources into one multi-channel buffer.
///
/// Each map entry `(role, slot)` copies the sole channel of the source at
/// the same position into output channel `slot`. The output has exactly
/// `sources.len()` channels; there is no implicit zero-fill to four
/// channels, so a map slot at or beyond `sources.len()` is rejected.
///
/// Sources must agree on resolution and sample type. The core never
/// resamples or coerces on its own; a caller that wants to mix
/// resolutions or precisions must normalize the sources first.
pub fn pack(sources: &[ImageBuffer], map: &ChannelMap) -> Result<ImageBuffer, PackingError> {
    if sources.len() != map.len() {
        return Err(PackingError::InvalidChannelMap(format!(
            "{} source(s) given for a map with {} entr{}",
            sources.len(),
            map.len(),
            if map.len() == 1 { "y" } else { "ies" }
        )));
    }

    for source in sources {
        if source.channels() != 1 {
            return Err(PackingError::UnsupportedChannelCount(source.channels()));
        }
    }

    for entry in map.entries() {
        if entry.slot.index() >= sources.len() {
            return Err(PackingError::SlotOutOfRange {
                slot: entry.slot.index(),
                channels: sources.len(),
            });
        }
    }

    let first = &sources[0];
    for (index, source) in sources.iter().enumerate().skip(1) {
        if source.width() != first.width() || source.height() != first.height() {
            return Err(PackingError::DimensionMismatch {
                index,
                expected_width: first.width(),
                expected_height: first.height(),
                found_width: source.width(),
                found_height: source.height(),
            });
        }
        if source.sample_type() != first.sample_type() {
            return Err(PackingError::PrecisionMismatch {
                index,
                expected: first.sample_type(),
                found: source.sample_type(),
            });
        }
    }

    let slots: Vec<usize> = map.entries().iter().map(|e| e.slot.index()).collect();
    let samples = match first.sample_type() {
        SampleType::U8 => {
            let planes: Vec<&[u8]> = sources.iter().filter_map(|s| s.samples().as_u8()).collect();
            Samples::U8(interleave(&planes, &slots))
        }
        SampleType::U16 => {
            let planes: Vec<&[u16]> = sources.iter().filter_map(|s| s.samples().as_u16()).collect();
            Samples::U16(interleave(&planes, &slots))
        }
        SampleType::F32 => {
            let planes: Vec<&[f32]> = sources.iter().filter_map(|s| s.samples().as_f32()).collect();
            Samples::F32(interleave(&planes, &slots))
        }
    };

    ImageBuffer::from_samples(first.width(), first.height(), sources.len(), samples)
}

/// Interleave one plane per map entry into `planes.len()`-channel pixels.
fn interleave<T: Copy + Default>(planes: &[&[T]], slots: &[usize]) -> Vec<T> {
    let channels = planes.len();
    let mut out = vec![T::default(); planes[0].len() * channels];
    for (plane, &slot) in planes.iter().zip(slots) {
        for (pixel, &value) in plane.iter().enumerate() {
            out[pixel * channels + slot] = value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel_map::{ChannelEntry, ChannelSlot};

    fn gray_u8(width: u32, height: u32, data: Vec<u8>) -> ImageBuffer {
        ImageBuffer::from_samples(width, height, 1, Samples::U8(data)).unwrap()
    }

    #[test]
    fn packs_three_maps_into_rgb() {
        let specular = gray_u8(2, 2, vec![10, 20, 30, 40]);
        let roughness = gray_u8(2, 2, vec![50, 60, 70, 80]);
        let ao = gray_u8(2, 2, vec![90, 100, 110, 120]);
        let map = ChannelMap::from_roles(["specular", "roughness", "ao"]).unwrap();

        let packed = pack(&[specular, roughness, ao], &map).unwrap();
        assert_eq!(packed.width(), 2);
        assert_eq!(packed.height(), 2);
        assert_eq!(packed.channels(), 3);

        let data = packed.samples().as_u8().unwrap();
        // Pixel (0,0) and pixel (1,1), interleaved RGB.
        assert_eq!(&data[0..3], &[10, 50, 90]);
        assert_eq!(&data[9..12], &[40, 80, 120]);
    }

    #[test]
    fn single_source_produces_single_channel() {
        let mask = gray_u8(2, 1, vec![1, 2]);
        let map = ChannelMap::from_roles(["mask"]).unwrap();
        let packed = pack(&[mask], &map).unwrap();
        assert_eq!(packed.channels(), 1);
        assert_eq!(packed.samples().as_u8().unwrap(), &[1, 2]);
    }

    #[test]
    fn four_sources_fill_rgba() {
        let sources: Vec<ImageBuffer> =
            (0u8..4).map(|i| gray_u8(1, 1, vec![i + 1])).collect();
        let map = ChannelMap::from_roles(["r", "g", "b", "a"]).unwrap();
        let packed = pack(&sources, &map).unwrap();
        assert_eq!(packed.channels(), 4);
        assert_eq!(packed.samples().as_u8().unwrap(), &[1, 2, 3, 4]);
    }

    #[test]
    fn does_not_mutate_sources() {
        let a = gray_u8(1, 1, vec![5]);
        let b = gray_u8(1, 1, vec![9]);
        let map = ChannelMap::from_roles(["a", "b"]).unwrap();
        let sources = [a.clone(), b.clone()];
        let _ = pack(&sources, &map).unwrap();
        assert_eq!(sources[0], a);
        assert_eq!(sources[1], b);
    }

    #[test]
    fn packs_f32_sources() {
        let a = ImageBuffer::from_samples(1, 2, 1, Samples::F32(vec![0.25, 0.5])).unwrap();
        let b = ImageBuffer::from_samples(1, 2, 1, Samples::F32(vec![0.75, 1.0])).unwrap();
        let map = ChannelMap::from_roles(["height", "mask"]).unwrap();

        let packed = pack(&[a, b], &map).unwrap();
        assert_eq!(packed.sample_type(), SampleType::F32);
        assert_eq!(packed.samples().as_f32().unwrap(), &[0.25, 0.75, 0.5, 1.0]);
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let a = gray_u8(2, 2, vec![0; 4]);
        let b = gray_u8(2, 3, vec![0; 6]);
        let map = ChannelMap::from_roles(["a", "b"]).unwrap();

        let err = pack(&[a, b], &map).unwrap_err();
        assert_eq!(
            err,
            PackingError::DimensionMismatch {
                index: 1,
                expected_width: 2,
                expected_height: 2,
                found_width: 2,
                found_height: 3,
            }
        );
    }

    #[test]
    fn rejects_precision_mismatch() {
        let a = gray_u8(1, 1, vec![0]);
        let b = ImageBuffer::from_samples(1, 1, 1, Samples::F32(vec![0.0])).unwrap();
        let map = ChannelMap::from_roles(["a", "b"]).unwrap();

        let err = pack(&[a, b], &map).unwrap_err();
        assert_eq!(
            err,
            PackingError::PrecisionMismatch {
                index: 1,
                expected: SampleType::U8,
                found: SampleType::F32,
            }
        );
    }

    #[test]
    fn rejects_multi_channel_source() {
        let rgb = ImageBuffer::from_samples(1, 1, 3, Samples::U8(vec![0, 0, 0])).unwrap();
        let map = ChannelMap::from_roles(["rgb"]).unwrap();
        let err = pack(&[rgb], &map).unwrap_err();
        assert_eq!(err, PackingError::UnsupportedChannelCount(3));
    }

    #[test]
    fn rejects_arity_mismatch() {
        let a = gray_u8(1, 1, vec![0]);
        let map = ChannelMap::from_roles(["a", "b"]).unwrap();
        let err = pack(&[a], &map).unwrap_err();
        assert!(matches!(err, PackingError::InvalidChannelMap(_)));
    }

    #[test]
    fn rejects_slot_beyond_source_count() {
        // Two sources, but the map routes one of them to slot B: the output
        // would need three channels while only two are produced.
        let a = gray_u8(1, 1, vec![0]);
        let b = gray_u8(1, 1, vec![0]);
        let map = ChannelMap::new(vec![
            ChannelEntry::new("a", ChannelSlot::R),
            ChannelEntry::new("b", ChannelSlot::B),
        ])
        .unwrap();

        let err = pack(&[a, b], &map).unwrap_err();
        assert_eq!(err, PackingError::SlotOutOfRange { slot: 2, channels: 2 });
    }
}
