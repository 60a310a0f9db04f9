//! In-memory image representation.

use std::fmt;

use crate::error::PackingError;

/// Per-channel numeric precision of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit floating point.
    F32,
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "8-bit"),
            Self::U16 => write!(f, "16-bit"),
            Self::F32 => write!(f, "32-bit float"),
        }
    }
}

/// Interleaved pixel storage, tagged by sample type.
///
/// Transform loops are generic over the element type; the variant is
/// matched once per operation, never per pixel.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

impl Samples {
    /// Number of scalar values held.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(data) => data.len(),
            Self::U16(data) => data.len(),
            Self::F32(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sample type this storage carries.
    pub fn sample_type(&self) -> SampleType {
        match self {
            Self::U8(_) => SampleType::U8,
            Self::U16(_) => SampleType::U16,
            Self::F32(_) => SampleType::F32,
        }
    }

    /// Borrow the raw values if this is 8-bit storage.
    pub fn as_u8(&self) -> Option<&[u8]> {
        match self {
            Self::U8(data) => Some(data),
            _ => None,
        }
    }

    /// Borrow the raw values if this is 16-bit storage.
    pub fn as_u16(&self) -> Option<&[u16]> {
        match self {
            Self::U16(data) => Some(data),
            _ => None,
        }
    }

    /// Borrow the raw values if this is float storage.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            Self::F32(data) => Some(data),
            _ => None,
        }
    }
}

/// A rectangular pixel grid with 1 to 4 interleaved channels.
///
/// Data is row-major with origin at the top-left, indexed
/// `[row][col][channel]`. Buffers are immutable once constructed; the
/// transforms allocate new buffers instead of mutating their inputs, so a
/// buffer may be shared freely between concurrent calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    channels: usize,
    samples: Samples,
}

impl ImageBuffer {
    /// Build a buffer from interleaved sample data.
    ///
    /// Fails with [`PackingError::UnsupportedChannelCount`] for 0 or more
    /// than 4 channels, and [`PackingError::SampleCountMismatch`] when the
    /// data length is not `width * height * channels`.
    pub fn from_samples(
        width: u32,
        height: u32,
        channels: usize,
        samples: Samples,
    ) -> Result<Self, PackingError> {
        if channels == 0 || channels > 4 {
            return Err(PackingError::UnsupportedChannelCount(channels));
        }
        let expected = width as usize * height as usize * channels;
        if samples.len() != expected {
            return Err(PackingError::SampleCountMismatch {
                width,
                height,
                channels,
                expected,
                found: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of interleaved channels (1..=4).
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Per-channel precision.
    pub fn sample_type(&self) -> SampleType {
        self.samples.sample_type()
    }

    /// The interleaved pixel storage.
    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether channel `slot` carries any non-zero sample.
    ///
    /// Used to report which channels of a packed file are actually
    /// populated, e.g. an alpha slot left at zero by an exporter.
    pub fn channel_has_data(&self, slot: usize) -> Result<bool, PackingError> {
        if slot >= self.channels {
            return Err(PackingError::SlotOutOfRange {
                slot,
                channels: self.channels,
            });
        }
        let used = match &self.samples {
            Samples::U8(data) => slot_values(data, self.channels, slot).any(|v| v != 0),
            Samples::U16(data) => slot_values(data, self.channels, slot).any(|v| v != 0),
            Samples::F32(data) => slot_values(data, self.channels, slot).any(|v| v != 0.0),
        };
        Ok(used)
    }

    /// Whether the first three channels hold the same value at every pixel.
    ///
    /// Grayscale masks are often exported as RGB with the value replicated
    /// across the color channels; this detects that layout so a caller can
    /// collapse the buffer to a single channel. Buffers with fewer than
    /// three channels are never uniform gray.
    pub fn is_uniform_gray(&self) -> bool {
        if self.channels < 3 {
            return false;
        }
        match &self.samples {
            Samples::U8(data) => rgb_equal(data, self.channels, |a, b| a == b),
            Samples::U16(data) => rgb_equal(data, self.channels, |a, b| a == b),
            Samples::F32(data) => rgb_equal(data, self.channels, |a, b| (a - b).abs() < 1e-6),
        }
    }
}

fn slot_values<T: Copy>(data: &[T], channels: usize, slot: usize) -> impl Iterator<Item = T> + '_ {
    data.iter().copied().skip(slot).step_by(channels)
}

fn rgb_equal<T: Copy>(data: &[T], channels: usize, eq: impl Fn(T, T) -> bool) -> bool {
    data.chunks_exact(channels)
        .all(|px| eq(px[0], px[1]) && eq(px[1], px[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_samples_checks_shape() {
        let buf = ImageBuffer::from_samples(2, 2, 1, Samples::U8(vec![0; 4])).unwrap();
        assert_eq!(buf.width(), 2);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.channels(), 1);
        assert_eq!(buf.sample_type(), SampleType::U8);
        assert_eq!(buf.pixel_count(), 4);
    }

    #[test]
    fn from_samples_rejects_bad_channel_count() {
        let err = ImageBuffer::from_samples(2, 2, 0, Samples::U8(vec![])).unwrap_err();
        assert_eq!(err, PackingError::UnsupportedChannelCount(0));

        let err = ImageBuffer::from_samples(1, 1, 5, Samples::U8(vec![0; 5])).unwrap_err();
        assert_eq!(err, PackingError::UnsupportedChannelCount(5));
    }

    #[test]
    fn from_samples_rejects_wrong_data_length() {
        let err = ImageBuffer::from_samples(2, 2, 3, Samples::U16(vec![0; 11])).unwrap_err();
        assert_eq!(
            err,
            PackingError::SampleCountMismatch {
                width: 2,
                height: 2,
                channels: 3,
                expected: 12,
                found: 11,
            }
        );
    }

    #[test]
    fn channel_usage_detection() {
        // R populated, G all zero, B populated in one pixel only.
        let data = vec![
            10, 0, 0, //
            20, 0, 0, //
            30, 0, 1, //
            40, 0, 0,
        ];
        let buf = ImageBuffer::from_samples(2, 2, 3, Samples::U8(data)).unwrap();
        assert!(buf.channel_has_data(0).unwrap());
        assert!(!buf.channel_has_data(1).unwrap());
        assert!(buf.channel_has_data(2).unwrap());
    }

    #[test]
    fn channel_usage_rejects_missing_slot() {
        let buf = ImageBuffer::from_samples(1, 1, 2, Samples::U8(vec![1, 2])).unwrap();
        let err = buf.channel_has_data(2).unwrap_err();
        assert_eq!(err, PackingError::SlotOutOfRange { slot: 2, channels: 2 });
    }

    #[test]
    fn uniform_gray_detection() {
        let gray = ImageBuffer::from_samples(
            1,
            2,
            3,
            Samples::U8(vec![7, 7, 7, 200, 200, 200]),
        )
        .unwrap();
        assert!(gray.is_uniform_gray());

        let color = ImageBuffer::from_samples(
            1,
            2,
            3,
            Samples::U8(vec![7, 7, 7, 200, 201, 200]),
        )
        .unwrap();
        assert!(!color.is_uniform_gray());

        // Alpha is ignored by the check.
        let gray_alpha = ImageBuffer::from_samples(
            1,
            1,
            4,
            Samples::F32(vec![0.5, 0.5, 0.5, 0.1]),
        )
        .unwrap();
        assert!(gray_alpha.is_uniform_gray());

        let single = ImageBuffer::from_samples(1, 1, 1, Samples::U8(vec![7])).unwrap();
        assert!(!single.is_uniform_gray());
    }
}
