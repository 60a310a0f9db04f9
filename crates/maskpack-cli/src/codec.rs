//! File codec: decode images into core buffers and encode them back.
//!
//! Dispatch is by file extension. PNG carries the integer sample types
//! (8-bit and 16-bit, via the `png` crate with fixed encoder settings so the
//! same buffer always produces byte-identical output); OpenEXR carries
//! 32-bit float data via the `image` crate. Format-specific concerns stay in
//! here; the core only ever sees [`ImageBuffer`] values.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::DynamicImage;
use maskpack_core::{ImageBuffer, PackingError, SampleType, Samples};
use thiserror::Error;

/// Errors from file decode/encode.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decoding error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encoding error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("EXR error: {0}")]
    Exr(#[from] image::ImageError),

    #[error("buffer error: {0}")]
    Buffer(#[from] PackingError),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported layout: {0}")]
    UnsupportedLayout(String),
}

/// Decode a file on disk into a core buffer.
pub fn decode(path: &Path) -> Result<ImageBuffer, CodecError> {
    match extension(path).as_deref() {
        Some("png") => decode_png(path),
        Some("exr") => decode_exr(path),
        _ => Err(CodecError::UnsupportedFormat(format!(
            "'{}' is not a .png or .exr file",
            path.display()
        ))),
    }
}

/// Encode a buffer to disk; the format is chosen by the path's extension.
///
/// PNG holds the integer sample types, EXR holds float. Asking for the
/// wrong pairing is an error rather than a silent conversion.
pub fn encode(buffer: &ImageBuffer, path: &Path) -> Result<(), CodecError> {
    match extension(path).as_deref() {
        Some("png") => encode_png(buffer, path),
        Some("exr") => encode_exr(buffer, path),
        _ => Err(CodecError::UnsupportedFormat(format!(
            "'{}' is not a .png or .exr file",
            path.display()
        ))),
    }
}

/// Natural file extension for a sample type.
pub fn default_extension(sample_type: SampleType) -> &'static str {
    match sample_type {
        SampleType::U8 | SampleType::U16 => "png",
        SampleType::F32 => "exr",
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn decode_png(path: &Path) -> Result<ImageBuffer, CodecError> {
    let decoder = png::Decoder::new(File::open(path)?);
    let mut reader = decoder.read_info()?;

    let mut pixels = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut pixels)?;
    pixels.truncate(info.buffer_size());

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(CodecError::UnsupportedFormat(
                "palette-indexed PNG is not supported".to_string(),
            ));
        }
    };

    let samples = match info.bit_depth {
        png::BitDepth::Eight => Samples::U8(pixels),
        // 16-bit PNG samples are big-endian in the stream.
        png::BitDepth::Sixteen => Samples::U16(
            pixels
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect(),
        ),
        depth => {
            return Err(CodecError::UnsupportedFormat(format!(
                "PNG bit depth {:?} is not supported (expected 8 or 16)",
                depth
            )));
        }
    };

    Ok(ImageBuffer::from_samples(
        info.width,
        info.height,
        channels,
        samples,
    )?)
}

fn decode_exr(path: &Path) -> Result<ImageBuffer, CodecError> {
    let image = image::open(path)?;
    let (width, height) = (image.width(), image.height());
    let (channels, data) = match image {
        DynamicImage::ImageRgb32F(im) => (3, im.into_raw()),
        DynamicImage::ImageRgba32F(im) => (4, im.into_raw()),
        other => (3, other.into_rgb32f().into_raw()),
    };
    Ok(ImageBuffer::from_samples(
        width,
        height,
        channels,
        Samples::F32(data),
    )?)
}

fn encode_png(buffer: &ImageBuffer, path: &Path) -> Result<(), CodecError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, buffer.width(), buffer.height());
    encoder.set_color(match buffer.channels() {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        _ => png::ColorType::Rgba,
    });
    // Fixed settings so the same buffer always produces the same file.
    encoder.set_compression(png::Compression::Default);
    encoder.set_filter(png::FilterType::NoFilter);

    match buffer.samples() {
        Samples::U8(data) => {
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(data)?;
        }
        Samples::U16(data) => {
            encoder.set_depth(png::BitDepth::Sixteen);
            let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_be_bytes()).collect();
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&bytes)?;
        }
        Samples::F32(_) => {
            return Err(CodecError::UnsupportedLayout(
                "32-bit float samples cannot be stored as PNG; write an .exr instead".to_string(),
            ));
        }
    }

    Ok(())
}

fn encode_exr(buffer: &ImageBuffer, path: &Path) -> Result<(), CodecError> {
    let data = buffer.samples().as_f32().ok_or_else(|| {
        CodecError::UnsupportedLayout(format!(
            "{} samples cannot be stored as EXR; write a .png instead",
            buffer.sample_type()
        ))
    })?;

    let (width, height) = (buffer.width(), buffer.height());
    let image = match buffer.channels() {
        // Grayscale EXR output replicates the value across RGB, matching
        // how grayscale masks are conventionally exchanged.
        1 => {
            let rgb: Vec<f32> = data.iter().flat_map(|&v| [v, v, v]).collect();
            rgb32f(width, height, rgb)?
        }
        3 => rgb32f(width, height, data.to_vec())?,
        4 => image::Rgba32FImage::from_raw(width, height, data.to_vec())
            .map(DynamicImage::ImageRgba32F)
            .ok_or_else(shape_error)?,
        channels => {
            return Err(CodecError::UnsupportedLayout(format!(
                "{channels}-channel float buffers have no EXR layout (expected 1, 3 or 4)"
            )));
        }
    };

    image.save(path)?;
    Ok(())
}

fn rgb32f(width: u32, height: u32, data: Vec<f32>) -> Result<DynamicImage, CodecError> {
    image::Rgb32FImage::from_raw(width, height, data)
        .map(DynamicImage::ImageRgb32F)
        .ok_or_else(shape_error)
}

fn shape_error() -> CodecError {
    CodecError::UnsupportedLayout("pixel data does not match buffer dimensions".to_string())
}
