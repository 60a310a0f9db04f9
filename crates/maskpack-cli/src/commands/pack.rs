//! Pack command implementation
//!
//! Combines up to four single-channel sources into one multi-channel file,
//! assigning channels in R, G, B, A order with roles taken from the source
//! file names.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use maskpack_core::{pack, unpack, ChannelEntry, ChannelMap, ChannelSlot, ImageBuffer};

use crate::codec;

/// Run the pack command.
///
/// `paths` is the raw positional argument list: one to four sources
/// followed by the destination file.
pub fn run(paths: &[PathBuf]) -> Result<()> {
    let Some((dest, sources)) = paths.split_last() else {
        bail!("pack needs at least one source and a destination");
    };
    if sources.is_empty() {
        bail!("pack needs at least one source and a destination");
    }

    let mut buffers = Vec::with_capacity(sources.len());
    let mut roles = Vec::with_capacity(sources.len());
    for path in sources {
        let buffer = codec::decode(path)
            .with_context(|| format!("failed to read source '{}'", path.display()))?;
        let buffer = collapse_to_gray(buffer)
            .with_context(|| format!("source '{}' is not a grayscale mask", path.display()))?;
        buffers.push(buffer);
        roles.push(role_for(path));
    }

    // Duplicate stems would collide on unpack; the map validator reports them.
    let map = ChannelMap::from_roles(roles).context("could not build a channel map")?;
    let packed = pack(&buffers, &map).context("packing failed")?;
    codec::encode(&packed, dest)
        .with_context(|| format!("failed to write '{}'", dest.display()))?;

    println!(
        "{} {} ({}x{}, {}, {} channel(s))",
        "Packed".green().bold(),
        dest.display(),
        packed.width(),
        packed.height(),
        packed.sample_type(),
        packed.channels()
    );
    for entry in map.entries() {
        println!("  {} {} {}", entry.slot, "<-".dimmed(), entry.role);
    }

    Ok(())
}

/// Reduce a source to a single channel.
///
/// Single-channel files pass through. Grayscale masks exported as RGB(A)
/// with the value replicated across the color channels are collapsed to
/// their first channel. Anything else is rejected: choosing which channel
/// of a genuine color image to pack is the caller's decision, not ours.
fn collapse_to_gray(buffer: ImageBuffer) -> Result<ImageBuffer> {
    if buffer.channels() == 1 {
        return Ok(buffer);
    }
    if buffer.channels() >= 3 && buffer.is_uniform_gray() {
        let first = ChannelMap::new(vec![ChannelEntry::new("gray", ChannelSlot::R)])?;
        let mut maps = unpack(&buffer, &first)?;
        return maps.pop().context("unpack produced no channels");
    }
    bail!(
        "image has {} channels with differing values; pack expects single-channel \
         or replicated-grayscale sources",
        buffer.channels()
    )
}

/// Role name for a source: the file stem, falling back to the whole path.
fn role_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
