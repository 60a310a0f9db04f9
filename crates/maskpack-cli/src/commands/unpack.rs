//! Unpack command implementation
//!
//! Splits a multi-channel file into one single-channel file per populated
//! channel, named after the channel slot.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use maskpack_core::{unpack, ChannelMap};

use crate::codec;

/// Run the unpack command: read `source`, write one file per channel into
/// `dest_dir` (created if missing).
pub fn run(source: &Path, dest_dir: &Path) -> Result<()> {
    let packed = codec::decode(source)
        .with_context(|| format!("failed to read source '{}'", source.display()))?;

    let map = ChannelMap::slot_named(packed.channels())
        .with_context(|| format!("cannot unpack '{}'", source.display()))?;
    let maps = unpack(&packed, &map).context("unpacking failed")?;

    std::fs::create_dir_all(dest_dir)
        .with_context(|| format!("failed to create '{}'", dest_dir.display()))?;

    println!(
        "{} {} ({} channel(s), {})",
        "Unpacking".cyan().bold(),
        source.display(),
        packed.channels(),
        packed.sample_type()
    );

    let ext = codec::default_extension(packed.sample_type());
    for (entry, buffer) in map.entries().iter().zip(&maps) {
        let path = dest_dir.join(format!("{}.{}", entry.role, ext));
        codec::encode(buffer, &path)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        println!("  {} {}", "wrote".green(), path.display());
    }

    Ok(())
}
