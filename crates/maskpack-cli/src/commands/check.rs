//! Check command implementation
//!
//! Reports which channels of a file carry data and whether the image is a
//! replicated-grayscale mask.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use maskpack_core::ChannelSlot;

use crate::codec;

/// Run the check command.
pub fn run(source: &Path) -> Result<()> {
    let buffer = codec::decode(source)
        .with_context(|| format!("failed to read '{}'", source.display()))?;

    println!(
        "{} {} ({}x{}, {}, {} channel(s))",
        "Checking".cyan().bold(),
        source.display(),
        buffer.width(),
        buffer.height(),
        buffer.sample_type(),
        buffer.channels()
    );

    for slot in &ChannelSlot::ALL[..buffer.channels()] {
        let used = buffer.channel_has_data(slot.index())?;
        let status = if used {
            "has data".green()
        } else {
            "empty".dimmed()
        };
        println!("  {}: {}", slot, status);
    }

    if buffer.channels() >= 3 {
        let gray = if buffer.is_uniform_gray() {
            "yes".green()
        } else {
            "no".normal()
        };
        println!("  uniform gray: {}", gray);
    }

    Ok(())
}
