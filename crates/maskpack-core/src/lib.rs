//! Maskpack channel transform core.
//!
//! This crate packs up to four single-channel mask maps into the channels of
//! one multi-channel image, and splits a multi-channel image back into its
//! constituent single-channel maps. This is commonly used to pack PBR
//! material maps (e.g. specular, roughness, AO) into a single texture for
//! efficient GPU sampling, and to recover the individual maps afterwards.
//!
//! The transforms are pure: inputs are never mutated, outputs are freshly
//! allocated, and the same inputs always produce byte-identical output.
//! File decoding/encoding and argument handling live in the front-end crate.
//!
//! # Example
//!
//! ```
//! use maskpack_core::{pack, unpack, ChannelMap, ImageBuffer, Samples};
//!
//! let specular = ImageBuffer::from_samples(2, 2, 1, Samples::U8(vec![10, 20, 30, 40]))?;
//! let roughness = ImageBuffer::from_samples(2, 2, 1, Samples::U8(vec![50, 60, 70, 80]))?;
//!
//! let map = ChannelMap::from_roles(["specular", "roughness"])?;
//! let packed = pack(&[specular, roughness], &map)?;
//! assert_eq!(packed.channels(), 2);
//!
//! let maps = unpack(&packed, &map)?;
//! assert_eq!(maps.len(), 2);
//! # Ok::<(), maskpack_core::PackingError>(())
//! ```

mod buffer;
mod channel_map;
mod error;
mod pack;
mod unpack;

pub use buffer::{ImageBuffer, Samples, SampleType};
pub use channel_map::{ChannelEntry, ChannelMap, ChannelSlot};
pub use error::PackingError;
pub use pack::pack;
pub use unpack::unpack;
