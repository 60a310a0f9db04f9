//! Channel map: ordered assignment of logical roles to physical slots.

use std::collections::HashSet;
use std::fmt;

use crate::error::PackingError;

/// A physical channel slot of a multi-channel image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelSlot {
    R,
    G,
    B,
    A,
}

impl ChannelSlot {
    /// All slots in packing priority order.
    pub const ALL: [ChannelSlot; 4] = [Self::R, Self::G, Self::B, Self::A];

    /// Interleaved channel index (R=0 .. A=3).
    pub fn index(self) -> usize {
        match self {
            Self::R => 0,
            Self::G => 1,
            Self::B => 2,
            Self::A => 3,
        }
    }

    /// Conventional channel name.
    pub fn name(self) -> &'static str {
        match self {
            Self::R => "R",
            Self::G => "G",
            Self::B => "B",
            Self::A => "A",
        }
    }
}

impl fmt::Display for ChannelSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One channel map entry: a logical role bound to a physical slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
    /// Logical role name, e.g. "specular" or "roughness".
    pub role: String,
    /// Physical channel the role maps to.
    pub slot: ChannelSlot,
}

impl ChannelEntry {
    pub fn new(role: impl Into<String>, slot: ChannelSlot) -> Self {
        Self {
            role: role.into(),
            slot,
        }
    }
}

/// Ordered assignment of 1 to 4 logical roles to physical channel slots.
///
/// Both transforms take the map as the single source of truth for which
/// role lives in which channel. Maps are validated on construction, so a
/// `ChannelMap` value is always well formed: non-empty, at most four
/// entries, no duplicate slot, no duplicate role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    entries: Vec<ChannelEntry>,
}

impl ChannelMap {
    /// Build a map from explicit entries, validating the invariants.
    pub fn new(entries: Vec<ChannelEntry>) -> Result<Self, PackingError> {
        if entries.is_empty() {
            return Err(PackingError::InvalidChannelMap(
                "map has no entries".to_string(),
            ));
        }
        if entries.len() > 4 {
            return Err(PackingError::InvalidChannelMap(format!(
                "map has {} entries (at most 4 channels are supported)",
                entries.len()
            )));
        }

        let mut slots: HashSet<ChannelSlot> = HashSet::new();
        let mut roles: HashSet<&str> = HashSet::new();
        for entry in &entries {
            if !slots.insert(entry.slot) {
                return Err(PackingError::InvalidChannelMap(format!(
                    "slot {} is assigned more than once",
                    entry.slot
                )));
            }
            if !roles.insert(&entry.role) {
                return Err(PackingError::InvalidChannelMap(format!(
                    "role '{}' is assigned more than once",
                    entry.role
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Build the default map for a list of roles: slots are assigned in
    /// fixed priority order R, G, B, A to the roles in the order given.
    pub fn from_roles<I>(roles: I) -> Result<Self, PackingError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        if roles.len() > 4 {
            return Err(PackingError::InvalidChannelMap(format!(
                "map has {} entries (at most 4 channels are supported)",
                roles.len()
            )));
        }
        let entries = roles
            .into_iter()
            .zip(ChannelSlot::ALL)
            .map(|(role, slot)| ChannelEntry::new(role, slot))
            .collect();
        Self::new(entries)
    }

    /// Build the default map for unpacking an `n`-channel buffer: one entry
    /// per channel, roles named after the slots ("R", "G", "B", "A").
    pub fn slot_named(channel_count: usize) -> Result<Self, PackingError> {
        if channel_count == 0 || channel_count > 4 {
            return Err(PackingError::UnsupportedChannelCount(channel_count));
        }
        Self::from_roles(ChannelSlot::ALL[..channel_count].iter().map(|s| s.name()))
    }

    /// Number of entries (1..=4).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A validated map is never empty; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries in map order.
    pub fn entries(&self) -> &[ChannelEntry] {
        &self.entries
    }
}
