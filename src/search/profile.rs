//! Named agent presets.
//!
//! Each profile is a `CascadeOptions` value; the agents differ only in how
//! many tiers run, how the fallback breaks ties, and whether the forcing
//! filter is on.

use serde::{Deserialize, Serialize};

use super::cascade::{Cascade, CascadeDepth, CascadeOptions};
use super::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Win or block, otherwise the leftmost valid column.
    Basic,
    /// Full cascade, random fallback.
    Rules,
    /// Full cascade, leftmost fallback.
    First,
    /// Full cascade, middle fallback.
    Mid,
    /// Full cascade, leftmost fallback once five or fewer candidates remain.
    MidEdge,
    /// Full cascade with the forcing filter, middle fallback.
    #[default]
    BetterMid,
    /// Uniformly random valid column.
    Random,
}

pub const ALL_PROFILES: [Profile; 7] = [
    Profile::Basic,
    Profile::Rules,
    Profile::First,
    Profile::Mid,
    Profile::MidEdge,
    Profile::BetterMid,
    Profile::Random,
];

impl Profile {
    pub const fn name(self) -> &'static str {
        match self {
            Profile::Basic => "basic",
            Profile::Rules => "rules",
            Profile::First => "first",
            Profile::Mid => "mid",
            Profile::MidEdge => "mid-edge",
            Profile::BetterMid => "better-mid",
            Profile::Random => "random",
        }
    }

    /// Parses a profile name (case-insensitive, `_` accepted for `-`).
    pub fn from_name(s: &str) -> Option<Profile> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ALL_PROFILES
            .iter()
            .copied()
            .find(|p| p.name() == normalized)
    }

    pub const fn options(self) -> CascadeOptions {
        let (depth, selection, forcing_filter) = match self {
            Profile::Basic => (CascadeDepth::Tactical, Selection::First, false),
            Profile::Rules => (CascadeDepth::Full, Selection::Random, false),
            Profile::First => (CascadeDepth::Full, Selection::First, false),
            Profile::Mid => (CascadeDepth::Full, Selection::Middle, false),
            Profile::MidEdge => (CascadeDepth::Full, Selection::FirstWhenNarrow(5), false),
            Profile::BetterMid => (CascadeDepth::Full, Selection::Middle, true),
            Profile::Random => (CascadeDepth::FallbackOnly, Selection::Random, false),
        };
        CascadeOptions {
            depth,
            selection,
            forcing_filter,
        }
    }

    pub fn cascade(self) -> Cascade {
        Cascade::new(self.options())
    }
}
