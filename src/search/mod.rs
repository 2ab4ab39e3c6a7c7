//! Move selection.
//!
//! A single priority cascade built on the evaluation primitives, with the
//! tie-break policy and named agent presets that configure it.

pub mod cascade;
pub mod profile;
pub mod selection;

pub use cascade::{
    good_moves, Cascade, CascadeDepth, CascadeOptions, Decision, SearchError, Tier,
};
pub use profile::{Profile, ALL_PROFILES};
pub use selection::Selection;
