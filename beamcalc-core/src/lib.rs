//! Core traits and types shared by the beamcalc crates.
//!
//! - [`constraint`]: numeric invariants checked once at construction
//! - [`Observer`]: receives solver events and optionally returns control actions

pub mod constraint;
mod observer;

pub use observer::Observer;
