//! Balance diff engine.
//!
//! Tracks the last observed balance per watched address and turns each
//! fetch result into an observation: skip, silent baseline, unchanged,
//! or a change event to notify about.

pub mod tracker;

pub use tracker::*;
