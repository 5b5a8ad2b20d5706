//! Extractors for pod template data.
//!
//! Helper functions to pull specific data out of a pod template
//! for use in checks.

pub mod container;

pub use container::*;
