// Record module for the Tellus data format
//
// This module defines the round-trip protocol every structured world record
// implements on top of the tag and schema layers: validate a tree, load
// typed fields from it, mutate them in memory, and build a fresh tree that
// still carries every field the typed view never modeled.

// Re-export public types and functions
pub use self::protocol::{expect_compound, finish_build, require, TreeRecord};

// Sub-modules
pub mod protocol;
