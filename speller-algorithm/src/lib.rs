//! # speller-algorithm
//!
//! word selection policies used by Speller to hand out practice words.
//! Supported policies:
//! - Rotation (no repeat until the list is exhausted);

#![forbid(unsafe_code)]
#![deny(dead_code, unused_imports, unused_mut, missing_docs)]

/// Uniform random draws without repetition inside a cycle.
pub mod rotation;
