//! # Domain Vocabulary
//!
//! Closed vocabularies and plain configuration shared by every SDK crate.
//! Keep it lean: no I/O, networking, or validation logic. The wire form of every
//! enumeration is its lowercase string; parsing and rendering go through `strum`.

pub mod config;
pub mod kinds;

/// Identifier assigned by the remote platform. Never generated locally.
pub type EntityId = u64;
