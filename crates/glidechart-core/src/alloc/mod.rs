//! Hash collections used across glidechart.
//!
//! Widget state is keyed by short identity paths that are hashed every frame,
//! so the faster AHash hasher is used instead of SipHash.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
