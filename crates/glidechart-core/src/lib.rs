//! glidechart core
//!
//! Shared plumbing for the glidechart crates: logging setup, puffin profiling
//! hooks, `glam` math re-exports with a chart-space [`math::Rect`], and
//! AHash-backed collections.

pub mod alloc;
pub mod logging;
pub mod math;
pub mod profiling;
