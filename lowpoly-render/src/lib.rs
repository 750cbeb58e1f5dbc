//! # lowpoly render output
//!
//! Turns a smoothed triangle mesh into flat-shaded render data: one unit
//! normal per triangle, an ordered command stream per fragment, a numeric
//! opcode encoding of that stream, and an interleaved vertex buffer.

pub mod normals;
pub mod commands;
pub mod buffer;

// Re-export commonly used items
pub use normals::*;
pub use commands::*;
pub use buffer::*;
