//! Core data structures for lowpoly
//!
//! This crate provides the fundamental types shared by every stage of the
//! low-poly pipeline: double precision points, polygon and triangle meshes,
//! render colors, and the common error type.

pub mod point;
pub mod mesh;
pub mod color;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use color::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
