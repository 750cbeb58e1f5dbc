//! # lowpoly
//!
//! Faceted low-poly mesh generation for Rust.
//!
//! This is the umbrella crate that provides convenient access to all lowpoly
//! functionality. You can use this crate to get everything in one place, or
//! use individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Points, polygon and triangle meshes, colors, errors
//! - **I/O**: Reading and writing the `v`/`f` subset of OBJ
//! - **Simplification**: Grid vertex clustering and Laplacian smoothing
//! - **Render**: Flat normals, render command streams and vertex buffers
//! - **Pipeline**: Per-fragment orchestration, configuration and colors
//!
//! ## Quick Start
//!
//! ```rust
//! use lowpoly::prelude::*;
//!
//! let host = MemoryHost::new().with_mesh("surface", "v 0 0 0\nv 4 0 0\nv 0 4 0\nf 1 2 3");
//! let pipeline = LowPolyPipeline::new(LowPolyConfig::default().with_factor(1.0))?;
//! let output = pipeline.run(&host, &["surface"])?;
//! assert_eq!(output.facet_count(), 1);
//! # Ok::<(), lowpoly::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables io, simplification, render and pipeline
//! - `io`: OBJ reading and writing
//! - `simplification`: Decimation and smoothing
//! - `render`: Normals and render output
//! - `pipeline`: The complete pipeline (implies the three above)
//! - `all`: Enables all features

// Re-export core functionality
pub use lowpoly_core::*;

// Re-export sub-crates
#[cfg(feature = "io")]
pub use lowpoly_io as io;

#[cfg(feature = "simplification")]
pub use lowpoly_simplification as simplification;

#[cfg(feature = "render")]
pub use lowpoly_render as render;

#[cfg(feature = "pipeline")]
pub use lowpoly_pipeline as pipeline;

/// Convenient imports for common use cases
pub mod prelude {
    pub use lowpoly_core::*;

    #[cfg(feature = "io")]
    pub use lowpoly_io::{
        read_mesh, write_mesh, MeshReader, MeshWriter, ObjReadOptions, ObjReader, ObjWriter,
    };

    #[cfg(feature = "simplification")]
    pub use lowpoly_simplification::*;

    #[cfg(feature = "render")]
    pub use lowpoly_render::*;

    #[cfg(feature = "pipeline")]
    pub use lowpoly_pipeline::*;
}
