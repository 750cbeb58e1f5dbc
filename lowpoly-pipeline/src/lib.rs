//! # lowpoly pipeline
//!
//! Runs the complete "simplify once, smooth a few times, emit faceted
//! triangles" pipeline over one or more independent mesh fragments supplied
//! by a host application.
//!
//! ```rust,no_run
//! use lowpoly_pipeline::{LowPolyConfig, LowPolyPipeline, MemoryHost};
//!
//! let host = MemoryHost::new().with_mesh("chain A", "v 0 0 0\nv 9 0 0\nv 0 9 0\nf 1 2 3");
//! let pipeline = LowPolyPipeline::new(LowPolyConfig::default().with_factor(1.5))?;
//! let output = pipeline.run(&host, &["chain A"])?;
//! let cgo = output.to_cgo();
//! # Ok::<(), lowpoly_core::Error>(())
//! ```

pub mod config;
pub mod color;
pub mod host;
pub mod pipeline;

pub use config::*;
pub use color::*;
pub use host::*;
pub use pipeline::*;
