//! Host capability interface
//!
//! The pipeline never talks to a host application directly. Everything it
//! needs from the outside world is a mesh export for a selection and a color
//! lookup by name.

use crate::color::named_color;
use lowpoly_core::{Error, Result, Rgb};
use std::collections::HashMap;

/// What the pipeline needs from the embedding application
pub trait MeshHost {
    /// Export the surface of `selector` as face/vertex text
    fn export_selection_as_mesh(&self, selector: &str) -> Result<Vec<u8>>;

    /// Resolve a color name to an RGB triple
    fn resolve_color(&self, name: &str) -> Result<Rgb>;
}

/// A host backed by in-memory mesh text, useful when the caller already has
/// the exported surfaces at hand
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    meshes: HashMap<String, Vec<u8>>,
    colors: HashMap<String, Rgb>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register mesh text for a selector
    pub fn with_mesh(mut self, selector: impl Into<String>, text: impl Into<Vec<u8>>) -> Self {
        self.insert_mesh(selector, text);
        self
    }

    /// Register a color name; it takes precedence over the built-in names
    pub fn with_color(mut self, name: impl Into<String>, rgb: Rgb) -> Self {
        self.colors.insert(name.into(), rgb);
        self
    }

    pub fn insert_mesh(&mut self, selector: impl Into<String>, text: impl Into<Vec<u8>>) {
        self.meshes.insert(selector.into(), text.into());
    }
}

impl MeshHost for MemoryHost {
    fn export_selection_as_mesh(&self, selector: &str) -> Result<Vec<u8>> {
        self.meshes
            .get(selector)
            .cloned()
            .ok_or_else(|| Error::Host(format!("no mesh registered for selection '{}'", selector)))
    }

    fn resolve_color(&self, name: &str) -> Result<Rgb> {
        self.colors
            .get(name)
            .copied()
            .or_else(|| named_color(name))
            .ok_or_else(|| Error::Host(format!("unknown color '{}'", name)))
    }
}
