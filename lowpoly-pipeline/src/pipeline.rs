//! Low-poly pipeline
//!
//! Each fragment goes through the same stages: export from the host, parse,
//! fan triangulation, grid clustering, Laplacian smoothing, then flat normals
//! and the render command stream. Fragments share no state, so a failing
//! fragment is recorded and its siblings carry on.

use crate::config::LowPolyConfig;
use crate::host::MeshHost;
use lowpoly_core::{Error, PolygonMesh, Result, Rgb, TriangleMesh};
use lowpoly_io::ObjReader;
use lowpoly_render::{encode_cgo, FacetVertex, RenderCommand, RenderFragment};
use lowpoly_simplification::{fan_triangulate, ClusteringSimplifier, LaplacianSmoother};
use rayon::prelude::*;
use serde::Serialize;

/// Output name derived from a base object name
pub fn default_output_name(base: Option<&str>) -> String {
    format!("{}_lowpoly", base.unwrap_or("lowpoly"))
}

/// A fragment that produced geometry
#[derive(Debug, Clone, Serialize)]
pub struct FragmentOutput {
    pub index: usize,
    pub selector: String,
    pub fragment: RenderFragment,
}

/// A fragment that failed or produced nothing
#[derive(Debug)]
pub struct FragmentFailure {
    pub index: usize,
    pub selector: String,
    pub error: Error,
}

/// Result of a pipeline run
#[derive(Debug, Serialize)]
pub struct LowPolyOutput {
    pub name: String,
    pub fragments: Vec<FragmentOutput>,
    #[serde(skip)]
    pub failures: Vec<FragmentFailure>,
}

impl LowPolyOutput {
    /// Total number of facets over all fragments
    pub fn facet_count(&self) -> usize {
        self.fragments.iter().map(|f| f.fragment.facet_count()).sum()
    }

    /// All fragment command streams, concatenated in fragment order
    pub fn commands(&self) -> Vec<RenderCommand> {
        self.fragments
            .iter()
            .flat_map(|f| f.fragment.commands())
            .collect()
    }

    /// Opcode float stream of all fragments
    pub fn to_cgo(&self) -> Vec<f32> {
        encode_cgo(&self.commands())
    }

    /// Flat-shaded vertex buffer of all fragments
    pub fn vertex_buffer(&self) -> Vec<FacetVertex> {
        self.fragments
            .iter()
            .flat_map(|f| f.fragment.vertex_buffer())
            .collect()
    }
}

/// The low-poly pipeline
#[derive(Debug, Clone)]
pub struct LowPolyPipeline {
    config: LowPolyConfig,
}

impl LowPolyPipeline {
    /// Create a pipeline, validating and clamping the configuration
    pub fn new(config: LowPolyConfig) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    pub fn config(&self) -> &LowPolyConfig {
        &self.config
    }

    /// Decimate and smooth one in-memory mesh
    pub fn process_mesh(&self, mesh: &PolygonMesh) -> Result<TriangleMesh> {
        if mesh.vertices.is_empty() {
            return Err(Error::EmptyResult("mesh has no vertices".to_string()));
        }

        let soup = fan_triangulate(mesh)?;
        if soup.is_empty() {
            return Err(Error::EmptyResult("mesh has no triangles".to_string()));
        }

        let decimated = ClusteringSimplifier::new(self.config.factor).simplify_soup(&soup)?;
        if decimated.is_empty() {
            return Err(Error::EmptyResult(format!(
                "clustering with cell size {} left no triangles, try a smaller factor",
                self.config.factor
            )));
        }

        if self.config.rounding == 0 {
            return Ok(decimated);
        }
        LaplacianSmoother::new(self.config.rounding, self.config.lambda).smooth(&decimated)
    }

    /// Decimate, smooth and build render output for one in-memory mesh
    pub fn render_mesh(&self, mesh: &PolygonMesh, color: Option<Rgb>) -> Result<RenderFragment> {
        let processed = self.process_mesh(mesh)?;
        Ok(RenderFragment::from_mesh(&processed, color))
    }

    /// Run one host fragment end to end
    pub fn process_fragment<H: MeshHost + ?Sized>(
        &self,
        host: &H,
        index: usize,
        selector: &str,
    ) -> Result<RenderFragment> {
        let bytes = host.export_selection_as_mesh(selector)?;
        let mesh = ObjReader::parse_bytes(&bytes, &self.config.read_options())?;
        let color = self.config.color.color_for(index, host);
        let fragment = self.render_mesh(&mesh, color)?;

        log::info!(
            "fragment {} '{}': {} vertices / {} faces in, {} facets out",
            index,
            selector,
            mesh.vertex_count(),
            mesh.face_count(),
            fragment.facet_count()
        );
        Ok(fragment)
    }

    /// Run every fragment and collect the render output.
    ///
    /// Fragment failures are kept in [`LowPolyOutput::failures`]. The run
    /// fails with [`Error::EmptyResult`] only if no fragment produced
    /// geometry.
    pub fn run<H, S>(&self, host: &H, selectors: &[S]) -> Result<LowPolyOutput>
    where
        H: MeshHost + Sync + ?Sized,
        S: AsRef<str> + Sync,
    {
        log::info!(
            "generating low-poly mesh from {} fragment(s) (factor={}, rounding={})",
            selectors.len(),
            self.config.factor,
            self.config.rounding
        );

        let process = |(index, selector): (usize, &S)| {
            (index, self.process_fragment(host, index, selector.as_ref()))
        };
        let results: Vec<(usize, Result<RenderFragment>)> = if self.config.parallel {
            selectors.par_iter().enumerate().map(process).collect()
        } else {
            selectors.iter().enumerate().map(process).collect()
        };

        let mut fragments = Vec::new();
        let mut failures = Vec::new();
        for (index, result) in results {
            let selector = selectors[index].as_ref();
            match result {
                Ok(fragment) => fragments.push(FragmentOutput {
                    index,
                    selector: selector.to_string(),
                    fragment,
                }),
                Err(error) => {
                    log::warn!("fragment {} '{}' skipped: {}", index, selector, error);
                    failures.push(FragmentFailure {
                        index,
                        selector: selector.to_string(),
                        error,
                    });
                }
            }
        }

        if fragments.is_empty() {
            return Err(Error::EmptyResult(format!(
                "low-poly generation produced no geometry from {} fragment(s), \
                 try a smaller factor",
                selectors.len()
            )));
        }

        let name = self
            .config
            .name
            .clone()
            .unwrap_or_else(|| default_output_name(None));
        let output = LowPolyOutput {
            name,
            fragments,
            failures,
        };
        log::info!(
            "created '{}': {} facets in {} fragment(s), {} failed",
            output.name,
            output.facet_count(),
            output.fragments.len(),
            output.failures.len()
        );
        Ok(output)
    }
}
