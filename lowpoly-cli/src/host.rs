//! Host backed by the local filesystem

use lowpoly_core::{Error, Result, Rgb};
use lowpoly_pipeline::{named_color, MeshHost};

/// Treats every selector as the path of a face/vertex text file
#[derive(Debug, Default)]
pub struct FileHost;

impl MeshHost for FileHost {
    fn export_selection_as_mesh(&self, selector: &str) -> Result<Vec<u8>> {
        log::debug!("reading fragment from {}", selector);
        Ok(std::fs::read(selector)?)
    }

    fn resolve_color(&self, name: &str) -> Result<Rgb> {
        named_color(name).ok_or_else(|| Error::Host(format!("unknown color '{}'", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_file_and_reports_missing() {
        let path = std::env::temp_dir().join("lowpoly_cli_host_test.obj");
        std::fs::write(&path, "v 0 0 0\n").unwrap();
        let host = FileHost;
        let selector = path.to_string_lossy();
        assert_eq!(host.export_selection_as_mesh(&selector).unwrap(), b"v 0 0 0\n");
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            host.export_selection_as_mesh("/nonexistent/lowpoly/mesh.obj"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_resolves_builtin_colors() {
        let host = FileHost;
        assert_eq!(host.resolve_color("red").unwrap(), Rgb::new(1.0, 0.0, 0.0));
        assert!(matches!(host.resolve_color("mauve"), Err(Error::Host(_))));
    }
}
