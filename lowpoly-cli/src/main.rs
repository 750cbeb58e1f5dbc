//! `lowpoly` command-line tool
//!
//! Every input file is one fragment. The faceted result is written as JSON
//! render commands, as a flat-shaded OBJ, or as a raw interleaved vertex
//! buffer.

mod host;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use host::FileHost;
use lowpoly_core::{Error, TriangleMesh, Vector3d};
use lowpoly_io::ObjWriter;
use lowpoly_pipeline::{
    default_output_name, ColorSpec, LowPolyConfig, LowPolyOutput, LowPolyPipeline,
};
use lowpoly_render::as_bytes;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Generate faceted low-poly meshes from OBJ surfaces.
#[derive(Parser, Debug)]
#[command(name = "lowpoly", version, about = "Faceted low-poly mesh generation")]
struct CliArgs {
    /// Input OBJ files, one fragment each.
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<PathBuf>,
    /// Grid cell size; larger gives coarser facets.
    #[arg(long, value_name = "SIZE")]
    factor: Option<f64>,
    /// Number of smoothing passes.
    #[arg(long, value_name = "N")]
    rounding: Option<u32>,
    /// Smoothing relaxation factor in (0, 1].
    #[arg(long, value_name = "LAMBDA")]
    lambda: Option<f64>,
    /// "default", "none", a color name, or several names forming a palette.
    #[arg(long, value_name = "COLOR")]
    color: Option<String>,
    /// Output object name.
    #[arg(long, value_name = "NAME")]
    name: Option<String>,
    /// Path to TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Output file; stdout when omitted.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Skip malformed mesh lines instead of failing the fragment.
    #[arg(long)]
    lenient: bool,
    /// Process fragments one after another.
    #[arg(long)]
    sequential: bool,
    /// Log verbosity level.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Obj,
    Raw,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

fn init_logger(level: LogLevel) {
    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Stderr);
    builder.filter_level(level.as_filter());
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            buf.timestamp_millis(),
            record.level(),
            record.module_path().unwrap_or(record.target()),
            record.args()
        )
    });

    if let Err(err) = builder.try_init() {
        eprintln!("Failed to initialize logger: {}", err);
    }
}

/// Load the TOML configuration, if any, and apply command-line overrides.
/// Returns the merged configuration and a description of each override.
fn build_config(cli: &CliArgs) -> Result<(LowPolyConfig, Vec<String>)> {
    let mut config = match &cli.config {
        Some(path) => LowPolyConfig::load_toml(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => LowPolyConfig::default(),
    };
    let mut overrides = Vec::new();

    if let Some(factor) = cli.factor {
        overrides.push(format!("factor = {}", factor));
        config.factor = factor;
    }
    if let Some(rounding) = cli.rounding {
        overrides.push(format!("rounding = {}", rounding));
        config.rounding = rounding;
    }
    if let Some(lambda) = cli.lambda {
        overrides.push(format!("lambda = {}", lambda));
        config.lambda = lambda;
    }
    if let Some(color) = &cli.color {
        overrides.push(format!("color = {}", color));
        config.color = ColorSpec::parse(color);
    }
    if let Some(name) = &cli.name {
        overrides.push(format!("name = {}", name));
        config.name = Some(name.clone());
    }
    if cli.lenient {
        overrides.push("skip_malformed_lines = true".to_string());
        config.skip_malformed_lines = true;
    }
    if cli.sequential {
        overrides.push("parallel = false".to_string());
        config.parallel = false;
    }

    if config.name.is_none() {
        let stem = cli
            .inputs
            .first()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str());
        config.name = Some(default_output_name(stem));
    }

    Ok((config, overrides))
}

/// Merge all facets into one mesh with unshared corners and one normal per face
fn faceted_mesh(output: &LowPolyOutput) -> (TriangleMesh, Vec<Vector3d>) {
    let mut mesh = TriangleMesh::new();
    let mut normals = Vec::with_capacity(output.facet_count());
    for facet in output.fragments.iter().flat_map(|f| &f.fragment.facets) {
        let base = mesh.vertices.len();
        mesh.vertices.extend_from_slice(&facet.vertices);
        mesh.faces.push([base, base + 1, base + 2]);
        normals.push(facet.normal);
    }
    (mesh, normals)
}

fn write_output<W: Write>(
    output: &LowPolyOutput,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, output)?;
            writeln!(writer)?;
        }
        OutputFormat::Obj => {
            let (mesh, normals) = faceted_mesh(output);
            writeln!(writer, "o {}", output.name)?;
            ObjWriter::write_faceted(&mesh, &normals, writer)?;
        }
        OutputFormat::Raw => {
            writer.write_all(as_bytes(&output.vertex_buffer()))?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn run(cli: &CliArgs) -> Result<()> {
    let (config, overrides) = build_config(cli)?;
    for entry in overrides {
        log::debug!("CLI override: {}", entry);
    }

    let pipeline = LowPolyPipeline::new(config)?;
    let selectors: Vec<String> = cli
        .inputs
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    let output = pipeline.run(&FileHost, &selectors)?;

    let mut writer = open_output(cli.output.as_deref())?;
    write_output(&output, cli.format, &mut writer)?;
    if let Some(path) = &cli.output {
        log::info!("wrote {} to {}", output.name, path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = CliArgs::parse();
    init_logger(cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if matches!(err.downcast_ref::<Error>(), Some(e) if e.is_empty_result()) {
                log::warn!("{}", err);
                ExitCode::from(2)
            } else {
                log::error!("{:#}", err);
                ExitCode::FAILURE
            }
        }
    }
}
