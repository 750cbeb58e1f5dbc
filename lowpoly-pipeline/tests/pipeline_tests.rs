//! Integration tests for lowpoly-pipeline
//!
//! These run whole fragments through export, parsing, decimation, smoothing
//! and render output using an in-memory host.

use approx::assert_relative_eq;
use lowpoly_core::{Error, Rgb};
use lowpoly_pipeline::*;
use lowpoly_render::{opcode, RenderCommand};

/// OBJ text of a UV sphere with quad bands and triangle caps
fn sphere_obj(center: [f64; 3], radius: f64, stacks: usize, slices: usize) -> String {
    let mut text = String::from("# uv sphere\n");
    text.push_str(&format!("v {} {} {}\n", center[0], center[1], center[2] + radius));
    for i in 1..stacks {
        let phi = std::f64::consts::PI * i as f64 / stacks as f64;
        for j in 0..slices {
            let theta = 2.0 * std::f64::consts::PI * j as f64 / slices as f64;
            text.push_str(&format!(
                "v {} {} {}\n",
                center[0] + radius * phi.sin() * theta.cos(),
                center[1] + radius * phi.sin() * theta.sin(),
                center[2] + radius * phi.cos()
            ));
        }
    }
    text.push_str(&format!("v {} {} {}\n", center[0], center[1], center[2] - radius));

    // 1-based indices: top pole is 1, ring r (0-based) starts at 2 + r * slices
    let ring = |r: usize, j: usize| 2 + r * slices + (j % slices);
    let bottom = 2 + (stacks - 1) * slices;
    for j in 0..slices {
        text.push_str(&format!("f 1 {} {}\n", ring(0, j), ring(0, j + 1)));
    }
    for r in 0..stacks - 2 {
        for j in 0..slices {
            text.push_str(&format!(
                "f {}/1 {}/2 {}/3 {}/4\n",
                ring(r, j),
                ring(r + 1, j),
                ring(r + 1, j + 1),
                ring(r, j + 1)
            ));
        }
    }
    for j in 0..slices {
        text.push_str(&format!(
            "f {} {} {}\n",
            ring(stacks - 2, j + 1),
            ring(stacks - 2, j),
            bottom
        ));
    }
    text
}

fn two_sphere_host() -> MemoryHost {
    MemoryHost::new()
        .with_mesh("chain A", sphere_obj([0.0, 0.0, 0.0], 10.0, 16, 32))
        .with_mesh("chain B", sphere_obj([30.0, 0.0, 0.0], 8.0, 12, 24))
}

fn color_commands(output: &LowPolyOutput) -> Vec<Rgb> {
    output
        .commands()
        .into_iter()
        .filter_map(|c| match c {
            RenderCommand::Color(rgb) => Some(rgb),
            _ => None,
        })
        .collect()
}

#[test]
fn test_single_triangle_end_to_end() {
    let host = MemoryHost::new().with_mesh("tri", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
    let pipeline = LowPolyPipeline::new(LowPolyConfig::default().with_factor(0.5)).unwrap();
    let output = pipeline.run(&host, &["tri"]).unwrap();

    assert_eq!(output.fragments.len(), 1);
    assert_eq!(output.facet_count(), 1);

    let cgo = output.to_cgo();
    assert_eq!(cgo[0], opcode::BEGIN);
    assert_eq!(cgo[1], opcode::TRIANGLES);
    assert_eq!(cgo[2], opcode::COLOR);
    assert_eq!(*cgo.last().unwrap(), opcode::END);
    // begin(2) + color(4) + normal(4) + 3 vertices(12) + end(1)
    assert_eq!(cgo.len(), 23);

    // The facet stays in the z = 0 plane, so its normal is +z
    let normal = output.fragments[0].fragment.facets[0].normal;
    assert_relative_eq!(normal.z, 1.0, epsilon = 1e-9);
}

#[test]
fn test_two_fragments_each_get_a_color() {
    let host = two_sphere_host();
    let pipeline = LowPolyPipeline::new(LowPolyConfig::default().with_factor(1.5)).unwrap();
    let output = pipeline.run(&host, &["chain A", "chain B"]).unwrap();

    assert_eq!(output.fragments.len(), 2);
    assert!(output.failures.is_empty());
    assert!(output.fragments.iter().all(|f| f.fragment.facet_count() > 0));

    let colors = color_commands(&output);
    assert_eq!(colors, vec![PASTEL_PALETTE[0], PASTEL_PALETTE[1]]);

    let begins = output
        .commands()
        .iter()
        .filter(|c| matches!(c, RenderCommand::Begin(_)))
        .count();
    assert_eq!(begins, 2);
}

#[test]
fn test_decimation_reduces_sphere() {
    let text = sphere_obj([0.0, 0.0, 0.0], 10.0, 16, 32);
    let mesh = lowpoly_io::ObjReader::parse_str(&text, &Default::default()).unwrap();
    let pipeline = LowPolyPipeline::new(LowPolyConfig::default().with_factor(3.0)).unwrap();
    let processed = pipeline.process_mesh(&mesh).unwrap();

    assert!(processed.vertex_count() < mesh.vertex_count());
    assert!(processed.face_count() > 0);
    assert!(processed.validate().is_ok());
    for v in &processed.vertices {
        assert!(v.coords.norm() <= 10.0 + 1e-9);
    }
}

#[test]
fn test_facet_normals_are_unit_length() {
    let host = two_sphere_host();
    let pipeline = LowPolyPipeline::new(LowPolyConfig::default().with_factor(2.0)).unwrap();
    let output = pipeline.run(&host, &["chain A", "chain B"]).unwrap();

    for fragment in &output.fragments {
        for facet in &fragment.fragment.facets {
            assert_relative_eq!(facet.normal.norm(), 1.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_failed_fragment_does_not_abort_siblings() {
    let host = two_sphere_host()
        .with_mesh("ligand", "v 0 0 0\nv 0.01 0 0\nv 0 0.01 0\nf 1 2 3\n");
    let pipeline = LowPolyPipeline::new(LowPolyConfig::default().with_factor(1.5)).unwrap();
    let output = pipeline
        .run(&host, &["chain A", "ligand", "chain B"])
        .unwrap();

    let rendered: Vec<&str> = output.fragments.iter().map(|f| f.selector.as_str()).collect();
    assert_eq!(rendered, vec!["chain A", "chain B"]);
    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].index, 1);
    assert!(output.failures[0].error.is_empty_result());

    // Colors follow the fragment index, not the position among survivors
    assert_eq!(
        color_commands(&output),
        vec![PASTEL_PALETTE[0], PASTEL_PALETTE[2]]
    );
}

#[test]
fn test_everything_empty_is_reported() {
    let host = MemoryHost::new()
        .with_mesh("points", "v 0 0 0\nv 1 1 1\n")
        .with_mesh("blank", "");
    let pipeline = LowPolyPipeline::new(LowPolyConfig::default()).unwrap();
    let err = pipeline.run(&host, &["points", "blank"]).unwrap_err();
    assert!(matches!(err, Error::EmptyResult(_)));
}

#[test]
fn test_parallel_matches_sequential() {
    let host = two_sphere_host();
    let selectors = vec!["chain A".to_string(), "chain B".to_string()];
    let config = LowPolyConfig::default().with_factor(1.5).with_rounding(3);

    let parallel = LowPolyPipeline::new(config.clone().with_parallel(true))
        .unwrap()
        .run(&host, &selectors)
        .unwrap();
    let sequential = LowPolyPipeline::new(config.with_parallel(false))
        .unwrap()
        .run(&host, &selectors)
        .unwrap();

    assert_eq!(parallel.to_cgo(), sequential.to_cgo());
}

#[test]
fn test_more_rounding_moves_vertices_inward() {
    let text = sphere_obj([0.0, 0.0, 0.0], 10.0, 16, 32);
    let mesh = lowpoly_io::ObjReader::parse_str(&text, &Default::default()).unwrap();
    let mean_radius = |rounding: u32| {
        let pipeline = LowPolyPipeline::new(
            LowPolyConfig::default().with_factor(1.5).with_rounding(rounding),
        )
        .unwrap();
        let out = pipeline.process_mesh(&mesh).unwrap();
        out.vertices.iter().map(|v| v.coords.norm()).sum::<f64>() / out.vertex_count() as f64
    };

    let r0 = mean_radius(0);
    let r1 = mean_radius(1);
    let r5 = mean_radius(5);
    assert!(r1 < r0);
    assert!(r5 < r1);
}

#[test]
fn test_no_color_and_named_colors() {
    let host = two_sphere_host().with_color("salmon", Rgb::new(0.98, 0.5, 0.45));

    let output = LowPolyPipeline::new(
        LowPolyConfig::default()
            .with_factor(1.5)
            .with_color(ColorSpec::parse("none")),
    )
    .unwrap()
    .run(&host, &["chain A", "chain B"])
    .unwrap();
    assert!(color_commands(&output).is_empty());
    assert!(output.fragments.iter().all(|f| f.fragment.color.is_none()));

    let output = LowPolyPipeline::new(
        LowPolyConfig::default()
            .with_factor(1.5)
            .with_color(ColorSpec::parse("salmon not-a-color")),
    )
    .unwrap()
    .run(&host, &["chain A", "chain B"])
    .unwrap();
    assert_eq!(
        color_commands(&output),
        vec![Rgb::new(0.98, 0.5, 0.45), Rgb::GREY_FALLBACK]
    );
}

#[test]
fn test_malformed_line_policy() {
    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 oops\nf 1 2 3\n";
    let host = MemoryHost::new().with_mesh("tri", text);

    let strict = LowPolyPipeline::new(LowPolyConfig::default().with_factor(0.5)).unwrap();
    let err = strict.run(&host, &["tri"]).unwrap_err();
    // The only fragment failed to parse, so nothing was rendered
    assert!(err.is_empty_result());
    let err = strict.process_fragment(&host, 0, "tri").unwrap_err();
    assert!(matches!(err, Error::Parse { line: 4, .. }));

    let lenient = LowPolyPipeline::new(
        LowPolyConfig::default()
            .with_factor(0.5)
            .with_skip_malformed_lines(true),
    )
    .unwrap();
    let output = lenient.run(&host, &["tri"]).unwrap();
    assert_eq!(output.facet_count(), 1);
}

#[test]
fn test_vertex_buffer_matches_facets() {
    let host = two_sphere_host();
    let pipeline = LowPolyPipeline::new(LowPolyConfig::default().with_factor(2.0)).unwrap();
    let output = pipeline.run(&host, &["chain A"]).unwrap();

    let buffer = output.vertex_buffer();
    assert_eq!(buffer.len(), output.facet_count() * 3);
    let expected = PASTEL_PALETTE[0].to_array();
    assert!(buffer.iter().all(|v| v.color == expected));
}

#[test]
fn test_output_name_and_json() {
    let host = MemoryHost::new().with_mesh("tri", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
    let config = LowPolyConfig::default()
        .with_factor(0.5)
        .with_name(default_output_name(Some("1abc")));
    let output = LowPolyPipeline::new(config).unwrap().run(&host, &["tri"]).unwrap();
    assert_eq!(output.name, "1abc_lowpoly");

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["name"], "1abc_lowpoly");
    assert_eq!(json["fragments"][0]["selector"], "tri");
    assert!(json.get("failures").is_none());
}
