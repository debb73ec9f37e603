// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Render a projected scene into plotter-ready SVG strokes
//!
//! The scene is JSON with `faces` (lists of `[x, y, z]`, already projected,
//! smaller z nearer) and `chains` (lists of `[x, y]` drawn on top).
//!
//! Usage:
//!   penline <scene.json> [options]

use penline_geometry::{Bounds2, Face, Point2, Polyline};
use penline_pipeline::{render, to_path_data, PipelineConfig, PlotScale};
use serde::Deserialize;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::process;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Scene {
    faces: Vec<Face>,
    chains: Vec<Vec<Point2<f64>>>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let scene_path = &args[1];

    // Parse options
    let mut output_path = String::from("drawing.svg");
    let mut config_path: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut preview = false;
    let mut units_per_mm: f64 = 1.0;
    let mut margin_mm: f64 = 10.0;
    let mut stroke_mm: f64 = 0.3;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--out" => output_path = option_value(&args, &mut i).to_string(),
            "--config" => config_path = Some(option_value(&args, &mut i).to_string()),
            "--seed" => seed = Some(parse_option(&args, &mut i)),
            "--scale" => units_per_mm = parse_option(&args, &mut i),
            "--margin" => margin_mm = parse_option(&args, &mut i),
            "--stroke" => stroke_mm = parse_option(&args, &mut i),
            "--preview" => preview = true,
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config: PipelineConfig = match &config_path {
        Some(path) => read_json(path),
        None => PipelineConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    config.fast_preview |= preview;

    let scale = PlotScale::new(units_per_mm, margin_mm).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let scene: Scene = read_json(scene_path);
    println!(
        "Scene: {} faces, {} chains",
        scene.faces.len(),
        scene.chains.len()
    );

    let rendering = render(&scene.faces, &scene.chains, &config).unwrap_or_else(|e| {
        eprintln!("Error: Render failed: {}", e);
        process::exit(1);
    });

    let svg = write_svg(&rendering.polylines, &scale, stroke_mm);
    if let Err(e) = fs::write(&output_path, svg) {
        eprintln!("Error: Cannot write '{}': {}", output_path, e);
        process::exit(1);
    }

    let stats = &rendering.stats;
    println!("  Input segments:    {}", stats.input_segments);
    println!("  Arranged segments: {}", stats.arranged_segments);
    println!("  Visible segments:  {}", stats.visible_segments);
    println!("  Strokes:           {}", stats.polylines);
    println!(
        "  Pen-up travel:     {:.1} -> {:.1}",
        stats.travel_before, stats.travel_after
    );
    println!("  Time:              {} ms", stats.elapsed_ms);
    println!("Wrote {}", output_path);
}

/// One `<path>` per stroke, sized to the drawing plus margin on every side
fn write_svg(polylines: &[Polyline], scale: &PlotScale, stroke_mm: f64) -> String {
    let extent = Bounds2::from_points(polylines.iter().flat_map(|p| p.points()));
    let (width, height) = match extent {
        Some(b) => (
            scale.to_mm(b.max.x) + scale.margin_mm,
            scale.to_mm(b.max.y) + scale.margin_mm,
        ),
        None => (2.0 * scale.margin_mm, 2.0 * scale.margin_mm),
    };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"#,
        w = width.max(0.0),
        h = height.max(0.0)
    );
    let _ = writeln!(
        svg,
        r#"<g fill="none" stroke="black" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round">"#,
        stroke_mm
    );
    for polyline in polylines {
        let _ = writeln!(svg, r#"<path d="{}"/>"#, to_path_data(polyline, scale));
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error: Cannot read '{}': {}", path, e);
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error: Cannot parse '{}': {}", path, e);
        process::exit(1);
    })
}

fn option_value<'a>(args: &'a [String], i: &mut usize) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Missing value for {}", args[*i - 1]);
            process::exit(1);
        }
    }
}

fn parse_option<T: std::str::FromStr>(args: &[String], i: &mut usize) -> T {
    let value = option_value(args, i);
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid value for {}: {}", args[*i - 1], value);
        process::exit(1);
    })
}

fn print_usage() {
    println!("Usage: penline <scene.json> [options]");
    println!();
    println!("Options:");
    println!("  --out <file>       Output SVG path (default: drawing.svg)");
    println!("  --config <file>    Pipeline configuration JSON");
    println!("  --seed <n>         Random seed for perturbation");
    println!("  --scale <k>        Drawing units per millimetre (default: 1)");
    println!("  --margin <mm>      Page margin in millimetres (default: 10)");
    println!("  --stroke <mm>      Pen width in millimetres (default: 0.3)");
    println!("  --preview          Skip hidden-line removal");
    println!();
    println!("Set RUST_LOG=debug for per-stage logs.");
}
