//! Command line front-end for the sound wall layout engine: parses LandXML
//! alignment data, computes the wall layout and writes it as JSON for the
//! downstream emitters.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use soundwall::config::{FoundationType, WallConfig, WallType};
use soundwall::io::landxml::{
    read_landxml_alignment, read_landxml_profile, read_landxml_surface,
};
use soundwall::io::write_layout_json;
use soundwall::layout::compute_layout;

mod units;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WallTypeArg {
    Precast,
    Mse,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FoundationArg {
    Caisson,
    Spread,
    Continuous,
}

#[derive(Parser)]
#[command(name = "soundwall", version, about = "Sound wall layout from LandXML alignment data")]
struct Cli {
    /// Input LandXML file.
    input: PathBuf,

    /// Output JSON layout path (default: input with a .json extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wall construction type.
    #[arg(long, value_enum, default_value_t = WallTypeArg::Precast)]
    wall_type: WallTypeArg,

    /// Wall height in meters.
    #[arg(long)]
    wall_height: Option<f64>,

    /// Wall height in feet.
    #[arg(long, conflicts_with = "wall_height")]
    wall_height_ft: Option<f64>,

    /// Foundation type.
    #[arg(long, value_enum, default_value_t = FoundationArg::Caisson)]
    foundation: FoundationArg,

    /// Maximum post spacing in meters.
    #[arg(long)]
    post_spacing: Option<f64>,

    /// Maximum post spacing in feet.
    #[arg(long, conflicts_with = "post_spacing")]
    post_spacing_ft: Option<f64>,

    /// Start station in meters, or `XX+YY.YYY` (default: alignment start).
    #[arg(long)]
    start_station: Option<String>,

    /// End station in meters, or `XX+YY.YYY` (default: alignment end).
    #[arg(long)]
    end_station: Option<String>,

    /// Offset from the centerline in meters, positive right of travel.
    #[arg(long, default_value_t = 0.0)]
    offset: f64,

    /// Name of the alignment to use (default: first in the file).
    #[arg(long)]
    alignment_name: Option<String>,

    /// Name of the surface to use (default: first in the file).
    #[arg(long)]
    surface_name: Option<String>,

    /// JSON file with partial layout parameter overrides.
    #[arg(long)]
    params: Option<PathBuf>,
}

fn build_config(cli: &Cli) -> io::Result<WallConfig> {
    let mut config = match &cli.params {
        Some(path) => {
            let text = soundwall::io::read_to_string(path.to_string_lossy().as_ref())?;
            serde_json::from_str(&text)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        }
        None => WallConfig::default(),
    };

    config.wall_type = match cli.wall_type {
        WallTypeArg::Precast => WallType::Precast,
        WallTypeArg::Mse => WallType::MseComposite,
    };
    config.foundation_type = match cli.foundation {
        FoundationArg::Caisson => FoundationType::Caisson,
        FoundationArg::Spread => FoundationType::Spread,
        FoundationArg::Continuous => FoundationType::Continuous,
    };
    if let Some(h) = cli.wall_height {
        config.wall_height = h;
    } else if let Some(h) = cli.wall_height_ft {
        config.wall_height = units::ft_to_m(h);
    }
    if let Some(s) = cli.post_spacing {
        config.post_spacing = s;
    } else if let Some(s) = cli.post_spacing_ft {
        config.post_spacing = units::ft_to_m(s);
    }
    if let Some(text) = &cli.start_station {
        config.start_station = Some(parse_station_arg(text)?);
    }
    if let Some(text) = &cli.end_station {
        config.end_station = Some(parse_station_arg(text)?);
    }
    config.offset = cli.offset;

    Ok(config)
}

/// Stations on the command line are metric: plain meters or `XX+YY.YYY`.
fn parse_station_arg(text: &str) -> io::Result<f64> {
    units::parse_station(text, false)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, format!("bad station {text:?}")))
}

fn run(cli: &Cli) -> io::Result<()> {
    let input = cli.input.to_string_lossy().to_string();
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("json"));

    let alignment = read_landxml_alignment(&input, cli.alignment_name.as_deref())?;
    let profile = read_landxml_profile(&input, cli.alignment_name.as_deref())?;
    let surface = read_landxml_surface(&input, cli.surface_name.as_deref())?;

    println!(
        "Alignment: {} ({} segments, {:.1} m, sta {} to {})",
        alignment.name,
        alignment.segments.len(),
        alignment.total_length(),
        units::format_station(alignment.start_station(), true),
        units::format_station(alignment.end_station(), true),
    );
    println!("Profile:   {} PVIs", profile.pvis.len());
    println!(
        "Surface:   {} ({} vertices, {} triangles)",
        if surface.name.is_empty() {
            "-"
        } else {
            surface.name.as_str()
        },
        surface.num_vertices(),
        surface.num_triangles()
    );

    let config = build_config(cli)?;
    println!(
        "Wall:      height {:.3} m ({:.1} ft), spacing {:.3} m ({:.1} ft)",
        config.wall_height,
        units::m_to_ft(config.wall_height),
        config.post_spacing,
        units::m_to_ft(config.post_spacing)
    );
    log::info!(
        "computing layout: height {:.3} m, spacing {:.3} m, offset {:.3} m",
        config.wall_height,
        config.post_spacing,
        config.offset
    );

    let profile_opt = (!profile.pvis.is_empty()).then_some(&profile);
    let surface_opt = (surface.num_triangles() > 0).then_some(&surface);
    let layout = compute_layout(&alignment, profile_opt, surface_opt, &config);

    println!("Posts:     {}", layout.posts.len());
    println!("Bays:      {}", layout.num_bays());
    println!("Panels:    {}", layout.panels.len());
    println!("Footings:  {}", layout.footings.len());
    println!("Caps:      {}", layout.caps.len());
    println!("Joints:    {}", layout.joints.len());
    println!("Drainage:  {}", layout.drainage_slots.len());
    if !layout.mse_segments.is_empty() {
        println!("MSE segs:  {}", layout.mse_segments.len());
    }

    write_layout_json(output.to_string_lossy().as_ref(), &layout)?;
    println!("Written:   {}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
