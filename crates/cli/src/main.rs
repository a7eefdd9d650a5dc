#![deny(unsafe_code)]
//! CLI binary for the BeamSeas ocean synthesizer.
//!
//! Subcommands:
//! - `render` assembles a spectrum, evolves it and writes a height-map PNG
//! - `sample` prints a single normal draw, Gaussian pair or Phillips value
//! - `list` prints available spectrum models and Gaussian strategies

mod error;
mod logging;

use beamseas_core::diagnostics::{phillips, sample_gaussian_pair, sample_normal};
use beamseas_core::{GaussianKind, OceanConfig, SpectrumAssembler, SpectrumKind, Vector2};
use beamseas_surface::snapshot::{write_normal_png, write_png};
use beamseas_surface::{surface_at, surface_normals};
use clap::{Args, Parser, Subcommand};
use error::CliError;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "beamseas", about = "Ocean wave spectrum synthesizer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Render inputs that layer over the JSON config file.
#[derive(Args, Default)]
struct ConfigFlags {
    /// JSON config file; flags given on the command line override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Phillips amplitude constant (e.g. 0.0005).
    #[arg(short, long)]
    amplitude: Option<f64>,

    /// Wind vector "X,Y" in m/s (e.g. "0,32").
    #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
    wind: Option<Vector2>,

    /// Grid width in cells.
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Grid height in cells.
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Patch size in metres, "S" or "X,Y".
    #[arg(short, long, value_parser = parse_vec2)]
    domain: Option<Vector2>,

    /// PRNG seed for deterministic output.
    #[arg(long)]
    seed: Option<u64>,

    /// Spectrum model (phillips, classic).
    #[arg(long)]
    spectrum: Option<String>,

    /// Gaussian strategy (box-muller, box-muller-normal, engine-normal).
    #[arg(long)]
    gaussian: Option<String>,

    /// Normal-map frequency modifier, "S" or "X,Y". The normal map is then
    /// built from its own spectrum over `domain / modifier`.
    #[arg(long, value_parser = parse_vec2)]
    normal_map_freq_mod: Option<Vector2>,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble a spectrum, evolve it to --time and write a height-map PNG.
    Render {
        #[command(flatten)]
        flags: ConfigFlags,

        /// Simulation time in seconds.
        #[arg(short, long, default_value_t = 0.0)]
        time: f64,

        /// Output file path.
        #[arg(short, long, default_value = "ocean.png")]
        output: PathBuf,

        /// Also write a surface normal map to this path.
        #[arg(long)]
        normals: Option<PathBuf>,
    },
    /// Print a single draw or spectrum value.
    Sample {
        #[command(subcommand)]
        what: SampleCommand,
    },
    /// List available spectrum models and Gaussian strategies.
    List,
}

#[derive(Subcommand)]
enum SampleCommand {
    /// First standard normal from the engine-normal sampler.
    Normal {
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// First Gaussian pair from a strategy.
    Pair {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value = "box-muller")]
        gaussian: String,
    },
    /// Phillips spectrum at one wave vector.
    Phillips {
        /// Wave vector "KX,KY" in rad/m.
        #[arg(value_parser = parse_vec2, allow_hyphen_values = true)]
        k: Vector2,

        #[arg(long, default_value_t = 9.81)]
        gravity: f64,

        #[arg(long, default_value_t = 0.0005)]
        amplitude: f64,

        #[arg(long, value_parser = parse_vec2, default_value = "0,32", allow_hyphen_values = true)]
        wind: Vector2,
    },
}

/// Parses "X,Y" or a single "S" (meaning "S,S").
fn parse_vec2(s: &str) -> Result<Vector2, String> {
    let parse = |t: &str| {
        t.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{}': {e}", t.trim()))
    };
    match s.split_once(',') {
        Some((x, y)) => Ok(Vector2::new(parse(x)?, parse(y)?)),
        None => Ok(Vector2::splat(parse(s)?)),
    }
}

/// Loads the optional config file and layers the flags over it.
fn build_config(flags: ConfigFlags) -> Result<OceanConfig, CliError> {
    let mut params = match flags.config {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            serde_json::from_str::<Value>(&text)
                .map_err(|e| CliError::Input(format!("invalid config JSON: {e}")))?
        }
        None => json!({}),
    };
    let map = params
        .as_object_mut()
        .ok_or_else(|| CliError::Input("config must be a JSON object".into()))?;

    if let Some(a) = flags.amplitude {
        map.insert("amplitude".into(), json!(a));
    }
    if let Some(w) = flags.wind {
        map.insert("wind".into(), json!([w.x, w.y]));
    }
    if let Some(w) = flags.width {
        map.insert("width".into(), json!(w));
    }
    if let Some(h) = flags.height {
        map.insert("height".into(), json!(h));
    }
    if let Some(d) = flags.domain {
        map.insert("domain_size".into(), json!([d.x, d.y]));
    }
    if let Some(s) = flags.seed {
        map.insert("seed".into(), json!(s));
    }
    if let Some(s) = flags.spectrum {
        map.insert("spectrum".into(), json!(s));
    }
    if let Some(g) = flags.gaussian {
        map.insert("gaussian".into(), json!(g));
    }
    if let Some(m) = flags.normal_map_freq_mod {
        map.insert("normal_map_freq_mod".into(), json!([m.x, m.y]));
    }

    Ok(OceanConfig::from_json(&params)?)
}

fn print(json_mode: bool, value: &Value, human: impl FnOnce()) -> Result<(), CliError> {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human();
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let spectra = SpectrumKind::list_names();
            let samplers = GaussianKind::list_names();
            let info = json!({"spectra": spectra, "gaussians": samplers});
            print(cli.json, &info, || {
                println!("Spectra:");
                for name in spectra {
                    println!("  {name}");
                }
                println!("Gaussian samplers:");
                println!("  {}", samplers.join(", "));
            })?;
        }
        Command::Sample { what } => match what {
            SampleCommand::Normal { seed } => {
                let value = sample_normal(seed);
                print(cli.json, &json!({"seed": seed, "normal": value}), || {
                    println!("{value}")
                })?;
            }
            SampleCommand::Pair { seed, gaussian } => {
                let kind = GaussianKind::from_name(&gaussian)?;
                let (a, b) = sample_gaussian_pair(seed, kind)?;
                let info = json!({"seed": seed, "gaussian": kind.name(), "pair": [a, b]});
                print(cli.json, &info, || println!("{a} {b}"))?;
            }
            SampleCommand::Phillips {
                k,
                gravity,
                amplitude,
                wind,
            } => {
                let value = phillips(k, gravity, amplitude, wind)?;
                let info = json!({
                    "k": [k.x, k.y],
                    "gravity": gravity,
                    "amplitude": amplitude,
                    "wind": [wind.x, wind.y],
                    "phillips": value,
                });
                print(cli.json, &info, || println!("{value:e}"))?;
            }
        },
        Command::Render {
            flags,
            time,
            output,
            normals,
        } => {
            let config = build_config(flags)?;
            tracing::info!(
                width = config.width,
                height = config.height,
                seed = config.seed,
                spectrum = config.spectrum.name(),
                "rendering"
            );

            let assembler = SpectrumAssembler::new(config.clone())?;
            let heights = surface_at(&assembler, time)?;
            write_png(&heights, &output)?;
            match &normals {
                Some(path) => {
                    let n = surface_normals(&assembler, time, &heights)?;
                    write_normal_png(heights.width(), heights.height(), &n, path)?;
                }
                None if config.normal_map_freq_mod.is_some() => {
                    tracing::warn!("normal-map frequency modifier set without --normals; skipping");
                }
                None => {}
            }

            let (lo, hi) = heights.min_max();
            let info = json!({
                "config": serde_json::to_value(&config)?,
                "time": time,
                "min_height": lo,
                "max_height": hi,
                "output": output.display().to_string(),
                "normals": normals.as_ref().map(|p| p.display().to_string()),
            });
            print(cli.json, &info, || {
                eprintln!(
                    "rendered {} spectrum ({}x{}, seed {}, t={time}) -> {}",
                    config.spectrum.name(),
                    config.width,
                    config.height,
                    config.seed,
                    output.display()
                )
            })?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
