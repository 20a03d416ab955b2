//! Possession value CLI
//!
//! Snapshot JSON → analysis / field JSON

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;

use pv_core::api::{self, AnalyzeRequest, SCHEMA_VERSION};
use pv_core::{EngineConfig, MoverId, PossessionSnapshot};

#[derive(Parser)]
#[command(name = "pv")]
#[command(about = "Spatial control and possession value for a single instant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    Standard,
    SmallSided,
    Static,
}

impl Preset {
    fn config(self) -> EngineConfig {
        match self {
            Preset::Standard => EngineConfig::standard(),
            Preset::SmallSided => EngineConfig::small_sided(),
            Preset::Static => EngineConfig::static_analysis(),
        }
    }
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Snapshot JSON file path
    #[arg(long)]
    snapshot: PathBuf,

    /// Grid cell size in meters (defaults to the config's resolution)
    #[arg(long)]
    resolution: Option<f32>,

    /// Engine config JSON file (overrides --preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in config preset
    #[arg(long, value_enum, default_value = "standard")]
    preset: Preset,

    /// Write output here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print JSON
    #[arg(long, default_value = "false")]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis for the ball carrier
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Carrier id (defaults to the possessing mover nearest the ball)
        #[arg(long)]
        carrier: Option<u32>,
    },

    /// Control and value grids only
    Field {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print a config preset as JSON
    Config {
        #[arg(long, value_enum, default_value = "standard")]
        preset: Preset,
    },
}

fn load_config(path: Option<&Path>, preset: Preset) -> Result<EngineConfig> {
    match path {
        Some(p) => {
            let json = std::fs::read_to_string(p).with_context(|| format!("reading config {}", p.display()))?;
            Ok(EngineConfig::from_json(&json)?)
        }
        None => Ok(preset.config()),
    }
}

fn build_request(input: &InputArgs, carrier: Option<u32>) -> Result<AnalyzeRequest> {
    let json = std::fs::read_to_string(&input.snapshot)
        .with_context(|| format!("reading snapshot {}", input.snapshot.display()))?;
    let snapshot: PossessionSnapshot =
        serde_json::from_str(&json).with_context(|| format!("parsing snapshot {}", input.snapshot.display()))?;
    let config = load_config(input.config.as_deref(), input.preset)?;

    log::info!(
        "snapshot: {} team / {} opponent movers, attacking {}",
        snapshot.team.len(),
        snapshot.opponent.len(),
        if snapshot.attacking_right { "right" } else { "left" }
    );

    Ok(AnalyzeRequest {
        schema_version: SCHEMA_VERSION,
        snapshot,
        carrier_id: carrier.map(MoverId::new),
        resolution: input.resolution,
        config: Some(config),
    })
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? })
}

/// Execute a command and return its JSON output.
fn run(command: &Commands) -> Result<(String, Option<&Path>)> {
    match command {
        Commands::Analyze { input, carrier } => {
            let response = api::analyze(build_request(input, *carrier)?)?;
            log::info!(
                "carrier {}: recommended {:?}, {} pass options",
                response.analysis.carrier,
                response.analysis.recommended,
                response.analysis.pass_options.len()
            );
            Ok((to_json(&response, input.pretty)?, input.out.as_deref()))
        }
        Commands::Field { input } => {
            let response = api::fields(build_request(input, None)?)?;
            log::info!(
                "field {}x{} @ {:.2}m",
                response.field.grid.cols(),
                response.field.grid.rows(),
                response.field.grid.resolution()
            );
            Ok((to_json(&response, input.pretty)?, input.out.as_deref()))
        }
        Commands::Config { preset } => Ok((to_json(&preset.config(), true)?, None)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let (output, out) = run(&cli.command)?;
    match out {
        Some(path) => {
            std::fs::write(path, output).with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{output}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "team": [
            {"id": 1, "role": "CM", "x": -2.0, "y": 0.0, "vx": 1.5, "vy": 0.0},
            {"id": 2, "role": "ST", "x": 20.0, "y": -4.0},
            {"id": 3, "role": "RW", "x": 15.0, "y": 22.0}
        ],
        "opponent": [
            {"id": 10, "role": "CB", "x": 26.0, "y": -2.0},
            {"id": 11, "role": "CB", "x": 26.0, "y": 10.0},
            {"id": 12, "role": "DM", "x": 6.0, "y": 0.0}
        ],
        "ball": {"x": -2.0, "y": 0.0},
        "attacking_right": true
    }"#;

    fn snapshot_file() -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(SNAPSHOT.as_bytes()).unwrap();
        f
    }

    fn input(path: PathBuf) -> InputArgs {
        InputArgs {
            snapshot: path,
            resolution: Some(5.0),
            config: None,
            preset: Preset::Standard,
            out: None,
            pretty: false,
        }
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
        let cli = Cli::try_parse_from(["pv", "analyze", "--snapshot", "s.json", "--carrier", "7", "--preset", "small-sided"])
            .unwrap();
        match cli.command {
            Commands::Analyze { input, carrier } => {
                assert_eq!(carrier, Some(7));
                assert_eq!(input.preset, Preset::SmallSided);
                assert!(input.resolution.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_analyze_command() {
        let file = snapshot_file();
        let command = Commands::Analyze { input: input(file.path().to_path_buf()), carrier: None };
        let (json, out) = run(&command).unwrap();
        assert!(out.is_none());
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["schema_version"], 1);
        assert_eq!(v["carrier"], 1);
        assert_eq!(v["pass_options"].as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_field_command_with_config_file() {
        let file = snapshot_file();
        let mut cfg = tempfile::NamedTempFile::new().unwrap();
        cfg.write_all(serde_json::to_string(&EngineConfig::small_sided()).unwrap().as_bytes())
            .unwrap();

        let mut args = input(file.path().to_path_buf());
        args.config = Some(cfg.path().to_path_buf());
        let (json, _) = run(&Commands::Field { input: args }).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        // 60m x 40m pitch at 5m cells
        assert_eq!(v["field"]["cols"], 12);
        assert_eq!(v["field"]["rows"], 8);
    }

    #[test]
    fn test_unknown_carrier_fails() {
        let file = snapshot_file();
        let command = Commands::Analyze { input: input(file.path().to_path_buf()), carrier: Some(10) };
        let err = run(&command).unwrap_err();
        assert!(err.to_string().contains("not on the possessing side"));
    }

    #[test]
    fn test_missing_snapshot_file() {
        let command = Commands::Field { input: input(PathBuf::from("/nonexistent/snapshot.json")) };
        let err = run(&command).unwrap_err();
        assert!(err.to_string().contains("reading snapshot"));
    }

    #[test]
    fn test_config_preset_roundtrips() {
        let (json, _) = run(&Commands::Config { preset: Preset::Static }).unwrap();
        let cfg = EngineConfig::from_json(&json).unwrap();
        assert_eq!(cfg.default_resolution_m, 0.5);
    }
}
