//! Lightgrid - Main entry point
//!
//! Generates a square grid of colored point lights and writes it as a scene
//! XML file. With no config file present the grid is 7×7 over ±25 units and
//! the output goes to `lights.xml`.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use lightgrid_core::generate;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;

const SUCCESS_MESSAGE: &str = "XML file generated successfully with formatting!";

#[derive(Parser, Debug)]
#[command(name = "lightgrid")]
#[command(about = "Point light grid scene generator")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "lightgrid.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // stdout is reserved for the confirmation line
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Lightgrid v{}", env!("CARGO_PKG_VERSION"));

    let config = config::load_config(&args.config)?;
    run(&config)?;

    println!("{}", SUCCESS_MESSAGE);
    Ok(())
}

/// Generate the scene described by `config` and write it to the output path
fn run(config: &Config) -> Result<PathBuf> {
    let spec = config.to_grid_spec()?;

    info!(
        grid_size = spec.grid_size,
        spacing = spec.spacing,
        height = spec.height,
        colors = spec.palette.len(),
        "Configuration loaded"
    );

    let scene = generate(&spec)?;
    let path = config.output.path.clone();
    scene
        .to_file(&path)
        .with_context(|| format!("Failed to write scene to {}", path.display()))?;

    info!(path = %path.display(), lights = scene.light_count(), "Scene written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightgrid_core::Scene;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.output.path = dir.path().join("lights.xml");
        config
    }

    #[test]
    fn test_run_writes_scene() {
        let temp_dir = TempDir::new().unwrap();
        let path = run(&config_in(&temp_dir)).unwrap();

        assert!(path.exists());
        let scene = Scene::from_file(&path).unwrap();
        assert_eq!(scene.light_count(), 49);
        assert_eq!(scene.transforms[0].translate, "-25.0 1.0 -25.0");
        assert_eq!(scene.transforms[48].translate, "25.0 1.0 25.0");
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);

        let path = run(&config).unwrap();
        let first = std::fs::read(&path).unwrap();
        run(&config).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_run_unwritable_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.path = temp_dir.path().join("missing").join("lights.xml");

        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to write scene"));
    }

    #[test]
    fn test_run_rejects_invalid_grid() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_in(&temp_dir);
        config.grid.palette.clear();

        assert!(run(&config).is_err());
        assert!(!config.output.path.exists());
    }
}
