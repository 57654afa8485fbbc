//! Configuration loading and validation

use anyhow::Result;
use lightgrid_core::grid::{DEFAULT_GRID_SIZE, DEFAULT_HEIGHT, DEFAULT_SPACING};
use lightgrid_core::{GridSpec, Rgba};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Lights per side of the square grid
    #[serde(default = "default_size")]
    pub size: usize,
    /// Lights span [-spacing, +spacing] on X and Z
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    /// Y coordinate of every light
    #[serde(default = "default_height")]
    pub height: f64,
    /// Diffuse colors as "r g b a", cycled by (i + j)
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            spacing: default_spacing(),
            height: default_height(),
            palette: default_palette(),
        }
    }
}

fn default_size() -> usize {
    DEFAULT_GRID_SIZE
}

fn default_spacing() -> f64 {
    DEFAULT_SPACING
}

fn default_height() -> f64 {
    DEFAULT_HEIGHT
}

fn default_palette() -> Vec<String> {
    lightgrid_core::grid::default_palette()
        .iter()
        .map(Rgba::to_string)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Scene file to write, relative to the working directory
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("lights.xml")
}

impl Config {
    /// Convert to a validated GridSpec
    pub fn to_grid_spec(&self) -> Result<GridSpec> {
        let palette = self
            .grid
            .palette
            .iter()
            .map(|c| c.parse::<Rgba>())
            .collect::<Result<Vec<_>, _>>()?;

        let spec = GridSpec {
            grid_size: self.grid.size,
            spacing: self.grid.spacing,
            height: self.grid.height,
            palette,
        };
        spec.validate()?;
        Ok(spec)
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_builtin_grid() {
        let spec = Config::default().to_grid_spec().unwrap();
        assert_eq!(spec, GridSpec::default());
        assert_eq!(Config::default().output.path, PathBuf::from("lights.xml"));
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
[grid]
size = 4
palette = ["1 1 1 1", "0.5 0.5 0.5 1"]
"#,
        )
        .unwrap();

        let spec = config.to_grid_spec().unwrap();
        assert_eq!(spec.grid_size, 4);
        assert_eq!(spec.spacing, DEFAULT_SPACING);
        assert_eq!(spec.palette, vec![Rgba::WHITE, Rgba::new(0.5, 0.5, 0.5, 1.0)]);
        assert_eq!(config.output.path, PathBuf::from("lights.xml"));
    }

    #[test]
    fn test_invalid_palette_entry() {
        let config: Config = toml::from_str(
            r#"
[grid]
palette = ["1 0 0"]
"#,
        )
        .unwrap();
        assert!(config.to_grid_spec().is_err());
    }

    #[test]
    fn test_grid_too_small() {
        let mut config = Config::default();
        config.grid.size = 1;
        assert!(config.to_grid_spec().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config(&temp_dir.path().join("lightgrid.toml")).unwrap();
        assert_eq!(config.grid.size, 7);
        assert_eq!(config.grid.palette.len(), 4);
    }

    #[test]
    fn test_load_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lightgrid.toml");
        std::fs::write(&path, "[output]\npath = \"scenes/grid.xml\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.output.path, PathBuf::from("scenes/grid.xml"));
        assert_eq!(config.grid.spacing, 25.0);
    }
}
