//! Square grid of point lights
//!
//! Grid index `(i, j)` maps linearly onto world coordinates in
//! `[-spacing, +spacing]` on the X/Z plane at a fixed height. Each light's
//! diffuse color cycles through the palette by `(i + j) % palette.len()`.

use thiserror::Error;
use tracing::debug;

use crate::scene::{Light, Scene, Transform};
use crate::types::{ColorParseError, Rgba, Vec3};

pub const DEFAULT_GRID_SIZE: usize = 7;
pub const DEFAULT_SPACING: f64 = 25.0;
pub const DEFAULT_HEIGHT: f64 = 1.0;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Grid size must be at least 2, got {0}")]
    GridTooSmall(usize),
    #[error("Palette must contain at least one color")]
    EmptyPalette,
    #[error("{0} must be a finite number, got {1}")]
    NonFinite(&'static str, f64),
    #[error(transparent)]
    InvalidColor(#[from] ColorParseError),
}

/// Red, blue, magenta, green
pub fn default_palette() -> Vec<Rgba> {
    vec![Rgba::RED, Rgba::BLUE, Rgba::MAGENTA, Rgba::GREEN]
}

/// Parameters of a light grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    /// Lights per side
    pub grid_size: usize,
    /// Half the side length of the covered square
    pub spacing: f64,
    /// Y coordinate shared by every light
    pub height: f64,
    pub palette: Vec<Rgba>,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            spacing: DEFAULT_SPACING,
            height: DEFAULT_HEIGHT,
            palette: default_palette(),
        }
    }
}

impl GridSpec {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.grid_size < 2 {
            return Err(GridError::GridTooSmall(self.grid_size));
        }
        if self.palette.is_empty() {
            return Err(GridError::EmptyPalette);
        }
        if !self.spacing.is_finite() {
            return Err(GridError::NonFinite("spacing", self.spacing));
        }
        if !self.height.is_finite() {
            return Err(GridError::NonFinite("height", self.height));
        }
        Ok(())
    }

    pub fn light_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// World position of grid cell `(i, j)`
    pub fn position(&self, i: usize, j: usize) -> Vec3 {
        let last = self.grid_size as f64 - 1.0;
        let x = (i as f64 / last) * self.spacing * 2.0 - self.spacing;
        let z = (j as f64 / last) * self.spacing * 2.0 - self.spacing;
        Vec3::new(x, self.height, z)
    }

    /// Diffuse color of grid cell `(i, j)`, `None` for an empty palette
    pub fn color(&self, i: usize, j: usize) -> Option<Rgba> {
        (i + j)
            .checked_rem(self.palette.len())
            .and_then(|index| self.palette.get(index))
            .copied()
    }
}

/// Build the scene for `spec`, rows (`i`) outer and columns (`j`) inner
pub fn generate(spec: &GridSpec) -> Result<Scene, GridError> {
    spec.validate()?;

    let mut scene = Scene::new();
    for i in 0..spec.grid_size {
        for j in 0..spec.grid_size {
            let diffuse = spec.color(i, j).ok_or(GridError::EmptyPalette)?;
            scene.push(Transform::at(spec.position(i, j), Light::point(diffuse)));
        }
    }

    debug!(
        grid_size = spec.grid_size,
        lights = scene.light_count(),
        "Generated light grid"
    );
    Ok(scene)
}
