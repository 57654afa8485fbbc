//! Vector and color value types used in scene attributes
//!
//! Scene attributes carry space-separated numbers ("x y z", "r g b a").
//! These types own the formatting and parsing of those strings.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid color \"{0}\", expected \"r g b a\"")]
pub struct ColorParseError(pub String);

/// Position in world space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Components always keep a fractional part ("-25.0 1.0 0.0")
impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} {:?}", self.x, self.y, self.z)
    }
}

/// Parse a vector string "x y z", rejecting any non-numeric token
pub fn parse_vec3(s: &str) -> Option<Vec3> {
    let parts = s
        .split_whitespace()
        .map(|p| p.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    match parts.as_slice() {
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

/// RGBA color, each channel nominally in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Rgba = Rgba::new(0.0, 0.0, 1.0, 1.0);
    pub const MAGENTA: Rgba = Rgba::new(1.0, 0.0, 1.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split_whitespace()
            .map(|p| p.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ColorParseError(s.to_string()))?;
        match parts.as_slice() {
            [r, g, b, a] => Ok(Rgba::new(*r, *g, *b, *a)),
            _ => Err(ColorParseError(s.to_string())),
        }
    }
}
