//! Scene XML document model and serialization
//!
//! A scene is a root `<Scene>` element holding a flat list of `<Transform>`
//! placements, each wrapping exactly one `<Light>`. Vectors and colors are
//! stored as space-separated attribute strings, the form the renderer's scene
//! loader reads.

use quick_xml::de::from_str;
use quick_xml::se::Serializer;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::types::{parse_vec3, Rgba, Vec3};

/// Declaration written ahead of the root element
pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";

pub const TRANSFORM_NAME: &str = "Transform1";
pub const UNIT_SCALE: &str = "1 1 1";
pub const ZERO_ROTATION: &str = "0 0 0";
/// Homogeneous origin of the parent transform
pub const LIGHT_POSITION: &str = "0 0 0 1";

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to parse scene: {0}")]
    ParseError(String),
    #[error("Failed to serialize scene: {0}")]
    SerializeError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Point light, positioned relative to its parent transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    #[serde(rename = "@position")]
    pub position: String,
    #[serde(rename = "@diffuse")]
    pub diffuse: String,
    #[serde(rename = "@specular")]
    pub specular: String,
}

impl Light {
    /// Light at the transform origin with white specular
    pub fn point(diffuse: Rgba) -> Self {
        Self {
            position: LIGHT_POSITION.to_string(),
            diffuse: diffuse.to_string(),
            specular: Rgba::WHITE.to_string(),
        }
    }

    pub fn parse_diffuse(&self) -> Option<Rgba> {
        self.diffuse.parse().ok()
    }
}

/// Placement of a single light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@scale")]
    pub scale: String,
    /// Translation: "x y z"
    #[serde(rename = "@translate")]
    pub translate: String,
    /// Euler angles in degrees: "x y z"
    #[serde(rename = "@rotate")]
    pub rotate: String,
    #[serde(rename = "Light")]
    pub light: Light,
}

impl Transform {
    /// Unscaled, unrotated transform at `translate` holding `light`
    pub fn at(translate: Vec3, light: Light) -> Self {
        Self {
            name: TRANSFORM_NAME.to_string(),
            scale: UNIT_SCALE.to_string(),
            translate: translate.to_string(),
            rotate: ZERO_ROTATION.to_string(),
            light,
        }
    }

    /// Parse the translate string into a Vec3
    pub fn parse_translate(&self) -> Option<Vec3> {
        parse_vec3(&self.translate)
    }
}

/// Root scene document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "Scene")]
pub struct Scene {
    #[serde(rename = "@groundPlane")]
    pub ground_plane: bool,

    #[serde(rename = "Transform", default)]
    pub transforms: Vec<Transform>,
}

impl Scene {
    /// Create an empty scene with a ground plane
    pub fn new() -> Self {
        Self {
            ground_plane: true,
            transforms: Vec::new(),
        }
    }

    /// Append a transform; document order is insertion order
    pub fn push(&mut self, transform: Transform) {
        self.transforms.push(transform);
    }

    pub fn light_count(&self) -> usize {
        self.transforms.len()
    }

    /// Parse a scene from XML string
    pub fn from_xml(xml: &str) -> Result<Self, SceneError> {
        from_str(xml).map_err(|e| SceneError::ParseError(e.to_string()))
    }

    /// Parse a scene from file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_xml(&content)
    }

    /// Serialize to an indented XML string
    pub fn to_xml(&self) -> Result<String, SceneError> {
        let mut xml = String::from(XML_DECLARATION);
        xml.push('\n');

        let mut ser = Serializer::new(&mut xml);
        ser.indent(' ', 2);
        self.serialize(ser)
            .map_err(|e| SceneError::SerializeError(e.to_string()))?;

        Ok(xml)
    }

    /// Write to file, replacing any existing content
    ///
    /// The file is synced before returning so a successful return means the
    /// whole document reached the disk.
    pub fn to_file(&self, path: &Path) -> Result<(), SceneError> {
        let xml = self.to_xml()?;
        let mut file = File::create(path)?;
        file.write_all(xml.as_bytes())?;
        file.sync_all()?;
        debug!(path = %path.display(), bytes = xml.len(), "Wrote scene");
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
