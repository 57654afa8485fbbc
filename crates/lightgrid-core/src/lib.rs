//! Lightgrid Core - Light grid generation and scene XML
//!
//! This crate provides the building blocks of the lightgrid tool:
//! - Grid parameters and the position/color rules for each light
//! - The scene document model (Scene, Transform, Light) and its XML form
//! - Vector and color value types used in scene attributes

pub mod grid;
pub mod scene;
pub mod types;

pub use grid::{generate, GridError, GridSpec};
pub use scene::{Light, Scene, SceneError, Transform};
pub use types::{Rgba, Vec3};
