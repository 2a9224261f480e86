//! Scene and camera configuration.

use serde::{Deserialize, Serialize};

/// Perspective camera settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Initial eye position.
    pub eye: [f32; 3],
    /// Orbit target. `None` targets the reference cell center.
    pub target: Option<[f32; 3]>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            eye: [2.0, 2.0, 2.0],
            target: None,
        }
    }
}

/// Orbit control settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per tick at 60 Hz.
    pub damping_factor: f32,
    /// Radians per pixel of drag.
    pub rotate_speed: f32,
    /// Zoom factor per scroll point.
    pub zoom_speed: f32,
    /// World units per pixel of drag at distance 1.
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.1,
            rotate_speed: 0.01,
            zoom_speed: 0.001,
            pan_speed: 0.002,
            min_distance: 0.5,
            max_distance: 100.0,
        }
    }
}

/// Reference grid settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Half extent of the grid.
    pub size: f32,
    pub spacing: f32,
    pub line_color: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 5.0,
            spacing: 0.5,
            line_color: [0.3, 0.3, 0.3],
        }
    }
}

/// Everything the scene manager needs at initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub grid: GridConfig,
    pub show_grid: bool,
    pub show_axes: bool,
    /// Length of the axes indicator.
    pub axes_length: f32,
    pub clear_color: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
            grid: GridConfig::default(),
            show_grid: true,
            show_axes: true,
            axes_length: 1.5,
            clear_color: [0.08, 0.08, 0.1],
        }
    }
}
