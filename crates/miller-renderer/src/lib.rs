//! Miller Visualizer Renderer
//!
//! Scene lifecycle and WGPU-based 3D rendering.
//!
//! # Architecture
//!
//! - [`manager::SceneManager`] - Owns scene, camera, controls and backend
//! - [`scene::Scene`] - Persistent nodes plus a single transient slot
//! - [`backend::RenderBackend`] - Seam between the scene and the GPU
//! - [`renderer::WgpuRenderer`] - Offscreen wgpu backend
//! - [`traits::SubRenderer`] - Trait for the per-element renderers
//! - [`plugin::RendererRegistry`] - Priority-ordered sub-renderer registry
//!
//! # Example
//!
//! ```ignore
//! use miller_renderer::{SceneConfig, SceneManager, ViewportSize, WgpuRenderer};
//!
//! let backend = WgpuRenderer::new(device, queue, format, 800, 600);
//! let mut manager = SceneManager::initialize(ViewportSize::new(800, 600), &config, backend)?;
//!
//! manager.set_transient_node(Some(node));
//! manager.render_loop_tick(dt)?;
//! manager.dispose();
//! ```

pub mod backend;
pub mod camera;
pub mod config;
pub mod constants;
pub mod context;
pub mod controls;
pub mod manager;
pub mod pipeline;
pub mod plugin;
pub mod renderer;
pub mod scene;
pub mod sub_renderers;
pub mod traits;
pub mod vertex;

pub use backend::RenderBackend;
pub use camera::{Camera, CameraUniform};
pub use config::{CameraConfig, ControlsConfig, GridConfig, SceneConfig};
pub use context::RenderContext;
pub use controls::OrbitControls;
pub use manager::{SceneError, SceneManager, ViewportSize};
pub use plugin::RendererRegistry;
pub use renderer::WgpuRenderer;
pub use scene::{NodeClass, PersistentKind, PersistentNode, Scene};
pub use traits::SubRenderer;
pub use vertex::ColorVertex;
