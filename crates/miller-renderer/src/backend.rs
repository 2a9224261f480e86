//! Seam between the scene manager and whatever draws the scene.

use crate::camera::CameraUniform;
use crate::manager::SceneError;
use crate::scene::Scene;

/// Something that can draw a [`Scene`] into an output of a given size.
///
/// [`crate::WgpuRenderer`] is the production implementation. Keeping the
/// manager generic over this trait lets its lifecycle be exercised without
/// a GPU.
pub trait RenderBackend {
    /// Current output size in pixels.
    fn output_size(&self) -> (u32, u32);

    /// Resize the output. Both dimensions are non-zero.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame.
    fn render(&mut self, scene: &Scene, camera: &CameraUniform) -> Result<(), SceneError>;

    /// Release every GPU resource. Called exactly once.
    fn release(&mut self);
}
