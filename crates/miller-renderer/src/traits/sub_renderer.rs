//! SubRenderer trait definition.

use crate::context::RenderContext;
use crate::scene::Scene;

/// Draws one kind of scene element into the shared pass.
///
/// Lower priorities draw first. Opaque line work sits at the bottom and the
/// translucent plane at the top so it blends over everything else; see
/// [`crate::constants::priorities`].
pub trait SubRenderer: Send + Sync {
    /// Stable name, unique within a registry.
    fn name(&self) -> &str;

    fn priority(&self) -> i32;

    /// Build pipelines and bind groups.
    fn on_init(&mut self, ctx: &RenderContext);

    fn on_resize(&mut self, _ctx: &RenderContext, _width: u32, _height: u32) {}

    /// Runs before the pass opens. Rebuild vertex data when
    /// [`Scene::revision`] moved.
    fn prepare(&mut self, ctx: &RenderContext, scene: &Scene);

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, scene: &Scene);

    /// Free GPU buffers. Called once, when the registry is torn down.
    fn on_destroy(&mut self) {}
}
