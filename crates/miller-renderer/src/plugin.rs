//! Registry of sub-renderers.

use crate::context::RenderContext;
use crate::scene::Scene;
use crate::traits::SubRenderer;

/// Sub-renderers kept in draw order.
///
/// Insertion keeps the list sorted by priority; equal priorities draw in
/// registration order.
#[derive(Default)]
pub struct RendererRegistry {
    entries: Vec<Box<dyn SubRenderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<R: SubRenderer + 'static>(&mut self, renderer: R) {
        let priority = renderer.priority();
        let at = self.entries.partition_point(|r| r.priority() <= priority);
        self.entries.insert(at, Box::new(renderer));
    }

    /// Names in draw order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|r| r.name()).collect()
    }

    pub fn init_all(&mut self, ctx: &RenderContext) {
        self.entries.iter_mut().for_each(|r| r.on_init(ctx));
    }

    pub fn resize_all(&mut self, ctx: &RenderContext, width: u32, height: u32) {
        self.entries
            .iter_mut()
            .for_each(|r| r.on_resize(ctx, width, height));
    }

    /// Let every sub-renderer sync its buffers with `scene`.
    pub fn prepare_all(&mut self, ctx: &RenderContext, scene: &Scene) {
        for renderer in self.entries.iter_mut() {
            renderer.prepare(ctx, scene);
        }
    }

    pub fn render_all<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, scene: &Scene) {
        for renderer in self.entries.iter() {
            renderer.render(pass, scene);
        }
    }

    /// Release GPU state and empty the registry.
    pub fn destroy_all(&mut self) {
        for mut renderer in self.entries.drain(..) {
            renderer.on_destroy();
        }
    }
}
