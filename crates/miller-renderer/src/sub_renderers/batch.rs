//! GPU state shared by the built-in sub-renderers.

use crate::context::RenderContext;
use crate::scene::Scene;
use crate::vertex::ColorVertex;

/// One pipeline plus one vertex buffer rebuilt from the scene on change.
pub(crate) struct GeometryBatch {
    label: &'static str,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    revision: Option<u64>,
}

impl GeometryBatch {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            pipeline: None,
            bind_group: None,
            vertex_buffer: None,
            vertex_count: 0,
            revision: None,
        }
    }

    pub(crate) fn init(&mut self, ctx: &RenderContext, pipeline: wgpu::RenderPipeline) {
        self.bind_group = Some(ctx.camera().bind_group(ctx.device(), self.label));
        self.pipeline = Some(pipeline);
        self.revision = None;
    }

    /// True when the buffer was built from an older scene revision.
    pub(crate) fn is_stale(&self, scene: &Scene) -> bool {
        self.revision != Some(scene.revision())
    }

    /// Replace the vertex buffer. An empty slice leaves nothing to draw.
    pub(crate) fn upload(&mut self, ctx: &RenderContext, scene: &Scene, vertices: &[ColorVertex]) {
        if let Some(buffer) = self.vertex_buffer.take() {
            buffer.destroy();
        }
        self.vertex_count = vertices.len() as u32;
        if !vertices.is_empty() {
            self.vertex_buffer = Some(ctx.create_vertex_buffer(
                &format!("{} Vertex Buffer", self.label),
                bytemuck::cast_slice(vertices),
            ));
        }
        self.revision = Some(scene.revision());
    }

    pub(crate) fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        let (Some(pipeline), Some(bind_group), Some(buffer)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.vertex_buffer.as_ref(),
        ) else {
            return;
        };

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.set_vertex_buffer(0, buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }

    pub(crate) fn destroy(&mut self) {
        if let Some(buffer) = self.vertex_buffer.take() {
            buffer.destroy();
        }
        self.vertex_count = 0;
        self.pipeline = None;
        self.bind_group = None;
        self.revision = None;
    }
}
