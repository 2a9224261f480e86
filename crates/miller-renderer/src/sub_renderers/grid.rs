//! Grid sub-renderer.

use glam::Vec3;

use super::batch::GeometryBatch;
use crate::constants::priorities;
use crate::context::RenderContext;
use crate::pipeline::PipelineConfig;
use crate::scene::{PersistentKind, Scene};
use crate::traits::SubRenderer;
use crate::vertex::{ColorVertex, opaque};

/// Square grid lying in the z = 0 plane.
pub struct GridSubRenderer {
    batch: GeometryBatch,
}

impl GridSubRenderer {
    pub fn new() -> Self {
        Self {
            batch: GeometryBatch::new("Grid"),
        }
    }
}

impl Default for GridSubRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubRenderer for GridSubRenderer {
    fn name(&self) -> &str {
        "grid"
    }

    fn priority(&self) -> i32 {
        priorities::GRID
    }

    fn on_init(&mut self, ctx: &RenderContext) {
        let pipeline = PipelineConfig::new(
            "Grid",
            include_str!("../shaders/colored.wgsl"),
            ctx.color_format(),
            ctx.depth_format(),
            &[ctx.camera().layout()],
        )
        .with_vertex_layouts(vec![ColorVertex::layout()])
        .with_topology(wgpu::PrimitiveTopology::LineList)
        .build(ctx.device());

        self.batch.init(ctx, pipeline);
    }

    fn prepare(&mut self, ctx: &RenderContext, scene: &Scene) {
        if !self.batch.is_stale(scene) {
            return;
        }
        let mut vertices = Vec::new();
        for node in scene.persistent().iter().filter(|n| n.visible) {
            if let PersistentKind::Grid {
                size,
                spacing,
                color,
            } = node.kind
            {
                vertices.extend(generate_grid_vertices(size, spacing, color));
            }
        }
        self.batch.upload(ctx, scene, &vertices);
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, _scene: &Scene) {
        self.batch.draw(pass);
    }

    fn on_destroy(&mut self) {
        self.batch.destroy();
    }
}

/// Line pairs for a grid spanning `-size..=size` on X and Y.
pub fn generate_grid_vertices(size: f32, spacing: f32, color: [f32; 3]) -> Vec<ColorVertex> {
    if !(size > 0.0 && spacing > 0.0) {
        return Vec::new();
    }
    let color = opaque(color);
    let steps = (size / spacing).floor() as i32;
    let mut vertices = Vec::with_capacity(((steps * 2 + 1) * 4) as usize);

    for i in -steps..=steps {
        let t = i as f32 * spacing;
        vertices.push(ColorVertex::new(Vec3::new(t, -size, 0.0), color));
        vertices.push(ColorVertex::new(Vec3::new(t, size, 0.0), color));
        vertices.push(ColorVertex::new(Vec3::new(-size, t, 0.0), color));
        vertices.push(ColorVertex::new(Vec3::new(size, t, 0.0), color));
    }
    vertices
}
