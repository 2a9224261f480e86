//! Coordinate axes indicator.

use glam::Vec3;

use super::batch::GeometryBatch;
use crate::constants::{colors, priorities};
use crate::context::RenderContext;
use crate::pipeline::PipelineConfig;
use crate::scene::{PersistentKind, Scene};
use crate::traits::SubRenderer;
use crate::vertex::{ColorVertex, opaque};

/// X/Y/Z lines from the origin.
pub struct AxisRenderer {
    batch: GeometryBatch,
}

impl AxisRenderer {
    pub fn new() -> Self {
        Self {
            batch: GeometryBatch::new("Axis"),
        }
    }
}

impl Default for AxisRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubRenderer for AxisRenderer {
    fn name(&self) -> &str {
        "axis"
    }

    fn priority(&self) -> i32 {
        priorities::AXIS
    }

    fn on_init(&mut self, ctx: &RenderContext) {
        let pipeline = PipelineConfig::new(
            "Axis",
            include_str!("../shaders/colored.wgsl"),
            ctx.color_format(),
            ctx.depth_format(),
            &[ctx.camera().layout()],
        )
        .with_vertex_layouts(vec![ColorVertex::layout()])
        .with_topology(wgpu::PrimitiveTopology::LineList)
        .with_blend(Some(wgpu::BlendState::REPLACE))
        .build(ctx.device());

        self.batch.init(ctx, pipeline);
    }

    fn prepare(&mut self, ctx: &RenderContext, scene: &Scene) {
        if !self.batch.is_stale(scene) {
            return;
        }
        let mut vertices = Vec::new();
        for node in scene.persistent().iter().filter(|n| n.visible) {
            if let PersistentKind::Axes { length } = node.kind {
                vertices.extend(generate_axis_vertices(length));
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

/// X red, Y green, Z blue.
pub fn generate_axis_vertices(length: f32) -> Vec<ColorVertex> {
    [
        (Vec3::X, colors::AXIS_X),
        (Vec3::Y, colors::AXIS_Y),
        (Vec3::Z, colors::AXIS_Z),
    ]
    .into_iter()
    .flat_map(|(axis, color)| {
        let color = opaque(color);
        [
            ColorVertex::new(Vec3::ZERO, color),
            ColorVertex::new(axis * length, color),
        ]
    })
    .collect()
}
