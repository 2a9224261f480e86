//! Direction arrow.

use glam::Vec3;
use miller_core::{ArrowNode, math};

use super::batch::GeometryBatch;
use crate::constants::{arrow, priorities};
use crate::context::RenderContext;
use crate::pipeline::PipelineConfig;
use crate::scene::Scene;
use crate::traits::SubRenderer;
use crate::vertex::ColorVertex;

/// Draws the transient arrow, if any, as a cylinder shaft plus cone head.
pub struct ArrowRenderer {
    batch: GeometryBatch,
}

impl ArrowRenderer {
    pub fn new() -> Self {
        Self {
            batch: GeometryBatch::new("Arrow"),
        }
    }
}

impl Default for ArrowRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubRenderer for ArrowRenderer {
    fn name(&self) -> &str {
        "arrow"
    }

    fn priority(&self) -> i32 {
        priorities::ARROW
    }

    fn on_init(&mut self, ctx: &RenderContext) {
        let pipeline = PipelineConfig::new(
            "Arrow",
            include_str!("../shaders/colored.wgsl"),
            ctx.color_format(),
            ctx.depth_format(),
            &[ctx.camera().layout()],
        )
        .with_vertex_layouts(vec![ColorVertex::layout()])
        .with_topology(wgpu::PrimitiveTopology::TriangleList)
        .build(ctx.device());

        self.batch.init(ctx, pipeline);
    }

    fn prepare(&mut self, ctx: &RenderContext, scene: &Scene) {
        if !self.batch.is_stale(scene) {
            return;
        }
        let vertices = scene
            .transient_node()
            .and_then(|node| node.as_arrow())
            .map(generate_arrow_vertices)
            .unwrap_or_default();
        self.batch.upload(ctx, scene, &vertices);
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, _scene: &Scene) {
        self.batch.draw(pass);
    }

    fn on_destroy(&mut self) {
        self.batch.destroy();
    }
}

/// Triangle list for the shaft and head.
pub fn generate_arrow_vertices(node: &ArrowNode) -> Vec<ColorVertex> {
    let mut triangles = shaft_triangles(node, arrow::SHAFT_SEGMENTS);
    triangles.extend(node.head_triangles(arrow::HEAD_SEGMENTS));
    triangles
        .into_iter()
        .flatten()
        .map(|p| ColorVertex::new(p, node.color))
        .collect()
}

/// Open cylinder from the origin to where the head starts.
fn shaft_triangles(node: &ArrowNode, segments: usize) -> Vec<[Vec3; 3]> {
    let segments = segments.max(3);
    let radius = node.head_radius * arrow::SHAFT_RADIUS_RATIO;
    let rotation = math::shortest_arc(Vec3::Z, node.direction);
    let start = node.origin;
    let end = node.shaft_end();

    let ring: Vec<Vec3> = (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            let (s, c) = angle.sin_cos();
            rotation * Vec3::new(c * radius, s * radius, 0.0)
        })
        .collect();

    let mut triangles = Vec::with_capacity(segments * 2);
    for i in 0..segments {
        let a = ring[i];
        let b = ring[(i + 1) % segments];
        triangles.push([start + a, start + b, end + b]);
        triangles.push([start + a, end + b, end + a]);
    }
    triangles
}
