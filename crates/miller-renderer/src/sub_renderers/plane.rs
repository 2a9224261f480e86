//! Translucent plane patch.

use miller_core::PlaneNode;

use super::batch::GeometryBatch;
use crate::constants::priorities;
use crate::context::RenderContext;
use crate::pipeline::PipelineConfig;
use crate::scene::Scene;
use crate::traits::SubRenderer;
use crate::vertex::ColorVertex;

/// Draws the transient plane, if any.
///
/// Depth tested without depth writes so geometry behind the patch stays
/// visible through it. Runs last.
pub struct PlaneRenderer {
    double_sided: GeometryBatch,
    single_sided: GeometryBatch,
}

impl PlaneRenderer {
    pub fn new() -> Self {
        Self {
            double_sided: GeometryBatch::new("Plane"),
            single_sided: GeometryBatch::new("Plane Culled"),
        }
    }

    fn pipeline(ctx: &RenderContext, label: &str, cull_mode: Option<wgpu::Face>) -> wgpu::RenderPipeline {
        PipelineConfig::new(
            label,
            include_str!("../shaders/colored.wgsl"),
            ctx.color_format(),
            ctx.depth_format(),
            &[ctx.camera().layout()],
        )
        .with_vertex_layouts(vec![ColorVertex::layout()])
        .with_topology(wgpu::PrimitiveTopology::TriangleList)
        .with_cull_mode(cull_mode)
        .with_blend(Some(wgpu::BlendState::ALPHA_BLENDING))
        .with_depth_write(false)
        .build(ctx.device())
    }
}

impl Default for PlaneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubRenderer for PlaneRenderer {
    fn name(&self) -> &str {
        "plane"
    }

    fn priority(&self) -> i32 {
        priorities::PLANE
    }

    fn on_init(&mut self, ctx: &RenderContext) {
        self.double_sided
            .init(ctx, Self::pipeline(ctx, "Plane", None));
        self.single_sided
            .init(ctx, Self::pipeline(ctx, "Plane Culled", Some(wgpu::Face::Back)));
    }

    fn prepare(&mut self, ctx: &RenderContext, scene: &Scene) {
        if !self.double_sided.is_stale(scene) {
            return;
        }
        let plane = scene.transient_node().and_then(|node| node.as_plane());
        let vertices = plane.map(generate_plane_vertices).unwrap_or_default();
        let double_sided = plane.is_some_and(|p| p.double_sided);

        let (active, idle) = if double_sided {
            (&mut self.double_sided, &mut self.single_sided)
        } else {
            (&mut self.single_sided, &mut self.double_sided)
        };
        active.upload(ctx, scene, &vertices);
        idle.upload(ctx, scene, &[]);
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, _scene: &Scene) {
        self.double_sided.draw(pass);
        self.single_sided.draw(pass);
    }

    fn on_destroy(&mut self) {
        self.double_sided.destroy();
        self.single_sided.destroy();
    }
}

/// Two triangles, counter-clockwise seen from the normal side.
pub fn generate_plane_vertices(plane: &PlaneNode) -> Vec<ColorVertex> {
    plane
        .triangles()
        .into_iter()
        .flatten()
        .map(|p| ColorVertex::new(p, plane.color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;
    use miller_core::{GeometryMapper, IndexRecord};

    #[test]
    fn test_plane_vertices_lie_in_plane() {
        let node = GeometryMapper::default()
            .map(&IndexRecord::plane(Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.5)))
            .unwrap();
        let plane = node.as_plane().unwrap();
        let vertices = generate_plane_vertices(plane);
        assert_eq!(vertices.len(), 6);

        for v in &vertices {
            let offset = Vec3::from(v.position) - plane.position;
            assert_relative_eq!(offset.dot(plane.normal), 0.0, epsilon = 1e-5);
            assert_eq!(v.color, plane.color);
        }
    }

    #[test]
    fn test_plane_winding_faces_normal() {
        let node = GeometryMapper::default()
            .map(&IndexRecord::plane(Vec3::Z, Vec3::Z))
            .unwrap();
        let plane = node.as_plane().unwrap();
        let vertices = generate_plane_vertices(plane);
        let [a, b, c] = [0, 1, 2].map(|i| Vec3::from(vertices[i].position));
        assert!((b - a).cross(c - a).dot(plane.normal) > 0.0);
    }
}
