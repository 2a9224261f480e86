//! Reference cell outline.

use miller_core::ReferenceCell;

use super::batch::GeometryBatch;
use crate::constants::{colors, priorities};
use crate::context::RenderContext;
use crate::pipeline::PipelineConfig;
use crate::scene::{PersistentKind, Scene};
use crate::traits::SubRenderer;
use crate::vertex::{ColorVertex, opaque};

/// Draws the 12 edges of each visible reference cell.
pub struct UnitCellRenderer {
    batch: GeometryBatch,
}

impl UnitCellRenderer {
    pub fn new() -> Self {
        Self {
            batch: GeometryBatch::new("Unit Cell"),
        }
    }
}

impl Default for UnitCellRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubRenderer for UnitCellRenderer {
    fn name(&self) -> &str {
        "unit_cell"
    }

    fn priority(&self) -> i32 {
        priorities::UNIT_CELL
    }

    fn on_init(&mut self, ctx: &RenderContext) {
        let pipeline = PipelineConfig::new(
            "Unit Cell",
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
            if let PersistentKind::UnitCell(cell) = &node.kind {
                vertices.extend(generate_cell_vertices(cell, colors::UNIT_CELL));
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

pub fn generate_cell_vertices(cell: &ReferenceCell, color: [f32; 3]) -> Vec<ColorVertex> {
    let color = opaque(color);
    cell.edges()
        .into_iter()
        .flat_map(|(a, b)| [ColorVertex::new(a, color), ColorVertex::new(b, color)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_outline_stays_in_cell() {
        let vertices = generate_cell_vertices(&ReferenceCell::unit(), [1.0; 3]);
        assert_eq!(vertices.len(), 24);
        for v in &vertices {
            assert!(v.position.iter().all(|c| *c == 0.0 || *c == 1.0));
        }
    }
}
