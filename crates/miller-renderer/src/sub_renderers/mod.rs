//! Built-in sub-renderers.
//!
//! - [`GridSubRenderer`]: reference grid in the z = 0 plane
//! - [`UnitCellRenderer`]: edges of the reference cell
//! - [`ArrowRenderer`]: the transient direction arrow
//! - [`AxisRenderer`]: X/Y/Z indicator at the origin
//! - [`PlaneRenderer`]: the transient translucent plane patch

mod batch;

pub mod arrow;
pub mod axis;
pub mod grid;
pub mod plane;
pub mod unit_cell;

pub use arrow::ArrowRenderer;
pub use axis::AxisRenderer;
pub use grid::GridSubRenderer;
pub use plane::PlaneRenderer;
pub use unit_cell::UnitCellRenderer;

use crate::plugin::RendererRegistry;

/// Registry holding every built-in sub-renderer.
pub fn default_registry() -> RendererRegistry {
    let mut registry = RendererRegistry::new();
    registry.register(GridSubRenderer::new());
    registry.register(UnitCellRenderer::new());
    registry.register(ArrowRenderer::new());
    registry.register(AxisRenderer::new());
    registry.register(PlaneRenderer::new());
    registry
}
