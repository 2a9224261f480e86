//! Renderer constants.

/// Offscreen viewport settings.
pub mod viewport {
    /// MSAA sample count. 1 keeps the offscreen target directly sampleable.
    pub const SAMPLE_COUNT: u32 = 1;

    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
}

/// Colors of the persistent reference content.
pub mod colors {
    pub const AXIS_X: [f32; 3] = [0.9, 0.2, 0.2];
    pub const AXIS_Y: [f32; 3] = [0.2, 0.8, 0.2];
    pub const AXIS_Z: [f32; 3] = [0.2, 0.4, 0.95];
    pub const UNIT_CELL: [f32; 3] = [0.85, 0.85, 0.85];
}

/// Tessellation of the arrow.
pub mod arrow {
    pub const HEAD_SEGMENTS: usize = 24;
    pub const SHAFT_SEGMENTS: usize = 12;
    /// Shaft radius relative to the head radius.
    pub const SHAFT_RADIUS_RATIO: f32 = 0.35;
}

/// Render priorities for sub-renderers.
///
/// Lower values are rendered first. Opaque line work goes before the
/// translucent plane so the plane blends over it.
pub mod priorities {
    pub const GRID: i32 = 0;
    pub const UNIT_CELL: i32 = 50;
    pub const ARROW: i32 = 100;
    pub const AXIS: i32 = 200;
    /// Translucent, drawn last.
    pub const PLANE: i32 = 400;
}
