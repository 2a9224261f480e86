//! Offscreen wgpu renderer.

mod gpu_resources;

pub use gpu_resources::*;

use std::sync::Arc;

use tracing::{debug, info};

use crate::backend::RenderBackend;
use crate::camera::CameraUniform;
use crate::context::RenderContext;
use crate::manager::SceneError;
use crate::plugin::RendererRegistry;
use crate::scene::Scene;
use crate::sub_renderers;

/// Draws the scene into an offscreen texture through the sub-renderers.
///
/// The host samples [`WgpuRenderer::color_view`]. It changes whenever the
/// targets are recreated, which [`WgpuRenderer::generation`] reports.
pub struct WgpuRenderer {
    context: RenderContext,
    registry: RendererRegistry,
    targets: RenderTargets,
    clear_color: wgpu::Color,
    generation: u64,
    released: bool,
}

impl WgpuRenderer {
    /// Renderer with every built-in sub-renderer registered.
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let mut registry = sub_renderers::default_registry();
        let context = RenderContext::new(device, queue, format);
        let targets = RenderTargets::new(context.device(), format, width, height);
        registry.init_all(&context);

        info!(
            "Renderer ready: {:?} {}x{}, sub-renderers {:?}",
            format,
            width,
            height,
            registry.names()
        );

        Self {
            context,
            registry,
            targets,
            clear_color: wgpu::Color::BLACK,
            generation: 0,
            released: false,
        }
    }

    pub fn set_clear_color(&mut self, rgb: [f32; 3]) {
        self.clear_color = wgpu::Color {
            r: rgb[0] as f64,
            g: rgb[1] as f64,
            b: rgb[2] as f64,
            a: 1.0,
        };
    }

    pub fn color_view(&self) -> &wgpu::TextureView {
        self.targets.color_view()
    }

    /// Incremented every time the offscreen targets are recreated.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl RenderBackend for WgpuRenderer {
    fn output_size(&self) -> (u32, u32) {
        self.targets.size()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.released || self.targets.size() == (width, height) {
            return;
        }
        self.targets.destroy();
        self.targets = RenderTargets::new(
            self.context.device(),
            self.context.color_format(),
            width,
            height,
        );
        self.registry.resize_all(&self.context, width, height);
        self.generation += 1;
        debug!(
            "Render targets recreated at {}x{} (generation {})",
            width, height, self.generation
        );
    }

    fn render(&mut self, scene: &Scene, camera: &CameraUniform) -> Result<(), SceneError> {
        if self.released {
            return Err(SceneError::Render("renderer has been released".into()));
        }

        self.context.update_camera(camera);
        self.registry.prepare_all(&self.context, scene);

        let mut encoder =
            self.context
                .device()
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Viewport Render Encoder"),
                });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Viewport Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.targets.color_view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.targets.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.registry.render_all(&mut pass, scene);
        }

        self.context.queue().submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.registry.destroy_all();
        self.targets.destroy();
        self.context.destroy();
        info!("Renderer released");
    }
}
