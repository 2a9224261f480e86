//! Viewport texture registration with egui.

use miller_renderer::WgpuRenderer;

/// The renderer's color target as seen by egui.
///
/// The renderer recreates its targets on resize; the registration follows
/// its generation counter.
#[derive(Default)]
pub struct ViewportTexture {
    texture_id: Option<egui::TextureId>,
    generation: Option<u64>,
}

impl ViewportTexture {
    /// Texture id for the current color target, registering it if needed.
    pub fn sync(
        &mut self,
        renderer: &WgpuRenderer,
        device: &wgpu::Device,
        egui_renderer: &mut egui_wgpu::Renderer,
    ) -> egui::TextureId {
        if let (Some(id), Some(generation)) = (self.texture_id, self.generation) {
            if generation == renderer.generation() {
                return id;
            }
        }

        self.free(egui_renderer);
        let id = egui_renderer.register_native_texture(
            device,
            renderer.color_view(),
            wgpu::FilterMode::Linear,
        );
        tracing::debug!("Registered viewport texture {:?}", id);
        self.texture_id = Some(id);
        self.generation = Some(renderer.generation());
        id
    }

    pub fn free(&mut self, egui_renderer: &mut egui_wgpu::Renderer) {
        if let Some(id) = self.texture_id.take() {
            egui_renderer.free_texture(&id);
        }
        self.generation = None;
    }
}
