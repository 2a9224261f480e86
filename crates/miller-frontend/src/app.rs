//! Main application.

use miller_core::{GeometryMapper, ReferenceCell, SubmissionId};
use miller_renderer::{SceneError, ViewportSize, WgpuRenderer};

use crate::client::dispatcher_for;
use crate::config::{ParserMode, SharedConfig, create_shared_config};
use crate::viewport::{SubmissionOutcome, Viewport};
use crate::viewport_state::ViewportTexture;

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(235, 87, 87);

/// Text under the input field.
#[derive(Debug, Clone, PartialEq)]
enum Status {
    Hint,
    Pending(String),
    Showing(String),
    Error(String),
}

/// Miller index visualizer application.
pub struct MillerApp {
    config: SharedConfig,
    render_state: Option<egui_wgpu::RenderState>,
    viewport: Viewport<WgpuRenderer>,
    texture: ViewportTexture,
    input: String,
    /// Latest submission and its text.
    pending: Option<(SubmissionId, String)>,
    status: Status,
}

impl MillerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = create_shared_config();
        let viewport = {
            let guard = config.read();
            let app_config = guard.config();
            Viewport::new(
                app_config.scene.clone(),
                GeometryMapper::new(app_config.style.clone(), ReferenceCell::unit()),
                dispatcher_for(&app_config.parser),
            )
        };

        let status = if cc.wgpu_render_state.is_some() {
            Status::Hint
        } else {
            Status::Error("wgpu is not available, the viewport cannot be drawn".to_string())
        };

        Self {
            config,
            render_state: cc.wgpu_render_state.clone(),
            viewport,
            texture: ViewportTexture::default(),
            input: String::new(),
            pending: None,
            status,
        }
    }

    fn submit(&mut self) {
        let input = self.input.trim().to_string();
        match self.viewport.submit(&input) {
            Ok(id) => {
                self.status = Status::Pending(input.clone());
                self.pending = Some((id, input));
            }
            Err(e) => self.status = Status::Error(e.to_string()),
        }
    }

    fn handle_outcomes(&mut self) {
        for outcome in self.viewport.poll() {
            let input = self
                .pending
                .as_ref()
                .filter(|(id, _)| *id == outcome.id())
                .map(|(_, input)| input.clone())
                .unwrap_or_default();

            match outcome {
                SubmissionOutcome::Applied { kind, .. } => {
                    self.status = Status::Showing(format!("Showing {kind} {input}"));
                }
                SubmissionOutcome::Failed { error, .. } => {
                    self.status = Status::Error(format!("{input}: {error}"));
                }
                SubmissionOutcome::Stale { .. } => {}
            }
        }
    }

    fn set_parser_mode(&mut self, mode: ParserMode) {
        let parser = {
            let mut config = self.config.write();
            config.config_mut().parser.mode = mode;
            config.config().parser.clone()
        };
        self.viewport.set_dispatcher(dispatcher_for(&parser));
        self.save_config();
    }

    fn set_persistent_visible(&mut self, name: &str, visible: bool) {
        if let Some(manager) = self.viewport.manager_mut() {
            manager.set_persistent_visible(name, visible);
        }
        {
            let mut config = self.config.write();
            let scene = &mut config.config_mut().scene;
            match name {
                "grid" => scene.show_grid = visible,
                "axes" => scene.show_axes = visible,
                _ => {}
            }
        }
        self.save_config();
    }

    fn save_config(&self) {
        if let Err(e) = self.config.write().save() {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    fn show_input_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("input_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.input)
                        .hint_text("(111) or [1-10]")
                        .desired_width(220.0),
                );
                let entered =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Visualize").clicked() || entered {
                    self.submit();
                }

                ui.separator();

                let current = self.config.read().config().parser.mode;
                let mut mode = current;
                egui::ComboBox::from_id_salt("parser_mode")
                    .selected_text(mode.label())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut mode, ParserMode::Http, ParserMode::Http.label());
                        ui.selectable_value(&mut mode, ParserMode::Local, ParserMode::Local.label());
                    });
                if mode != current {
                    self.set_parser_mode(mode);
                }

                let (mut show_grid, mut show_axes) = {
                    let config = self.config.read();
                    (config.config().scene.show_grid, config.config().scene.show_axes)
                };
                if ui.checkbox(&mut show_grid, "Grid").changed() {
                    self.set_persistent_visible("grid", show_grid);
                }
                if ui.checkbox(&mut show_axes, "Axes").changed() {
                    self.set_persistent_visible("axes", show_axes);
                }
            });

            match &self.status {
                Status::Hint => {
                    ui.weak("Planes use parentheses, directions use brackets");
                }
                Status::Pending(input) => {
                    ui.label(format!("Parsing {input}..."));
                }
                Status::Showing(text) => {
                    ui.label(text);
                }
                Status::Error(text) => {
                    ui.colored_label(ERROR_COLOR, text);
                }
            }
            ui.add_space(4.0);
        });
    }

    fn show_viewport(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
                let Some(render_state) = self.render_state.clone() else {
                    return;
                };

                let scale = ctx.pixels_per_point();
                let size = ViewportSize::new(
                    (rect.width() * scale).round() as u32,
                    (rect.height() * scale).round() as u32,
                );
                if size.is_empty() {
                    return;
                }

                if !self.viewport.is_initialized() {
                    let mut backend = WgpuRenderer::new(
                        render_state.device.clone(),
                        render_state.queue.clone(),
                        render_state.target_format,
                        size.width,
                        size.height,
                    );
                    backend.set_clear_color(self.config.read().config().scene.clear_color);
                    if let Err(e) = self.viewport.initialize(size, backend) {
                        self.status = Status::Error(e.to_string());
                        return;
                    }
                } else if let Err(e) = self.viewport.resize(size) {
                    tracing::debug!("Resize skipped: {}", e);
                }

                if let Some(manager) = self.viewport.manager_mut() {
                    if response.dragged_by(egui::PointerButton::Primary) {
                        let delta = response.drag_delta();
                        manager.orbit(delta.x, delta.y);
                    }
                    if response.dragged_by(egui::PointerButton::Secondary) {
                        let delta = response.drag_delta();
                        manager.pan(delta.x, delta.y);
                    }
                    if response.hovered() {
                        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                        if scroll != 0.0 {
                            manager.zoom(scroll);
                        }
                    }
                }

                let dt = ctx.input(|i| i.stable_dt);
                match self.viewport.tick(dt) {
                    Ok(()) => {}
                    Err(SceneError::NotInitialized) => return,
                    Err(e) => {
                        self.status = Status::Error(e.to_string());
                        return;
                    }
                }

                let Some(manager) = self.viewport.manager() else {
                    return;
                };
                let texture_id = self.texture.sync(
                    manager.backend(),
                    &render_state.device,
                    &mut render_state.renderer.write(),
                );

                ui.painter().image(
                    texture_id,
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            });
    }
}

impl eframe::App for MillerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_outcomes();
        self.show_input_panel(ctx);
        self.show_viewport(ctx);

        // continuous render loop
        ctx.request_repaint();
    }
}

impl Drop for MillerApp {
    fn drop(&mut self) {
        if let Some(render_state) = &self.render_state {
            self.texture.free(&mut render_state.renderer.write());
        }
        self.viewport.dispose();
        self.save_config();
    }
}
