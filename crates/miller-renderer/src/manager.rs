//! Scene lifecycle: initialize, tick, resize, replace the visualization,
//! dispose.

use glam::Vec3;
use thiserror::Error;
use tracing::{debug, info};

use miller_core::{ReferenceCell, TransientNode};

use crate::backend::RenderBackend;
use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::controls::OrbitControls;
use crate::scene::Scene;

/// Errors raised by the scene lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("scene is already initialized")]
    AlreadyInitialized,
    #[error("scene is not initialized")]
    NotInitialized,
    #[error("invalid viewport size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("render failed: {0}")]
    Render(String),
}

/// Size of the drawing area in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    fn validate(self) -> Result<Self, SceneError> {
        if self.is_empty() {
            return Err(SceneError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Owns the scene, camera, orbit controls and render backend.
///
/// Created by [`SceneManager::initialize`] and torn down by
/// [`SceneManager::dispose`]. Dropping a manager without disposing it
/// releases the backend all the same.
pub struct SceneManager<B: RenderBackend> {
    scene: Scene,
    camera: Camera,
    controls: OrbitControls,
    backend: B,
    frames: u64,
    released: bool,
}

impl<B: RenderBackend> SceneManager<B> {
    /// Build the scene with its persistent content and size the backend.
    pub fn initialize(
        size: ViewportSize,
        config: &SceneConfig,
        mut backend: B,
    ) -> Result<Self, SceneError> {
        let size = size.validate()?;
        let cell = ReferenceCell::unit();
        let target = config
            .camera
            .target
            .map(Vec3::from)
            .unwrap_or_else(|| cell.center());

        let scene = Scene::with_reference_content(config, cell);
        let camera = Camera::new(&config.camera, target, size.aspect());
        let controls = OrbitControls::new(config.controls.clone(), &camera);

        if backend.output_size() != (size.width, size.height) {
            backend.resize(size.width, size.height);
        }

        info!(
            "Scene initialized at {}x{} with {} persistent nodes",
            size.width,
            size.height,
            scene.persistent().len()
        );

        Ok(Self {
            scene,
            camera,
            controls,
            backend,
            frames: 0,
            released: false,
        })
    }

    /// Advance the controls by `dt` seconds and draw one frame.
    pub fn render_loop_tick(&mut self, dt: f32) -> Result<(), SceneError> {
        self.controls.update(&mut self.camera, dt);
        self.backend.render(&self.scene, &self.camera.uniform())?;
        self.frames += 1;
        Ok(())
    }

    /// Match the camera aspect and the backend output to `size`.
    ///
    /// A zero dimension leaves everything as it was.
    pub fn resize(&mut self, size: ViewportSize) -> Result<(), SceneError> {
        let size = size.validate()?;
        self.camera.update_aspect(size.aspect());
        if self.backend.output_size() != (size.width, size.height) {
            self.backend.resize(size.width, size.height);
            debug!("Viewport resized to {}x{}", size.width, size.height);
        }
        Ok(())
    }

    /// Replace the current visualization, returning the previous one.
    pub fn set_transient_node(&mut self, node: Option<TransientNode>) -> Option<TransientNode> {
        self.scene.replace_transient(node)
    }

    /// Stop rendering and release the backend.
    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.scene.replace_transient(None);
        self.backend.release();
        info!("Scene disposed after {} frames", self.frames);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Toggle persistent content such as `"grid"` or `"axes"`.
    pub fn set_persistent_visible(&mut self, name: &str, visible: bool) {
        self.scene.set_persistent_visible(name, visible);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Orbit from a pointer drag.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.controls.rotate(dx, dy);
    }

    /// Pan from a pointer drag.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.controls.pan(dx, dy, &self.camera);
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.controls.zoom(scroll);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<B: RenderBackend> Drop for SceneManager<B> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraUniform;
    use crate::scene::NodeClass;
    use approx::assert_relative_eq;
    use miller_core::{GeometryMapper, IndexRecord};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeBackend {
        size: (u32, u32),
        renders: usize,
        released: Rc<Cell<usize>>,
        last_transient: Option<bool>,
    }

    impl RenderBackend for FakeBackend {
        fn output_size(&self) -> (u32, u32) {
            self.size
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn render(&mut self, scene: &Scene, _camera: &CameraUniform) -> Result<(), SceneError> {
            self.renders += 1;
            self.last_transient = Some(scene.transient().is_some());
            Ok(())
        }

        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn manager(width: u32, height: u32) -> SceneManager<FakeBackend> {
        SceneManager::initialize(
            ViewportSize::new(width, height),
            &SceneConfig::default(),
            FakeBackend::default(),
        )
        .unwrap()
    }

    fn arrow() -> TransientNode {
        GeometryMapper::default()
            .map(&IndexRecord::direction(Vec3::ONE))
            .unwrap()
    }

    #[test]
    fn test_initialize_adds_persistent_nodes() {
        let manager = manager(800, 600);
        assert_eq!(manager.scene().count(NodeClass::Persistent), 3);
        assert_eq!(manager.scene().count(NodeClass::Transient), 0);
        assert_eq!(manager.backend().output_size(), (800, 600));
        assert_relative_eq!(manager.camera().aspect, 800.0 / 600.0);
        assert_eq!(manager.camera().target, Vec3::splat(0.5));
    }

    #[test]
    fn test_initialize_rejects_empty_size() {
        let result = SceneManager::initialize(
            ViewportSize::new(0, 600),
            &SceneConfig::default(),
            FakeBackend::default(),
        );
        assert!(matches!(result, Err(SceneError::InvalidSize { width: 0, .. })));
    }

    #[test]
    fn test_resize_updates_aspect_and_output() {
        let mut manager = manager(800, 600);
        manager.resize(ViewportSize::new(1024, 256)).unwrap();
        assert_relative_eq!(manager.camera().aspect, 4.0);
        assert_eq!(manager.backend().output_size(), (1024, 256));
    }

    #[test]
    fn test_zero_resize_is_ignored() {
        let mut manager = manager(800, 600);
        let err = manager.resize(ViewportSize::new(800, 0)).unwrap_err();
        assert_eq!(
            err,
            SceneError::InvalidSize {
                width: 800,
                height: 0
            }
        );
        assert_eq!(manager.backend().output_size(), (800, 600));
        assert_relative_eq!(manager.camera().aspect, 800.0 / 600.0);
    }

    #[test]
    fn test_transient_replacement() {
        let mut manager = manager(800, 600);
        assert!(manager.set_transient_node(Some(arrow())).is_none());
        assert!(manager.set_transient_node(Some(arrow())).is_some());
        assert_eq!(manager.scene().count(NodeClass::Transient), 1);
        assert_eq!(manager.scene().count(NodeClass::Persistent), 3);
    }

    #[test]
    fn test_tick_renders_current_scene() {
        let mut manager = manager(800, 600);
        manager.render_loop_tick(1.0 / 60.0).unwrap();
        assert_eq!(manager.backend().last_transient, Some(false));

        manager.set_transient_node(Some(arrow()));
        manager.render_loop_tick(1.0 / 60.0).unwrap();
        assert_eq!(manager.backend().last_transient, Some(true));
        assert_eq!(manager.backend().renders, 2);
        assert_eq!(manager.frames(), 2);
    }

    #[test]
    fn test_dispose_releases_once() {
        let manager = manager(800, 600);
        let released = manager.backend().released.clone();
        manager.dispose();
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_drop_releases() {
        let manager = manager(800, 600);
        let released = manager.backend().released.clone();
        drop(manager);
        assert_eq!(released.get(), 1);
    }
}
