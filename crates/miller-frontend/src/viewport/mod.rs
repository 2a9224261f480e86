//! Viewport host.
//!
//! Owns the scene manager once the drawing area exists, forwards text
//! submissions to the parser, and applies the replies.

mod controller;

pub use controller::{SubmissionFailure, SubmissionOutcome, SubmitError, ViewportController};

use tracing::{debug, info};

use miller_core::{GeometryMapper, SubmissionId};
use miller_renderer::{RenderBackend, SceneConfig, SceneError, SceneManager, ViewportSize};

use crate::client::ParseDispatcher;

/// Host-facing surface: `initialize`, `resize`, `submit`, `poll`, `tick`,
/// `dispose`.
pub struct Viewport<B: RenderBackend> {
    config: SceneConfig,
    manager: Option<SceneManager<B>>,
    controller: ViewportController,
    dispatcher: Box<dyn ParseDispatcher>,
}

impl<B: RenderBackend> Viewport<B> {
    pub fn new(
        config: SceneConfig,
        mapper: GeometryMapper,
        dispatcher: Box<dyn ParseDispatcher>,
    ) -> Self {
        Self {
            config,
            manager: None,
            controller: ViewportController::new(mapper),
            dispatcher,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.manager.is_some()
    }

    /// Create the scene manager for a drawing area of `size`.
    pub fn initialize(&mut self, size: ViewportSize, backend: B) -> Result<(), SceneError> {
        if self.manager.is_some() {
            return Err(SceneError::AlreadyInitialized);
        }
        self.manager = Some(SceneManager::initialize(size, &self.config, backend)?);
        Ok(())
    }

    pub fn resize(&mut self, size: ViewportSize) -> Result<(), SceneError> {
        self.manager
            .as_mut()
            .ok_or(SceneError::NotInitialized)?
            .resize(size)
    }

    /// Hand `input` to the parser. The reply is applied by a later `poll`.
    pub fn submit(&mut self, input: &str) -> Result<SubmissionId, SubmitError> {
        if self.manager.is_none() {
            return Err(SubmitError::NotInitialized);
        }
        let input = input.trim();
        let id = self.controller.begin(input)?;
        self.dispatcher.dispatch(id, input);
        info!("Submitted {} '{}' via {}", id, input, self.dispatcher.describe());
        Ok(id)
    }

    /// Apply every reply that has arrived, in arrival order.
    pub fn poll(&mut self) -> Vec<SubmissionOutcome> {
        let replies = self.dispatcher.poll();
        let Some(manager) = self.manager.as_mut() else {
            if !replies.is_empty() {
                debug!("Dropping {} replies, viewport not initialized", replies.len());
            }
            return Vec::new();
        };
        let mut outcomes = Vec::with_capacity(replies.len());
        for reply in replies {
            outcomes.push(self.controller.apply(reply, manager));
        }
        outcomes
    }

    /// Advance controls and draw one frame.
    pub fn tick(&mut self, dt: f32) -> Result<(), SceneError> {
        self.manager
            .as_mut()
            .ok_or(SceneError::NotInitialized)?
            .render_loop_tick(dt)
    }

    /// Tear down the scene manager. Does nothing if never initialized.
    pub fn dispose(&mut self) {
        if let Some(manager) = self.manager.take() {
            manager.dispose();
        }
    }

    pub fn manager(&self) -> Option<&SceneManager<B>> {
        self.manager.as_ref()
    }

    pub fn manager_mut(&mut self) -> Option<&mut SceneManager<B>> {
        self.manager.as_mut()
    }

    /// Swap the parser. Replies still owed by the old one are lost, which
    /// only ever affects submissions that are about to become stale.
    pub fn set_dispatcher(&mut self, dispatcher: Box<dyn ParseDispatcher>) {
        info!("Parser switched to {}", dispatcher.describe());
        self.dispatcher = dispatcher;
    }
}

impl<B: RenderBackend> Drop for Viewport<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{LocalParser, ParseReply};
    use approx::assert_relative_eq;
    use glam::Vec3;
    use miller_core::{IndexKind, IndexRecord};
    use miller_renderer::{CameraUniform, NodeClass, Scene};
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeBackend {
        size: (u32, u32),
        frames: usize,
        released: Rc<Cell<usize>>,
    }

    impl RenderBackend for FakeBackend {
        fn output_size(&self) -> (u32, u32) {
            self.size
        }
        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
        fn render(&mut self, _scene: &Scene, _camera: &CameraUniform) -> Result<(), SceneError> {
            self.frames += 1;
            Ok(())
        }
        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    /// Holds dispatched inputs until the test answers them.
    #[derive(Clone, Default)]
    struct ManualDispatcher {
        sent: Rc<RefCell<Vec<(SubmissionId, String)>>>,
        inbox: Rc<RefCell<VecDeque<ParseReply>>>,
    }

    impl ManualDispatcher {
        fn answer(&self, id: SubmissionId, record: IndexRecord) {
            self.inbox.borrow_mut().push_back(ParseReply {
                id,
                result: Ok(record),
            });
        }
    }

    impl ParseDispatcher for ManualDispatcher {
        fn dispatch(&mut self, id: SubmissionId, input: &str) {
            self.sent.borrow_mut().push((id, input.to_string()));
        }
        fn poll(&mut self) -> Vec<ParseReply> {
            self.inbox.borrow_mut().drain(..).collect()
        }
        fn describe(&self) -> String {
            "manual".to_string()
        }
    }

    fn local_viewport() -> Viewport<FakeBackend> {
        let mut viewport = Viewport::new(
            SceneConfig::default(),
            GeometryMapper::default(),
            Box::new(LocalParser::new()),
        );
        viewport
            .initialize(ViewportSize::new(800, 600), FakeBackend::default())
            .unwrap();
        viewport
    }

    fn transient_count(viewport: &Viewport<FakeBackend>) -> usize {
        viewport
            .manager()
            .map(|m| m.scene().count(NodeClass::Transient))
            .unwrap_or_default()
    }

    #[test]
    fn test_double_initialize_is_refused() {
        let mut viewport = local_viewport();
        let err = viewport
            .initialize(ViewportSize::new(800, 600), FakeBackend::default())
            .unwrap_err();
        assert_eq!(err, SceneError::AlreadyInitialized);
    }

    #[test]
    fn test_uninitialized_operations() {
        let mut viewport: Viewport<FakeBackend> = Viewport::new(
            SceneConfig::default(),
            GeometryMapper::default(),
            Box::new(LocalParser::new()),
        );
        assert_eq!(
            viewport.resize(ViewportSize::new(10, 10)),
            Err(SceneError::NotInitialized)
        );
        assert_eq!(viewport.tick(0.016), Err(SceneError::NotInitialized));
        assert_eq!(viewport.submit("(111)"), Err(SubmitError::NotInitialized));
        viewport.dispose();
        assert!(!viewport.is_initialized());
    }

    #[test]
    fn test_two_submissions_leave_one_transient() {
        let mut viewport = local_viewport();
        assert_eq!(transient_count(&viewport), 0);

        viewport.submit("(100)").unwrap();
        viewport.poll();
        assert_eq!(transient_count(&viewport), 1);

        viewport.submit("[111]").unwrap();
        let outcomes = viewport.poll();
        assert!(matches!(
            outcomes[..],
            [SubmissionOutcome::Applied {
                kind: IndexKind::Direction,
                ..
            }]
        ));
        assert_eq!(transient_count(&viewport), 1);
        let manager = viewport.manager().unwrap();
        assert_eq!(manager.scene().count(NodeClass::Persistent), 3);
        assert!(manager.scene().transient_node().unwrap().as_arrow().is_some());
    }

    #[test]
    fn test_zero_indices_fail_without_scene_change() {
        let mut viewport = local_viewport();
        viewport.submit("[000]").unwrap();
        let outcomes = viewport.poll();
        assert!(outcomes[0].is_failure());
        assert_eq!(transient_count(&viewport), 0);

        viewport.submit("(000)").unwrap();
        assert!(viewport.poll()[0].is_failure());
        assert_eq!(transient_count(&viewport), 0);
    }

    #[test]
    fn test_late_stale_reply_is_ignored() {
        let dispatcher = ManualDispatcher::default();
        let mut viewport = Viewport::new(
            SceneConfig::default(),
            GeometryMapper::default(),
            Box::new(dispatcher.clone()),
        );
        viewport
            .initialize(ViewportSize::new(800, 600), FakeBackend::default())
            .unwrap();

        let first = viewport.submit("(100)").unwrap();
        let second = viewport.submit(" [111] ").unwrap();
        assert_eq!(dispatcher.sent.borrow()[1], (second, "[111]".to_string()));

        dispatcher.answer(second, IndexRecord::direction(Vec3::ONE));
        dispatcher.answer(first, IndexRecord::plane(Vec3::X, Vec3::X));

        let outcomes = viewport.poll();
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], SubmissionOutcome::Applied { .. }));
        assert_eq!(outcomes[1], SubmissionOutcome::Stale { id: first });

        let scene = viewport.manager().unwrap().scene();
        let arrow = scene.transient_node().unwrap().as_arrow().unwrap();
        assert_relative_eq!(arrow.direction.x, 1.0 / 3.0_f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn test_resize_and_tick() {
        let mut viewport = local_viewport();
        viewport.resize(ViewportSize::new(1200, 400)).unwrap();
        viewport.tick(1.0 / 60.0).unwrap();

        let manager = viewport.manager().unwrap();
        assert_relative_eq!(manager.camera().aspect, 3.0);
        assert_eq!(manager.backend().output_size(), (1200, 400));
        assert_eq!(manager.backend().frames, 1);
    }

    #[test]
    fn test_dispose_releases_once() {
        let mut viewport = local_viewport();
        let released = viewport.manager().unwrap().backend().released.clone();
        viewport.dispose();
        viewport.dispose();
        drop(viewport);
        assert_eq!(released.get(), 1);
    }
}
