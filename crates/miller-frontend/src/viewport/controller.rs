//! Applies parser replies to the scene.

use thiserror::Error;
use tracing::{debug, info, warn};

use miller_core::{
    GeometryMapper, IndexKind, MappingError, ParseError, SubmissionId, SubmissionSequencer,
};
use miller_renderer::{RenderBackend, SceneManager};

use crate::client::ParseReply;

/// Why a submission could not be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Enter a plane like (111) or a direction like [110]")]
    EmptyInput,
    #[error("Viewport is not initialized")]
    NotInitialized,
}

/// Why a submission produced no geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionFailure {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// What happened to one reply.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The scene now shows this submission.
    Applied { id: SubmissionId, kind: IndexKind },
    /// A newer submission exists; the reply was dropped.
    Stale { id: SubmissionId },
    /// Nothing to show. The scene keeps its previous visualization.
    Failed {
        id: SubmissionId,
        error: SubmissionFailure,
    },
}

impl SubmissionOutcome {
    pub fn id(&self) -> SubmissionId {
        match self {
            SubmissionOutcome::Applied { id, .. }
            | SubmissionOutcome::Stale { id }
            | SubmissionOutcome::Failed { id, .. } => *id,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SubmissionOutcome::Failed { .. })
    }
}

/// Issues submission ids and turns current replies into scene updates.
///
/// Holds no visualization state of its own; the transient node lives in the
/// scene.
#[derive(Debug)]
pub struct ViewportController {
    mapper: GeometryMapper,
    sequencer: SubmissionSequencer,
}

impl ViewportController {
    pub fn new(mapper: GeometryMapper) -> Self {
        Self {
            mapper,
            sequencer: SubmissionSequencer::new(),
        }
    }

    /// Issue an id for `input`. Every earlier submission becomes stale.
    pub fn begin(&mut self, input: &str) -> Result<SubmissionId, SubmitError> {
        if input.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        Ok(self.sequencer.next())
    }

    /// Map a reply and swap it into the scene if it is still current.
    pub fn apply<B: RenderBackend>(
        &self,
        reply: ParseReply,
        manager: &mut SceneManager<B>,
    ) -> SubmissionOutcome {
        let id = reply.id;
        if !self.sequencer.is_current(id) {
            debug!("Discarding stale reply {}", id);
            return SubmissionOutcome::Stale { id };
        }

        let node = reply
            .result
            .map_err(SubmissionFailure::from)
            .and_then(|record| {
                self.mapper
                    .map(&record)
                    .map(|node| (record.kind, node))
                    .map_err(SubmissionFailure::from)
            });

        match node {
            Ok((kind, node)) => {
                manager.set_transient_node(Some(node));
                info!("Applied {} {}", kind, id);
                SubmissionOutcome::Applied { id, kind }
            }
            Err(error) => {
                warn!("Submission {} failed: {}", id, error);
                SubmissionOutcome::Failed { id, error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use miller_core::IndexRecord;
    use miller_renderer::{CameraUniform, NodeClass, Scene, SceneConfig, SceneError, ViewportSize};

    struct NullBackend;

    impl RenderBackend for NullBackend {
        fn output_size(&self) -> (u32, u32) {
            (640, 480)
        }
        fn resize(&mut self, _width: u32, _height: u32) {}
        fn render(&mut self, _scene: &Scene, _camera: &CameraUniform) -> Result<(), SceneError> {
            Ok(())
        }
        fn release(&mut self) {}
    }

    fn manager() -> SceneManager<NullBackend> {
        SceneManager::initialize(ViewportSize::new(640, 480), &SceneConfig::default(), NullBackend)
            .unwrap()
    }

    fn reply(id: SubmissionId, result: Result<IndexRecord, ParseError>) -> ParseReply {
        ParseReply { id, result }
    }

    #[test]
    fn test_empty_input_is_refused() {
        let mut controller = ViewportController::new(GeometryMapper::default());
        assert_eq!(controller.begin("   "), Err(SubmitError::EmptyInput));
    }

    #[test]
    fn test_current_reply_is_applied() {
        let mut manager = manager();
        let mut controller = ViewportController::new(GeometryMapper::default());
        let id = controller.begin("[111]").unwrap();

        let outcome = controller.apply(reply(id, Ok(IndexRecord::direction(Vec3::ONE))), &mut manager);
        assert_eq!(
            outcome,
            SubmissionOutcome::Applied {
                id,
                kind: IndexKind::Direction
            }
        );
        assert_eq!(manager.scene().count(NodeClass::Transient), 1);
    }

    #[test]
    fn test_stale_reply_is_discarded() {
        let mut manager = manager();
        let mut controller = ViewportController::new(GeometryMapper::default());
        let old = controller.begin("(100)").unwrap();
        let new = controller.begin("[111]").unwrap();

        let applied =
            controller.apply(reply(new, Ok(IndexRecord::direction(Vec3::ONE))), &mut manager);
        assert!(matches!(applied, SubmissionOutcome::Applied { .. }));

        // the older reply arrives last and must not win
        let outcome = controller.apply(
            reply(old, Ok(IndexRecord::plane(Vec3::X, Vec3::X))),
            &mut manager,
        );
        assert_eq!(outcome, SubmissionOutcome::Stale { id: old });
        assert!(manager.scene().transient_node().unwrap().as_arrow().is_some());
    }

    #[test]
    fn test_zero_vector_leaves_scene_unchanged() {
        let mut manager = manager();
        let mut controller = ViewportController::new(GeometryMapper::default());
        let first = controller.begin("[111]").unwrap();
        controller.apply(reply(first, Ok(IndexRecord::direction(Vec3::ONE))), &mut manager);
        let before = manager.scene().transient_node().cloned();

        let id = controller.begin("(000)").unwrap();
        let outcome = controller.apply(
            reply(id, Ok(IndexRecord::plane(Vec3::ZERO, Vec3::splat(0.5)))),
            &mut manager,
        );
        assert!(matches!(
            outcome,
            SubmissionOutcome::Failed {
                error: SubmissionFailure::Mapping(MappingError::DegenerateVector(_)),
                ..
            }
        ));
        assert_eq!(manager.scene().transient_node().cloned(), before);
    }

    #[test]
    fn test_parse_failure_leaves_scene_unchanged() {
        let mut manager = manager();
        let mut controller = ViewportController::new(GeometryMapper::default());
        let id = controller.begin("(1").unwrap();
        let outcome = controller.apply(
            reply(
                id,
                Err(ParseError::Rejected {
                    status: 400,
                    message: "bad".into(),
                }),
            ),
            &mut manager,
        );
        assert!(outcome.is_failure());
        assert_eq!(outcome.id(), id);
        assert_eq!(manager.scene().count(NodeClass::Transient), 0);
    }
}
