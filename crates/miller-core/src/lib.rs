//! Miller Visualizer Core Data Structures
//!
//! This crate contains the GPU-free half of the visualizer:
//! - IndexRecord: validated plane/direction description from a parser
//! - GeometryMapper: record to oriented plane patch or direction arrow
//! - ReferenceCell: the unit cell everything is drawn against
//! - NotationParser: in-process parser for `(hkl)` / `[uvw]` text
//! - SubmissionSequencer: staleness guard for in-flight submissions

pub mod cell;
pub mod geometry;
pub mod mapper;
pub mod math;
pub mod notation;
pub mod record;
pub mod submission;

pub use cell::*;
pub use geometry::*;
pub use mapper::*;
pub use notation::*;
pub use record::*;
pub use submission::*;
