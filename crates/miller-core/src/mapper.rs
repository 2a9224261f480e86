//! Index record to transient scene node.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::ReferenceCell;
use crate::geometry::{ArrowNode, CANONICAL_NORMAL, PlaneNode, TransientNode};
use crate::math;
use crate::record::{IndexKind, IndexRecord};

/// Mapping errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    #[error("Index vector {0:?} has zero length")]
    DegenerateVector([f32; 3]),

    #[error("Plane record has no intercept")]
    MissingIntercept,
}

/// Look of the generated geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperStyle {
    /// Edge length of the plane patch.
    pub plane_size: f32,
    pub plane_color: [f32; 3],
    pub plane_opacity: f32,
    pub arrow_length: f32,
    pub arrow_color: [f32; 3],
    /// Head length as a fraction of the arrow length.
    pub head_length_ratio: f32,
    /// Head radius as a fraction of the head length.
    pub head_radius_ratio: f32,
}

impl Default for MapperStyle {
    fn default() -> Self {
        Self {
            plane_size: 2.0,
            plane_color: [1.0, 0.0, 0.0],
            plane_opacity: 0.5,
            arrow_length: 1.0,
            arrow_color: [0.0, 1.0, 0.0],
            head_length_ratio: 0.2,
            head_radius_ratio: 0.2,
        }
    }
}

/// Turns index records into unattached scene nodes.
///
/// Holds only fixed configuration; `map` is a pure function of the record.
#[derive(Debug, Clone, Default)]
pub struct GeometryMapper {
    style: MapperStyle,
    cell: ReferenceCell,
}

impl GeometryMapper {
    pub fn new(style: MapperStyle, cell: ReferenceCell) -> Self {
        Self { style, cell }
    }

    /// Map a record to a plane patch or a direction arrow.
    pub fn map(&self, record: &IndexRecord) -> Result<TransientNode, MappingError> {
        match record.kind {
            IndexKind::Plane => self.map_plane(record).map(TransientNode::Plane),
            IndexKind::Direction => self.map_direction(record).map(TransientNode::Arrow),
        }
    }

    fn map_plane(&self, record: &IndexRecord) -> Result<PlaneNode, MappingError> {
        let normal = unit(record.indices)?;
        let position = record.intercept.ok_or(MappingError::MissingIntercept)?;
        let [r, g, b] = self.style.plane_color;

        Ok(PlaneNode {
            normal,
            rotation: math::shortest_arc(CANONICAL_NORMAL, normal),
            position,
            size: self.style.plane_size,
            color: [r, g, b, self.style.plane_opacity.clamp(0.0, 1.0)],
            double_sided: true,
        })
    }

    fn map_direction(&self, record: &IndexRecord) -> Result<ArrowNode, MappingError> {
        let direction = unit(record.indices)?;
        let length = self.style.arrow_length;
        let head_length = length * self.style.head_length_ratio;
        let [r, g, b] = self.style.arrow_color;

        Ok(ArrowNode {
            origin: self.cell.center(),
            direction,
            length,
            head_length,
            head_radius: head_length * self.style.head_radius_ratio,
            color: [r, g, b, 1.0],
        })
    }
}

fn unit(indices: Vec3) -> Result<Vec3, MappingError> {
    math::normalize(indices).ok_or(MappingError::DegenerateVector(indices.to_array()))
}
