//! Reference unit cell.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned cell every visualization is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCell {
    /// Corner with the smallest coordinates.
    pub origin: Vec3,
    /// Edge lengths along X, Y and Z.
    pub size: Vec3,
}

impl Default for ReferenceCell {
    fn default() -> Self {
        Self::unit()
    }
}

impl ReferenceCell {
    /// The cube spanning `[0, 1]` on every axis.
    pub fn unit() -> Self {
        Self {
            origin: Vec3::ZERO,
            size: Vec3::ONE,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.origin + self.size * 0.5
    }

    /// The eight corners, indexed by bit pattern `zyx`.
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            let step = Vec3::new(
                (i & 1) as f32,
                ((i >> 1) & 1) as f32,
                ((i >> 2) & 1) as f32,
            );
            self.origin + step * self.size
        })
    }

    /// The twelve edges as pairs of endpoints.
    pub fn edges(&self) -> [(Vec3, Vec3); 12] {
        let c = self.corners();
        // Corner pairs differing in exactly one bit.
        const PAIRS: [(usize, usize); 12] = [
            (0, 1),
            (2, 3),
            (4, 5),
            (6, 7),
            (0, 2),
            (1, 3),
            (4, 6),
            (5, 7),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];
        PAIRS.map(|(a, b)| (c[a], c[b]))
    }
}
