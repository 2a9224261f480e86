//! Transient visualization nodes produced by the mapper.
//!
//! A node is a plain description: where it sits, how it is oriented and what
//! it looks like. Turning it into GPU buffers is the renderer's job.

use glam::{Mat4, Quat, Vec3};

use crate::math;

/// Normal of an unrotated plane patch.
pub const CANONICAL_NORMAL: Vec3 = Vec3::Z;

/// The single replaceable visualization in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum TransientNode {
    Plane(PlaneNode),
    Arrow(ArrowNode),
}

impl TransientNode {
    pub fn as_plane(&self) -> Option<&PlaneNode> {
        match self {
            TransientNode::Plane(plane) => Some(plane),
            TransientNode::Arrow(_) => None,
        }
    }

    pub fn as_arrow(&self) -> Option<&ArrowNode> {
        match self {
            TransientNode::Arrow(arrow) => Some(arrow),
            TransientNode::Plane(_) => None,
        }
    }

    pub fn color(&self) -> [f32; 4] {
        match self {
            TransientNode::Plane(plane) => plane.color,
            TransientNode::Arrow(arrow) => arrow.color,
        }
    }
}

/// Square, translucent, double-sided patch.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneNode {
    /// Unit normal after rotation.
    pub normal: Vec3,
    /// Rotation taking [`CANONICAL_NORMAL`] onto `normal`.
    pub rotation: Quat,
    /// Patch center in world space.
    pub position: Vec3,
    /// Edge length of the patch.
    pub size: f32,
    /// RGBA, alpha < 1 for translucency.
    pub color: [f32; 4],
    pub double_sided: bool,
}

impl PlaneNode {
    /// Local-to-world transform.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Corners in world space, counter-clockwise seen from the normal side.
    pub fn corners(&self) -> [Vec3; 4] {
        let h = self.size * 0.5;
        let local = [
            Vec3::new(-h, -h, 0.0),
            Vec3::new(h, -h, 0.0),
            Vec3::new(h, h, 0.0),
            Vec3::new(-h, h, 0.0),
        ];
        let transform = self.transform();
        local.map(|p| transform.transform_point3(p))
    }

    /// Two triangles covering the patch.
    pub fn triangles(&self) -> [[Vec3; 3]; 2] {
        let [a, b, c, d] = self.corners();
        [[a, b, c], [a, c, d]]
    }
}

/// Shaft plus conical head.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowNode {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
    /// Total length including the head.
    pub length: f32,
    pub head_length: f32,
    pub head_radius: f32,
    pub color: [f32; 4],
}

impl ArrowNode {
    pub fn tip(&self) -> Vec3 {
        self.origin + self.direction * self.length
    }

    /// Where the shaft meets the head.
    pub fn shaft_end(&self) -> Vec3 {
        self.origin + self.direction * (self.length - self.head_length)
    }

    /// Triangles of the head cone, `segments` around the rim plus a base cap.
    pub fn head_triangles(&self, segments: usize) -> Vec<[Vec3; 3]> {
        let segments = segments.max(3);
        let rotation = math::shortest_arc(Vec3::Z, self.direction);
        let base = self.shaft_end();
        let tip = self.tip();

        let rim: Vec<Vec3> = (0..segments)
            .map(|i| {
                let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
                let (s, c) = angle.sin_cos();
                base + rotation * Vec3::new(c * self.head_radius, s * self.head_radius, 0.0)
            })
            .collect();

        let mut triangles = Vec::with_capacity(segments * 2);
        for i in 0..segments {
            let a = rim[i];
            let b = rim[(i + 1) % segments];
            triangles.push([a, b, tip]);
            triangles.push([b, a, base]);
        }
        triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plane(normal: Vec3, position: Vec3) -> PlaneNode {
        PlaneNode {
            normal,
            rotation: math::shortest_arc(CANONICAL_NORMAL, normal),
            position,
            size: 2.0,
            color: [1.0, 0.0, 0.0, 0.5],
            double_sided: true,
        }
    }

    #[test]
    fn test_plane_corners_lie_in_plane() {
        let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        let node = plane(normal, Vec3::new(0.5, 0.5, 0.5));
        for corner in node.corners() {
            assert_relative_eq!((corner - node.position).dot(normal), 0.0, epsilon = 1e-5);
            assert_relative_eq!((corner - node.position).length(), 2.0_f32.sqrt(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_plane_triangle_winding_follows_normal() {
        let node = plane(Vec3::X, Vec3::ZERO);
        for [a, b, c] in node.triangles() {
            let n = (b - a).cross(c - a).normalize();
            assert_relative_eq!(n.dot(Vec3::X), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_arrow_head_points_along_direction() {
        let arrow = ArrowNode {
            origin: Vec3::splat(0.5),
            direction: Vec3::NEG_Z,
            length: 1.0,
            head_length: 0.2,
            head_radius: 0.04,
            color: [0.0, 1.0, 0.0, 1.0],
        };
        assert_relative_eq!(arrow.tip().z, -0.5, epsilon = 1e-6);
        let triangles = arrow.head_triangles(8);
        assert_eq!(triangles.len(), 16);
        for tri in triangles {
            for p in tri {
                assert!(p.is_finite());
                let along = (p - arrow.origin).dot(arrow.direction);
                assert!(along >= 0.8 - 1e-5 && along <= 1.0 + 1e-5);
            }
        }
    }
}
