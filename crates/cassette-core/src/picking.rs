//! Pointer-to-ray conversion and nearest-hit ray casting.

use crate::scene::{NodeId, SceneGraph};
use glam::{Vec2, Vec3};

/// Viewport bounding rectangle in CSS pixels (as reported by the host).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Map a pointer position to normalized device coordinates.
///
/// `x` grows to the right and `y` grows upwards; only the y axis is flipped.
#[inline]
pub fn pointer_to_ndc(px: f32, py: f32, rect: &ViewportRect) -> Vec2 {
    Vec2::new(
        ((px - rect.left) / rect.width) * 2.0 - 1.0,
        -((py - rect.top) / rect.height) * 2.0 + 1.0,
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }
}

/// Slab-method ray/AABB test, returns the entry distance (or exit when inside).
pub fn ray_aabb(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;
    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        if d == 0.0 {
            // parallel to this slab: inside it or never
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let t0 = (min[axis] - o) / d;
        let t1 = (max[axis] - o) / d;
        tmin = tmin.max(t0.min(t1));
        tmax = tmax.min(t0.max(t1));
    }
    if tmax < 0.0 || tmin > tmax {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

/// Möller–Trumbore ray/triangle intersection. Two-sided.
pub fn ray_triangle(origin: Vec3, direction: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = direction.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < 1e-8 {
        return None;
    }
    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = f * direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = f * edge2.dot(q);
    (t > 1e-6).then_some(t)
}

/// Nearest intersected mesh node and its world-space distance along the ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

/// Something that can be ray cast and walked upwards.
pub trait PickSource {
    /// Nearest hit among `roots` and all of their descendants.
    fn pick(&self, ray: &Ray, roots: &[NodeId]) -> Option<Hit>;
    /// Owner of `node`, or `None` at the top of the hierarchy.
    fn parent_of(&self, node: NodeId) -> Option<NodeId>;
}

impl PickSource for SceneGraph {
    fn pick(&self, ray: &Ray, roots: &[NodeId]) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for &root in roots {
            for node in self.descendants(root) {
                let Some(mesh_id) = self.node(node).mesh else {
                    continue;
                };
                let mesh = self.mesh(mesh_id);
                let world = self.world_matrix(node);
                let inv = world.inverse();
                let o = inv.transform_point3(ray.origin);
                let d = inv.transform_vector3(ray.direction);
                if ray_aabb(o, d, mesh.bounds.min, mesh.bounds.max).is_none() {
                    continue;
                }
                let nearest_local = mesh
                    .triangles()
                    .filter_map(|[a, b, c]| ray_triangle(o, d, a, b, c))
                    .fold(None::<f32>, |acc, t| Some(acc.map_or(t, |b| b.min(t))));
                let Some(t) = nearest_local else {
                    continue;
                };
                // Compare in world units; local t is skewed by node scale.
                let point = world.transform_point3(o + d * t);
                let distance = (point - ray.origin).dot(ray.direction);
                match best {
                    Some(b) if distance >= b.distance => {}
                    _ => {
                        best = Some(Hit {
                            node,
                            distance,
                            point,
                        })
                    }
                }
            }
        }
        best
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node)
    }
}
