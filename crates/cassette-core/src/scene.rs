//! Append-only scene graph.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Parent links are
//! kept on every node so a picked leaf can be walked back up to the model
//! that owns it. Nodes are never removed; the arena only grows, so ids stay
//! valid and iteration over a snapshot is always safe.

use glam::{Mat4, Quat, Vec3, Vec4};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(u32);

impl MeshId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Radius of the sphere circumscribing the box.
    #[inline]
    pub fn radius(&self) -> f32 {
        (self.max - self.min).length() * 0.5
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    pub fn transformed(&self, m: &Mat4) -> Self {
        let corners = self.corners().map(|c| m.transform_point3(c));
        // eight corners, never empty
        Self::from_points(corners).unwrap_or(*self)
    }
}

/// CPU-side triangle mesh, used both for GPU upload and ray picking.
#[derive(Clone, Debug)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub bounds: Aabb,
    /// Linear RGBA base color.
    pub color: Vec4,
}

impl MeshData {
    /// Build a mesh; returns `None` when there are no positions to bound.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Option<Self> {
        let bounds = Aabb::from_points(positions.iter().copied())?;
        let normals = if normals.len() == positions.len() {
            normals
        } else {
            vec![Vec3::Y; positions.len()]
        };
        let indices = if indices.is_empty() {
            (0..positions.len() as u32).collect()
        } else {
            indices
        };
        Some(Self {
            positions,
            normals,
            indices,
            bounds,
            color: Vec4::ONE,
        })
    }

    /// Axis-aligned box centered on the origin.
    pub fn cuboid(half_extents: Vec3) -> Self {
        let h = half_extents;
        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::Z, Vec3::NEG_X),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::X, Vec3::NEG_Y),
        ];
        for (n, u, v) in faces {
            let base = positions.len() as u32;
            let c = n * h;
            let du = u * h;
            let dv = v * h;
            positions.extend([c - du - dv, c + du - dv, c + du + dv, c - du + dv]);
            normals.extend([n; 4]);
            indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Self {
            positions,
            normals,
            indices,
            bounds: Aabb {
                min: -h,
                max: h,
            },
            color: Vec4::ONE,
        }
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            let a = *self.positions.get(tri[0] as usize)?;
            let b = *self.positions.get(tri[1] as usize)?;
            let c = *self.positions.get(tri[2] as usize)?;
            Some([a, b, c])
        })
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: Option<String>,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
    pub transform: Transform,
    pub mesh: Option<MeshId>,
}

/// Detached node hierarchy produced by an importer, ready to be instantiated.
#[derive(Clone, Debug, Default)]
pub struct SceneTemplate {
    pub nodes: Vec<TemplateNode>,
    pub meshes: Vec<MeshData>,
}

#[derive(Clone, Debug)]
pub struct TemplateNode {
    pub name: Option<String>,
    /// Index into `SceneTemplate::nodes`; `None` for template roots.
    pub parent: Option<usize>,
    pub transform: Transform,
    /// Index into `SceneTemplate::meshes`.
    pub mesh: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    meshes: Vec<MeshData>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_node(
        &mut self,
        parent: Option<NodeId>,
        name: Option<&str>,
        transform: Transform,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.map(str::to_owned),
            parent,
            children: SmallVec::new(),
            transform,
            mesh: None,
        });
        if let Some(p) = parent {
            self.nodes[p.index()].children.push(id);
        }
        id
    }

    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(mesh);
        id
    }

    pub fn attach_mesh(&mut self, node: NodeId, mesh: MeshId) {
        self.nodes[node.index()].mesh = Some(mesh);
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn mesh(&self, id: MeshId) -> &MeshData {
        &self.meshes[id.index()]
    }

    pub fn meshes(&self) -> &[MeshData] {
        &self.meshes
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn transform(&self, id: NodeId) -> Transform {
        self.node(id).transform
    }

    pub fn set_translation(&mut self, id: NodeId, translation: Vec3) {
        self.nodes[id.index()].transform.translation = translation;
    }

    /// Local-to-world matrix, composed through every ancestor.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut m = self.node(id).transform.matrix();
        let mut cur = self.node(id).parent;
        while let Some(p) = cur {
            let node = self.node(p);
            m = node.transform.matrix() * m;
            cur = node.parent;
        }
        m
    }

    #[inline]
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.node(n).children.iter().rev().copied());
        }
        out
    }

    /// World-space bounds of every mesh under `id`, if any.
    pub fn world_bounds(&self, id: NodeId) -> Option<Aabb> {
        self.descendants(id)
            .into_iter()
            .filter_map(|n| {
                let mesh = self.node(n).mesh?;
                Some(self.mesh(mesh).bounds.transformed(&self.world_matrix(n)))
            })
            .reduce(Aabb::union)
    }

    /// Every mesh-carrying node, with its mesh.
    pub fn mesh_nodes(&self) -> impl Iterator<Item = (NodeId, MeshId)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.mesh.map(|m| (NodeId(i as u32), m)))
    }

    /// Copy `template` under a fresh wrapper node parented to `parent`.
    /// Returns the wrapper, which acts as the model's root.
    pub fn instantiate(
        &mut self,
        parent: Option<NodeId>,
        name: Option<&str>,
        template: &SceneTemplate,
    ) -> NodeId {
        let root = self.add_node(parent, name, Transform::IDENTITY);
        let mesh_ids: Vec<MeshId> = template
            .meshes
            .iter()
            .cloned()
            .map(|m| self.add_mesh(m))
            .collect();
        // Template parents always precede their children, so ids are resolvable in order.
        let mut ids: Vec<NodeId> = Vec::with_capacity(template.nodes.len());
        for t in &template.nodes {
            let p = t.parent.and_then(|i| ids.get(i).copied()).unwrap_or(root);
            let id = self.add_node(Some(p), t.name.as_deref(), t.transform);
            if let Some(m) = t.mesh.and_then(|i| mesh_ids.get(i).copied()) {
                self.attach_mesh(id, m);
            }
            ids.push(id);
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_matrix_composes_parent_chain() {
        let mut g = SceneGraph::new();
        let a = g.add_node(None, Some("a"), Transform::from_translation(Vec3::X));
        let b = g.add_node(Some(a), Some("b"), Transform::from_translation(Vec3::Y));
        let c = g.add_node(Some(b), Some("c"), Transform::from_translation(Vec3::Z));
        let p = g.world_position(c);
        assert!((p - Vec3::ONE).length() < 1e-6);
        assert_eq!(g.parent(c), Some(b));
        assert_eq!(g.descendants(a), vec![a, b, c]);
    }

    #[test]
    fn world_bounds_covers_rotated_children() {
        let mut g = SceneGraph::new();
        let root = g.add_node(
            None,
            None,
            Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
        );
        let child = g.add_node(Some(root), None, Transform::from_translation(Vec3::X * 2.0));
        let m = g.add_mesh(MeshData::cuboid(Vec3::splat(0.5)));
        g.attach_mesh(child, m);
        let b = g.world_bounds(root).expect("bounds");
        // +X rotated a quarter turn about Y lands on -Z
        assert!((b.center() - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
        let lone = g.add_node(None, None, Transform::IDENTITY);
        assert!(g.world_bounds(lone).is_none());
    }

    #[test]
    fn instantiate_keeps_template_hierarchy() {
        let template = SceneTemplate {
            nodes: vec![
                TemplateNode {
                    name: Some("body".into()),
                    parent: None,
                    transform: Transform::IDENTITY,
                    mesh: None,
                },
                TemplateNode {
                    name: Some("reel".into()),
                    parent: Some(0),
                    transform: Transform::IDENTITY,
                    mesh: Some(0),
                },
            ],
            meshes: vec![MeshData::cuboid(Vec3::ONE)],
        };
        let mut g = SceneGraph::new();
        let group = g.add_node(None, Some("group"), Transform::IDENTITY);
        let root = g.instantiate(Some(group), Some("model"), &template);
        let all = g.descendants(root);
        assert_eq!(all.len(), 3);
        let reel = all[2];
        assert_eq!(g.node(reel).name.as_deref(), Some("reel"));
        assert_eq!(g.parent(g.parent(reel).unwrap_or(root)), Some(root));
        assert_eq!(g.parent(root), Some(group));
        assert_eq!(g.mesh_nodes().count(), 1);
    }
}
