//! Side-table of loaded models.
//!
//! Interaction flags live here rather than on scene nodes. Records are only
//! ever appended, in load-completion order, which need not match registry
//! order; `slot` remembers the registry position.

use crate::picking::PickSource;
use crate::registry::{descriptor, ModelDescriptor};
use crate::scene::NodeId;
use fnv::FnvHashMap;
use glam::{Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelKey(u32);

impl ModelKey {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub struct LoadedModel {
    pub key: ModelKey,
    pub id: &'static str,
    pub slot: usize,
    pub root: NodeId,
    pub is_loaded: bool,
    pub is_hovered: bool,
    pub is_clicked: bool,
    pub is_floating: bool,
    pub base_position: Vec3,
    pub base_rotation: Quat,
}

impl LoadedModel {
    pub fn descriptor(&self) -> Option<&'static ModelDescriptor> {
        descriptor(self.id)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ModelCollection {
    models: Vec<LoadedModel>,
    by_root: FnvHashMap<NodeId, ModelKey>,
}

impl ModelCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        id: &'static str,
        slot: usize,
        root: NodeId,
        base_position: Vec3,
        base_rotation: Quat,
    ) -> ModelKey {
        let key = ModelKey(self.models.len() as u32);
        self.models.push(LoadedModel {
            key,
            id,
            slot,
            root,
            is_loaded: true,
            is_hovered: false,
            is_clicked: false,
            is_floating: false,
            base_position,
            base_rotation,
        });
        self.by_root.insert(root, key);
        key
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    #[inline]
    pub fn get(&self, key: ModelKey) -> Option<&LoadedModel> {
        self.models.get(key.index())
    }

    #[inline]
    pub fn get_mut(&mut self, key: ModelKey) -> Option<&mut LoadedModel> {
        self.models.get_mut(key.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedModel> {
        self.models.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut LoadedModel> {
        self.models.iter_mut()
    }

    pub fn by_id(&self, id: &str) -> Option<ModelKey> {
        self.models.iter().find(|m| m.id == id).map(|m| m.key)
    }

    pub fn by_root(&self, node: NodeId) -> Option<ModelKey> {
        self.by_root.get(&node).copied()
    }

    /// Roots of every loaded model, used as hit-test candidates.
    pub fn loaded_roots(&self) -> Vec<NodeId> {
        self.models
            .iter()
            .filter(|m| m.is_loaded)
            .map(|m| m.root)
            .collect()
    }

    /// Walk from `node` up through its ancestors until a model root is found.
    pub fn resolve_model_from_node<P: PickSource + ?Sized>(
        &self,
        scene: &P,
        node: NodeId,
    ) -> Option<ModelKey> {
        let mut cur = node;
        loop {
            if let Some(key) = self.by_root(cur) {
                return Some(key);
            }
            cur = scene.parent_of(cur)?;
        }
    }
}
