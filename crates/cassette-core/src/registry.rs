//! Static catalogue of the cassettes on display.
//!
//! Registry order defines each model's slot (and therefore its resting
//! offset in the group), not the order in which assets finish loading.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub asset_path: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const MODEL_REGISTRY: &[ModelDescriptor] = &[
    ModelDescriptor {
        id: "casset01",
        asset_path: "./models/cassette01.glb",
        title: "01版のカセットテープ",
        description: "カセットテープの01版。いつからあるかわからないが、お気に入りの曲が入っているのだろうか。",
    },
    ModelDescriptor {
        id: "casset02",
        asset_path: "./models/cassette02.glb",
        title: "02版のカセットテープ",
        description: "3.5mmのヘッドホンジャックがついている。古き良き時代だったな。あの頃は。",
    },
    ModelDescriptor {
        id: "casset03",
        asset_path: "./models/cassette03.glb",
        title: "03版のカセットテープ",
        description: "カセットテープの03版。カセットテープの03版。カセットテープの03版。カセットテープの03版。",
    },
    ModelDescriptor {
        id: "casset04",
        asset_path: "./models/cassette04.glb",
        title: "04版のカセットテープ",
        description: "カセットテープの04版。誰が作ったのかはわからないが、このカセットテープには何が入っているのだろうか。",
    },
];

/// Look up a descriptor by id.
pub fn descriptor(id: &str) -> Option<&'static ModelDescriptor> {
    MODEL_REGISTRY.iter().find(|d| d.id == id)
}

/// Slot index of a descriptor within the registry.
pub fn slot_of(id: &str) -> Option<usize> {
    MODEL_REGISTRY.iter().position(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_slots_follow_registry_order() {
        for (i, d) in MODEL_REGISTRY.iter().enumerate() {
            assert_eq!(slot_of(d.id), Some(i));
        }
        assert_eq!(descriptor("casset03").map(|d| d.asset_path), Some("./models/cassette03.glb"));
        assert!(descriptor("casset99").is_none());
    }
}
