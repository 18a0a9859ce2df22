//! Platform-independent core of the cassette tape showcase: scene graph,
//! picking, tweened interaction state and asset import.

pub mod animation;
pub mod constants;
pub mod detail;
pub mod error;
pub mod import;
pub mod interaction;
pub mod lighting;
pub mod loader;
pub mod marquee;
pub mod models;
pub mod picking;
pub mod registry;
pub mod scene;
pub mod showcase;
pub mod state;
pub mod tween;
pub mod vertex;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use animation::{Animator, Channel, OffsetAnimator};
pub use detail::DetailPanelState;
pub use error::AssetError;
pub use import::import_glb;
pub use interaction::{DetailPanel, InteractionConfig, PointerInteractionEngine};
pub use lighting::{EnvironmentLight, LightRig};
pub use loader::{LoadBarrier, SlotState};
pub use marquee::Marquee;
pub use models::{LoadedModel, ModelCollection, ModelKey};
pub use picking::{pointer_to_ndc, Hit, PickSource, Ray, ViewportRect};
pub use registry::{ModelDescriptor, MODEL_REGISTRY};
pub use scene::{Aabb, MeshData, NodeId, SceneGraph, SceneTemplate, Transform};
pub use showcase::{LoadProgress, Showcase};
pub use state::{Camera, Clock};
pub use tween::{Ease, OffsetTrack, Tween};
pub use vertex::{MeshVertex, NodeUniforms, SceneUniforms};
