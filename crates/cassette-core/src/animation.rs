//! Per-model vertical offsets composed from independent channels.
//!
//! A model's height is `base + float + hover + click`. Each channel owns a
//! single cancellable track, so hover, click and the idle float never write
//! the same value.

use crate::models::ModelKey;
use crate::tween::{Ease, OffsetTrack, Tween};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Float,
    Hover,
    Click,
}

impl Channel {
    #[inline]
    fn slot(self) -> usize {
        match self {
            Channel::Float => 0,
            Channel::Hover => 1,
            Channel::Click => 2,
        }
    }
}

/// Tween backend driven by the interaction engine.
pub trait Animator {
    /// Tween `channel` of `model` from its current value to `target`,
    /// replacing any tween already running on that channel.
    fn animate_to(&mut self, model: ModelKey, channel: Channel, target: f32, duration: f32, ease: Ease);
    /// Hand `channel` over to a caller-built (usually looping) tween.
    fn start(&mut self, model: ModelKey, channel: Channel, tween: Tween);
    /// Sum of every channel's current contribution.
    fn offset(&self, model: ModelKey) -> f32;
    fn advance(&mut self, dt: f32);
}

#[derive(Clone, Copy, Debug, Default)]
struct ChannelSet {
    tracks: [OffsetTrack; 3],
}

#[derive(Clone, Debug, Default)]
pub struct OffsetAnimator {
    sets: Vec<ChannelSet>,
}

impl OffsetAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_mut(&mut self, model: ModelKey) -> &mut ChannelSet {
        let i = model.index();
        if self.sets.len() <= i {
            self.sets.resize(i + 1, ChannelSet::default());
        }
        &mut self.sets[i]
    }

    pub fn track(&self, model: ModelKey, channel: Channel) -> OffsetTrack {
        self.sets
            .get(model.index())
            .map(|s| s.tracks[channel.slot()])
            .unwrap_or_default()
    }
}

impl Animator for OffsetAnimator {
    fn animate_to(&mut self, model: ModelKey, channel: Channel, target: f32, duration: f32, ease: Ease) {
        self.set_mut(model).tracks[channel.slot()].retarget(target, duration, ease);
    }

    fn start(&mut self, model: ModelKey, channel: Channel, tween: Tween) {
        self.set_mut(model).tracks[channel.slot()].start(tween);
    }

    fn offset(&self, model: ModelKey) -> f32 {
        self.sets
            .get(model.index())
            .map(|s| s.tracks.iter().map(OffsetTrack::value).sum())
            .unwrap_or(0.0)
    }

    fn advance(&mut self, dt: f32) {
        for set in &mut self.sets {
            for track in &mut set.tracks {
                track.advance(dt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelCollection;
    use crate::scene::{SceneGraph, Transform};
    use glam::{Quat, Vec3};

    fn key() -> ModelKey {
        let mut scene = SceneGraph::new();
        let root = scene.add_node(None, None, Transform::IDENTITY);
        ModelCollection::new().push("casset01", 0, root, Vec3::ZERO, Quat::IDENTITY)
    }

    #[test]
    fn channels_add_up() {
        let k = key();
        let mut anim = OffsetAnimator::new();
        anim.animate_to(k, Channel::Hover, 0.1, 0.3, Ease::Power2InOut);
        anim.animate_to(k, Channel::Click, 0.3, 0.5, Ease::Power2InOut);
        anim.advance(1.0);
        assert!((anim.offset(k) - 0.4).abs() < 1e-6);

        // retargeting one channel leaves the other alone
        anim.animate_to(k, Channel::Hover, 0.0, 0.3, Ease::Power2InOut);
        anim.advance(1.0);
        assert!((anim.offset(k) - 0.3).abs() < 1e-6);
        assert_eq!(anim.track(k, Channel::Click).value(), 0.3);
    }

    #[test]
    fn unknown_model_has_no_offset() {
        assert_eq!(OffsetAnimator::new().offset(key()), 0.0);
    }
}
