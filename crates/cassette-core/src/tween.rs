//! Scalar tweens and cancellable offset tracks.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power2Out,
    Power2InOut,
}

impl Ease {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Forever,
}

/// Time-driven interpolation from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub delay: f32,
    pub ease: Ease,
    pub repeat: Repeat,
    pub yoyo: bool,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            delay: 0.0,
            ease,
            repeat: Repeat::Once,
            yoyo: false,
            elapsed: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Loop forever; with `yoyo` every other cycle runs backwards.
    pub fn forever(mut self, yoyo: bool) -> Self {
        self.repeat = Repeat::Forever;
        self.yoyo = yoyo;
        self
    }

    pub fn is_finished(&self) -> bool {
        self.repeat == Repeat::Once && self.elapsed >= self.delay + self.duration
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        if self.repeat == Repeat::Forever && self.duration > 0.0 {
            // keep the accumulator small; one full (yoyo) period is invariant
            let period = if self.yoyo { 2.0 * self.duration } else { self.duration };
            let local = self.elapsed - self.delay;
            if local > period {
                self.elapsed = self.delay + local % period;
            }
        }
        self.value()
    }

    pub fn value(&self) -> f32 {
        let local = self.elapsed - self.delay;
        if local <= 0.0 {
            return self.from;
        }
        if self.duration <= 0.0 {
            return self.to;
        }
        let progress = match self.repeat {
            Repeat::Once => {
                if local >= self.duration {
                    return self.to;
                }
                local / self.duration
            }
            Repeat::Forever => {
                let cycles = local / self.duration;
                let cycle = cycles.floor();
                let frac = cycles - cycle;
                if self.yoyo && (cycle as u64) % 2 == 1 {
                    1.0 - frac
                } else {
                    frac
                }
            }
        };
        self.from + (self.to - self.from) * self.ease.apply(progress)
    }
}

/// One additive offset contribution with at most one tween driving it.
///
/// Starting a new tween replaces the running one and continues from the
/// current value, so overlapping requests never stomp each other's end state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OffsetTrack {
    value: f32,
    tween: Option<Tween>,
}

impl OffsetTrack {
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn retarget(&mut self, target: f32, duration: f32, ease: Ease) {
        self.start(Tween::new(self.value, target, duration, ease));
    }

    pub fn start(&mut self, tween: Tween) {
        self.value = tween.value();
        self.tween = Some(tween);
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(t) = self.tween.as_mut() {
            self.value = t.advance(dt);
            if t.is_finished() {
                self.tween = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_hit_endpoints() {
        for e in [Ease::Linear, Ease::Power2Out, Ease::Power2InOut] {
            assert_eq!(e.apply(0.0), 0.0);
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6);
        }
        assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn one_shot_lands_exactly_on_target() {
        let mut t = Tween::new(0.0, 0.3, 0.5, Ease::Power2Out);
        for _ in 0..100 {
            t.advance(1.0 / 60.0);
        }
        assert_eq!(t.value(), 0.3);
        assert!(t.is_finished());
    }

    #[test]
    fn yoyo_returns_to_start_after_two_halves() {
        let mut t = Tween::new(0.0, 1.0, 1.0, Ease::Linear).forever(true);
        assert!((t.advance(0.5) - 0.5).abs() < 1e-6);
        assert!((t.advance(0.5) - 1.0).abs() < 1e-6);
        assert!((t.advance(0.5) - 0.5).abs() < 1e-6);
        assert!(!t.is_finished());
    }

    #[test]
    fn delay_holds_start_value() {
        let mut t = Tween::new(2.0, 4.0, 1.0, Ease::Linear).with_delay(0.5);
        assert_eq!(t.advance(0.25), 2.0);
        assert!((t.advance(0.75) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn retarget_continues_from_current_value() {
        let mut track = OffsetTrack::default();
        track.retarget(1.0, 1.0, Ease::Linear);
        track.advance(0.5);
        assert!((track.value() - 0.5).abs() < 1e-6);
        track.retarget(0.0, 1.0, Ease::Linear);
        assert!((track.value() - 0.5).abs() < 1e-6);
        track.advance(1.0);
        assert_eq!(track.value(), 0.0);
        assert!(!track.is_animating());
    }
}
