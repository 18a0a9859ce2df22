use crate::constants::{MARQUEE_PERIOD_SEC, MARQUEE_TRAVEL_PERCENT};
use crate::tween::{Ease, Tween};

/// Endless vertical scroll for the decorative copy text.
#[derive(Clone, Debug)]
pub struct Marquee {
    tween: Tween,
}

impl Marquee {
    pub fn new() -> Self {
        Self {
            tween: Tween::new(0.0, MARQUEE_TRAVEL_PERCENT, MARQUEE_PERIOD_SEC, Ease::Linear)
                .forever(false),
        }
    }

    /// Current translation as a percentage of the element's own height.
    pub fn y_percent(&self) -> f32 {
        self.tween.value()
    }

    pub fn advance(&mut self, dt: f32) -> f32 {
        self.tween.advance(dt)
    }
}

impl Default for Marquee {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_back_to_top_each_period() {
        let mut m = Marquee::new();
        assert!((m.advance(MARQUEE_PERIOD_SEC * 0.5) + 50.0).abs() < 1e-3);
        assert!((m.advance(MARQUEE_PERIOD_SEC * 0.75) + 25.0).abs() < 1e-3);
    }
}
