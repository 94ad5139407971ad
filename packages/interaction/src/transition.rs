//! Timed value transitions for the floating detail panel.

use std::time::Duration;

/// Duration of the panel fade in and out.
pub const FADE_DURATION: Duration = Duration::from_millis(200);

/// Cubic in-out easing (`d3.easeCubicInOut`), the default d3 transition
/// easing. `t` is clamped to `[0, 1]`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        t.mul_add(t * t, 2.0) / 2.0
    }
}

/// An eased interpolation from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl Transition {
    #[must_use]
    pub const fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// A transition that has already settled at `value`.
    #[must_use]
    pub const fn settled(value: f64) -> Self {
        Self::new(value, value, Duration::ZERO)
    }

    /// Value `elapsed` after the transition started.
    #[must_use]
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if self.is_finished(elapsed) {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.to - self.from).mul_add(ease_cubic_in_out(t), self.from)
    }

    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert!(ease_cubic_in_out(0.0).abs() < 1e-12);
        assert!((ease_cubic_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!((ease_cubic_in_out(1.0) - 1.0).abs() < 1e-12);
        assert!((ease_cubic_in_out(0.25) - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn fade_in_progresses_over_duration() {
        let fade = Transition::new(0.0, 1.0, FADE_DURATION);
        assert!(fade.value_at(Duration::ZERO).abs() < 1e-12);
        assert!((fade.value_at(Duration::from_millis(100)) - 0.5).abs() < 1e-12);
        assert!(!fade.is_finished(Duration::from_millis(199)));
        assert!(fade.is_finished(Duration::from_millis(200)));
        assert!((fade.value_at(Duration::from_secs(5)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fade_out_reverses() {
        let fade = Transition::new(1.0, 0.0, FADE_DURATION);
        assert!((fade.value_at(Duration::from_millis(50)) - 0.9375).abs() < 1e-12);
        assert!(fade.value_at(FADE_DURATION).abs() < 1e-12);
    }

    #[test]
    fn settled_transition_is_constant() {
        let settled = Transition::settled(0.0);
        assert!(settled.is_finished(Duration::ZERO));
        assert!(settled.value_at(Duration::ZERO).abs() < 1e-12);
    }
}
