//! Minimal property tween engine.
//!
//! The celebration choreography is a set of independent, time-bounded
//! interpolations (light fade, flower pulse, camera dolly, label pop). Each
//! tween owns its own delay/duration/easing and is stepped by the frame `dt`,
//! so the whole sequence is testable with a fake clock.

use glam::Vec3;

/// Values a [`Tween`] can interpolate.
pub trait Lerp: Copy {
    fn lerp_between(a: Self, b: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp_between(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec3 {
    fn lerp_between(a: Self, b: Self, t: f32) -> Self {
        a.lerp(b, t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    Power2Out,
    Power2InOut,
    /// Decaying-oscillation settle, amplitude 1. `period` is a fraction of the
    /// normalized duration (0.5 gives two visible overshoots).
    ElasticOut {
        period: f32,
    },
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::ElasticOut { period } => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    let p = period.max(1e-3);
                    2.0_f32.powf(-10.0 * t) * ((t - p / 4.0) * std::f32::consts::TAU / p).sin()
                        + 1.0
                }
            }
        }
    }
}

/// One in-flight interpolation from `from` to `to`.
///
/// `step` advances internal time; `value` samples the current state. A yoyo
/// tween plays forward then backward, `repeat` extra cycles in total.
#[derive(Clone, Copy, Debug)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    duration: f32,
    delay: f32,
    ease: Ease,
    elapsed: f32,
    yoyo: bool,
    cycles: u32,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(1e-6),
            delay: 0.0,
            ease,
            elapsed: 0.0,
            yoyo: false,
            cycles: 1,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Play forward then back, `repeat` additional cycles (gsap-style
    /// `.yoyo(true).repeat(n)`).
    pub fn with_yoyo(mut self, repeat: u32) -> Self {
        self.yoyo = true;
        self.cycles = 1 + repeat;
        self
    }

    pub fn step(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    /// True once the delay has elapsed and interpolation is underway.
    pub fn active(&self) -> bool {
        self.elapsed > self.delay
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration * self.cycles as f32
    }

    pub fn value(&self) -> T {
        let t = self.elapsed - self.delay;
        if t <= 0.0 {
            return self.from;
        }
        let total = self.duration * self.cycles as f32;
        if t >= total {
            // Even cycle count with yoyo ends back at the start value.
            let ends_reversed = self.yoyo && self.cycles % 2 == 0;
            return if ends_reversed { self.from } else { self.to };
        }
        let cycle = (t / self.duration) as u32;
        let mut frac = (t - cycle as f32 * self.duration) / self.duration;
        if self.yoyo && cycle % 2 == 1 {
            frac = 1.0 - frac;
        }
        T::lerp_between(self.from, self.to, self.ease.apply(frac))
    }
}

/// Step an optional tween in place, dropping it once finished and returning
/// the final sampled value for that frame.
pub fn step_tween<T: Lerp>(slot: &mut Option<Tween<T>>, dt: f32) -> Option<T> {
    let tween = slot.as_mut()?;
    tween.step(dt);
    let value = tween.value();
    if tween.finished() {
        *slot = None;
    }
    Some(value)
}
