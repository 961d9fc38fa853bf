// easing.rs
//
// Pure easing curves for animation interpolation. No dependency on the
// lifecycle or runner layers, just math over normalized time.

use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized time.
///
/// Curves come in in/out/in-out families: `In` ramps up from a slow
/// start, `Out` decelerates into the end, `InOut` does both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,

    // Polynomial families, by increasing strength.
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,

    // Sine wave, the gentlest of the lot.
    SineIn,
    SineOut,
    SineInOut,

    // Exponential, the most dramatic.
    ExpoIn,
    ExpoOut,
    ExpoInOut,

    // Overshoot then settle.
    BackIn,
    BackOut,
    BackInOut,

    // Bouncing ball.
    BounceIn,
    BounceOut,
    BounceInOut,

    // Spring oscillation.
    ElasticIn,
    ElasticOut,
    ElasticInOut,
}

impl Easing {
    /// Evaluate the curve at `t`, clamped to [0, 1].
    ///
    /// All curves map 0 to 0 and 1 to 1. Back and elastic curves
    /// overshoot the [0, 1] output range in between.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            Easing::QuadIn => poly_in(t, 2),
            Easing::QuadOut => poly_out(t, 2),
            Easing::QuadInOut => poly_in_out(t, 2),
            Easing::CubicIn => poly_in(t, 3),
            Easing::CubicOut => poly_out(t, 3),
            Easing::CubicInOut => poly_in_out(t, 3),
            Easing::QuartIn => poly_in(t, 4),
            Easing::QuartOut => poly_out(t, 4),
            Easing::QuartInOut => poly_in_out(t, 4),
            Easing::QuintIn => poly_in(t, 5),
            Easing::QuintOut => poly_out(t, 5),
            Easing::QuintInOut => poly_in_out(t, 5),

            Easing::SineIn => 1.0 - (t * FRAC_PI_2).cos(),
            Easing::SineOut => (t * FRAC_PI_2).sin(),
            Easing::SineInOut => 0.5 - 0.5 * (PI * t).cos(),

            Easing::ExpoIn => {
                if t == 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * t - 10.0)
                }
            }
            Easing::ExpoOut => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Easing::ExpoInOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    1.0 - 2.0_f32.powf(-20.0 * t + 10.0) / 2.0
                }
            }

            Easing::BackIn => back_in(t),
            Easing::BackOut => 1.0 - back_in(1.0 - t),
            Easing::BackInOut => {
                const C2: f32 = BACK_C1 * 1.525;
                if t < 0.5 {
                    (2.0 * t).powi(2) * ((C2 + 1.0) * 2.0 * t - C2) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((C2 + 1.0) * (2.0 * t - 2.0) + C2) + 2.0) / 2.0
                }
            }

            Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
            Easing::BounceOut => bounce_out(t),
            Easing::BounceInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }

            Easing::ElasticIn => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    -(2.0_f32.powf(10.0 * t - 10.0)) * ((10.0 * t - 10.75) * C4).sin()
                }
            }
            Easing::ElasticOut => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2.0_f32.powf(-10.0 * t) * ((10.0 * t - 0.75) * C4).sin() + 1.0
                }
            }
            Easing::ElasticInOut => {
                const C5: f32 = (2.0 * PI) / 4.5;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    -(2.0_f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0
                } else {
                    2.0_f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * C5).sin() / 2.0 + 1.0
                }
            }
        }
    }
}

const BACK_C1: f32 = 1.70158;

#[inline]
fn poly_in(t: f32, n: i32) -> f32 {
    t.powi(n)
}

#[inline]
fn poly_out(t: f32, n: i32) -> f32 {
    1.0 - (1.0 - t).powi(n)
}

#[inline]
fn poly_in_out(t: f32, n: i32) -> f32 {
    if t < 0.5 {
        (2.0 * t).powi(n) / 2.0
    } else {
        1.0 - (2.0 - 2.0 * t).powi(n) / 2.0
    }
}

#[inline]
fn back_in(t: f32) -> f32 {
    const C3: f32 = BACK_C1 + 1.0;
    C3 * t * t * t - BACK_C1 * t * t
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

// ── Interpolation ────────────────────────────────────────────────────────

/// A value a tween can interpolate.
pub trait TweenValue: Copy {
    fn lerp(a: Self, b: Self, t: f32) -> Self;
}

impl TweenValue for f32 {
    #[inline]
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

impl TweenValue for glam::Vec2 {
    #[inline]
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp<V: TweenValue>(a: V, b: V, t: f32) -> V {
    V::lerp(a, b, t)
}

/// Interpolate with an easing curve applied to `t`.
#[inline]
pub fn ease<V: TweenValue>(a: V, b: V, t: f32, easing: Easing) -> V {
    V::lerp(a, b, easing.apply(t))
}
