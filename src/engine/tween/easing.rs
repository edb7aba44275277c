// Easing curves for timed transform tweens

/// Easing function applied to the normalized progress of a tween stage.
///
/// The quad variants match the `Power1` family used by common tween
/// libraries; `BounceOut` is the classic piecewise bounce curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    QuadIn,
    #[default]
    QuadOut,
    QuadInOut,
    BounceOut,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] to eased progress in [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::BounceOut => bounce_out(t),
        }
    }
}

// Standard bounce-out constants.
const BOUNCE_N1: f32 = 7.5625;
const BOUNCE_D1: f32 = 2.75;

fn bounce_out(t: f32) -> f32 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984375
    }
}
