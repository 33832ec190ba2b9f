//! Easing curves and the transition driver built on top of them.
//!
//! An [`Easing`] pairs a curve with a speed. Curves map normalized progress
//! `[0, 1]` to eased progress and come from the `ezing` crate. Transitions
//! accumulate progress as `dt / speed`, which makes them frame-rate
//! independent: any split of the same total elapsed time lands on the same
//! eased value.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::value::Lerp;

/// The closed set of easing curves available to scene descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFn {
    Linear,
    QuadIn,
    QuadOut,
    QuadInout,
    CubicIn,
    CubicOut,
    CubicInout,
    QuartIn,
    QuartOut,
    QuartInout,
    QuintIn,
    QuintOut,
    QuintInout,
    SineIn,
    SineOut,
    SineInout,
    CircIn,
    CircOut,
    CircInout,
    ExpoIn,
    ExpoOut,
    ExpoInout,
    ElasticIn,
    ElasticOut,
    ElasticInout,
    BackIn,
    BackOut,
    BackInout,
    BounceIn,
    BounceOut,
    BounceInout,
}

impl EasingFn {
    pub fn resolve(self) -> fn(f32) -> f32 {
        match self {
            EasingFn::Linear => ezing::linear,
            EasingFn::QuadIn => ezing::quad_in,
            EasingFn::QuadOut => ezing::quad_out,
            EasingFn::QuadInout => ezing::quad_inout,
            EasingFn::CubicIn => ezing::cubic_in,
            EasingFn::CubicOut => ezing::cubic_out,
            EasingFn::CubicInout => ezing::cubic_inout,
            EasingFn::QuartIn => ezing::quart_in,
            EasingFn::QuartOut => ezing::quart_out,
            EasingFn::QuartInout => ezing::quart_inout,
            EasingFn::QuintIn => ezing::quint_in,
            EasingFn::QuintOut => ezing::quint_out,
            EasingFn::QuintInout => ezing::quint_inout,
            EasingFn::SineIn => ezing::sine_in,
            EasingFn::SineOut => ezing::sine_out,
            EasingFn::SineInout => ezing::sine_inout,
            EasingFn::CircIn => ezing::circ_in,
            EasingFn::CircOut => ezing::circ_out,
            EasingFn::CircInout => ezing::circ_inout,
            EasingFn::ExpoIn => ezing::expo_in,
            EasingFn::ExpoOut => ezing::expo_out,
            EasingFn::ExpoInout => ezing::expo_inout,
            EasingFn::ElasticIn => ezing::elastic_in,
            EasingFn::ElasticOut => ezing::elastic_out,
            EasingFn::ElasticInout => ezing::elastic_inout,
            EasingFn::BackIn => ezing::back_in,
            EasingFn::BackOut => ezing::back_out,
            EasingFn::BackInout => ezing::back_inout,
            EasingFn::BounceIn => ezing::bounce_in,
            EasingFn::BounceOut => ezing::bounce_out,
            EasingFn::BounceInout => ezing::bounce_inout,
        }
    }
}

/// A curve plus the duration a full transition takes. Speeds deserialize
/// from human-readable duration strings (`"5s"`, `"250ms"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Easing {
    pub func: EasingFn,
    #[serde(with = "humantime_serde")]
    pub speed: Duration,
}

impl Easing {
    pub fn with(func: EasingFn, speed: Duration) -> Self {
        Self { func, speed }
    }
}

/// State of a value transition driven by an [`Easing`].
pub struct Animation<V>
where
    V: Lerp + Copy,
{
    state: State<V>,
}

enum State<V> {
    Idle,
    Running {
        func: fn(f32) -> f32,
        speed: Duration,
        source: V,
        target: V,
        position: f32,
    },
}

/// Result of advancing an [`Animation`] by one frame.
pub enum Transition<V> {
    Idle,
    Running(V),
}

impl<V> Animation<V>
where
    V: Lerp + Copy,
{
    pub fn idle() -> Self {
        Self { state: State::Idle }
    }

    pub fn start(&mut self, easing: Easing, source: V, target: V) {
        self.state = State::Running {
            func: easing.func.resolve(),
            speed: easing.speed,
            source,
            target,
            position: 0.0,
        };
    }

    /// Advance by `dt`. Returns the interpolated value while running; the
    /// final update delivers the exact target before going idle. A zero
    /// speed completes on the first update after start.
    pub fn update(&mut self, dt: Duration) -> Transition<V> {
        match self.state {
            State::Idle => Transition::Idle,
            State::Running {
                func,
                speed,
                source,
                target,
                ref mut position,
            } => {
                if *position >= 1.0 {
                    self.state = State::Idle;
                    return Transition::Idle;
                }

                let speed = speed.as_secs_f32();
                if speed > 0.0 {
                    *position += dt.as_secs_f32() / speed;
                } else {
                    *position = 1.0;
                }

                Transition::Running(Lerp::lerp(source, target, func(f32::min(1.0, *position))))
            }
        }
    }
}
