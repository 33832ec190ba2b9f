use crate::easing::{Animation, Easing, Transition};
use crate::eval::{EvalContext, Rendered};
use crate::value::Value;

/// Cross-fades towards its child's output. Whenever the child produces a
/// new value, a transition starts from the value currently displayed, so an
/// interrupted fade continues without a discontinuity.
pub struct Fader {
    input: usize,
    easing: Easing,

    current: Option<Value>,
    seen: Option<Value>,
    transition: Animation<Value>,
}

impl Fader {
    pub fn new(input: usize, easing: Easing) -> Self {
        Self {
            input,
            easing,
            current: None,
            seen: None,
            transition: Animation::idle(),
        }
    }

    pub fn update(&mut self, cx: &EvalContext, outputs: &[Rendered]) -> Rendered {
        let target = outputs[self.input].uniform();

        let current = match self.current {
            // First evaluation adopts the child's value as-is.
            None => {
                self.seen = Some(target);
                target
            }
            Some(current) => {
                if self.seen != Some(target) {
                    self.transition.start(self.easing, current, target);
                    self.seen = Some(target);
                }

                match self.transition.update(cx.dt) {
                    Transition::Running(value) => value,
                    Transition::Idle => current,
                }
            }
        };

        self.current = Some(current);
        Rendered::Value(current)
    }
}
