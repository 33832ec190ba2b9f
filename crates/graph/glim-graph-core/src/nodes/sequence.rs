use crate::eval::{EvalContext, Rendered};
use crate::inputs::Trigger;
use crate::value::Value;

/// Cyclic selector over a non-empty value list. A pass applies the net
/// pulse count of its `next` and `prev` bindings, wrapping in both
/// directions; simultaneous opposite pulses cancel.
pub struct Sequence {
    values: Vec<Value>,
    position: usize,

    next: Option<Trigger>,
    prev: Option<Trigger>,
}

impl Sequence {
    pub fn new(values: Vec<Value>, next: Option<Trigger>, prev: Option<Trigger>) -> Self {
        debug_assert!(!values.is_empty());
        Self {
            values,
            position: 0,
            next,
            prev,
        }
    }

    pub fn update(&mut self, cx: &EvalContext) -> Rendered {
        let next = self.next.as_ref().map_or(0, |t| t.pulses(cx.inputs)) as i64;
        let prev = self.prev.as_ref().map_or(0, |t| t.pulses(cx.inputs)) as i64;

        let shift = next - prev;
        if shift != 0 {
            let len = self.values.len() as i64;
            self.position = (self.position as i64 + shift).rem_euclid(len) as usize;
        }

        Rendered::Value(self.values[self.position])
    }
}
