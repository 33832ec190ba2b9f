use crate::buffer::Buffer;
use crate::eval::{EvalContext, Rendered};
use crate::inputs::Binding;
use crate::value::{Hsl, Value};

/// Gate node: while its `active` binding is true the output is black,
/// regardless of what the child renders; otherwise the child passes
/// through unchanged.
pub struct Blackout {
    active: Binding<bool>,
    source: usize,
}

impl Blackout {
    pub fn new(active: Binding<bool>, source: usize) -> Self {
        Self { active, source }
    }

    pub fn update(&mut self, cx: &EvalContext, outputs: &[Rendered]) -> Rendered {
        let active = self.active.resolve(cx.inputs);
        let source = &outputs[self.source];

        if !active {
            return source.clone();
        }

        match source {
            Rendered::Value(_) => Rendered::Value(Value::Color(Hsl::black())),
            Rendered::Pixels(pixels) => {
                Rendered::Pixels(Buffer::filled(pixels.size(), Hsl::black()))
            }
        }
    }
}
