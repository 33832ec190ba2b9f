use crate::eval::{EvalContext, Rendered};
use crate::inputs::Binding;
use crate::value::{Hsl, Value};

/// Scales the child's luminance by a bound scalar. The scalar is clamped to
/// `[0, 1]`; out-of-range input values are clamped, not rejected.
pub struct Brightness {
    level: Binding<f32>,
    source: usize,
}

impl Brightness {
    pub fn new(level: Binding<f32>, source: usize) -> Self {
        Self { level, source }
    }

    pub fn update(&mut self, cx: &EvalContext, outputs: &[Rendered]) -> Rendered {
        let level = self.level.resolve(cx.inputs).clamp(0.0, 1.0);

        match &outputs[self.source] {
            Rendered::Value(value) => {
                Rendered::Value(Value::Color(scale(value.as_color(), level)))
            }
            Rendered::Pixels(pixels) => Rendered::Pixels(pixels.map(|c| scale(*c, level))),
        }
    }
}

fn scale(color: Hsl, level: f32) -> Hsl {
    color.with_lightness(color.lightness * level)
}
