use crate::eval::Rendered;

/// Uniform fill from its value child; selection without cross-fade when the
/// child is a sequence.
pub struct Solid {
    input: usize,
}

impl Solid {
    pub fn new(input: usize) -> Self {
        Self { input }
    }

    pub fn update(&mut self, outputs: &[Rendered]) -> Rendered {
        Rendered::Value(outputs[self.input].uniform())
    }
}
