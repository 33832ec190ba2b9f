use crate::eval::Rendered;
use crate::value::Value;

/// A literal from the description, compiled to a constant node.
pub struct Fixed {
    value: Value,
}

impl Fixed {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn update(&mut self) -> Rendered {
        Rendered::Value(self.value)
    }
}
