use crate::eval::{EvalContext, Rendered};
use crate::value::Value;

/// A named input binding compiled into a value slot. Resolves the router
/// value by name every pass and holds the last seen (or initial) value
/// while the input is silent.
pub struct InputAttr {
    name: String,
    current: Value,
}

impl InputAttr {
    pub fn new(name: &str, initial: Value) -> Self {
        Self {
            name: name.to_string(),
            current: initial,
        }
    }

    pub fn update(&mut self, cx: &EvalContext) -> Rendered {
        if let Some(value) = cx.inputs.value(&self.name) {
            self.current = value;
        }
        Rendered::Value(self.current)
    }
}
