//! Named inputs wiring the host into the graph.
//!
//! Hosts push events through a cloneable [`InputSink`]; events land in a
//! queue that the router drains atomically at the start of each evaluation
//! pass. Value updates persist in a per-name table, trigger pulses are
//! counted and valid for exactly one pass. Nodes resolve inputs by name
//! during the pass and see a stable snapshot.

use crossbeam_channel::{unbounded, Receiver, Sender};
use hashbrown::HashMap;
use serde::Serialize;

use crate::value::Value;

/// Primitive payload a host may attach to an event. `None` payloads are
/// trigger pulses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue {
    Float(f32),
    Int(i64),
    Bool(bool),
}

impl InputValue {
    fn into_value(self) -> Value {
        match self {
            InputValue::Float(f) => Value::Float(f),
            InputValue::Int(i) => Value::Float(i as f32),
            InputValue::Bool(b) => Value::Bool(b),
        }
    }
}

/// What a declared input expects, used for host introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Trigger,
    Value,
}

/// Cloneable, thread-safe handle for pushing events from outside the frame
/// loop. Sending never fails and never blocks.
#[derive(Clone)]
pub struct InputSink {
    tx: Sender<(String, Option<InputValue>)>,
}

impl InputSink {
    pub fn send(&self, name: &str, value: Option<InputValue>) {
        // The receiver lives as long as the router; a send after teardown
        // is silently dropped.
        let _ = self.tx.send((name.to_string(), value));
    }
}

pub struct InputRouter {
    tx: Sender<(String, Option<InputValue>)>,
    rx: Receiver<(String, Option<InputValue>)>,

    declared: HashMap<String, InputKind>,
    values: HashMap<String, Value>,
    pulses: HashMap<String, u32>,
}

impl InputRouter {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            declared: HashMap::new(),
            values: HashMap::new(),
            pulses: HashMap::new(),
        }
    }

    pub fn sink(&self) -> InputSink {
        InputSink {
            tx: self.tx.clone(),
        }
    }

    /// Convenience for hosts holding the router directly.
    pub fn send(&self, name: &str, value: Option<InputValue>) {
        let _ = self.tx.send((name.to_string(), value));
    }

    /// Declare a value input found while building the scene, seeding its
    /// initial value.
    pub(crate) fn declare_value(&mut self, name: &str, initial: Value) {
        self.declared.insert(name.to_string(), InputKind::Value);
        self.values.entry(name.to_string()).or_insert(initial);
    }

    /// Declare a trigger input found while building the scene.
    pub(crate) fn declare_trigger(&mut self, name: &str) {
        self.declared.insert(name.to_string(), InputKind::Trigger);
    }

    /// Drain pending events into the snapshot for the upcoming pass. Pulse
    /// counts from the previous pass are discarded first, so each pulse is
    /// observed by exactly one pass.
    pub fn begin_pass(&mut self) {
        self.pulses.clear();

        while let Ok((name, payload)) = self.rx.try_recv() {
            match payload {
                Some(value) => {
                    if self.declared.get(&name) == Some(&InputKind::Trigger) {
                        log::warn!("input '{}' is a trigger, treating the payload as a pulse", name);
                        *self.pulses.entry(name).or_insert(0) += 1;
                    } else {
                        self.values.insert(name, value.into_value());
                    }
                }
                None => {
                    *self.pulses.entry(name).or_insert(0) += 1;
                }
            }
        }
    }

    /// Current value for `name`, if any was declared or ever received.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }

    /// Pulses received for `name` since the previous pass.
    pub fn pulses(&self, name: &str) -> u32 {
        self.pulses.get(name).copied().unwrap_or(0)
    }

    /// Declared inputs, for host introspection. Order is unspecified.
    pub fn declared(&self) -> impl Iterator<Item = (&str, InputKind)> {
        self.declared.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime side of a `{ input, initial }` binding: holds the last resolved
/// value and re-resolves by name every pass.
#[derive(Debug, Clone)]
pub struct Binding<T> {
    input: Option<String>,
    current: T,
}

pub trait FromValue: Copy {
    fn from_value(value: &Value) -> Self;
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Self {
        value.as_float()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Self {
        value.as_bool()
    }
}

impl<T> Binding<T>
where
    T: FromValue,
{
    pub fn fixed(value: T) -> Self {
        Self {
            input: None,
            current: value,
        }
    }

    pub fn bound(input: &str, initial: T) -> Self {
        Self {
            input: Some(input.to_string()),
            current: initial,
        }
    }

    pub fn resolve(&mut self, inputs: &InputRouter) -> T {
        if let Some(name) = &self.input {
            if let Some(value) = inputs.value(name) {
                self.current = T::from_value(&value);
            }
        }
        self.current
    }
}

/// A named trigger binding (`next`/`prev` slots).
#[derive(Debug, Clone)]
pub struct Trigger {
    input: String,
}

impl Trigger {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    pub fn pulses(&self, inputs: &InputRouter) -> u32 {
        inputs.pulses(&self.input)
    }
}
