//! Serde model of the scene description.
//!
//! This is the in-memory form of the declarative node tree a host hands to
//! the builder. Nodes are `type`-tagged; value slots accept either a nested
//! node, a `{ "input": <name> }` binding, or a literal. Validation beyond
//! shape (color syntax, ranges, list lengths) happens in the builder, which
//! can report the full node path.

use serde::Deserialize;

use crate::easing::Easing;

#[derive(Debug, Clone, Deserialize)]
pub struct SceneModel {
    /// Number of pixels in the output buffer.
    pub size: usize,
    pub root: NodeModel,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeModel {
    Blackout {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        active: Option<BindingModel<bool>>,
        source: Box<NodeModel>,
    },
    Brightness {
        #[serde(default)]
        name: Option<String>,
        brightness: BindingModel<f32>,
        source: Box<NodeModel>,
    },
    Raindrops {
        #[serde(default)]
        name: Option<String>,
        rate: BindingModel<f32>,
        decay: (f32, f32),
        color: AttrModel,
        #[serde(default)]
        seed: Option<u64>,
    },
    Fader {
        #[serde(default)]
        name: Option<String>,
        easing: Easing,
        input: AttrModel,
    },
    Sequence {
        #[serde(default)]
        name: Option<String>,
        values: Vec<ValueModel>,
        #[serde(default)]
        next: Option<TriggerModel>,
        #[serde(default)]
        prev: Option<TriggerModel>,
    },
    Solid {
        #[serde(default)]
        name: Option<String>,
        solid: AttrModel,
    },
}

impl NodeModel {
    pub fn name(&self) -> Option<&str> {
        match self {
            NodeModel::Blackout { name, .. }
            | NodeModel::Brightness { name, .. }
            | NodeModel::Raindrops { name, .. }
            | NodeModel::Fader { name, .. }
            | NodeModel::Sequence { name, .. }
            | NodeModel::Solid { name, .. } => name.as_deref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            NodeModel::Blackout { .. } => "blackout",
            NodeModel::Brightness { .. } => "brightness",
            NodeModel::Raindrops { .. } => "raindrops",
            NodeModel::Fader { .. } => "fader",
            NodeModel::Sequence { .. } => "sequence",
            NodeModel::Solid { .. } => "solid",
        }
    }
}

/// A value slot: a nested node, a named input binding, or a literal.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AttrModel {
    Node(Box<NodeModel>),
    Input {
        input: String,
        #[serde(default)]
        initial: Option<ValueModel>,
    },
    Fixed(ValueModel),
}

/// A bound scalar or gate: either a literal or `{ input, initial }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BindingModel<T> {
    Input {
        input: String,
        #[serde(default)]
        initial: Option<T>,
    },
    Fixed(T),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerModel {
    pub input: String,
}

/// A literal in the description: a gate, a scalar, a color string, or a
/// two-element color span.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ValueModel {
    Bool(bool),
    Float(f32),
    Color(String),
    Span(Vec<ValueModel>),
}
