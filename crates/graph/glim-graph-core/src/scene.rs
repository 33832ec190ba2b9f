//! Compiles a scene description into a runnable graph.
//!
//! The build is one recursive walk over the description tree: children are
//! pushed into the arena before their parents, which is exactly the
//! evaluation order later on. Input bindings are collected into the router
//! as they are encountered. Any defect in the description fails the whole
//! build; no partial graph is ever returned.

use hashbrown::HashSet;
use log::debug;

use crate::error::{Error, Result};
use crate::eval::Graph;
use crate::inputs::{Binding, InputRouter, Trigger};
use crate::nodes::{
    Blackout, Brightness, Fader, Fixed, InputAttr, Node, NodeKind, Raindrops, Sequence, Solid,
};
use crate::types::{AttrModel, BindingModel, NodeModel, SceneModel, TriggerModel, ValueModel};
use crate::value::{Hsl, Value};

/// A compiled scene: the graph plus the router holding its input bindings.
pub struct Scene {
    pub graph: Graph,
    pub inputs: InputRouter,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene").finish_non_exhaustive()
    }
}

impl Scene {
    pub fn build(root: &NodeModel, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidArgument(
                "scene size must be at least one pixel".to_string(),
            ));
        }

        let mut builder = Builder {
            size,
            nodes: Vec::new(),
            router: InputRouter::new(),
            names: HashSet::new(),
            path: vec!["root".to_string()],
        };

        builder.node(root)?;

        debug!(
            "scene built: {} nodes, {} declared inputs",
            builder.nodes.len(),
            builder.router.declared().count()
        );

        Ok(Scene {
            graph: Graph::new(size, builder.nodes),
            inputs: builder.router,
        })
    }

    pub fn from_model(model: &SceneModel) -> Result<Self> {
        Self::build(&model.root, model.size)
    }
}

struct Builder {
    size: usize,
    nodes: Vec<Node>,
    router: InputRouter,
    names: HashSet<String>,
    path: Vec<String>,
}

impl Builder {
    fn node(&mut self, model: &NodeModel) -> Result<usize> {
        match model {
            NodeModel::Blackout {
                name,
                active,
                source,
            } => {
                let source = self.slot("source", |b| b.node(source))?;
                let active = match active {
                    Some(binding) => self.gate_binding(binding, false)?,
                    None => Binding::fixed(false),
                };
                self.push(name, NodeKind::Blackout(Blackout::new(active, source)))
            }

            NodeModel::Brightness {
                name,
                brightness,
                source,
            } => {
                let source = self.slot("source", |b| b.node(source))?;
                let level = self.scalar_binding(brightness, 1.0)?;
                self.push(name, NodeKind::Brightness(Brightness::new(level, source)))
            }

            NodeModel::Raindrops {
                name,
                rate,
                decay,
                color,
                seed,
            } => {
                let color = self.slot("color", |b| b.attr(color))?;
                let rate = self.scalar_binding(rate, 0.0)?;

                if !(decay.0.is_finite() && decay.1.is_finite() && decay.0 > 0.0 && decay.1 > 0.0)
                {
                    return Err(
                        self.config_err("decay range must be a pair of positive durations")
                    );
                }

                self.push(
                    name,
                    NodeKind::Raindrops(Raindrops::new(rate, *decay, color, self.size, *seed)),
                )
            }

            NodeModel::Fader {
                name,
                easing,
                input,
            } => {
                let input = self.slot("input", |b| b.attr(input))?;
                self.push(name, NodeKind::Fader(Fader::new(input, *easing)))
            }

            NodeModel::Sequence {
                name,
                values,
                next,
                prev,
            } => {
                if values.is_empty() {
                    return Err(self.config_err("sequence requires at least one value"));
                }
                let values = values
                    .iter()
                    .map(|value| self.value(value))
                    .collect::<Result<Vec<_>>>()?;

                let next = next.as_ref().map(|t| self.trigger(t));
                let prev = prev.as_ref().map(|t| self.trigger(t));

                self.push(name, NodeKind::Sequence(Sequence::new(values, next, prev)))
            }

            NodeModel::Solid { name, solid } => {
                let input = self.slot("solid", |b| b.attr(solid))?;
                self.push(name, NodeKind::Solid(Solid::new(input)))
            }
        }
    }

    fn attr(&mut self, model: &AttrModel) -> Result<usize> {
        match model {
            AttrModel::Node(node) => self.node(node),

            AttrModel::Input { input, initial } => {
                let initial = match initial {
                    Some(value) => self.value(value)?,
                    None => Value::default(),
                };
                self.router.declare_value(input, initial);
                self.push(&None, NodeKind::Input(InputAttr::new(input, initial)))
            }

            AttrModel::Fixed(value) => {
                let value = self.value(value)?;
                self.push(&None, NodeKind::Fixed(Fixed::new(value)))
            }
        }
    }

    fn value(&self, model: &ValueModel) -> Result<Value> {
        match model {
            ValueModel::Bool(b) => Ok(Value::Bool(*b)),
            ValueModel::Float(f) => Ok(Value::Float(*f)),
            ValueModel::Color(s) => Hsl::parse(s)
                .map(Value::Color)
                .map_err(|reason| self.config_err(reason)),
            ValueModel::Span(items) => {
                if items.len() != 2 {
                    return Err(self.config_err("a value span must have exactly two entries"));
                }
                match (self.value(&items[0])?, self.value(&items[1])?) {
                    (Value::Color(from), Value::Color(to)) => Ok(Value::Range(from, to)),
                    _ => Err(self.config_err("span entries must be colors")),
                }
            }
        }
    }

    fn scalar_binding(&mut self, model: &BindingModel<f32>, default: f32) -> Result<Binding<f32>> {
        match model {
            BindingModel::Fixed(value) => Ok(Binding::fixed(*value)),
            BindingModel::Input { input, initial } => {
                let initial = (*initial).unwrap_or(default);
                self.router.declare_value(input, Value::Float(initial));
                Ok(Binding::bound(input, initial))
            }
        }
    }

    fn gate_binding(&mut self, model: &BindingModel<bool>, default: bool) -> Result<Binding<bool>> {
        match model {
            BindingModel::Fixed(value) => Ok(Binding::fixed(*value)),
            BindingModel::Input { input, initial } => {
                let initial = (*initial).unwrap_or(default);
                self.router.declare_value(input, Value::Bool(initial));
                Ok(Binding::bound(input, initial))
            }
        }
    }

    fn trigger(&mut self, model: &TriggerModel) -> Trigger {
        self.router.declare_trigger(&model.input);
        Trigger::new(&model.input)
    }

    fn slot(
        &mut self,
        slot: &str,
        f: impl FnOnce(&mut Self) -> Result<usize>,
    ) -> Result<usize> {
        self.path.push(slot.to_string());
        let result = f(self);
        self.path.pop();
        result
    }

    /// Append a node to the arena under its explicit name or, for unnamed
    /// nodes, its slot path.
    fn push(&mut self, name: &Option<String>, kind: NodeKind) -> Result<usize> {
        let name = match name {
            Some(name) => name.clone(),
            None => self.path_string(),
        };

        if !self.names.insert(name.clone()) {
            return Err(Error::Invariant(format!(
                "duplicate node name '{}'",
                name
            )));
        }

        debug!("node '{}' ({}) at index {}", name, kind.kind(), self.nodes.len());
        self.nodes.push(Node { name, kind });
        Ok(self.nodes.len() - 1)
    }

    fn path_string(&self) -> String {
        self.path.join("/")
    }

    fn config_err(&self, reason: impl Into<String>) -> Error {
        Error::Config {
            path: self.path_string(),
            reason: reason.into(),
        }
    }
}
