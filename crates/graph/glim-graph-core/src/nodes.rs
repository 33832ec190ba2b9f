//! Node kinds of the effect graph.
//!
//! Each kind owns its immutable configuration plus whatever state it
//! carries between frames. Kinds form a closed set so evaluation can match
//! exhaustively; an unimplemented kind is a compile error, not a runtime
//! surprise.

pub mod blackout;
pub mod brightness;
pub mod fader;
pub mod fixed;
pub mod input;
pub mod raindrops;
pub mod sequence;
pub mod solid;

pub use blackout::Blackout;
pub use brightness::Brightness;
pub use fader::Fader;
pub use fixed::Fixed;
pub use input::InputAttr;
pub use raindrops::Raindrops;
pub use sequence::Sequence;
pub use solid::Solid;

use crate::eval::{EvalContext, Rendered};

pub enum NodeKind {
    Blackout(Blackout),
    Brightness(Brightness),
    Raindrops(Raindrops),
    Fader(Fader),
    Sequence(Sequence),
    Solid(Solid),
    Fixed(Fixed),
    Input(InputAttr),
}

impl NodeKind {
    pub fn kind(&self) -> &'static str {
        match self {
            NodeKind::Blackout(_) => "blackout",
            NodeKind::Brightness(_) => "brightness",
            NodeKind::Raindrops(_) => "raindrops",
            NodeKind::Fader(_) => "fader",
            NodeKind::Sequence(_) => "sequence",
            NodeKind::Solid(_) => "solid",
            NodeKind::Fixed(_) => "fixed",
            NodeKind::Input(_) => "input",
        }
    }
}

/// One arena entry: a stable name for diagnostics plus the kind-specific
/// configuration and state.
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
}

impl Node {
    /// Advance this node by one frame. `outputs` holds the freshly computed
    /// outputs of all nodes preceding this one in the arena, which by
    /// construction includes every child.
    pub fn update(&mut self, cx: &EvalContext, outputs: &[Rendered]) -> Rendered {
        match &mut self.kind {
            NodeKind::Blackout(node) => node.update(cx, outputs),
            NodeKind::Brightness(node) => node.update(cx, outputs),
            NodeKind::Raindrops(node) => node.update(cx, outputs),
            NodeKind::Fader(node) => node.update(cx, outputs),
            NodeKind::Sequence(node) => node.update(cx),
            NodeKind::Solid(node) => node.update(outputs),
            NodeKind::Fixed(node) => node.update(),
            NodeKind::Input(node) => node.update(cx),
        }
    }
}
