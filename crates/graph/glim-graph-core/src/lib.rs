pub mod buffer;
pub mod easing;
pub mod error;
pub mod eval;
pub mod inputs;
pub mod nodes;
pub mod run;
pub mod scene;
pub mod types;
pub mod value;

pub use buffer::Buffer;
pub use easing::{Easing, EasingFn};
pub use error::{Error, Result};
pub use eval::{EvalContext, Graph, Rendered};
pub use inputs::{InputKind, InputRouter, InputSink, InputValue};
pub use run::{InputInfo, Loop, NullOutput, Output};
pub use scene::Scene;
pub use types::{NodeModel, SceneModel};
pub use value::{Hsl, Rgb, Value};
