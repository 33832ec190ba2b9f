use thiserror::Error;

/// Errors surfaced by the engine. Everything except `InvalidArgument` and
/// `Sink` is raised while building a scene; evaluation itself is total.
#[derive(Debug, Error)]
pub enum Error {
    /// The scene description is malformed. `path` names the offending node
    /// by its slot path from the root (e.g. `root/source/color`).
    #[error("invalid configuration at '{path}': {reason}")]
    Config { path: String, reason: String },

    /// A runtime API call violated its contract (e.g. a negative frame
    /// duration).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The description violates a structural invariant of the graph, such
    /// as a duplicate node name.
    #[error("graph invariant violated: {0}")]
    Invariant(String),

    /// The render sink rejected a frame.
    #[error("output sink failed: {0}")]
    Sink(anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
