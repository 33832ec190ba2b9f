//! The frame loop and the render sink boundary.
//!
//! A [`Loop`] owns a compiled scene and a sink. The host drives it by
//! calling [`Loop::frame`] (or the millisecond-based [`Loop::render`]) once
//! per animation frame with the elapsed duration since the previous call;
//! input events arrive through [`Loop::send`] or a cloned [`InputSink`] at
//! any time and are folded in at the start of the next pass.

use std::time::Duration;

use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::eval::Graph;
use crate::inputs::{InputKind, InputRouter, InputSink, InputValue};
use crate::scene::Scene;
use crate::value::Rgb;

/// The render sink: whatever consumes finished frames (a canvas, an LED
/// driver, a test capture).
pub trait Output {
    const KIND: &'static str;

    fn render(&mut self, buffer: &Buffer<Rgb>) -> anyhow::Result<()>;
}

/// Discards every frame. Useful for headless hosts that only read the
/// pixel buffer back, and for tests.
pub struct NullOutput;

impl Output for NullOutput {
    const KIND: &'static str = "null";

    fn render(&mut self, _buffer: &Buffer<Rgb>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// A declared input, for host UIs enumerating the available controls.
#[derive(Debug, Clone, serde::Serialize)]
pub struct InputInfo {
    pub name: String,
    pub kind: InputKind,
}

pub struct Loop<O>
where
    O: Output,
{
    graph: Graph,
    inputs: InputRouter,
    output: O,
    buffer: Buffer<Rgb>,
}

impl Scene {
    /// Attach a sink and turn the scene into a runnable loop.
    pub fn run<O: Output>(self, output: O) -> Loop<O> {
        let buffer = Buffer::filled(self.graph.size(), Rgb::black());
        Loop {
            graph: self.graph,
            inputs: self.inputs,
            output,
            buffer,
        }
    }
}

impl<O> Loop<O>
where
    O: Output,
{
    /// Run one frame: snapshot pending input events, evaluate the graph
    /// with the elapsed duration, and hand the pixel buffer to the sink.
    pub fn frame(&mut self, elapsed: Duration) -> Result<()> {
        self.inputs.begin_pass();
        self.graph.evaluate(&self.inputs, elapsed);
        self.graph.render_to(&mut self.buffer);
        self.output.render(&self.buffer).map_err(Error::Sink)
    }

    /// Host-facing variant of [`Loop::frame`] taking elapsed milliseconds.
    /// Negative durations are rejected.
    pub fn render(&mut self, elapsed_ms: i64) -> Result<()> {
        if elapsed_ms < 0 {
            return Err(Error::InvalidArgument(format!(
                "elapsed duration must be non-negative, got {}ms",
                elapsed_ms
            )));
        }
        self.frame(Duration::from_millis(elapsed_ms as u64))
    }

    /// Inject an input event. Never fails; unknown names are accepted and
    /// stored by the router.
    pub fn send(&mut self, name: &str, value: Option<InputValue>) {
        self.inputs.send(name, value);
    }

    /// A cloneable handle for pushing events from outside the frame loop
    /// (UI callbacks, other threads).
    pub fn sink(&self) -> InputSink {
        self.inputs.sink()
    }

    /// The inputs declared by the scene description.
    pub fn introspect(&self) -> Vec<InputInfo> {
        let mut infos: Vec<InputInfo> = self
            .inputs
            .declared()
            .map(|(name, kind)| InputInfo {
                name: name.to_string(),
                kind,
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// The most recently rendered frame.
    pub fn buffer(&self) -> &Buffer<Rgb> {
        &self.buffer
    }
}
