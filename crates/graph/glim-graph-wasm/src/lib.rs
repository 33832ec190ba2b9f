//! wasm-bindgen surface for driving a glim scene from a browser host.
//!
//! The JS side owns the frame pump (`requestAnimationFrame`) and the pixel
//! sink (typically a canvas); this crate only builds the scene, advances it
//! by elapsed milliseconds, and hands back the packed RGB buffer.

use glim_graph_core::{InputValue, Loop, NodeModel, NullOutput, Scene};
use wasm_bindgen::prelude::*;

/// Holds a persistent runtime so node state (faders, raindrops, sequences)
/// accumulates across frames without crossing the wasm boundary.
#[wasm_bindgen]
pub struct System {
    main: Loop<NullOutput>,
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Build the runtime loop from a JSON description. Kept separate from the
/// wasm constructor so it stays callable from native tests.
fn build(root_json: &str, size: usize) -> Result<Loop<NullOutput>, String> {
    let root: NodeModel = serde_json::from_str(root_json).map_err(|e| e.to_string())?;
    let scene = Scene::build(&root, size).map_err(|e| e.to_string())?;
    Ok(scene.run(NullOutput))
}

#[wasm_bindgen]
impl System {
    /// Build a scene from its JSON description and a pixel count.
    #[wasm_bindgen(constructor)]
    pub fn new(root_json: &str, size: usize) -> Result<System, JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let main = build(root_json, size).map_err(js_err)?;
        Ok(System { main })
    }

    /// Advance by the elapsed milliseconds since the previous frame.
    pub fn render(&mut self, elapsed_ms: f64) -> Result<(), JsValue> {
        if !elapsed_ms.is_finite() {
            return Err(js_err("elapsed duration must be finite"));
        }
        self.main.render(elapsed_ms as i64).map_err(js_err)
    }

    /// Inject an input event: a boolean or number updates the named value,
    /// anything else (usually `undefined`) is a trigger pulse.
    pub fn send(&mut self, name: &str, value: JsValue) {
        let payload = if let Some(b) = value.as_bool() {
            Some(InputValue::Bool(b))
        } else {
            value.as_f64().map(|f| InputValue::Float(f as f32))
        };
        self.main.send(name, payload);
    }

    /// The current frame as packed `[r, g, b, r, g, b, ...]` bytes.
    pub fn pixels(&self) -> Vec<u8> {
        let buffer = self.main.buffer();
        let mut bytes = Vec::with_capacity(buffer.size() * 3);
        for pixel in buffer.iter() {
            bytes.extend_from_slice(&pixel.to_bytes());
        }
        bytes
    }

    /// The declared inputs as JSON, for hosts building control panels.
    pub fn inputs(&self) -> String {
        serde_json::to_string(&self.main.introspect()).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "type": "sequence",
        "values": ["hsl(0, 1, 0.5)", "hsl(120, 1, 0.5)"],
        "next": {"input": "preset_next"}
    }"#;

    #[test]
    fn it_should_build_and_render_from_json() {
        let mut main = build(SCENE, 4).expect("scene should build");
        main.render(0).expect("first frame should render");

        let system = System { main };
        let pixels = system.pixels();
        assert_eq!(pixels.len(), 4 * 3);
        assert_eq!(&pixels[..3], &[255, 0, 0][..]);
    }

    #[test]
    fn it_should_reject_malformed_descriptions() {
        assert!(build(r#"{"type": "sparkle"}"#, 4).is_err());
        assert!(build(r#"{"type": "sequence", "values": []}"#, 4).is_err());
    }

    #[test]
    fn it_should_expose_declared_inputs() {
        let main = build(SCENE, 4).expect("scene should build");
        let system = System { main };
        let inputs: serde_json::Value = serde_json::from_str(&system.inputs()).unwrap();
        assert_eq!(inputs[0]["name"], "preset_next");
        assert_eq!(inputs[0]["kind"], "trigger");
    }
}
