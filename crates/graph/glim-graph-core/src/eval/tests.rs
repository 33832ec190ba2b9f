//! Behavioural coverage for the evaluation pass and the node kinds.

use std::time::Duration;

use assert_approx_eq::assert_approx_eq;

use crate::error::Error;
use crate::inputs::InputValue;
use crate::run::NullOutput;
use crate::scene::Scene;
use crate::types::{NodeModel, SceneModel};
use crate::value::{Hsl, Rgb};

fn scene(json: &str, size: usize) -> Scene {
    let model: NodeModel = serde_json::from_str(json).expect("model should parse");
    Scene::build(&model, size).expect("scene should build")
}

fn eval(scene: &mut Scene, dt: Duration) {
    scene.inputs.begin_pass();
    scene.graph.evaluate(&scene.inputs, dt);
}

fn root_float(scene: &Scene) -> f32 {
    scene.graph.root().uniform().as_float()
}

fn root_color(scene: &Scene) -> Hsl {
    scene.graph.root().uniform().as_color()
}

const SECOND: Duration = Duration::from_secs(1);

// --- Sequence ------------------------------------------------------------

#[test]
fn sequence_starts_at_the_first_value() {
    let mut s = scene(
        r#"{"type": "sequence", "values": [3.0, 4.0, 5.0], "next": {"input": "next"}}"#,
        1,
    );
    eval(&mut s, Duration::ZERO);
    assert_eq!(root_float(&s), 3.0);
}

#[test]
fn sequence_wraps_in_both_directions() {
    let mut s = scene(
        r#"{
            "type": "sequence",
            "values": [0.0, 1.0, 2.0, 3.0, 4.0],
            "next": {"input": "next"},
            "prev": {"input": "prev"}
        }"#,
        1,
    );

    for k in [1usize, 3, 5, 7, 12] {
        for _ in 0..k {
            s.inputs.send("next", None);
        }
        eval(&mut s, Duration::ZERO);
        assert_eq!(root_float(&s), (k % 5) as f32, "after {k} next pulses");

        for _ in 0..k {
            s.inputs.send("prev", None);
        }
        eval(&mut s, Duration::ZERO);
        assert_eq!(root_float(&s), 0.0, "after {k} prev pulses");
    }
}

#[test]
fn sequence_applies_the_net_pulse_count_per_pass() {
    let mut s = scene(
        r#"{
            "type": "sequence",
            "values": [10.0, 20.0, 30.0],
            "next": {"input": "next"},
            "prev": {"input": "prev"}
        }"#,
        1,
    );

    s.inputs.send("next", None);
    s.inputs.send("next", None);
    eval(&mut s, Duration::ZERO);
    assert_eq!(root_float(&s), 30.0);

    // Opposite pulses inside one pass cancel.
    s.inputs.send("next", None);
    s.inputs.send("prev", None);
    eval(&mut s, Duration::ZERO);
    assert_eq!(root_float(&s), 30.0);

    // Pulses are consumed: an event-free pass holds the position.
    eval(&mut s, Duration::ZERO);
    assert_eq!(root_float(&s), 30.0);
}

#[test]
fn sequence_with_a_single_value_never_leaves_it() {
    let mut s = scene(
        r#"{"type": "sequence", "values": [7.0], "next": {"input": "next"}}"#,
        1,
    );
    for _ in 0..3 {
        s.inputs.send("next", None);
        eval(&mut s, Duration::ZERO);
        assert_eq!(root_float(&s), 7.0);
    }
}

// --- Fader ---------------------------------------------------------------

const FADER_OVER_SEQUENCE: &str = r#"{
    "type": "fader",
    "easing": {"func": "linear", "speed": "1s"},
    "input": {
        "type": "sequence",
        "values": [0.0, 1.0],
        "next": {"input": "next"}
    }
}"#;

#[test]
fn fader_hits_both_transition_endpoints() {
    let mut s = scene(FADER_OVER_SEQUENCE, 1);

    eval(&mut s, Duration::ZERO);
    assert_eq!(root_float(&s), 0.0);

    s.inputs.send("next", None);
    eval(&mut s, Duration::ZERO);
    // Progress 0: still the starting value.
    assert_eq!(root_float(&s), 0.0);

    eval(&mut s, SECOND);
    assert_eq!(root_float(&s), 1.0);

    eval(&mut s, SECOND);
    assert_eq!(root_float(&s), 1.0);
}

#[test]
fn interrupted_fades_continue_from_the_displayed_value() {
    let mut s = scene(FADER_OVER_SEQUENCE, 1);
    eval(&mut s, Duration::ZERO);

    s.inputs.send("next", None);
    eval(&mut s, Duration::from_millis(500));
    assert_approx_eq!(root_float(&s), 0.5);

    // Advancing again wraps the sequence back to 0.0; the new fade starts
    // from the interpolated 0.5, not from 1.0.
    s.inputs.send("next", None);
    eval(&mut s, Duration::from_millis(500));
    assert_approx_eq!(root_float(&s), 0.25);
}

#[test]
fn split_frames_match_one_large_frame() {
    let mut split = scene(FADER_OVER_SEQUENCE, 1);
    let mut whole = scene(FADER_OVER_SEQUENCE, 1);

    eval(&mut split, Duration::ZERO);
    eval(&mut whole, Duration::ZERO);

    split.inputs.send("next", None);
    eval(&mut split, Duration::from_millis(250));
    eval(&mut split, Duration::from_millis(250));

    whole.inputs.send("next", None);
    eval(&mut whole, Duration::from_millis(500));

    assert_approx_eq!(root_float(&split), root_float(&whole), 1e-6);
}

#[test]
fn fader_interpolates_colors_through_hsl() {
    let mut s = scene(
        r#"{
            "type": "fader",
            "easing": {"func": "linear", "speed": "2s"},
            "input": {
                "type": "sequence",
                "values": ["hsl(0, 1, 0.5)", "hsl(40, 1, 0.5)"],
                "next": {"input": "next"}
            }
        }"#,
        1,
    );
    eval(&mut s, Duration::ZERO);

    s.inputs.send("next", None);
    eval(&mut s, SECOND);
    assert_approx_eq!(root_color(&s).hue, 20.0, 1e-3);
}

// --- Blackout ------------------------------------------------------------

const GATED_SEQUENCE: &str = r#"{
    "type": "blackout",
    "active": {"input": "blackout", "initial": false},
    "source": {
        "type": "sequence",
        "values": ["hsl(120, 1, 0.5)"],
        "next": {"input": "next"}
    }
}"#;

#[test]
fn blackout_passes_through_while_inactive() {
    let mut s = scene(GATED_SEQUENCE, 1);
    eval(&mut s, SECOND);
    assert_approx_eq!(root_color(&s).hue, 120.0);
    assert_approx_eq!(root_color(&s).lightness, 0.5);
}

#[test]
fn blackout_clamps_to_black_while_active() {
    let mut s = scene(GATED_SEQUENCE, 1);

    s.inputs.send("blackout", Some(InputValue::Bool(true)));
    for _ in 0..3 {
        eval(&mut s, SECOND);
        assert_eq!(root_color(&s), Hsl::black());
    }

    s.inputs.send("blackout", Some(InputValue::Bool(false)));
    eval(&mut s, SECOND);
    assert_approx_eq!(root_color(&s).hue, 120.0);
}

#[test]
fn blackout_initial_gate_is_configurable() {
    let mut s = scene(
        r#"{
            "type": "blackout",
            "active": true,
            "source": {"type": "solid", "solid": "hsl(200, 1, 0.5)"}
        }"#,
        1,
    );
    eval(&mut s, Duration::ZERO);
    assert_eq!(root_color(&s), Hsl::black());
}

// --- Brightness ----------------------------------------------------------

const DIMMED_SOLID: &str = r#"{
    "type": "brightness",
    "brightness": {"input": "level", "initial": 1.0},
    "source": {"type": "solid", "solid": "hsl(60, 1, 0.8)"}
}"#;

#[test]
fn brightness_scales_lightness() {
    let mut s = scene(DIMMED_SOLID, 1);

    eval(&mut s, Duration::ZERO);
    assert_approx_eq!(root_color(&s).lightness, 0.8);

    s.inputs.send("level", Some(InputValue::Float(0.5)));
    eval(&mut s, Duration::ZERO);
    assert_approx_eq!(root_color(&s).lightness, 0.4);
    assert_approx_eq!(root_color(&s).hue, 60.0);

    s.inputs.send("level", Some(InputValue::Float(0.0)));
    eval(&mut s, Duration::ZERO);
    assert_approx_eq!(root_color(&s).lightness, 0.0);
}

#[test]
fn brightness_clamps_out_of_range_levels() {
    let mut s = scene(DIMMED_SOLID, 1);

    s.inputs.send("level", Some(InputValue::Float(3.5)));
    eval(&mut s, Duration::ZERO);
    assert_approx_eq!(root_color(&s).lightness, 0.8);

    s.inputs.send("level", Some(InputValue::Float(-2.0)));
    eval(&mut s, Duration::ZERO);
    assert_approx_eq!(root_color(&s).lightness, 0.0);
}

// --- Raindrops -----------------------------------------------------------

fn raindrops_json(rate: &str) -> String {
    format!(
        r#"{{
            "type": "raindrops",
            "rate": {rate},
            "decay": [0.3, 0.4],
            "seed": 42,
            "color": ["hsl(245.31, 0.5, 0.5)", "hsl(333.47, 0.7, 0.5)"]
        }}"#
    )
}

#[test]
fn seeded_raindrops_are_reproducible() {
    let model: NodeModel = serde_json::from_str(&raindrops_json("0.7")).unwrap();
    let mut a = Scene::build(&model, 16).unwrap();
    let mut b = Scene::build(&model, 16).unwrap();

    for _ in 0..50 {
        eval(&mut a, Duration::from_millis(100));
        eval(&mut b, Duration::from_millis(100));
        assert_eq!(a.graph.root(), b.graph.root());
    }
}

#[test]
fn raindrop_spawns_converge_to_the_configured_rate() {
    // One pixel and a decay far below the frame time: every spawned drop
    // dies before the next frame, so a lit pixel marks a spawn.
    let mut s = scene(
        r#"{
            "type": "raindrops",
            "rate": 0.3,
            "decay": [0.01, 0.02],
            "seed": 7,
            "color": "hsl(0, 1, 0.5)"
        }"#,
        1,
    );

    let dt = Duration::from_millis(100);
    let frames = 5000usize;
    let mut spawns = 0usize;
    for _ in 0..frames {
        eval(&mut s, dt);
        if root_color(&s).lightness > 0.0 {
            spawns += 1;
        }
    }

    let observed = spawns as f32 / (frames as f32 * dt.as_secs_f32());
    assert_approx_eq!(observed, 0.3, 0.1);
}

#[test]
fn stopped_raindrops_decay_to_black() {
    let mut s = scene(&raindrops_json(r#"{"input": "rate", "initial": 20.0}"#), 8);

    // rate * dt saturates the spawn probability: every slot fills.
    for _ in 0..5 {
        eval(&mut s, Duration::from_millis(100));
    }
    let lit = (0..8).filter(|&i| s.graph.root().pixel(i).lightness > 0.0).count();
    assert_eq!(lit, 8);

    s.inputs.send("rate", Some(InputValue::Float(0.0)));
    for _ in 0..6 {
        eval(&mut s, Duration::from_millis(100));
    }
    for i in 0..8 {
        assert_eq!(s.graph.root().pixel(i), Hsl::black());
    }
}

#[test]
fn raindrops_fade_with_remaining_life() {
    let mut s = scene(
        r#"{
            "type": "raindrops",
            "rate": 100.0,
            "decay": [0.4, 0.4],
            "seed": 1,
            "color": "hsl(0, 0, 0.8)"
        }"#,
        1,
    );

    // Saturated rate: the single slot respawns at full lightness.
    eval(&mut s, Duration::from_millis(100));
    assert_approx_eq!(s.graph.root().pixel(0).lightness, 0.8);

    // To watch a drop age, stop the spawning through a bound rate.
    let mut aged = scene(
        r#"{
            "type": "raindrops",
            "rate": {"input": "rate", "initial": 100.0},
            "decay": [0.4, 0.4],
            "seed": 1,
            "color": "hsl(0, 0, 0.8)"
        }"#,
        1,
    );
    eval(&mut aged, Duration::from_millis(100));
    aged.inputs.send("rate", Some(InputValue::Float(0.0)));
    eval(&mut aged, Duration::from_millis(100));
    // age 0.1 of 0.4 gone: three quarters of the lightness remain.
    assert_approx_eq!(aged.graph.root().pixel(0).lightness, 0.6, 1e-3);
}

// --- Uniform sources under pixel transformers ----------------------------

#[test]
fn uniform_values_splat_across_the_buffer() {
    let mut s = scene(
        r#"{"type": "solid", "solid": "hsl(300, 0.5, 0.5)"}"#,
        5,
    );
    eval(&mut s, Duration::ZERO);
    let expected = Hsl::new(300.0, 0.5, 0.5);
    for i in 0..5 {
        assert_eq!(s.graph.root().pixel(i), expected);
    }
}

// --- End to end ----------------------------------------------------------

#[test]
fn preset_chain_walks_the_sequence() {
    let model: SceneModel = glim_test_fixtures::scenes::load("preset-chain").unwrap();
    let mut main = Scene::from_model(&model).unwrap().run(NullOutput);

    let red = Rgb::new(1.0, 0.0, 0.0);
    let green = Rgb::new(0.0, 1.0, 0.0);
    let blue = Rgb::new(0.0, 0.0, 1.0);

    main.render(0).unwrap();
    assert_eq!(*main.buffer().get(0), red);

    main.send("preset_next", None);
    main.render(16).unwrap();
    assert_eq!(*main.buffer().get(0), green);

    main.send("preset_next", None);
    main.send("preset_next", None);
    main.render(16).unwrap();
    assert_eq!(*main.buffer().get(0), red);

    main.send("preset_prev", None);
    main.render(16).unwrap();
    assert_eq!(*main.buffer().get(0), blue);
}

#[test]
fn negative_durations_are_rejected() {
    let mut main = scene(r#"{"type": "solid", "solid": "hsl(0, 1, 0.5)"}"#, 1).run(NullOutput);
    let err = main.render(-1).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "got {err:?}");

    // The loop stays usable after a rejected call.
    main.render(0).unwrap();
}

#[test]
fn zero_duration_frames_still_resolve_triggers() {
    let mut main = scene(
        r#"{
            "type": "sequence",
            "values": [1.0, 2.0],
            "next": {"input": "next"}
        }"#,
        1,
    )
    .run(NullOutput);

    main.send("next", None);
    main.render(0).unwrap();
    // 2.0 coerces to a gray of that clamped lightness.
    assert_eq!(*main.buffer().get(0), Rgb::new(1.0, 1.0, 1.0));
}

#[test]
fn sink_failures_surface_through_frame() {
    struct FailingSink;

    impl crate::run::Output for FailingSink {
        const KIND: &'static str = "failing";

        fn render(&mut self, _buffer: &crate::buffer::Buffer<Rgb>) -> anyhow::Result<()> {
            anyhow::bail!("device unplugged")
        }
    }

    let mut main = scene(r#"{"type": "solid", "solid": "hsl(0, 1, 0.5)"}"#, 1).run(FailingSink);
    let err = main.render(16).unwrap_err();
    assert!(matches!(err, Error::Sink(_)), "got {err:?}");
}

#[test]
fn introspection_lists_declared_inputs() {
    let main = scene(GATED_SEQUENCE, 1).run(NullOutput);
    let inputs = main.introspect();
    let names: Vec<&str> = inputs.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["blackout", "next"]);
}

// --- Fixtures ------------------------------------------------------------

#[test]
fn the_demo_fixture_builds_and_runs() {
    let model: SceneModel = glim_test_fixtures::scenes::load("demo").unwrap();
    let scene = Scene::from_model(&model).unwrap();
    assert_eq!(scene.graph.size(), 100);

    let mut main = scene.run(NullOutput);
    main.render(0).unwrap();
    main.send("preset_next", None);
    for _ in 0..10 {
        main.render(16).unwrap();
    }

    let names: Vec<String> = main.introspect().into_iter().map(|i| i.name).collect();
    for expected in ["blackout", "brightness", "preset_next", "preset_prev"] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }
}

#[test]
fn the_solid_fixture_builds_and_runs() {
    let model: SceneModel = glim_test_fixtures::scenes::load("solid").unwrap();
    let mut main = Scene::from_model(&model).unwrap().run(NullOutput);

    main.render(0).unwrap();
    main.send("preset_next", None);
    main.render(16).unwrap();
}
