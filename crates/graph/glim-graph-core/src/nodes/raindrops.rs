use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::buffer::Buffer;
use crate::eval::{EvalContext, Rendered};
use crate::inputs::Binding;
use crate::value::{minmax, Hsl, Lerp};

#[derive(Debug, Clone)]
struct Raindrop {
    color: Hsl,
    age: f32,
    decay: f32,
}

/// Procedural generator: every pixel slot can hold one decaying drop. Each
/// frame existing drops age (and vanish once their decay duration is
/// reached), slots respawn with probability `rate * dt`, and the rendered
/// pixel is the drop's color with its lightness weighted by the
/// remaining-life fraction.
///
/// Randomness is local to the node. Slots are visited in index order, so a
/// fixed seed reproduces the exact drop pattern.
pub struct Raindrops {
    rate: Binding<f32>,
    decay: (f32, f32),
    color: usize,

    drops: Vec<Option<Raindrop>>,
    rng: SmallRng,
}

impl Raindrops {
    pub fn new(
        rate: Binding<f32>,
        decay: (f32, f32),
        color: usize,
        size: usize,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            rate,
            decay,
            color,
            drops: vec![None; size],
            rng,
        }
    }

    pub fn update(&mut self, cx: &EvalContext, outputs: &[Rendered]) -> Rendered {
        let dt = cx.dt.as_secs_f32();
        let rate = self.rate.resolve(cx.inputs);
        let (from, to) = outputs[self.color].uniform().as_range();

        let spawn = (rate * dt).clamp(0.0, 1.0);
        let decay = minmax(self.decay.0, self.decay.1);
        let rng = &mut self.rng;

        for slot in self.drops.iter_mut() {
            if let Some(drop) = slot {
                drop.age += dt;
                if drop.age >= drop.decay {
                    *slot = None;
                }
            }

            if spawn > 0.0 && rng.gen_bool(spawn as f64) {
                *slot = Some(Raindrop {
                    color: Hsl::lerp(from, to, rng.gen::<f32>()),
                    age: 0.0,
                    decay: sample(rng, decay),
                });
            }
        }

        Rendered::Pixels(Buffer::from_fn(self.drops.len(), |i| match &self.drops[i] {
            Some(drop) => {
                let life = (1.0 - drop.age / drop.decay).clamp(0.0, 1.0);
                drop.color.with_lightness(drop.color.lightness * life)
            }
            None => Hsl::black(),
        }))
    }
}

fn sample(rng: &mut SmallRng, (lo, hi): (f32, f32)) -> f32 {
    if lo == hi {
        lo
    } else {
        rng.gen_range(lo..hi)
    }
}
