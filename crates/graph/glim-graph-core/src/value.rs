//! Value model for the effect graph.
//!
//! Everything that flows between nodes is a [`Value`]: scalars, gates and
//! colors. Colors are kept in HSL space while inside the graph (decay and
//! brightness act on lightness) and converted to [`Rgb`] at the sink
//! boundary. All numeric components are f32.

use serde::{Deserialize, Serialize};

/// Linear interpolation between two values of the same type.
pub trait Lerp {
    fn lerp(a: Self, b: Self, i: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(a: Self, b: Self, i: f32) -> Self {
        if i <= 0.0 {
            return a;
        }
        if i >= 1.0 {
            return b;
        }
        a + (b - a) * i
    }
}

/// A color in HSL space. `hue` is in degrees, `saturation` and `lightness`
/// in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn with_lightness(self, lightness: f32) -> Self {
        Self { lightness, ..self }
    }

    pub fn to_rgb(self) -> Rgb {
        let h = self.hue.rem_euclid(360.0);
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new(r + m, g + m, b + m)
    }

    /// Parse a color from its description form: `hsl(h, s, l)` or
    /// `#rrggbb`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if let Some(body) = s
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<&str> = body.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(format!("expected three components in '{}'", s));
            }
            let mut components = [0.0f32; 3];
            for (slot, part) in components.iter_mut().zip(&parts) {
                *slot = part
                    .parse::<f32>()
                    .map_err(|_| format!("non-numeric component '{}' in '{}'", part, s))?;
            }
            return Ok(Self::new(components[0], components[1], components[2]));
        }

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 {
                return Err(format!("expected six hex digits in '{}'", s));
            }
            let value =
                u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color '{}'", s))?;
            let r = ((value >> 16) & 0xff) as f32 / 255.0;
            let g = ((value >> 8) & 0xff) as f32 / 255.0;
            let b = (value & 0xff) as f32 / 255.0;
            return Ok(Rgb::new(r, g, b).to_hsl());
        }

        Err(format!("unrecognized color '{}'", s))
    }
}

impl Lerp for Hsl {
    /// Mixes componentwise, taking the shortest arc around the hue circle.
    fn lerp(a: Self, b: Self, i: f32) -> Self {
        if i <= 0.0 {
            return a;
        }
        if i >= 1.0 {
            return b;
        }
        let delta = (b.hue - a.hue).rem_euclid(360.0);
        let delta = if delta > 180.0 { delta - 360.0 } else { delta };
        Self {
            hue: (a.hue + delta * i).rem_euclid(360.0),
            saturation: f32::lerp(a.saturation, b.saturation, i),
            lightness: f32::lerp(a.lightness, b.lightness, i),
        }
    }
}

/// A color with linear RGB components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Rgb {
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn to_hsl(self) -> Hsl {
        let max = self.red.max(self.green).max(self.blue);
        let min = self.red.min(self.green).min(self.blue);
        let delta = max - min;

        let lightness = (max + min) / 2.0;
        if delta == 0.0 {
            return Hsl::new(0.0, 0.0, lightness);
        }

        let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());
        let hue = if max == self.red {
            60.0 * (((self.green - self.blue) / delta).rem_euclid(6.0))
        } else if max == self.green {
            60.0 * ((self.blue - self.red) / delta + 2.0)
        } else {
            60.0 * ((self.red - self.green) / delta + 4.0)
        };

        Hsl::new(hue, saturation, lightness)
    }

    /// Packed 8-bit components for byte-oriented sinks.
    pub fn to_bytes(self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
        ]
    }
}

/// A single value flowing through the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Float(f32),
    Bool(bool),
    Color(Hsl),
    /// A color span; procedural nodes sample a color between the endpoints.
    Range(Hsl, Hsl),
}

impl Default for Value {
    fn default() -> Self {
        Value::Color(Hsl::black())
    }
}

impl Value {
    /// Total coercion to a scalar. Colors coerce to their lightness so a
    /// color wired into a scalar slot behaves like its luminance.
    pub fn as_float(&self) -> f32 {
        match *self {
            Value::Float(f) => f,
            Value::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Color(c) => c.lightness,
            Value::Range(a, b) => (a.lightness + b.lightness) / 2.0,
        }
    }

    pub fn as_bool(&self) -> bool {
        match *self {
            Value::Float(f) => f != 0.0,
            Value::Bool(b) => b,
            Value::Color(c) => c.lightness > 0.0,
            Value::Range(a, b) => a.lightness > 0.0 || b.lightness > 0.0,
        }
    }

    /// Total coercion to a color. Scalars map to a gray of that lightness;
    /// a range collapses to its midpoint.
    pub fn as_color(&self) -> Hsl {
        match *self {
            Value::Float(f) => Hsl::new(0.0, 0.0, f.clamp(0.0, 1.0)),
            Value::Bool(b) => {
                if b {
                    Hsl::new(0.0, 0.0, 1.0)
                } else {
                    Hsl::black()
                }
            }
            Value::Color(c) => c,
            Value::Range(a, b) => Hsl::lerp(a, b, 0.5),
        }
    }

    /// The color span of this value; single colors yield a degenerate span.
    pub fn as_range(&self) -> (Hsl, Hsl) {
        match *self {
            Value::Range(a, b) => (a, b),
            other => {
                let c = other.as_color();
                (c, c)
            }
        }
    }
}

impl Lerp for Value {
    /// Interpolates where both sides share a kind; mismatched kinds and
    /// booleans step to the target once the transition completes.
    fn lerp(a: Self, b: Self, i: f32) -> Self {
        match (a, b) {
            (Value::Float(x), Value::Float(y)) => Value::Float(f32::lerp(x, y, i)),
            (Value::Color(x), Value::Color(y)) => Value::Color(Hsl::lerp(x, y, i)),
            (Value::Range(a0, a1), Value::Range(b0, b1)) => {
                Value::Range(Hsl::lerp(a0, b0, i), Hsl::lerp(a1, b1, i))
            }
            (a, b) => {
                if i >= 1.0 {
                    b
                } else {
                    a
                }
            }
        }
    }
}

pub fn minmax(a: f32, b: f32) -> (f32, f32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
