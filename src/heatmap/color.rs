//! Sequential yellow → orange → red colour scale.

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Relative luminance in 0..=1 (sRGB weights, no gamma).
    pub fn luminance(&self) -> f64 {
        (0.2126 * f64::from(self.0) + 0.7152 * f64::from(self.1) + 0.0722 * f64::from(self.2))
            / 255.0
    }

    /// Black or white, whichever reads better on top of this colour.
    pub fn contrasting(&self) -> Rgb {
        if self.luminance() > 0.55 {
            Rgb(0, 0, 0)
        } else {
            Rgb(255, 255, 255)
        }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Nine-class YlOrRd ramp.
const STOPS: [Rgb; 9] = [
    Rgb(0xff, 0xff, 0xcc),
    Rgb(0xff, 0xed, 0xa0),
    Rgb(0xfe, 0xd9, 0x76),
    Rgb(0xfe, 0xb2, 0x4c),
    Rgb(0xfd, 0x8d, 0x3c),
    Rgb(0xfc, 0x4e, 0x2a),
    Rgb(0xe3, 0x1a, 0x1c),
    Rgb(0xbd, 0x00, 0x26),
    Rgb(0x80, 0x00, 0x26),
];

/// Maps counts in `[0, max]` onto the ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    max: f64,
}

impl ColorScale {
    pub fn new(max: usize) -> Self {
        Self {
            max: max.max(1) as f64,
        }
    }

    pub fn max(&self) -> usize {
        self.max as usize
    }

    pub fn color(&self, value: usize) -> Rgb {
        let t = (value as f64 / self.max).clamp(0.0, 1.0);
        interpolate(t)
    }
}

fn interpolate(t: f64) -> Rgb {
    let scaled = t * (STOPS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(STOPS.len() - 2);
    let frac = scaled - i as f64;
    let (a, b) = (STOPS[i], STOPS[i + 1]);
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * frac).round() as u8;
    Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
