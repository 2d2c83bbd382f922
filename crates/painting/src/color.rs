//! Color conversion between the artist-facing HSVA brush color, the pigment
//! space stored in the paint field, and display RGB.

use fluidpaint_config::ColorModel;

/// Linear interpolation, `a` at t = 0 and `b` at t = 1
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Hue/saturation/value to a pigment triple.
///
/// The same hexcone mapping serves both color models; the compositor decides
/// whether the triple is read as red/yellow/blue or red/green/blue.
pub fn hsv_to_pigment(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let c = v * s;
    let h_dash = h * 6.0;
    let x = c * (1.0 - ((h_dash % 2.0) - 1.0).abs());
    let sector = (h_dash.floor() as usize).min(5);

    let r = [c, x, 0.0, 0.0, x, c][sector];
    let g = [x, c, c, x, 0.0, 0.0][sector];
    let b = [0.0, 0.0, x, c, c, x][sector];

    let m = v - c;
    [r + m, g + m, b + m]
}

// Corners of the RYB cube in RGB, indexed by (r, y, b) bits.
const RYB_CUBE: [[f32; 3]; 8] = [
    [1.0, 1.0, 1.0],     // 000 white
    [0.163, 0.373, 0.6], // 001 blue
    [1.0, 1.0, 0.0],     // 010 yellow
    [0.0, 0.66, 0.2],    // 011 green
    [1.0, 0.0, 0.0],     // 100 red
    [0.5, 0.0, 0.5],     // 101 purple
    [1.0, 0.5, 0.0],     // 110 orange
    [0.2, 0.094, 0.0],   // 111 black
];

#[inline]
fn smooth(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Subtractive RYB pigment to display RGB
///
/// Interpolates the RYB color cube with smoothed weights so that mixing
/// complementary pigments darkens toward brown rather than gray.
pub fn ryb_to_rgb(ryb: [f32; 3]) -> [f32; 3] {
    let r = smooth(ryb[0]);
    let y = smooth(ryb[1]);
    let b = smooth(ryb[2]);

    let mut out = [0.0; 3];
    for (corner, rgb) in RYB_CUBE.iter().enumerate() {
        let wr = if corner & 0b100 != 0 { r } else { 1.0 - r };
        let wy = if corner & 0b010 != 0 { y } else { 1.0 - y };
        let wb = if corner & 0b001 != 0 { b } else { 1.0 - b };
        let weight = wr * wy * wb;
        for channel in 0..3 {
            out[channel] += weight * rgb[channel];
        }
    }
    out
}

/// Pigment triple to display RGB for the given color model
pub fn pigment_to_rgb(pigment: [f32; 3], model: ColorModel) -> [f32; 3] {
    match model {
        ColorModel::Subtractive => ryb_to_rgb(pigment),
        ColorModel::Additive => pigment,
    }
}
