//! CIEDE2000 color difference (CIE 142-2001)

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::color::Lab;

const POW25_7: f64 = 6_103_515_625.0; // 25^7

/// Parametric weights of the CIEDE2000 formula.
///
/// All three default to `1.0`, the reference viewing conditions. Raising a
/// weight makes the metric more tolerant of differences in that component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ciede2000Weights {
    /// Lightness weight
    pub kl: f64,
    /// Chroma weight
    pub kc: f64,
    /// Hue weight
    pub kh: f64,
}

impl Default for Ciede2000Weights {
    fn default() -> Self {
        Self {
            kl: 1.0,
            kc: 1.0,
            kh: 1.0,
        }
    }
}

/// Hue angle of `(a, b)` in `[0, 2π)`, or `0` for the neutral axis.
#[inline]
fn hue_angle(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a);
    if h < 0.0 {
        h + 2.0 * PI
    } else {
        h
    }
}

/// CIEDE2000 difference between two Lab colors.
///
/// When either color is achromatic the hue difference is taken as zero and
/// the mean hue degenerates to the sum of both hues, so no term divides by
/// zero.
///
/// # Example
///
/// ```
/// use stud_quant::{ciede2000, Ciede2000Weights, Lab};
///
/// let d = ciede2000(
///     Lab::new(50.0, 2.6772, -79.7751),
///     Lab::new(50.0, 0.0, -82.7485),
///     Ciede2000Weights::default(),
/// );
/// assert!((d - 2.0425).abs() < 1e-4);
/// ```
pub fn ciede2000(std: Lab, smp: Lab, weights: Ciede2000Weights) -> f64 {
    let c_std = std.chroma();
    let c_smp = smp.chroma();
    let c_avg7 = ((c_std + c_smp) / 2.0).powi(7);
    let g = 0.5 * (1.0 - (c_avg7 / (c_avg7 + POW25_7)).sqrt());

    let ap_std = std.a * (1.0 + g);
    let ap_smp = smp.a * (1.0 + g);
    let cp_std = ap_std.hypot(std.b);
    let cp_smp = ap_smp.hypot(smp.b);
    let hp_std = hue_angle(ap_std, std.b);
    let hp_smp = hue_angle(ap_smp, smp.b);
    let achromatic = cp_std * cp_smp == 0.0;

    let dl = smp.l - std.l;
    let dc = cp_smp - cp_std;
    let mut dhp = if achromatic { 0.0 } else { hp_smp - hp_std };
    if dhp > PI {
        dhp -= 2.0 * PI;
    }
    if dhp < -PI {
        dhp += 2.0 * PI;
    }
    let dh = 2.0 * (cp_std * cp_smp).sqrt() * (dhp / 2.0).sin();

    let lp = (std.l + smp.l) / 2.0;
    let cp = (cp_std + cp_smp) / 2.0;
    let hp = if achromatic {
        hp_std + hp_smp
    } else {
        let mut hp = (hp_std + hp_smp) / 2.0;
        if (hp_std - hp_smp).abs() > PI {
            hp -= PI;
        }
        if hp < 0.0 {
            hp += 2.0 * PI;
        }
        hp
    };

    let lpm50 = (lp - 50.0).powi(2);
    let t = 1.0 - 0.17 * (hp - PI / 6.0).cos() + 0.24 * (2.0 * hp).cos()
        + 0.32 * (3.0 * hp + PI / 30.0).cos()
        - 0.20 * (4.0 * hp - 63.0 * PI / 180.0).cos();

    let sl = 1.0 + (0.015 * lpm50) / (20.0 + lpm50).sqrt();
    let sc = 1.0 + 0.045 * cp;
    let sh = 1.0 + 0.015 * cp * t;

    let delta_theta = (30.0f64).to_radians() * (-((hp.to_degrees() - 275.0) / 25.0).powi(2)).exp();
    let cp7 = cp.powi(7);
    let rc = 2.0 * (cp7 / (cp7 + POW25_7)).sqrt();
    let rt = -(2.0 * delta_theta).sin() * rc;

    let l_term = dl / (weights.kl * sl);
    let c_term = dc / (weights.kc * sc);
    let h_term = dh / (weights.kh * sh);

    (l_term * l_term + c_term * c_term + h_term * h_term + rt * c_term * h_term).sqrt()
}
