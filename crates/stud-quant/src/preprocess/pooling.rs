//! Adaptive-pooling resize

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::UnknownOptionError;
use crate::buffer::{BufferError, PixelBuffer};
use crate::color::Rgb;

/// How the pixels under one output cell are combined.
///
/// Serialized names: `avg`, `min`, `max`, `dual-min-max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoolingMode {
    /// Rounded per-channel mean
    #[default]
    Avg,
    /// Per-channel minimum
    Min,
    /// Per-channel maximum
    Max,
    /// Per channel, the minimum or maximum, whichever is closer to the mean
    /// (ties go to the maximum)
    DualMinMax,
}

impl PoolingMode {
    /// All pooling modes.
    pub const ALL: [PoolingMode; 4] = [
        PoolingMode::Avg,
        PoolingMode::Min,
        PoolingMode::Max,
        PoolingMode::DualMinMax,
    ];

    /// Configuration name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            PoolingMode::Avg => "avg",
            PoolingMode::Min => "min",
            PoolingMode::Max => "max",
            PoolingMode::DualMinMax => "dual-min-max",
        }
    }

    fn pool(self, pixels: &[Rgb]) -> Rgb {
        let mut sum = [0u64; 3];
        let mut min = [u8::MAX; 3];
        let mut max = [0u8; 3];
        for px in pixels {
            for (ch, v) in px.to_bytes().into_iter().enumerate() {
                sum[ch] += v as u64;
                min[ch] = min[ch].min(v);
                max[ch] = max[ch].max(v);
            }
        }
        let count = pixels.len().max(1) as f64;
        let avg = sum.map(|s| (s as f64 / count).round() as u8);

        let out = match self {
            PoolingMode::Avg => avg,
            PoolingMode::Min => min,
            PoolingMode::Max => max,
            PoolingMode::DualMinMax => {
                let mut out = [0u8; 3];
                for ch in 0..3 {
                    let below = avg[ch] as i32 - min[ch] as i32;
                    let above = max[ch] as i32 - avg[ch] as i32;
                    out[ch] = if below < above { min[ch] } else { max[ch] };
                }
                out
            }
        };
        Rgb::from_bytes(out)
    }
}

impl fmt::Display for PoolingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PoolingMode {
    type Err = UnknownOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PoolingMode::ALL
            .into_iter()
            .find(|mode| mode.name() == wanted)
            .ok_or_else(|| UnknownOptionError::new("pooling mode", s))
    }
}

/// Resize `buffer` to `width × height` by adaptive pooling.
///
/// Output cell `(h, w)` pools input rows `floor(h·H/height)..ceil((h+1)·H/height)`
/// and the matching column range, so windows may overlap when the sizes
/// do not divide evenly. Output alpha is 255.
///
/// # Errors
///
/// [`BufferError::ZeroWidth`] if `width` is zero.
///
/// # Example
///
/// ```
/// use stud_quant::{resize_with_pooling, PixelBuffer, PoolingMode, Rgb};
///
/// let input = PixelBuffer::from_rgb(
///     &[Rgb::new(0, 0, 0), Rgb::new(100, 100, 100),
///       Rgb::new(200, 200, 200), Rgb::new(255, 255, 255)],
///     2,
/// ).unwrap();
/// let out = resize_with_pooling(&input, 1, 1, PoolingMode::Max).unwrap();
/// assert_eq!(out.rgb(0), Rgb::new(255, 255, 255));
/// ```
pub fn resize_with_pooling(
    buffer: &PixelBuffer,
    width: usize,
    height: usize,
    mode: PoolingMode,
) -> Result<PixelBuffer, BufferError> {
    if width == 0 {
        return Err(BufferError::ZeroWidth);
    }
    let (in_w, in_h) = (buffer.width(), buffer.height());
    if in_h == 0 {
        return PixelBuffer::filled(Rgb::BLACK, width, height);
    }

    let mut out = Vec::with_capacity(width * height);
    let mut window = Vec::new();
    for h in 0..height {
        let start_h = h * in_h / height;
        let end_h = ((h + 1) * in_h).div_ceil(height);
        for w in 0..width {
            let start_w = w * in_w / width;
            let end_w = ((w + 1) * in_w).div_ceil(width);
            window.clear();
            for col in start_w..end_w {
                for row in start_h..end_h {
                    window.push(buffer.rgb(buffer.index(row, col)));
                }
            }
            out.push(mode.pool(&window));
        }
    }
    PixelBuffer::from_rgb(&out, width)
}
