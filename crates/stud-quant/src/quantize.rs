//! Nearest-anchor quantization
//!
//! Maps every pixel to the closest available palette color, ignoring how
//! many studs of that color exist. The supply-aware passes build on this.

use crate::buffer::{BufferError, PixelBuffer};
use crate::color::Rgb;
use crate::metric::ColorDistance;
use crate::palette::{ColorCounts, Palette, PaletteError};

/// Nearest anchor to `color` together with its distance.
///
/// Anchors are tried in order and a later anchor only wins if it is
/// strictly closer, so ties go to the earliest anchor. Returns `None` when
/// `anchors` is empty.
pub fn nearest_anchor<M>(color: Rgb, anchors: &[Rgb], metric: &M) -> Option<(Rgb, f64)>
where
    M: ColorDistance + ?Sized,
{
    let (&first, rest) = anchors.split_first()?;
    let mut best = (first, metric.distance(color, first));
    for &anchor in rest {
        let d = metric.distance(color, anchor);
        if d < best.1 {
            best = (anchor, d);
        }
    }
    Some(best)
}

/// Nearest anchor to `color`, or `None` when there are no anchors.
#[inline]
pub fn find_nearest<M>(color: Rgb, anchors: &[Rgb], metric: &M) -> Option<Rgb>
where
    M: ColorDistance + ?Sized,
{
    nearest_anchor(color, anchors, metric).map(|(anchor, _)| anchor)
}

/// Replace every pixel with its nearest available palette color.
///
/// Alpha is carried over from the input.
///
/// # Errors
///
/// [`PaletteError::NoAvailableColors`] if no palette color has a count
/// above zero.
pub fn align_to_palette<M>(
    buffer: &PixelBuffer,
    palette: &Palette,
    metric: &M,
) -> Result<PixelBuffer, PaletteError>
where
    M: ColorDistance + ?Sized,
{
    let anchors = palette.anchors();
    if anchors.is_empty() {
        return Err(PaletteError::NoAvailableColors);
    }

    let mut aligned = buffer.clone();
    for i in 0..buffer.len() {
        if let Some(nearest) = find_nearest(buffer.rgb(i), &anchors, metric) {
            aligned.set_rgb(i, nearest);
        }
    }
    Ok(aligned)
}

/// Number of pixels of each color in `buffer`.
pub fn usage_map(buffer: &PixelBuffer) -> ColorCounts {
    let mut usage = ColorCounts::new();
    for color in buffer.pixels() {
        *usage.entry(color).or_insert(0) += 1;
    }
    usage
}

/// Mean per-pixel distance between two buffers of equal size.
///
/// An empty pair of buffers has an error of zero.
pub fn average_quantization_error<M>(
    left: &PixelBuffer,
    right: &PixelBuffer,
    metric: &M,
) -> Result<f64, BufferError>
where
    M: ColorDistance + ?Sized,
{
    if left.len() != right.len() {
        return Err(BufferError::SizeMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    if left.is_empty() {
        return Ok(0.0);
    }
    let total: f64 = left
        .pixels()
        .zip(right.pixels())
        .map(|(a, b)| metric.distance(a, b))
        .sum();
    Ok(total / left.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::ColorMetric;

    fn bw_palette() -> Palette {
        Palette::unlimited(&[Rgb::BLACK, Rgb::new(255, 255, 255)]).unwrap()
    }

    #[test]
    fn test_nearest_prefers_first_on_tie() {
        let anchors = [Rgb::new(0, 0, 0), Rgb::new(2, 0, 0)];
        let nearest = find_nearest(Rgb::new(1, 0, 0), &anchors, &ColorMetric::EuclideanRgb);
        assert_eq!(nearest, Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_nearest_of_nothing() {
        assert_eq!(find_nearest(Rgb::BLACK, &[], &ColorMetric::EuclideanRgb), None);
    }

    #[test]
    fn test_align_keeps_alpha() {
        let buffer = PixelBuffer::new(vec![20, 20, 20, 17, 240, 230, 250, 200], 2).unwrap();
        let aligned = align_to_palette(&buffer, &bw_palette(), &ColorMetric::EuclideanRgb).unwrap();
        assert_eq!(aligned.as_bytes(), &[0, 0, 0, 17, 255, 255, 255, 200]);
    }

    #[test]
    fn test_align_fails_without_anchors() {
        let palette = Palette::new([(Rgb::BLACK, 0)]).unwrap();
        let buffer = PixelBuffer::filled(Rgb::BLACK, 1, 1).unwrap();
        assert_eq!(
            align_to_palette(&buffer, &palette, &ColorMetric::Ciede2000),
            Err(PaletteError::NoAvailableColors)
        );
    }

    #[test]
    fn test_align_is_idempotent() {
        let buffer = PixelBuffer::from_rgb(
            &[Rgb::new(10, 200, 30), Rgb::new(90, 90, 90), Rgb::new(250, 5, 5), Rgb::new(0, 0, 90)],
            2,
        )
        .unwrap();
        let palette = Palette::unlimited(&[
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(128, 128, 128),
        ])
        .unwrap();
        for metric in ColorMetric::ALL {
            let once = align_to_palette(&buffer, &palette, &metric).unwrap();
            let twice = align_to_palette(&once, &palette, &metric).unwrap();
            assert_eq!(once, twice, "{metric}");
        }
    }

    #[test]
    fn test_usage_map_counts_colors() {
        let pixels = [Rgb::BLACK, Rgb::BLACK, Rgb::new(1, 1, 1)];
        let buffer = PixelBuffer::from_rgb(&pixels, 3).unwrap();
        let usage = usage_map(&buffer);
        assert_eq!(usage.get(&Rgb::BLACK), Some(&2));
        assert_eq!(usage.get(&Rgb::new(1, 1, 1)), Some(&1));
    }

    #[test]
    fn test_average_error() {
        let a = PixelBuffer::from_rgb(&[Rgb::BLACK, Rgb::BLACK], 2).unwrap();
        let b = PixelBuffer::from_rgb(&[Rgb::new(3, 4, 0), Rgb::BLACK], 2).unwrap();
        let avg = average_quantization_error(&a, &b, &ColorMetric::EuclideanRgb).unwrap();
        assert_eq!(avg, 2.5);

        let c = PixelBuffer::from_rgb(&[Rgb::BLACK], 1).unwrap();
        assert!(average_quantization_error(&a, &c, &ColorMetric::EuclideanRgb).is_err());
    }
}
