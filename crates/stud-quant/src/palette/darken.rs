//! Bleed-through compensation
//!
//! Studs mounted on a black backing panel look darker than their nominal
//! color. Quantizing against a darkened palette and then mapping the result
//! back gives a closer visual match.

use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_4;

use super::palette::Palette;
use crate::buffer::PixelBuffer;
use crate::color::Rgb;

/// Darkened appearance of `color`: each channel scaled by π/4, rounded.
#[inline]
pub fn darken(color: Rgb) -> Rgb {
    let scale = |c: u8| (c as f64 * FRAC_PI_4).round() as u8;
    Rgb::new(scale(color.r), scale(color.g), scale(color.b))
}

/// Map from darkened color back to the nominal color it came from.
///
/// If two colors darken to the same value the later one wins.
pub fn darkened_lookup<I>(colors: I) -> BTreeMap<Rgb, Rgb>
where
    I: IntoIterator<Item = Rgb>,
{
    colors.into_iter().map(|c| (darken(c), c)).collect()
}

/// Replace darkened colors by their nominal colors.
///
/// Black is kept as black. Pixels whose color is not in `lookup` are left
/// unchanged.
pub fn revert_darkened(buffer: &PixelBuffer, lookup: &BTreeMap<Rgb, Rgb>) -> PixelBuffer {
    buffer.map_rgb(|color| {
        if color == Rgb::BLACK {
            return Rgb::BLACK;
        }
        lookup.get(&color).copied().unwrap_or(color)
    })
}

/// Replace darkened colors by nominal colors without overspending `palette`.
///
/// `buffer` is quantized against [`Palette::darkened`], where colors that
/// darken to the same value share one pooled count. Pixels of such a shared
/// value are handed out in row-major order to each of its nominal colors
/// until that color's count is used up. Excess pixels go to the color
/// [`darkened_lookup`] picks.
pub fn revert_darkened_with_supply(buffer: &PixelBuffer, palette: &Palette) -> PixelBuffer {
    let lookup = darkened_lookup(palette.colors());

    let mut shared: BTreeMap<Rgb, Vec<(Rgb, u32)>> = BTreeMap::new();
    for (color, count) in palette.iter() {
        shared.entry(darken(color)).or_default().push((color, count));
    }
    shared.retain(|_, nominal| nominal.len() > 1);
    if shared.is_empty() {
        return revert_darkened(buffer, &lookup);
    }

    buffer.map_rgb(|color| {
        if color == Rgb::BLACK {
            return Rgb::BLACK;
        }
        if let Some(nominal) = shared.get_mut(&color) {
            if let Some((target, left)) = nominal.iter_mut().find(|(_, left)| *left > 0) {
                if *left != Palette::UNLIMITED {
                    *left -= 1;
                }
                return *target;
            }
        }
        lookup.get(&color).copied().unwrap_or(color)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_darken_scales_channels() {
        assert_eq!(darken(Rgb::new(255, 255, 255)), Rgb::new(200, 200, 200));
        assert_eq!(darken(Rgb::new(100, 0, 4)), Rgb::new(79, 0, 3));
        assert_eq!(darken(Rgb::BLACK), Rgb::BLACK);
    }

    #[test]
    fn test_revert_round_trip() {
        let colors = [Rgb::new(255, 255, 255), Rgb::new(0x1a, 0x65, 0x8f)];
        let lookup = darkened_lookup(colors);
        let buffer = PixelBuffer::from_rgb(&colors, 2).unwrap();

        let dark = buffer.map_rgb(darken);
        assert_ne!(dark, buffer);
        assert_eq!(revert_darkened(&dark, &lookup), buffer);
    }

    #[test]
    fn test_shared_darkened_color_is_split_by_count() {
        // Both darken to (2, 0, 0)
        let a = Rgb::new(2, 0, 0);
        let b = Rgb::new(3, 0, 0);
        assert_eq!(darken(a), darken(b));

        let palette = Palette::new([(a, 1), (b, 2)]).unwrap();
        let dark = PixelBuffer::filled(darken(a), 4, 1).unwrap();
        let reverted = revert_darkened_with_supply(&dark, &palette);
        assert_eq!(reverted.pixels().collect::<Vec<_>>(), vec![a, b, b, b]);
    }

    #[test]
    fn test_revert_with_supply_matches_plain_revert_without_collisions() {
        let colors = [Rgb::new(255, 255, 255), Rgb::new(0x1a, 0x65, 0x8f)];
        let palette = Palette::new(colors.map(|c| (c, 1))).unwrap();
        let dark = PixelBuffer::from_rgb(&colors.map(darken), 2).unwrap();
        assert_eq!(
            revert_darkened_with_supply(&dark, &palette),
            revert_darkened(&dark, &darkened_lookup(colors))
        );
    }

    #[test]
    fn test_revert_keeps_black_and_unknown() {
        let lookup = darkened_lookup([Rgb::new(255, 255, 255)]);
        let buffer = PixelBuffer::from_rgb(&[Rgb::BLACK, Rgb::new(1, 2, 3)], 2).unwrap();
        assert_eq!(revert_darkened(&buffer, &lookup), buffer);
    }
}
