//! Cell color lookup for the alignment grid.

use ratatui::style::Color;

use crate::engine::Band;

use super::theme::Theme;

/// Nucleotide foreground colors (Okabe-Ito colorblind-friendly palette),
/// used when the nucleotide highlight is active.
pub const BASE_COLORS: [(char, Color); 10] = [
    ('A', Color::Rgb(0, 158, 115)), // #009E73 green (purine)
    ('a', Color::Rgb(0, 158, 115)),
    ('C', Color::Rgb(240, 228, 66)), // #F0E442 yellow (pyrimidine)
    ('c', Color::Rgb(240, 228, 66)),
    ('G', Color::Rgb(0, 114, 178)), // #0072B2 blue (purine)
    ('g', Color::Rgb(0, 114, 178)),
    ('U', Color::Rgb(213, 94, 0)), // #D55E00 orange (pyrimidine)
    ('u', Color::Rgb(213, 94, 0)),
    ('N', Color::Rgb(128, 128, 128)), // #808080 gray (unknown)
    ('n', Color::Rgb(128, 128, 128)),
];

/// Background color for a conservation band.
pub fn band_color(band: Band, theme: &Theme) -> Color {
    match band {
        Band::High => theme.band_high.to_color(),
        Band::Medium => theme.band_medium.to_color(),
        Band::Low => theme.band_low.to_color(),
    }
}

/// Foreground color for a nucleotide character when highlighting is on.
/// Returns `None` for gaps and anything else unrecognized.
pub fn base_color(ch: char) -> Option<Color> {
    BASE_COLORS
        .iter()
        .find(|(base, _)| *base == ch)
        .map(|&(_, color)| color)
}

/// Banded cells use a dark foreground so the character stays readable on
/// the light band backgrounds.
pub const BANDED_FG: Color = Color::Rgb(20, 20, 20);
