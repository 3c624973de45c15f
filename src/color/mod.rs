//! Colors: config-driven theme plus cell color lookup.

pub mod schemes;
pub mod theme;

pub use schemes::{BANDED_FG, band_color, base_color};
pub use theme::{Rgb, Theme};
