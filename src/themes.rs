use image::Rgb;

use crate::{warn, DEBUG_NAME};

/// One overlay color palette. `text` is the accent slot reserved for future
/// blocks; the active layout draws every block in `foreground`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb<u8>,
    pub foreground: Rgb<u8>,
    pub text: Rgb<u8>,
}

/// Built-in palettes, indexed by `themeIndex` in settings. Immutable for the
/// lifetime of the process; there is no runtime registration.
pub const THEMES: [Theme; 2] = [
    Theme {
        background: Rgb([19, 19, 19]),
        foreground: Rgb([152, 0, 2]),
        text: Rgb([255, 191, 0]),
    },
    Theme {
        background: Rgb([235, 220, 178]),
        foreground: Rgb([175, 68, 37]),
        text: Rgb([85, 46, 28]),
    },
];

/// Out-of-range indexes fall back to theme 0 rather than failing the render.
pub fn get_theme(index: usize) -> &'static Theme {
    match THEMES.get(index) {
        Some(theme) => theme,
        None => {
            warn!(
                "[{}] themeIndex {} is out of range (0..{}); using theme 0",
                DEBUG_NAME,
                index,
                THEMES.len()
            );
            &THEMES[0]
        }
    }
}
