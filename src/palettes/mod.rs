//! Built-in palette definitions.
//!
//! Every built-in palette is ordered: a color's position is the hex digit
//! it is written as. Slot 0 is the background slot.

use crate::color::Color;
use crate::palette::Palette;

/// Name of the palette used when nothing else is configured.
pub const DEFAULT_PALETTE: &str = "arcade";

/// List of all available built-in palette names.
const BUILTIN_NAMES: &[&str] = &["arcade", "pico8", "gameboy", "grayscale", "1bit"];

/// MakeCode Arcade default palette.
const ARCADE: [u32; 16] = [
    0x000000, 0xffffff, 0xff2121, 0xff93c4, 0xff8135, 0xfff609, 0x249ca3, 0x78dc52, 0x003fad,
    0x87f2ff, 0x8e2ec4, 0xa4839f, 0x5c406c, 0xe5cdc4, 0x91463d, 0x000000,
];

/// PICO-8 16-color palette.
/// Reference: https://lospec.com/palette-list/pico-8
const PICO8: [u32; 16] = [
    0x000000, 0x1d2b53, 0x7e2553, 0x008751, 0xab5236, 0x5f574f, 0xc2c3c7, 0xfff1e8, 0xff004d,
    0xffa300, 0xffec27, 0x00e436, 0x29adff, 0x83769c, 0xff77a8, 0xffccaa,
];

/// Game Boy 4-color green palette behind a black background slot.
/// Reference: https://lospec.com/palette-list/nintendo-gameboy-bgb
const GAMEBOY: [u32; 5] = [0x000000, 0x9bbc0f, 0x8bac0f, 0x306230, 0x0f380f];

/// 8-shade grayscale palette from white to black.
const GRAYSCALE: [u32; 9] =
    [0x000000, 0xffffff, 0xdfdfdf, 0xbfbfbf, 0x9f9f9f, 0x7f7f7f, 0x5f5f5f, 0x3f3f3f, 0x000000];

/// 1-bit black and white palette.
const ONE_BIT: [u32; 3] = [0x000000, 0xffffff, 0x000000];

/// Returns a list of all available built-in palette names.
pub fn list_builtins() -> Vec<&'static str> {
    BUILTIN_NAMES.to_vec()
}

/// Returns a built-in palette by name, or None if not found.
pub fn get_builtin(name: &str) -> Option<Palette> {
    let packed: &[u32] = match name {
        "arcade" => &ARCADE,
        "pico8" => &PICO8,
        "gameboy" => &GAMEBOY,
        "grayscale" => &GRAYSCALE,
        "1bit" => &ONE_BIT,
        _ => return None,
    };
    let colors = packed.iter().copied().map(Color::from_rgb_u32).collect();
    Palette::new(name, colors).ok()
}

/// The MakeCode Arcade palette.
pub fn default_palette() -> Palette {
    let colors = ARCADE.iter().copied().map(Color::from_rgb_u32).collect();
    match Palette::new(DEFAULT_PALETTE, colors) {
        Ok(p) => p,
        Err(e) => unreachable!("built-in palette is valid: {}", e),
    }
}
