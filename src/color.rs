/// Canvas background colors
///
/// The background is either left transparent or filled with one solid color.
/// Colors are written the way the settings form and the JSON config carry
/// them: `transparent`, a basic color name, or a `#rgb` / `#rrggbb` /
/// `#rrggbbaa` hex string.

use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

/// Basic CSS color names accepted besides hex notation
const NAMED_COLORS: [(&str, [u8; 3]); 7] = [
    ("white", [255, 255, 255]),
    ("black", [0, 0, 0]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Background {
    /// Leave the canvas fully transparent
    #[default]
    Transparent,
    /// Fill the whole canvas before drawing cells
    Solid(Rgba<u8>),
}

impl Background {
    pub const WHITE: Background = Background::Solid(Rgba([255, 255, 255, 255]));
    pub const BLACK: Background = Background::Solid(Rgba([0, 0, 0, 255]));

    /// Build an opaque fill from RGB components
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Background::Solid(Rgba([r, g, b, 255]))
    }

    /// The pixel to fill the canvas with, or `None` for transparent
    pub fn fill(&self) -> Option<Rgba<u8>> {
        match self {
            Background::Transparent => None,
            Background::Solid(color) => Some(*color),
        }
    }
}

impl FromStr for Background {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();

        if value == "transparent" {
            return Ok(Background::Transparent);
        }

        if let Some((_, [r, g, b])) = NAMED_COLORS.iter().find(|(name, _)| *name == value) {
            return Ok(Background::rgb(*r, *g, *b));
        }

        match value.strip_prefix('#') {
            Some(hex) => parse_hex(hex)
                .map(Background::Solid)
                .ok_or_else(|| GridError::InvalidColor(s.to_string())),
            None => Err(GridError::InvalidColor(s.to_string())),
        }
    }
}

/// Parse the digits of a `#rgb`, `#rrggbb` or `#rrggbbaa` color
fn parse_hex(hex: &str) -> Option<Rgba<u8>> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => {
            // #abc expands to #aabbcc
            let mut out = [255u8; 4];
            for (i, c) in hex.chars().enumerate() {
                let digit = c.to_digit(16)? as u8;
                out[i] = digit * 17;
            }
            Some(Rgba(out))
        }
        6 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, 255])),
        8 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
        _ => None,
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Transparent => write!(f, "transparent"),
            Background::Solid(Rgba([r, g, b, a])) => {
                if *a == 255 {
                    if let Some((name, _)) = NAMED_COLORS.iter().find(|(_, rgb)| *rgb == [*r, *g, *b]) {
                        return write!(f, "{}", name);
                    }
                    write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
                } else {
                    write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
                }
            }
        }
    }
}

impl TryFrom<String> for Background {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Background> for String {
    fn from(background: Background) -> Self {
        background.to_string()
    }
}
