use crossterm::queue;
use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write};
use std::str::FromStr;
use thiserror::Error;

/// Color every render starts from before the art sets one.
pub const INITIAL_ART_COLOR: &str = "#000000";

/// Six-digit forms that are also drawn bold. Compared case-sensitively.
const EMPHASIS_COLORS: [&str; 4] = ["989ef7", "FF0000", "7EB4DA", "5277C3"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color {0:?}")]
    Invalid(String),
}

/// A 24-bit color parsed from `RRGGBB` or `RRGGBBAA`, with an optional `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub bold: bool,
}

impl HexColor {
    fn to_crossterm(self) -> Color {
        Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if (digits.len() != 6 && digits.len() != 8)
            || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(ColorError::Invalid(s.to_string()));
        }

        // Alpha, if any, is ignored.
        let rgb = &digits[..6];
        let value =
            u32::from_str_radix(rgb, 16).map_err(|_| ColorError::Invalid(s.to_string()))?;

        Ok(HexColor {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
            bold: EMPHASIS_COLORS.contains(&rgb),
        })
    }
}

/// Switch the foreground to `hex`.
///
/// Returns `Ok(false)` without writing anything when `hex` does not parse.
pub fn write_color<W: Write>(out: &mut W, hex: &str) -> io::Result<bool> {
    let color = match hex.parse::<HexColor>() {
        Ok(color) => color,
        Err(e) => {
            log::debug!("skipping color: {}", e);
            return Ok(false);
        }
    };

    queue!(out, ResetColor, SetForegroundColor(color.to_crossterm()))?;
    if color.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    Ok(true)
}

/// Tracks the most recent color applied while drawing art.
///
/// Info text switches colors freely; only art drawing moves this state, so
/// [`ColorState::restore`] always lands back on the art's color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorState {
    art_color: String,
}

impl Default for ColorState {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorState {
    pub fn new() -> Self {
        Self {
            art_color: INITIAL_ART_COLOR.to_string(),
        }
    }

    pub fn current_art_color(&self) -> &str {
        &self.art_color
    }

    /// Apply an art color directive and remember it.
    pub fn set_art_color<W: Write>(&mut self, out: &mut W, hex: &str) -> io::Result<()> {
        write_color(out, hex)?;
        self.art_color.clear();
        self.art_color.push_str(hex);
        Ok(())
    }

    /// Switch back to the current art color.
    pub fn restore<W: Write>(&self, out: &mut W) -> io::Result<bool> {
        write_color(out, &self.art_color)
    }
}
