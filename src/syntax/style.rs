//! Colors and per-state styles
//!
//! Colors are written the way the configuration file spells them:
//! `rgb(230, 130, 130, 0.3)`, `rgba(...)`, `#rrggbb`, `#rrggbbaa`, or one
//! of a few names (`red`, `green`, `blue`, ...).

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoError};

/// `rgb(r, g, b)` / `rgba(r, g, b, a)` matcher, compiled on first use
fn rgb_function() -> Result<&'static Regex> {
    static RGB_FUNCTION: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    RGB_FUNCTION
        .get_or_init(|| {
            Regex::new(
                r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*(\d*\.?\d+)\s*)?\)$",
            )
        })
        .as_ref()
        .map_err(|e| TodoError::Pattern(e.clone()))
}

/// An RGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in 0.0..=1.0
    pub a: f32,
}

impl Rgba {
    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Builder: set alpha (clamped to 0.0..=1.0)
    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a.clamp(0.0, 1.0);
        self
    }

    /// Parse a color string
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| TodoError::InvalidColor(text.to_string()));
        }
        if let Some(color) = named(text) {
            return Ok(color);
        }

        let caps = rgb_function()?
            .captures(text)
            .ok_or_else(|| TodoError::InvalidColor(text.to_string()))?;

        let channel = |i: usize| -> Result<u8> {
            caps[i]
                .parse::<u8>()
                .map_err(|_| TodoError::InvalidColor(text.to_string()))
        };
        let alpha = match caps.get(4) {
            Some(a) => a
                .as_str()
                .parse::<f32>()
                .map_err(|_| TodoError::InvalidColor(text.to_string()))?,
            None => 1.0,
        };
        if !(0.0..=1.0).contains(&alpha) {
            return Err(TodoError::InvalidColor(text.to_string()));
        }

        Ok(Self {
            r: channel(1)?,
            g: channel(2)?,
            b: channel(3)?,
            a: alpha,
        })
    }

    /// Composite this color over an opaque base color
    pub fn over(&self, base: Rgba) -> (u8, u8, u8) {
        let mix = |fg: u8, bg: u8| -> u8 {
            (f32::from(fg) * self.a + f32::from(bg) * (1.0 - self.a)).round() as u8
        };
        (mix(self.r, base.r), mix(self.g, base.g), mix(self.b, base.b))
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let a = if hex.len() == 8 {
        f32::from(byte(6)?) / 255.0
    } else {
        1.0
    };
    Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?).with_alpha(a))
}

fn named(name: &str) -> Option<Rgba> {
    let color = match name.to_lowercase().as_str() {
        "black" => Rgba::rgb(0, 0, 0),
        "white" => Rgba::rgb(255, 255, 255),
        "red" => Rgba::rgb(255, 0, 0),
        "green" => Rgba::rgb(0, 128, 0),
        "blue" => Rgba::rgb(0, 0, 255),
        "yellow" => Rgba::rgb(255, 255, 0),
        "magenta" => Rgba::rgb(255, 0, 255),
        "cyan" => Rgba::rgb(0, 255, 255),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        _ => return None,
    };
    Some(color)
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl TryFrom<String> for Rgba {
    type Error = TodoError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

/// How a state's regions are drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateStyle {
    /// Whole-line background
    pub background: Rgba,
    /// Marker color in the ruler column
    pub ruler: Rgba,
    /// Text opacity; below 1.0 the text is drawn dim
    pub opacity: f32,
}

impl StateStyle {
    pub fn new(background: Rgba, ruler: Rgba) -> Self {
        Self {
            background,
            ruler,
            opacity: 1.0,
        }
    }

    /// Builder: set text opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Whether text should be drawn dim
    pub fn is_dim(&self) -> bool {
        self.opacity < 1.0
    }
}
