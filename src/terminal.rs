//! Terminal output using crossterm

use std::io::{self, Stdout, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::error::Result;

/// Width used when the output is not a terminal
const FALLBACK_COLS: u16 = 80;

/// Styled, line-oriented output to a terminal (or any writer)
pub struct Terminal<W: Write> {
    out: W,
    /// Terminal width in columns
    cols: u16,
}

impl Terminal<Stdout> {
    /// Terminal on standard output
    pub fn stdout() -> Self {
        let cols = terminal::size().map(|(cols, _)| cols).unwrap_or(FALLBACK_COLS);
        Self::new(io::stdout(), cols)
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, cols: u16) -> Self {
        Self { out, cols }
    }

    /// Get terminal width
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Write a string at the current position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(self.out, Print(s))?;
        Ok(())
    }

    /// End the current line
    pub fn newline(&mut self) -> Result<()> {
        queue!(self.out, Print("\n"))?;
        Ok(())
    }

    /// Set background to an RGB color
    pub fn set_background(&mut self, (r, g, b): (u8, u8, u8)) -> Result<()> {
        queue!(self.out, SetBackgroundColor(Color::Rgb { r, g, b }))?;
        Ok(())
    }

    /// Set foreground to an RGB color
    pub fn set_foreground(&mut self, (r, g, b): (u8, u8, u8)) -> Result<()> {
        queue!(self.out, SetForegroundColor(Color::Rgb { r, g, b }))?;
        Ok(())
    }

    /// Set dim/faint mode
    pub fn set_dim(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        } else {
            queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
        }
        Ok(())
    }

    /// Reset colors and attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    /// Flush output buffer
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Consume the terminal, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}
