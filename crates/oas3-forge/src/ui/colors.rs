use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[must_use]
pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub struct Colors {
  enabled: bool,
}

impl Colors {
  #[must_use]
  pub const fn new(enabled: bool) -> Self {
    Self { enabled }
  }

  const fn pick(&self, color: Color) -> Color {
    if self.enabled { color } else { Color::Reset }
  }

  #[must_use]
  pub const fn timestamp(&self) -> Color {
    self.pick(Color::DarkGrey)
  }

  #[must_use]
  pub const fn primary(&self) -> Color {
    self.pick(Color::Cyan)
  }

  #[must_use]
  pub const fn accent(&self) -> Color {
    self.pick(Color::Magenta)
  }

  #[must_use]
  pub const fn success(&self) -> Color {
    self.pick(Color::Green)
  }

  #[must_use]
  pub const fn label(&self) -> Color {
    self.pick(Color::Blue)
  }

  #[must_use]
  pub const fn value(&self) -> Color {
    self.pick(Color::White)
  }
}

/// Bridges crossterm colors into comfy-table cells.
pub trait IntoComfyColor {
  fn into(self) -> ComfyColor;
}

impl IntoComfyColor for Color {
  fn into(self) -> ComfyColor {
    match self {
      Color::DarkGrey => ComfyColor::DarkGrey,
      Color::Cyan => ComfyColor::Cyan,
      Color::Magenta => ComfyColor::Magenta,
      Color::Green => ComfyColor::Green,
      Color::Blue => ComfyColor::Blue,
      Color::White => ComfyColor::White,
      _ => ComfyColor::Reset,
    }
  }
}
