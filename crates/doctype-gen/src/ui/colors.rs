use std::io::IsTerminal;

use clap::{ValueEnum, builder::styling::Ansi256Color};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy)]
pub enum Theme {
  Dark,
  Light,
}

#[derive(Debug, Clone, Copy)]
enum Role {
  Timestamp,
  Primary,
  Accent,
  Info,
  Success,
  Label,
  Value,
}

impl Role {
  /// `(dark, light)` RGB pairs.
  const fn rgb(self) -> ((u8, u8, u8), (u8, u8, u8)) {
    match self {
      Self::Timestamp => ((118, 166, 166), (92, 62, 38)),
      Self::Primary => ((191, 126, 4), (70, 42, 25)),
      Self::Accent => ((166, 84, 55), (211, 99, 70)),
      Self::Info => ((118, 166, 166), (40, 111, 170)),
      Self::Success => ((118, 166, 166), (34, 142, 90)),
      Self::Label => ((217, 164, 4), (176, 103, 66)),
      Self::Value => ((242, 211, 56), (199, 146, 76)),
    }
  }
}

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

pub trait IntoComfyColor {
  fn into(self) -> ComfyColor;
}

impl IntoComfyColor for Color {
  fn into(self) -> ComfyColor {
    match self {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(val) => ComfyColor::AnsiValue(val),
      _ => ComfyColor::Reset,
    }
  }
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn pick(&self, role: Role) -> Color {
    if !self.enabled {
      return Color::Reset;
    }

    let (dark, light) = role.rgb();
    let (r, g, b) = match self.theme {
      Theme::Dark => dark,
      Theme::Light => light,
    };
    Color::Rgb { r, g, b }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(Role::Timestamp)
  }

  pub const fn primary(&self) -> Color {
    self.pick(Role::Primary)
  }

  pub const fn accent(&self) -> Color {
    self.pick(Role::Accent)
  }

  pub const fn info(&self) -> Color {
    self.pick(Role::Info)
  }

  pub const fn success(&self) -> Color {
    self.pick(Role::Success)
  }

  pub const fn label(&self) -> Color {
    self.pick(Role::Label)
  }

  pub const fn value(&self) -> Color {
    self.pick(Role::Value)
  }

  const fn to_clap(color: Color) -> Option<clap::builder::styling::Color> {
    use clap::builder::styling::{Color as ClapColor, RgbColor};

    match color {
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::AnsiValue(val) => Some(ClapColor::Ansi256(Ansi256Color(val))),
      _ => None,
    }
  }

  pub const fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{Style, Styles};

    let colors = Self::new(true, Theme::Dark);

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::to_clap(colors.label())))
      .usage(Style::new().bold().fg_color(Self::to_clap(colors.label())))
      .literal(Style::new().fg_color(Self::to_clap(colors.success())))
      .placeholder(Style::new().fg_color(Self::to_clap(colors.info())))
      .error(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
      .valid(Style::new().fg_color(Self::to_clap(colors.success())))
      .invalid(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => detect_terminal_theme(),
  }
}

/// Reads `COLORFGBG` (`fg;bg`), where a background index of 8 or more means a light terminal.
fn detect_terminal_theme() -> Theme {
  let background = std::env::var("COLORFGBG")
    .ok()
    .and_then(|value| value.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()));

  match background {
    Some(bg) if bg >= 8 => Theme::Light,
    _ => Theme::Dark,
  }
}
