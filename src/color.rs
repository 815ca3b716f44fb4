//! Opaque segment colors and the injected theme-color lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::Segment;

/// Color of a gauge band. Never interpreted by the geometry code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named colors a theme must provide for the default gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    Success,
    Warning,
    Error,
    TextMedium,
    TextDark,
}

impl ThemeColor {
    pub const ALL: [ThemeColor; 5] = [
        ThemeColor::Success,
        ThemeColor::Warning,
        ThemeColor::Error,
        ThemeColor::TextMedium,
        ThemeColor::TextDark,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ThemeColor::Success => "success",
            ThemeColor::Warning => "warning",
            ThemeColor::Error => "error",
            ThemeColor::TextMedium => "text-medium",
            ThemeColor::TextDark => "text-dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme color `{0}`")]
pub struct UnknownThemeColor(pub String);

impl FromStr for ThemeColor {
    type Err = UnknownThemeColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeColor::ALL
            .into_iter()
            .find(|color| color.name() == s)
            .ok_or_else(|| UnknownThemeColor(s.to_string()))
    }
}

/// Resolves theme color names to concrete colors. Supplied by the caller.
pub trait ColorResolver {
    fn resolve(&self, color: ThemeColor) -> Color;
}

impl<T> ColorResolver for T
where
    T: Fn(ThemeColor) -> Color,
{
    fn resolve(&self, color: ThemeColor) -> Color {
        self(color)
    }
}

/// Built-in light palette.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPalette;

impl ColorResolver for DefaultPalette {
    fn resolve(&self, color: ThemeColor) -> Color {
        let hex = match color {
            ThemeColor::Success => "#84BB4C",
            ThemeColor::Warning => "#F9CF48",
            ThemeColor::Error => "#ED6E6E",
            ThemeColor::TextMedium => "#74838F",
            ThemeColor::TextDark => "#2E353B",
        };
        Color::from(hex)
    }
}

/// Breakpoints and theme colors of a gauge that has not been configured.
pub const DEFAULT_SEGMENTS: [(f64, ThemeColor); 4] = [
    (0.0, ThemeColor::Success),
    (33.0, ThemeColor::Warning),
    (66.0, ThemeColor::Error),
    (100.0, ThemeColor::TextMedium),
];

pub fn default_segments<R>(resolver: &R) -> Vec<Segment>
where
    R: ColorResolver + ?Sized,
{
    DEFAULT_SEGMENTS
        .iter()
        .map(|&(value, color)| Segment::new(value, resolver.resolve(color)))
        .collect()
}
