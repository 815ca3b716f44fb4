//! Label text formatting.
//!
//! The geometry only knows raw numbers. Turning a breakpoint value into text
//! is delegated to a [`ValueFormatter`], which receives the value together
//! with the metadata of the column being displayed. Locale-aware formatting
//! belongs in a caller-provided formatter; [`PlainFormatter`] covers the
//! common case of fixed decimals plus an optional prefix or suffix.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Metadata of the result column a gauge displays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Column {
    #[builder(into)]
    pub name: String,
    #[builder(into)]
    #[serde(default)]
    pub display_name: Option<String>,
    #[builder(into)]
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub decimals: Option<usize>,
    #[builder(into)]
    #[serde(default)]
    pub prefix: Option<String>,
    #[builder(into)]
    #[serde(default)]
    pub suffix: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

pub trait ValueFormatter {
    fn format(&self, value: f64, column: &Column) -> String;
}

impl<T> ValueFormatter for T
where
    T: Fn(f64, &Column) -> String,
{
    fn format(&self, value: f64, column: &Column) -> String {
        self(value, column)
    }
}

/// Non-localized number formatting driven by the column settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    /// Decimals used when the column does not specify any.
    pub const MAX_DECIMALS: usize = 2;
}

impl ValueFormatter for PlainFormatter {
    fn format(&self, value: f64, column: &Column) -> String {
        let number = match column.decimals {
            Some(decimals) => format!("{value:.decimals$}"),
            None => compact_number(value, Self::MAX_DECIMALS),
        };

        let mut text = String::new();
        if let Some(prefix) = &column.prefix {
            text.push_str(prefix);
        }
        text.push_str(&number);
        match (&column.suffix, &column.unit) {
            (Some(suffix), _) => text.push_str(suffix),
            (None, Some(unit)) => {
                text.push(' ');
                text.push_str(unit);
            }
            (None, None) => {}
        }
        text
    }
}

/// Formats with at most `max_decimals` fractional digits and no trailing zeros.
pub(crate) fn compact_number(value: f64, max_decimals: usize) -> String {
    let mut text = format!("{value:.max_decimals$}");
    if text.contains('.') {
        let len = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(len);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}
