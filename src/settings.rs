//! Gauge settings as stored by the user: a TOML (or any format the `config`
//! crate understands) document listing the segments and optional overrides.
//!
//! ```toml
//! outer_radius = 45
//!
//! [[segments]]
//! value = 0
//! color = "success"
//!
//! [[segments]]
//! value = 100
//! color = "#74838F"
//!
//! [column]
//! name = "rpm"
//! decimals = 0
//! ```

use ::config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::color::{ColorResolver, ThemeColor, DEFAULT_SEGMENTS};
use crate::format::Column;
use crate::{Color, GaugeSpec, Result, Segment};

/// A breakpoint as written in settings. `color` is either a theme color name
/// (`success`, `warning`, `error`, `text-medium`, `text-dark`) or any color
/// string understood by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSetting {
    pub value: f64,
    pub color: String,
}

impl SegmentSetting {
    fn resolve<R>(&self, resolver: &R) -> Segment
    where
        R: ColorResolver + ?Sized,
    {
        let color = match self.color.parse::<ThemeColor>() {
            Ok(theme) => resolver.resolve(theme),
            Err(_) => Color::new(self.color.as_str()),
        };
        Segment::new(self.value, color)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeSettings {
    #[serde(default = "default_segment_settings")]
    pub segments: Vec<SegmentSetting>,
    #[serde(default)]
    pub outer_radius: Option<f64>,
    #[serde(default)]
    pub inner_radius_ratio: Option<f64>,
    #[serde(default)]
    pub column: Option<Column>,
}

fn default_segment_settings() -> Vec<SegmentSetting> {
    DEFAULT_SEGMENTS
        .iter()
        .map(|&(value, color)| SegmentSetting {
            value,
            color: color.name().to_string(),
        })
        .collect()
}

impl Default for GaugeSettings {
    fn default() -> Self {
        Self {
            segments: default_segment_settings(),
            outer_radius: None,
            inner_radius_ratio: None,
            column: None,
        }
    }
}

impl GaugeSettings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Loads settings from a file; the format follows the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading gauge settings");
        let settings = Config::builder().add_source(File::from(path)).build()?;
        let settings: Self = settings.try_deserialize()?;
        debug!(segments = settings.segments.len(), "gauge settings loaded");
        Ok(settings)
    }

    /// Resolves theme colors and builds a validated [`GaugeSpec`].
    pub fn into_spec<R>(&self, resolver: &R) -> Result<GaugeSpec>
    where
        R: ColorResolver + ?Sized,
    {
        let segments = self
            .segments
            .iter()
            .map(|segment| segment.resolve(resolver))
            .collect();
        let spec = GaugeSpec::builder()
            .segments(segments)
            .maybe_outer_radius(self.outer_radius)
            .maybe_inner_radius_ratio(self.inner_radius_ratio)
            .build();
        if let Err(err) = spec.validate() {
            warn!(%err, "rejecting gauge settings");
            return Err(err);
        }
        Ok(spec)
    }
}
