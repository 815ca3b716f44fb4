// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod color;
pub mod config;
pub mod format;
pub mod path;
pub mod settings;

// External crate imports
use bon::Builder;
use serde::Serialize;
use thiserror::Error;
use tracing::trace;

// Standard library imports
use std::f64::consts::FRAC_PI_2;

use crate::config::{
    CENTER_LABEL_THRESHOLD, INNER_RADIUS_RATIO, LABEL_OFFSET, LABEL_RADIUS_FACTOR, OUTER_RADIUS,
};

pub use color::{default_segments, Color, ColorResolver, DefaultPalette, ThemeColor};
pub use format::{Column, PlainFormatter, ValueFormatter};
pub use settings::{GaugeSettings, SegmentSetting};

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised by the opt-in validation and the settings loader.
///
/// The geometry functions themselves never fail.
#[derive(Debug, Error)]
pub enum GaugeError {
    #[error("a gauge needs at least two segments, got {count}")]
    TooFewSegments { count: usize },

    #[error("segment {index} has a non-finite value")]
    NonFiniteValue { index: usize },

    #[error("segment {index} is lower than the segment before it")]
    UnorderedSegments { index: usize },

    #[error("outer radius must be positive and finite, got {0}")]
    InvalidOuterRadius(f64),

    #[error("inner radius ratio must lie strictly between 0 and 1, got {0}")]
    InvalidInnerRadiusRatio(f64),

    #[error("failed to load gauge settings: {0}")]
    Settings(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, GaugeError>;

// ============================================================================
// DATA MODEL
// ============================================================================

/// A point in gauge space. The origin is the arc center and y grows downward,
/// so the apex of the arc has a negative y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_from_origin(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// One breakpoint of the gauge domain. The color fills the band that starts
/// at this breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub value: f64,
    pub color: Color,
}

impl Segment {
    pub fn new(value: f64, color: impl Into<Color>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }
}

/// Static description of a gauge.
///
/// Callers must supply at least two segments with non-decreasing values; the
/// geometry functions do not check this. Use [`GaugeSpec::validate`] when the
/// segments come from user input.
#[derive(Debug, Clone, PartialEq, Serialize, Builder)]
pub struct GaugeSpec {
    pub segments: Vec<Segment>,

    // Arc band
    #[builder(default = OUTER_RADIUS)]
    pub outer_radius: f64,
    #[builder(default = INNER_RADIUS_RATIO)]
    pub inner_radius_ratio: f64,

    // Labels
    #[builder(default = LABEL_OFFSET)]
    pub label_offset: f64,
    #[builder(default = LABEL_RADIUS_FACTOR)]
    pub label_radius_factor: f64,
    #[builder(default = CENTER_LABEL_THRESHOLD)]
    pub center_label_threshold: f64,
}

impl GaugeSpec {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self::builder().segments(segments).build()
    }

    pub fn inner_radius(&self) -> f64 {
        self.outer_radius * self.inner_radius_ratio
    }

    /// Midline between the inner and outer radius.
    pub fn radius_center(&self) -> f64 {
        self.outer_radius - (self.outer_radius - self.inner_radius()) / 2.0
    }

    /// First and last breakpoint values, `(0, 0)` without segments.
    pub fn domain(&self) -> (f64, f64) {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => (first.value, last.value),
            _ => (0.0, 0.0),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let count = self.segments.len();
        if count < 2 {
            return Err(GaugeError::TooFewSegments { count });
        }
        if let Some(index) = self.segments.iter().position(|s| !s.value.is_finite()) {
            return Err(GaugeError::NonFiniteValue { index });
        }
        if let Some(index) = self
            .segments
            .windows(2)
            .position(|pair| pair[1].value < pair[0].value)
        {
            return Err(GaugeError::UnorderedSegments { index: index + 1 });
        }
        if !self.outer_radius.is_finite() || self.outer_radius <= 0.0 {
            return Err(GaugeError::InvalidOuterRadius(self.outer_radius));
        }
        let ratio = self.inner_radius_ratio;
        if ratio.is_nan() || ratio <= 0.0 || ratio >= 1.0 {
            return Err(GaugeError::InvalidInnerRadiusRatio(ratio));
        }
        Ok(())
    }
}

/// Per-render input: the measured value and the box the gauge must fit in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderInput {
    pub value: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl RenderInput {
    pub const fn new(value: f64, canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            value,
            canvas_width,
            canvas_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Filled annular sector between two breakpoints. Angles are in the gauge
/// frame: `-π/2` is the left end of the arc and `π/2` the right end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcPath {
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Needle {
    pub from: Point,
    pub to: Point,
    /// Clamped angle of the current value.
    pub angle: f64,
}

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Labels near the apex are centered, the others grow away from the arc.
    pub fn for_x(x: f64, center_threshold: f64) -> Self {
        if x.abs() < center_threshold {
            TextAnchor::Middle
        } else if x > 0.0 {
            TextAnchor::Start
        } else {
            TextAnchor::End
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    DomainStart,
    DomainEnd,
    Breakpoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub kind: LabelKind,
    pub value: f64,
    pub text: String,
    pub position: Point,
    pub anchor: TextAnchor,
}

/// Everything needed to draw one gauge frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryOutput {
    pub canvas: CanvasSize,
    pub arcs: Vec<ArcPath>,
    pub needle: Needle,
    pub labels: Vec<LabelPlacement>,
}

// ============================================================================
// ANGLE MAPPING
// ============================================================================

/// Linear map from the segment domain onto the half circle `[-π/2, π/2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleScale {
    min: f64,
    max: f64,
}

impl AngleScale {
    pub const MIN_ANGLE: f64 = -FRAC_PI_2;
    pub const MAX_ANGLE: f64 = FRAC_PI_2;

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn for_spec(spec: &GaugeSpec) -> Self {
        let (min, max) = spec.domain();
        Self::new(min, max)
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Unclamped mapping. An empty domain maps everything to [`Self::MIN_ANGLE`].
    pub fn angle(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        let t = if span == 0.0 {
            0.0
        } else {
            (value - self.min) / span
        };
        Self::MIN_ANGLE + t * (Self::MAX_ANGLE - Self::MIN_ANGLE)
    }

    pub fn clamped_angle(&self, value: f64) -> f64 {
        self.angle(value).clamp(Self::MIN_ANGLE, Self::MAX_ANGLE)
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Fits a half-circle drawing area into a `width` x `height` box.
pub fn fit_canvas(width: f64, height: f64) -> CanvasSize {
    if height / width < 0.5 {
        CanvasSize {
            width: height * 2.0,
            height,
        }
    } else {
        CanvasSize {
            width,
            height: width / 2.0,
        }
    }
}

/// Point at `distance` from the center in the direction of `value`.
/// Out-of-domain values are pinned to the nearest end of the arc.
pub fn value_position(scale: &AngleScale, value: f64, distance: f64) -> Point {
    let a = scale.clamped_angle(value) - FRAC_PI_2;
    Point::new(a.cos() * distance, a.sin() * distance)
}

pub fn arc_segments(spec: &GaugeSpec, scale: &AngleScale) -> Vec<ArcPath> {
    let inner_radius = spec.inner_radius();
    spec.segments
        .windows(2)
        .map(|pair| ArcPath {
            start_angle: scale.angle(pair[0].value),
            end_angle: scale.angle(pair[1].value),
            inner_radius,
            outer_radius: spec.outer_radius,
            color: pair[0].color.clone(),
        })
        .collect()
}

pub fn needle(spec: &GaugeSpec, scale: &AngleScale, value: f64) -> Needle {
    Needle {
        from: value_position(scale, value, spec.inner_radius()),
        to: value_position(scale, value, spec.outer_radius),
        angle: scale.clamped_angle(value),
    }
}

/// Domain-start and domain-end labels followed by one label per interior
/// breakpoint.
pub fn labels<F>(
    spec: &GaugeSpec,
    scale: &AngleScale,
    column: &Column,
    formatter: &F,
) -> Vec<LabelPlacement>
where
    F: ValueFormatter + ?Sized,
{
    let mut labels = Vec::with_capacity(spec.segments.len());
    let (Some(first), Some(last)) = (spec.segments.first(), spec.segments.last()) else {
        return labels;
    };

    let radius_center = spec.radius_center();
    labels.push(LabelPlacement {
        kind: LabelKind::DomainStart,
        value: first.value,
        text: formatter.format(first.value, column),
        position: Point::new(-radius_center, spec.label_offset),
        anchor: TextAnchor::Middle,
    });
    labels.push(LabelPlacement {
        kind: LabelKind::DomainEnd,
        value: last.value,
        text: formatter.format(last.value, column),
        position: Point::new(radius_center, spec.label_offset),
        anchor: TextAnchor::Middle,
    });

    let label_radius = spec.outer_radius * spec.label_radius_factor;
    let interior = spec.segments.len().saturating_sub(2);
    for segment in spec.segments.iter().skip(1).take(interior) {
        let position = value_position(scale, segment.value, label_radius);
        labels.push(LabelPlacement {
            kind: LabelKind::Breakpoint,
            value: segment.value,
            text: formatter.format(segment.value, column),
            position,
            anchor: TextAnchor::for_x(position.x, spec.center_label_threshold),
        });
    }
    labels
}

#[tracing::instrument(level = "trace", skip_all, fields(value = input.value))]
pub fn compute_geometry<F>(
    spec: &GaugeSpec,
    input: &RenderInput,
    column: &Column,
    formatter: &F,
) -> GeometryOutput
where
    F: ValueFormatter + ?Sized,
{
    let scale = AngleScale::for_spec(spec);
    let output = GeometryOutput {
        canvas: fit_canvas(input.canvas_width, input.canvas_height),
        arcs: arc_segments(spec, &scale),
        needle: needle(spec, &scale, input.value),
        labels: labels(spec, &scale, column, formatter),
    };
    trace!(
        arcs = output.arcs.len(),
        labels = output.labels.len(),
        needle_angle = output.needle.angle,
        "computed gauge geometry"
    );
    output
}

/// A single-value visualization only makes sense for one row and one column.
pub fn is_sensible(column_count: usize, row_count: usize) -> bool {
    column_count == 1 && row_count == 1
}

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// A configured gauge: spec, displayed column and label formatter.
#[derive(Debug, Clone)]
pub struct Gauge<F = PlainFormatter> {
    spec: GaugeSpec,
    column: Column,
    formatter: F,
}

impl Gauge {
    pub fn new(spec: GaugeSpec) -> Self {
        Self {
            spec,
            column: Column::default(),
            formatter: PlainFormatter,
        }
    }

    pub fn try_new(spec: GaugeSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self::new(spec))
    }
}

impl<F: ValueFormatter> Gauge<F> {
    pub fn with_formatter<G: ValueFormatter>(self, formatter: G) -> Gauge<G> {
        Gauge {
            spec: self.spec,
            column: self.column,
            formatter,
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.column = column;
        self
    }

    pub fn spec(&self) -> &GaugeSpec {
        &self.spec
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn geometry(&self, input: &RenderInput) -> GeometryOutput {
        compute_geometry(&self.spec, input, &self.column, &self.formatter)
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn spec_0_100() -> GaugeSpec {
        GaugeSpec::new(vec![
            Segment::new(0.0, "green"),
            Segment::new(33.0, "yellow"),
            Segment::new(66.0, "red"),
            Segment::new(100.0, "gray"),
        ])
    }

    #[test]
    fn test_builder_defaults() {
        let spec = spec_0_100();
        assert_eq!(spec.outer_radius, 45.0);
        assert!((spec.inner_radius() - 36.0).abs() < EPS);
        assert!((spec.radius_center() - 40.5).abs() < EPS);
        assert_eq!(spec.label_offset, 2.5);
        assert_eq!(spec.domain(), (0.0, 100.0));
    }

    #[test]
    fn test_angle_scale_endpoints() {
        let scale = AngleScale::for_spec(&spec_0_100());
        assert!((scale.angle(0.0) + PI / 2.0).abs() < EPS);
        assert!((scale.angle(100.0) - PI / 2.0).abs() < EPS);
        assert!(scale.angle(50.0).abs() < EPS);
    }

    #[test]
    fn test_angle_is_unclamped_but_positions_are_clamped() {
        let scale = AngleScale::new(0.0, 100.0);
        assert!(scale.angle(200.0) > PI);
        assert_eq!(scale.clamped_angle(200.0), AngleScale::MAX_ANGLE);
        assert_eq!(scale.clamped_angle(-50.0), AngleScale::MIN_ANGLE);
    }

    #[test]
    fn test_degenerate_domain_maps_to_start() {
        let scale = AngleScale::new(10.0, 10.0);
        assert_eq!(scale.angle(10.0), AngleScale::MIN_ANGLE);
        assert_eq!(scale.angle(99.0), AngleScale::MIN_ANGLE);
    }

    #[test]
    fn test_value_position_frame() {
        let scale = AngleScale::new(0.0, 100.0);

        let left = value_position(&scale, 0.0, 10.0);
        assert!((left.x + 10.0).abs() < EPS && left.y.abs() < EPS, "{left:?}");

        let apex = value_position(&scale, 50.0, 10.0);
        assert!(apex.x.abs() < EPS && (apex.y + 10.0).abs() < EPS, "{apex:?}");

        let right = value_position(&scale, 100.0, 10.0);
        assert!((right.x - 10.0).abs() < EPS && right.y.abs() < EPS, "{right:?}");
    }

    #[test]
    fn test_fit_canvas() {
        assert_eq!(
            fit_canvas(200.0, 50.0),
            CanvasSize {
                width: 100.0,
                height: 50.0
            }
        );
        assert_eq!(
            fit_canvas(200.0, 150.0),
            CanvasSize {
                width: 200.0,
                height: 100.0
            }
        );
        // Exactly half is width constrained
        assert_eq!(
            fit_canvas(200.0, 100.0),
            CanvasSize {
                width: 200.0,
                height: 100.0
            }
        );
    }

    #[test]
    fn test_text_anchor_boundaries() {
        assert_eq!(TextAnchor::for_x(0.0, 5.0), TextAnchor::Middle);
        assert_eq!(TextAnchor::for_x(4.999, 5.0), TextAnchor::Middle);
        assert_eq!(TextAnchor::for_x(-4.999, 5.0), TextAnchor::Middle);
        assert_eq!(TextAnchor::for_x(5.0, 5.0), TextAnchor::Start);
        assert_eq!(TextAnchor::for_x(-5.0, 5.0), TextAnchor::End);
        assert_eq!(TextAnchor::for_x(30.0, 5.0), TextAnchor::Start);
        assert_eq!(TextAnchor::for_x(-30.0, 5.0), TextAnchor::End);
    }

    #[test]
    fn test_arc_segments_follow_breakpoints() {
        let spec = spec_0_100();
        let scale = AngleScale::for_spec(&spec);
        let arcs = arc_segments(&spec, &scale);

        assert_eq!(arcs.len(), 3);
        assert_eq!(arcs[0].color.as_str(), "green");
        assert_eq!(arcs[2].color.as_str(), "red");
        for pair in arcs.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
        assert!((arcs[0].start_angle + PI / 2.0).abs() < EPS);
        assert!((arcs[2].end_angle - PI / 2.0).abs() < EPS);
    }

    #[test]
    fn test_edge_labels_mirror_each_other() {
        let spec = spec_0_100();
        let scale = AngleScale::for_spec(&spec);
        let labels = labels(&spec, &scale, &Column::new("value"), &PlainFormatter);

        assert_eq!(labels.len(), 4);
        let start = &labels[0];
        let end = &labels[1];
        assert_eq!(start.kind, LabelKind::DomainStart);
        assert_eq!(end.kind, LabelKind::DomainEnd);
        assert!((start.position.x + 40.5).abs() < EPS, "{:?}", start.position);
        assert!((end.position.x - 40.5).abs() < EPS, "{:?}", end.position);
        assert_eq!(start.position.y, 2.5);
        assert_eq!(end.position.y, 2.5);
        assert_eq!(start.anchor, TextAnchor::Middle);
        assert_eq!(end.anchor, TextAnchor::Middle);
        assert_eq!(start.text, "0");
        assert_eq!(end.text, "100");
    }

    #[test]
    fn test_short_segment_lists_do_not_panic() {
        let empty = GaugeSpec::new(Vec::new());
        let output = compute_geometry(
            &empty,
            &RenderInput::new(5.0, 100.0, 100.0),
            &Column::default(),
            &PlainFormatter,
        );
        assert!(output.arcs.is_empty());
        assert!(output.labels.is_empty());

        let single = GaugeSpec::new(vec![Segment::new(1.0, "red")]);
        let output = compute_geometry(
            &single,
            &RenderInput::new(5.0, 100.0, 100.0),
            &Column::default(),
            &PlainFormatter,
        );
        assert!(output.arcs.is_empty());
        assert_eq!(output.labels.len(), 2);
    }

    #[test]
    fn test_validate() {
        assert!(spec_0_100().validate().is_ok());

        let single = GaugeSpec::new(vec![Segment::new(0.0, "red")]);
        assert!(matches!(
            single.validate(),
            Err(GaugeError::TooFewSegments { count: 1 })
        ));

        let unordered = GaugeSpec::new(vec![
            Segment::new(0.0, "a"),
            Segment::new(50.0, "b"),
            Segment::new(20.0, "c"),
        ]);
        assert!(matches!(
            unordered.validate(),
            Err(GaugeError::UnorderedSegments { index: 2 })
        ));

        let nan = GaugeSpec::new(vec![Segment::new(0.0, "a"), Segment::new(f64::NAN, "b")]);
        assert!(matches!(
            nan.validate(),
            Err(GaugeError::NonFiniteValue { index: 1 })
        ));

        let flat = GaugeSpec::builder()
            .segments(spec_0_100().segments)
            .inner_radius_ratio(1.0)
            .build();
        assert!(matches!(
            flat.validate(),
            Err(GaugeError::InvalidInnerRadiusRatio(_))
        ));

        let zero = GaugeSpec::builder()
            .segments(spec_0_100().segments)
            .outer_radius(0.0)
            .build();
        assert!(matches!(
            zero.validate(),
            Err(GaugeError::InvalidOuterRadius(_))
        ));
    }

    #[test]
    fn test_equal_breakpoints_are_valid() {
        let spec = GaugeSpec::new(vec![
            Segment::new(0.0, "a"),
            Segment::new(50.0, "b"),
            Segment::new(50.0, "c"),
            Segment::new(100.0, "d"),
        ]);
        assert!(spec.validate().is_ok());
        let arcs = arc_segments(&spec, &AngleScale::for_spec(&spec));
        assert_eq!(arcs[1].start_angle, arcs[1].end_angle);
    }

    #[test]
    fn test_is_sensible() {
        assert!(is_sensible(1, 1));
        assert!(!is_sensible(2, 1));
        assert!(!is_sensible(1, 3));
        assert!(!is_sensible(0, 0));
    }
}
