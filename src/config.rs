// Gauge layout constants. All lengths are in view-box units: the gauge is
// drawn inside a 100 x 55 box whose point (50, 50) is the arc center.

/// Outer radius of the arc band.
pub const OUTER_RADIUS: f64 = 45.0;

/// Inner radius as a fraction of the outer radius.
pub const INNER_RADIUS_RATIO: f64 = 4.0 / 5.0;

/// Vertical offset of the domain-edge labels below the arc baseline.
pub const LABEL_OFFSET: f64 = 2.5;

/// Interior breakpoint labels sit just outside the outer radius.
pub const LABEL_RADIUS_FACTOR: f64 = 1.01;

/// Labels closer than this to the vertical axis are center-aligned.
pub const CENTER_LABEL_THRESHOLD: f64 = 5.0;

/// `(min_x, min_y, width, height)`; slightly taller than half the width to fit
/// the edge labels.
pub const VIEW_BOX: (f64, f64, f64, f64) = (0.0, 0.0, 100.0, 55.0);

/// Arc center inside [`VIEW_BOX`].
pub const VIEW_BOX_ORIGIN: (f64, f64) = (50.0, 50.0);

/// Smallest dashboard card (columns, rows) a gauge is offered for.
pub const MIN_GRID_SIZE: (u32, u32) = (3, 3);

const _: () = assert!(INNER_RADIUS_RATIO > 0.0 && INNER_RADIUS_RATIO < 1.0);
const _: () = assert!(OUTER_RADIUS * LABEL_RADIUS_FACTOR < VIEW_BOX_ORIGIN.0);
