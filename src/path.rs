//! SVG path data for the geometry primitives.
//!
//! Paths use the drawing frame of the gauge: origin at the arc center, angle 0
//! at twelve o'clock, angles growing clockwise. Translate into the
//! [`VIEW_BOX`](crate::config::VIEW_BOX) with [`Point::to_view_box`].

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write;

use crate::config::VIEW_BOX_ORIGIN;
use crate::format::compact_number;
use crate::{ArcPath, Needle, Point};

/// Fractional digits kept in path coordinates.
const PATH_DECIMALS: usize = 6;

/// Spans at least this wide are drawn as a full ring.
const FULL_TURN: f64 = TAU - 1e-6;

fn num(value: f64) -> String {
    compact_number(value, PATH_DECIMALS)
}

impl Point {
    pub fn to_view_box(self) -> Point {
        Point::new(self.x + VIEW_BOX_ORIGIN.0, self.y + VIEW_BOX_ORIGIN.1)
    }
}

impl ArcPath {
    /// Annular sector outline, or a pie slice when the inner radius is zero.
    pub fn path_data(&self) -> String {
        let r0 = self.inner_radius.max(0.0);
        let r1 = self.outer_radius;
        let (mut a0, mut a1) = (self.start_angle - FRAC_PI_2, self.end_angle - FRAC_PI_2);
        if a1 < a0 {
            std::mem::swap(&mut a0, &mut a1);
        }
        let span = a1 - a0;

        let mut d = String::new();
        if span >= FULL_TURN {
            let _ = write!(
                d,
                "M0,{r1}A{r1},{r1} 0 1,1 0,{neg_r1}A{r1},{r1} 0 1,1 0,{r1}",
                r1 = num(r1),
                neg_r1 = num(-r1),
            );
            if r0 > 0.0 {
                let _ = write!(
                    d,
                    "M0,{r0}A{r0},{r0} 0 1,0 0,{neg_r0}A{r0},{r0} 0 1,0 0,{r0}",
                    r0 = num(r0),
                    neg_r0 = num(-r0),
                );
            }
            d.push('Z');
            return d;
        }

        let large_arc = if span < PI { 0 } else { 1 };
        let (c0, s0) = (a0.cos(), a0.sin());
        let (c1, s1) = (a1.cos(), a1.sin());

        let _ = write!(
            d,
            "M{},{}A{r},{r} 0 {large_arc},1 {},{}",
            num(r1 * c0),
            num(r1 * s0),
            num(r1 * c1),
            num(r1 * s1),
            r = num(r1),
        );
        if r0 > 0.0 {
            let _ = write!(
                d,
                "L{},{}A{r},{r} 0 {large_arc},0 {},{}Z",
                num(r0 * c1),
                num(r0 * s1),
                num(r0 * c0),
                num(r0 * s0),
                r = num(r0),
            );
        } else {
            d.push_str("L0,0Z");
        }
        d
    }
}

impl Needle {
    pub fn path_data(&self) -> String {
        format!(
            "M{} {} L{} {}",
            num(self.from.x),
            num(self.from.y),
            num(self.to.x),
            num(self.to.y)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn arc(start_angle: f64, end_angle: f64, inner_radius: f64) -> ArcPath {
        ArcPath {
            start_angle,
            end_angle,
            inner_radius,
            outer_radius: 45.0,
            color: Color::from("red"),
        }
    }

    #[test]
    fn test_half_ring() {
        let d = arc(-FRAC_PI_2, FRAC_PI_2, 36.0).path_data();
        assert_eq!(d, "M-45,0A45,45 0 1,1 45,0L36,0A36,36 0 1,0 -36,0Z");
    }

    #[test]
    fn test_quarter_ring_uses_small_arc_flag() {
        let d = arc(-FRAC_PI_2, 0.0, 36.0).path_data();
        assert_eq!(d, "M-45,0A45,45 0 0,1 0,-45L0,-36A36,36 0 0,0 -36,0Z");
    }

    #[test]
    fn test_reversed_angles_draw_same_sector() {
        assert_eq!(
            arc(0.0, -FRAC_PI_2, 36.0).path_data(),
            arc(-FRAC_PI_2, 0.0, 36.0).path_data()
        );
    }

    #[test]
    fn test_pie_slice_without_inner_radius() {
        let d = arc(-FRAC_PI_2, 0.0, 0.0).path_data();
        assert_eq!(d, "M-45,0A45,45 0 0,1 0,-45L0,0Z");
    }

    #[test]
    fn test_full_ring() {
        let d = arc(-PI, PI, 36.0).path_data();
        assert_eq!(
            d,
            "M0,45A45,45 0 1,1 0,-45A45,45 0 1,1 0,45M0,36A36,36 0 1,0 0,-36A36,36 0 1,0 0,36Z"
        );
    }

    #[test]
    fn test_needle_path() {
        let needle = Needle {
            from: Point::new(0.0, -36.0),
            to: Point::new(0.0, -45.0),
            angle: 0.0,
        };
        assert_eq!(needle.path_data(), "M0 -36 L0 -45");
    }

    #[test]
    fn test_to_view_box() {
        assert_eq!(Point::new(-45.0, 0.0).to_view_box(), Point::new(5.0, 50.0));
        assert_eq!(Point::new(0.0, -45.0).to_view_box(), Point::new(50.0, 5.0));
    }
}
