//! Coordinate normalization.
//!
//! DICOM annotations address the image in one of two ways:
//! - `DISPLAY`: fractions of the displayed area, projected onto it
//! - `PIXEL`: 1-based image pixel coordinates
//!
//! Both end up in 0-based source coordinates. Every point list carries its own
//! units, so resolution happens per list and never assumes the sequence is
//! uniform.

use crate::sequence::{AnnotationUnits, RawPoint};
use crate::types::{Offset, Point, Rect, Size};

/// The image region that `DISPLAY` coordinates are projected onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayedArea {
    pub origin: Point,
    pub size: Size,
}

impl DisplayedArea {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Displayed area covering a whole `columns` x `rows` image
    pub fn whole_image(columns: u32, rows: u32) -> Self {
        Self::new(Point::ORIGIN, Size::new(columns as f64, rows as f64))
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Map a fractional display coordinate into source space
    pub fn project(&self, x: f64, y: f64) -> Point {
        self.origin + Offset::new(self.size.w * x, self.size.h * y)
    }

    /// Inverse of [`DisplayedArea::project`]; `None` for a degenerate area
    pub fn unproject(&self, p: Point) -> Option<(f64, f64)> {
        if self.size.w == 0.0 || self.size.h == 0.0 {
            return None;
        }
        let d = p - self.origin;
        Some((d.dx / self.size.w, d.dy / self.size.h))
    }
}

/// DICOM pixel coordinates start at (1, 1)
const PIXEL_ORIGIN: Offset = Offset::new(1.0, 1.0);

/// Resolve a raw coordinate pair to source coordinates using its units.
///
/// The result is not validated; callers check [`Point::is_finite`].
pub fn resolve_source_point(raw: RawPoint, units: AnnotationUnits, area: &DisplayedArea) -> Point {
    let [x, y] = raw;
    match units {
        AnnotationUnits::Display => area.project(f64::from(x), f64::from(y)),
        AnnotationUnits::Pixel => Point::new(f64::from(x), f64::from(y)) - PIXEL_ORIGIN,
    }
}

/// Resolve every point of a list with the same units
pub fn resolve_source_points(
    raw: &[RawPoint],
    units: AnnotationUnits,
    area: &DisplayedArea,
) -> Vec<Point> {
    raw.iter()
        .map(|&p| resolve_source_point(p, units, area))
        .collect()
}

/// Convert a source point back to 1-based pixel coordinates (FL precision)
pub fn to_pixel_units(p: Point) -> RawPoint {
    let q = p + PIXEL_ORIGIN;
    [q.x as f32, q.y as f32]
}
