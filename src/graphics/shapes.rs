//! Vector shape types produced by the decoder
//!
//! Each shape is its own type that knows how to:
//! - Report and change its stroke color
//! - Calculate its bounding box
//! - Move by an offset
//! - Write itself back into a sequence item

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::coords::to_pixel_units;
use crate::sequence::{
    AnnotationUnits, GraphicObject, GraphicType, RawPoint, SequenceItemBuilder, TextObject,
};
use crate::types::{Color, Offset, Point, Rect, Size};

use super::defaults;

/// Common behavior for all shapes
#[enum_dispatch]
pub trait Shape {
    fn kind(&self) -> ShapeKind;

    /// Stroke color
    fn color(&self) -> Color;

    fn set_color(&mut self, color: Color);

    /// Bounding box in source coordinates
    fn bounds(&self) -> Rect;

    /// Move every defining point by `offset`
    fn translate(&mut self, offset: Offset);

    /// Append this shape's graphic or text object to `builder`.
    ///
    /// Output is always in PIXEL units so it decodes to the same geometry
    /// whatever displayed area the reader uses.
    fn encode(&self, builder: &mut SequenceItemBuilder);
}

/// Discriminant of a [`VectorShape`], handy for assertions and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Curve,
    Polyline,
    Point,
    Circle,
    Ellipse,
    Callout,
    Text,
}

/// Every shape the decoder can produce
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, PartialEq)]
pub enum VectorShape {
    Curve(CurveShape),
    Polyline(PolylineShape),
    Point(PointShape),
    Circle(CircleShape),
    Ellipse(EllipseShape),
    Callout(CalloutShape),
    Text(TextShape),
}

fn pixel_data(points: &[Point]) -> Vec<RawPoint> {
    points.iter().map(|&p| to_pixel_units(p)).collect()
}

/// `p` at the precision it is encoded with, in pixel units
fn stored_point(p: Point) -> Point {
    let [x, y] = to_pixel_units(p);
    Point::new(f64::from(x), f64::from(y))
}

/// Box a text value is assumed to occupy when centered on `location`
fn text_box(text: &str, location: Point) -> (Point, Point) {
    let columns = text.lines().map(|l| l.chars().count()).max().unwrap_or(0).max(1);
    let rows = text.lines().count().max(1);
    let half = Offset::new(
        columns as f64 * defaults::TEXT_CHAR_WIDTH / 2.0,
        rows as f64 * defaults::TEXT_LINE_HEIGHT / 2.0,
    );
    (location - half, location + half)
}

// ============================================================================
// Shape Types
// ============================================================================

/// Smooth curve through every point (INTERPOLATED)
#[derive(Debug, Clone, PartialEq)]
pub struct CurveShape {
    pub points: Vec<Point>,
    pub color: Color,
}

impl CurveShape {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            color: defaults::ANNOTATION_COLOR,
        }
    }
}

impl Shape for CurveShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Curve
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(&self.points)
    }

    fn translate(&mut self, offset: Offset) {
        for p in &mut self.points {
            *p += offset;
        }
    }

    fn encode(&self, builder: &mut SequenceItemBuilder) {
        builder.add_graphic_object(GraphicObject::new(
            GraphicType::Interpolated,
            AnnotationUnits::Pixel,
            pixel_data(&self.points),
        ));
    }
}

/// Straight segments through every point (POLYLINE).
///
/// A polyline that ends where it starts is a closed polygon; the closing
/// point stays in `points`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineShape {
    pub points: Vec<Point>,
    pub closed: bool,
    pub color: Color,
}

impl PolylineShape {
    /// Build from points, detecting closure with `tolerance`.
    ///
    /// Endpoints are compared as they would be stored (FL pixel values), so
    /// an encoded polyline decodes with the same closure.
    pub fn from_points(points: Vec<Point>, tolerance: f64) -> Self {
        let closed = match (points.first(), points.last()) {
            (Some(&first), Some(&last)) if points.len() > 1 => {
                stored_point(first).approx_eq(stored_point(last), tolerance)
            }
            _ => false,
        };
        Self {
            points,
            closed,
            color: defaults::ANNOTATION_COLOR,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Shape for PolylineShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polyline
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(&self.points)
    }

    fn translate(&mut self, offset: Offset) {
        for p in &mut self.points {
            *p += offset;
        }
    }

    fn encode(&self, builder: &mut SequenceItemBuilder) {
        let mut data = pixel_data(&self.points);
        // A closed polygon is written with an exact closing point
        if self.closed && data.len() > 1 {
            let last = data.len() - 1;
            data[last] = data[0];
        }
        builder.add_graphic_object(GraphicObject::new(
            GraphicType::Polyline,
            AnnotationUnits::Pixel,
            data,
        ));
    }
}

/// Square marker of fixed on-screen size (POINT)
#[derive(Debug, Clone, PartialEq)]
pub struct PointShape {
    pub center: Point,
    pub half_size: f64,
    /// The marker keeps its size in screen space when the view zooms
    pub scale_invariant: bool,
    pub color: Color,
}

impl PointShape {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            half_size: defaults::POINT_HALF_SIZE,
            scale_invariant: true,
            color: defaults::ANNOTATION_COLOR,
        }
    }
}

impl Shape for PointShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Point
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn bounds(&self) -> Rect {
        let half = Offset::new(self.half_size, self.half_size);
        Rect::from_points(&[self.center - half, self.center + half])
    }

    fn translate(&mut self, offset: Offset) {
        self.center += offset;
    }

    fn encode(&self, builder: &mut SequenceItemBuilder) {
        builder.add_graphic_object(GraphicObject::new(
            GraphicType::Point,
            AnnotationUnits::Pixel,
            vec![to_pixel_units(self.center)],
        ));
    }
}

/// A circle shape (CIRCLE)
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub center: Point,
    pub radius: f64,
    pub color: Color,
}

impl CircleShape {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            color: defaults::ANNOTATION_COLOR,
        }
    }

    /// Circle centered on `center` passing through `on_perimeter`
    pub fn through(center: Point, on_perimeter: Point) -> Self {
        Self::new(center, center.distance(on_perimeter))
    }
}

impl Shape for CircleShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn bounds(&self) -> Rect {
        let r = Offset::new(self.radius, self.radius);
        Rect::from_points(&[self.center - r, self.center + r])
    }

    fn translate(&mut self, offset: Offset) {
        self.center += offset;
    }

    fn encode(&self, builder: &mut SequenceItemBuilder) {
        let perimeter = self.center + Offset::new(self.radius, 0.0);
        builder.add_graphic_object(GraphicObject::new(
            GraphicType::Circle,
            AnnotationUnits::Pixel,
            vec![to_pixel_units(self.center), to_pixel_units(perimeter)],
        ));
    }
}

/// An ellipse defined by the endpoints of its two axes (ELLIPSE)
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseShape {
    pub major_axis: [Point; 2],
    pub minor_axis: [Point; 2],
    pub color: Color,
}

impl EllipseShape {
    pub fn new(major_axis: [Point; 2], minor_axis: [Point; 2]) -> Self {
        Self {
            major_axis,
            minor_axis,
            color: defaults::ANNOTATION_COLOR,
        }
    }

    pub fn center(&self) -> Point {
        self.major_axis[0].midpoint(self.major_axis[1])
    }

    pub fn semi_major(&self) -> f64 {
        self.major_axis[0].distance(self.major_axis[1]) / 2.0
    }

    pub fn semi_minor(&self) -> f64 {
        self.minor_axis[0].distance(self.minor_axis[1]) / 2.0
    }
}

impl Shape for EllipseShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn bounds(&self) -> Rect {
        // Half extents of a rotated ellipse from its semi-axis vectors
        let u = (self.major_axis[1].as_dvec2() - self.major_axis[0].as_dvec2()) * 0.5;
        let v = (self.minor_axis[1].as_dvec2() - self.minor_axis[0].as_dvec2()) * 0.5;
        let half = DVec2::new(u.x.hypot(v.x), u.y.hypot(v.y));
        let c = self.center().as_dvec2();
        Rect {
            min: (c - half).into(),
            max: (c + half).into(),
        }
    }

    fn translate(&mut self, offset: Offset) {
        for p in self.major_axis.iter_mut().chain(self.minor_axis.iter_mut()) {
            *p += offset;
        }
    }

    fn encode(&self, builder: &mut SequenceItemBuilder) {
        let points = [self.major_axis, self.minor_axis].concat();
        builder.add_graphic_object(GraphicObject::new(
            GraphicType::Ellipse,
            AnnotationUnits::Pixel,
            pixel_data(&points),
        ));
    }
}

/// Text connected to an anchor point, optionally by an arrow
#[derive(Debug, Clone, PartialEq)]
pub struct CalloutShape {
    pub text: String,
    pub anchor: Point,
    pub text_location: Point,
    pub show_arrowhead: bool,
    pub color: Color,
}

impl CalloutShape {
    pub fn new(text: impl Into<String>, anchor: Point, text_location: Point) -> Self {
        Self {
            text: text.into(),
            anchor,
            text_location,
            show_arrowhead: true,
            color: defaults::ANNOTATION_COLOR,
        }
    }

    pub fn with_arrowhead(mut self, show: bool) -> Self {
        self.show_arrowhead = show;
        self
    }
}

impl Shape for CalloutShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Callout
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn bounds(&self) -> Rect {
        let (tl, br) = text_box(&self.text, self.text_location);
        Rect::from_points(&[self.anchor, tl, br])
    }

    fn translate(&mut self, offset: Offset) {
        self.anchor += offset;
        self.text_location += offset;
    }

    fn encode(&self, builder: &mut SequenceItemBuilder) {
        let (tl, br) = text_box(&self.text, self.text_location);
        builder.add_text_object(
            TextObject::new(self.text.clone())
                .with_anchor(to_pixel_units(self.anchor), AnnotationUnits::Pixel)
                .with_bounding_box(to_pixel_units(tl), to_pixel_units(br), AnnotationUnits::Pixel),
        );
    }
}

/// Plain text at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub text: String,
    pub location: Point,
    pub color: Color,
}

impl TextShape {
    pub fn new(text: impl Into<String>, location: Point) -> Self {
        Self {
            text: text.into(),
            location,
            color: defaults::ANNOTATION_COLOR,
        }
    }

    /// Estimated extent of the text
    pub fn size(&self) -> Size {
        let (tl, br) = text_box(&self.text, self.location);
        Rect::from_points(&[tl, br]).size()
    }
}

impl Shape for TextShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Text
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn bounds(&self) -> Rect {
        let (tl, br) = text_box(&self.text, self.location);
        Rect::from_points(&[tl, br])
    }

    fn translate(&mut self, offset: Offset) {
        self.location += offset;
    }

    fn encode(&self, builder: &mut SequenceItemBuilder) {
        let (tl, br) = text_box(&self.text, self.location);
        builder.add_text_object(TextObject::new(self.text.clone()).with_bounding_box(
            to_pixel_units(tl),
            to_pixel_units(br),
            AnnotationUnits::Pixel,
        ));
    }
}
