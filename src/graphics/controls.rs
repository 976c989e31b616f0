//! Interactive control decorations for editable annotations.
//!
//! The decoder only decides which handles a shape gets; dragging, hit-testing
//! and drawing the handles belong to the host application.

use crate::types::{Color, Offset};

use super::shapes::{Shape, VectorShape};

/// A kind of interactive handle attached to a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlHandle {
    /// Drag the whole shape
    Move,
    /// Resize through the bounding box
    Stretch,
    /// Drag individual vertices
    VertexEdit,
    /// Keep first and last vertex together while editing a closed polyline
    Polygon,
}

/// A shape together with its editing handles
#[derive(Debug, Clone, PartialEq)]
pub struct ControlGraphic {
    subject: VectorShape,
    handles: Vec<ControlHandle>,
}

impl ControlGraphic {
    /// Decorate `subject` with the handles appropriate for its kind
    pub fn decorate(subject: VectorShape) -> Self {
        let mut handles = Vec::with_capacity(3);
        match &subject {
            VectorShape::Polyline(p) if p.is_closed() => {
                handles.push(ControlHandle::Polygon);
                handles.push(ControlHandle::VertexEdit);
            }
            VectorShape::Polyline(_) | VectorShape::Curve(_) => {
                handles.push(ControlHandle::VertexEdit);
            }
            VectorShape::Circle(_) | VectorShape::Ellipse(_) => {
                handles.push(ControlHandle::Stretch);
            }
            VectorShape::Point(_) | VectorShape::Callout(_) | VectorShape::Text(_) => {}
        }
        handles.push(ControlHandle::Move);
        Self { subject, handles }
    }

    pub fn subject(&self) -> &VectorShape {
        &self.subject
    }

    pub fn subject_mut(&mut self) -> &mut VectorShape {
        &mut self.subject
    }

    pub fn handles(&self) -> &[ControlHandle] {
        &self.handles
    }

    pub fn has_handle(&self, handle: ControlHandle) -> bool {
        self.handles.contains(&handle)
    }

    pub fn set_color(&mut self, color: Color) {
        self.subject.set_color(color);
    }

    /// Apply a move-handle drag
    pub fn move_by(&mut self, offset: Offset) {
        self.subject.translate(offset);
    }

    pub fn into_subject(self) -> VectorShape {
        self.subject
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::defaults::POINT_TOLERANCE;
    use crate::graphics::shapes::{CircleShape, CurveShape, PointShape, PolylineShape};
    use crate::types::Point;

    fn square(closed: bool) -> VectorShape {
        let mut pts = vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 4.0)];
        if closed {
            pts.push(Point::new(0.0, 0.0));
        }
        PolylineShape::from_points(pts, POINT_TOLERANCE).into()
    }

    #[test]
    fn every_shape_gets_a_move_handle() {
        let shapes: Vec<VectorShape> = vec![
            PointShape::new(Point::ORIGIN).into(),
            CircleShape::new(Point::ORIGIN, 1.0).into(),
            CurveShape::new(vec![Point::ORIGIN, Point::new(1.0, 1.0)]).into(),
            square(false),
        ];
        for shape in shapes {
            assert!(ControlGraphic::decorate(shape).has_handle(ControlHandle::Move));
        }
    }

    #[test]
    fn handles_follow_shape_kind() {
        let circle = ControlGraphic::decorate(CircleShape::new(Point::ORIGIN, 1.0).into());
        assert_eq!(circle.handles(), &[ControlHandle::Stretch, ControlHandle::Move]);

        let open = ControlGraphic::decorate(square(false));
        assert_eq!(open.handles(), &[ControlHandle::VertexEdit, ControlHandle::Move]);

        let closed = ControlGraphic::decorate(square(true));
        assert_eq!(
            closed.handles(),
            &[ControlHandle::Polygon, ControlHandle::VertexEdit, ControlHandle::Move]
        );

        let point = ControlGraphic::decorate(PointShape::new(Point::ORIGIN).into());
        assert_eq!(point.handles(), &[ControlHandle::Move]);
    }

    #[test]
    fn move_by_translates_subject() {
        let mut g = ControlGraphic::decorate(PointShape::new(Point::new(1.0, 2.0)).into());
        g.move_by(Offset::new(10.0, 10.0));
        match g.into_subject() {
            VectorShape::Point(p) => assert_eq!(p.center, Point::new(11.0, 12.0)),
            other => panic!("expected point, got {other:?}"),
        }
    }
}
