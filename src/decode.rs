//! Decoding of Graphic Annotation Sequence items into graphics.
//!
//! Graphic objects are decoded first, in sequence order, each in isolation: a
//! malformed object is logged and skipped without affecting the others. The
//! points of every object that decoded form the annotation bounds, which text
//! objects then use to place their callouts.

use std::fmt::Display;

use crate::coords::{DisplayedArea, resolve_source_point};
use crate::errors::{DecodeError, TextField};
use crate::graphics::defaults;
use crate::graphics::{
    CalloutShape, CircleShape, CurveShape, DicomGraphicAnnotation, EllipseShape, Graphic,
    PointShape, PolylineShape, StatefulGraphic, TextShape, VectorShape,
};
use crate::sequence::{
    AnnotationUnits, BoundingBox, GraphicAnnotationSequenceItem, GraphicObject, GraphicType,
    RawPoint, TextObject,
};
use crate::types::{Color, Point, Rect};

/// What to do with a text object that has neither anchor point nor bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTextPolicy {
    /// Fail the whole decode with [`DecodeError::MissingTextPosition`]
    #[default]
    Abort,
    /// Log and skip the text object like any other malformed item
    Skip,
}

/// Decoder configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    /// Attach editing handles to every graphic
    pub editable: bool,
    pub missing_text: MissingTextPolicy,
    /// Annotation color; graphics other than callouts are drawn in it
    pub color: Color,
    /// Callout color while focused or selected
    pub active_color: Color,
    /// Callout color while inactive
    pub inactive_color: Color,
    /// Distance under which two points are considered equal
    pub point_tolerance: f64,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            editable: false,
            missing_text: MissingTextPolicy::default(),
            color: defaults::ANNOTATION_COLOR,
            active_color: defaults::ACTIVE_COLOR,
            inactive_color: defaults::INACTIVE_COLOR,
            point_tolerance: defaults::POINT_TOLERANCE,
        }
    }
}

impl DecodeOptions {
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_missing_text(mut self, policy: MissingTextPolicy) -> Self {
        self.missing_text = policy;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_active_color(mut self, color: Color) -> Self {
        self.active_color = color;
        self
    }

    pub fn with_inactive_color(mut self, color: Color) -> Self {
        self.inactive_color = color;
        self
    }

    pub fn with_point_tolerance(mut self, tolerance: f64) -> Self {
        self.point_tolerance = tolerance;
        self
    }
}

/// Result of decoding one graphic object
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedGraphic {
    /// `None` for graphic types this crate does not draw
    pub graphic: Option<Graphic>,
    /// Resolved points, which count towards the annotation bounds
    pub points: Vec<Point>,
}

/// Turns sequence items into [`DicomGraphicAnnotation`]s for one displayed area
#[derive(Debug, Clone)]
pub struct AnnotationDecoder {
    area: DisplayedArea,
    options: DecodeOptions,
}

impl AnnotationDecoder {
    pub fn new(area: DisplayedArea, options: DecodeOptions) -> Self {
        Self { area, options }
    }

    pub fn displayed_area(&self) -> &DisplayedArea {
        &self.area
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a whole sequence item.
    ///
    /// Malformed graphic and text objects are skipped. The only error returned
    /// is [`DecodeError::MissingTextPosition`] under [`MissingTextPolicy::Abort`].
    pub fn decode(
        &self,
        item: &GraphicAnnotationSequenceItem,
    ) -> Result<DicomGraphicAnnotation, DecodeError> {
        let mut annotation =
            DicomGraphicAnnotation::with_color(item.layer.clone(), self.options.color);
        {
            let mut scope = annotation.source_coordinates();
            let mut bounds = Rect::new();

            for object in &item.graphic_objects {
                match self.decode_graphic_object(object) {
                    Ok(decoded) => {
                        if let Some(graphic) = decoded.graphic {
                            scope.push(graphic);
                        }
                        for p in &decoded.points {
                            bounds.expand_point(*p);
                        }
                    }
                    Err(err) => log_fault("graphic object", &err, object),
                }
            }

            for (index, text) in item.text_objects.iter().enumerate() {
                match self.decode_text_object(index, text, &bounds) {
                    Ok(graphic) => scope.push(graphic),
                    Err(err)
                        if err.is_structural()
                            && self.options.missing_text == MissingTextPolicy::Abort =>
                    {
                        return Err(err);
                    }
                    Err(err) => log_fault("text object", &err, text),
                }
            }

            crate::log::debug!(
                layer = scope.layer_id(),
                graphics = scope.len(),
                "decoded graphic annotation"
            );
        }

        Ok(annotation)
    }

    /// Decode one graphic object; the returned graphic is `None` for
    /// unrecognized graphic types.
    pub fn decode_graphic_object(
        &self,
        object: &GraphicObject,
    ) -> Result<DecodedGraphic, DecodeError> {
        let points = self.resolve_graphic_points(object)?;
        let graphic = self
            .create_shape(&object.graphic_type, &points)?
            .map(|shape| self.wrap_shape(shape));
        Ok(DecodedGraphic { graphic, points })
    }

    /// Wrap a decoded shape, drawn in the annotation color
    fn wrap_shape(&self, shape: VectorShape) -> Graphic {
        let mut graphic = Graphic::from_shape(shape, self.options.editable);
        graphic.set_color(self.options.color);
        graphic
    }

    fn resolve_graphic_points(&self, object: &GraphicObject) -> Result<Vec<Point>, DecodeError> {
        object
            .data
            .iter()
            .enumerate()
            .map(|(index, &raw)| {
                let p = resolve_source_point(raw, object.units, &self.area);
                Point::try_new(p.x, p.y).map_err(|reason| DecodeError::NonFiniteCoordinate {
                    graphic_type: object.graphic_type.clone(),
                    index,
                    reason,
                })
            })
            .collect()
    }

    fn create_shape(
        &self,
        graphic_type: &GraphicType,
        points: &[Point],
    ) -> Result<Option<VectorShape>, DecodeError> {
        let required = graphic_type.min_points();
        if points.len() < required {
            return Err(DecodeError::InsufficientPoints {
                graphic_type: graphic_type.clone(),
                required,
                found: points.len(),
            });
        }

        let shape: VectorShape = match graphic_type {
            GraphicType::Interpolated => CurveShape::new(points.to_vec()).into(),
            GraphicType::Polyline => {
                PolylineShape::from_points(points.to_vec(), self.options.point_tolerance).into()
            }
            GraphicType::Point => PointShape::new(points[0]).into(),
            GraphicType::Circle => CircleShape::through(points[0], points[1]).into(),
            GraphicType::Ellipse => {
                EllipseShape::new([points[0], points[1]], [points[2], points[3]]).into()
            }
            #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
            GraphicType::Other(code) => {
                crate::log::debug!(
                    graphic_type = %code,
                    "skipping unrecognized graphic type"
                );
                return Ok(None);
            }
        };
        Ok(Some(shape))
    }

    /// Decode one text object against the bounds of the graphic objects.
    ///
    /// `index` is the object's position in the Text Object Sequence and is only
    /// used for error reporting.
    pub fn decode_text_object(
        &self,
        index: usize,
        text: &TextObject,
        bounds: &Rect,
    ) -> Result<Graphic, DecodeError> {
        match (&text.anchor, &text.bounding_box) {
            (Some(anchor), bbox) => {
                let anchor_point =
                    self.resolve_text_point(anchor.point, anchor.units, TextField::AnchorPoint)?;
                let location = match bbox {
                    Some(bbox) => self.resolve_box_center(bbox)?,
                    None if !bounds.is_empty() => bounds.origin() - defaults::CALLOUT_TEXT_OFFSET,
                    None => anchor_point - defaults::CALLOUT_TEXT_OFFSET,
                };
                // Without graphics nearby, only the arrow shows what the text refers to
                let callout =
                    CalloutShape::new(text.unformatted_text.clone(), anchor_point, location)
                        .with_arrowhead(bounds.is_empty());
                // Callouts take the active/inactive colors, not the annotation color
                let inner = Graphic::from_shape(callout.into(), self.options.editable);
                Ok(Graphic::Stateful(StatefulGraphic::new(
                    inner,
                    self.options.active_color,
                    self.options.inactive_color,
                )))
            }
            (None, Some(bbox)) => {
                // TODO: rotate and justify the text to fit the box instead of centering it
                let location = self.resolve_box_center(bbox)?;
                let label = TextShape::new(text.unformatted_text.clone(), location);
                Ok(self.wrap_shape(label.into()))
            }
            (None, None) => Err(DecodeError::MissingTextPosition { index }),
        }
    }

    fn resolve_text_point(
        &self,
        raw: RawPoint,
        units: AnnotationUnits,
        field: TextField,
    ) -> Result<Point, DecodeError> {
        let p = resolve_source_point(raw, units, &self.area);
        Point::try_new(p.x, p.y)
            .map_err(|reason| DecodeError::NonFiniteTextCoordinate { field, reason })
    }

    fn resolve_box_center(&self, bbox: &BoundingBox) -> Result<Point, DecodeError> {
        let tl =
            self.resolve_text_point(bbox.top_left, bbox.units, TextField::BoundingBoxTopLeft)?;
        let br = self.resolve_text_point(
            bbox.bottom_right,
            bbox.units,
            TextField::BoundingBoxBottomRight,
        )?;
        Ok(tl.midpoint(br))
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn log_fault(what: &str, err: &DecodeError, raw: &dyn Display) {
    crate::log::warn!(error = %err, "skipping {what} that failed to decode");
    crate::log::debug!("raw {what}:\n{raw}");
}

impl DicomGraphicAnnotation {
    /// Decode `item` against `area`; see [`AnnotationDecoder::decode`]
    pub fn from_sequence_item(
        item: &GraphicAnnotationSequenceItem,
        area: &DisplayedArea,
        options: &DecodeOptions,
    ) -> Result<Self, DecodeError> {
        AnnotationDecoder::new(*area, options.clone()).decode(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{ControlHandle, ShapeKind};
    use crate::types::{Offset, Size};

    fn decoder() -> AnnotationDecoder {
        AnnotationDecoder::new(
            DisplayedArea::new(Point::ORIGIN, Size::new(100.0, 100.0)),
            DecodeOptions::default(),
        )
    }

    fn pixel(graphic_type: GraphicType, data: Vec<RawPoint>) -> GraphicObject {
        GraphicObject::new(graphic_type, AnnotationUnits::Pixel, data)
    }

    #[test]
    fn minimum_points_per_type() {
        let d = decoder();
        let cases = [
            (GraphicType::Point, 1),
            (GraphicType::Polyline, 2),
            (GraphicType::Interpolated, 2),
            (GraphicType::Circle, 2),
            (GraphicType::Ellipse, 4),
        ];
        for (graphic_type, required) in cases {
            let short = vec![[1.0, 1.0]; required - 1];
            let err = d.decode_graphic_object(&pixel(graphic_type.clone(), short)).unwrap_err();
            assert_eq!(
                err,
                DecodeError::InsufficientPoints {
                    graphic_type: graphic_type.clone(),
                    required,
                    found: required - 1
                }
            );

            let enough = vec![[1.0, 1.0]; required];
            assert!(d.decode_graphic_object(&pixel(graphic_type, enough)).is_ok());
        }
    }

    #[test]
    fn unrecognized_type_yields_points_but_no_graphic() {
        let decoded = decoder()
            .decode_graphic_object(&pixel(
                GraphicType::Other("MULTIPOINT".into()),
                vec![[2.0, 3.0]],
            ))
            .unwrap();
        assert!(decoded.graphic.is_none());
        assert_eq!(decoded.points, vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    fn non_finite_coordinates_are_item_faults() {
        let err = decoder()
            .decode_graphic_object(&pixel(GraphicType::Polyline, vec![[1.0, 1.0], [f32::NAN, 1.0]]))
            .unwrap_err();
        assert!(matches!(err, DecodeError::NonFiniteCoordinate { index: 1, .. }));
        assert!(!err.is_structural());
    }

    #[test]
    fn editable_graphics_get_handles() {
        let d = AnnotationDecoder::new(
            DisplayedArea::whole_image(10, 10),
            DecodeOptions::default().with_editable(true),
        );
        let decoded = d
            .decode_graphic_object(&pixel(GraphicType::Circle, vec![[5.0, 5.0], [6.0, 5.0]]))
            .unwrap();
        let graphic = decoded.graphic.unwrap();
        assert_eq!(graphic.kind(), ShapeKind::Circle);
        assert_eq!(graphic.handles(), &[ControlHandle::Stretch, ControlHandle::Move]);
    }

    #[test]
    fn callout_text_placement() {
        let d = decoder();
        let anchored = TextObject::new("a").with_anchor([51.0, 51.0], AnnotationUnits::Pixel);

        // No graphics: offset from the anchor, arrow shown
        let g = d.decode_text_object(0, &anchored, &Rect::new()).unwrap();
        match g.shape() {
            VectorShape::Callout(c) => {
                assert_eq!(c.anchor, Point::new(50.0, 50.0));
                assert_eq!(c.text_location, Point::new(20.0, 20.0));
                assert!(c.show_arrowhead);
            }
            other => panic!("expected callout, got {other:?}"),
        }

        // Graphics present: offset from the bounds origin, no arrow
        let bounds = Rect::from_points(&[Point::new(60.0, 70.0), Point::new(80.0, 90.0)]);
        let g = d.decode_text_object(0, &anchored, &bounds).unwrap();
        match g.shape() {
            VectorShape::Callout(c) => {
                assert_eq!(c.text_location, Point::new(60.0, 70.0) - Offset::new(30.0, 30.0));
                assert!(!c.show_arrowhead);
            }
            other => panic!("expected callout, got {other:?}"),
        }

        // Bounding box wins over both
        let boxed = anchored.with_bounding_box([0.1, 0.2], [0.3, 0.4], AnnotationUnits::Display);
        let g = d.decode_text_object(0, &boxed, &bounds).unwrap();
        match g.shape() {
            VectorShape::Callout(c) => {
                assert!(c.text_location.approx_eq(Point::new(20.0, 30.0), 1e-4));
            }
            other => panic!("expected callout, got {other:?}"),
        }
    }

    #[test]
    fn callout_is_stateful_and_inactive() {
        let g = decoder()
            .decode_text_object(
                0,
                &TextObject::new("a").with_anchor([1.0, 1.0], AnnotationUnits::Pixel),
                &Rect::new(),
            )
            .unwrap();
        match &g {
            Graphic::Stateful(s) => {
                assert_eq!(s.state(), crate::graphics::InteractionState::Inactive);
                assert_eq!(s.inactive_color(), Color::LEMON_CHIFFON);
                assert_eq!(g.color(), Color::LEMON_CHIFFON);
            }
            other => panic!("expected stateful graphic, got {other:?}"),
        }
    }

    #[test]
    fn label_sits_at_box_center() {
        let text = TextObject::new("label").with_bounding_box(
            [11.0, 21.0],
            [31.0, 41.0],
            AnnotationUnits::Pixel,
        );
        let g = decoder().decode_text_object(0, &text, &Rect::new()).unwrap();
        assert!(matches!(g, Graphic::Vector(_)));
        match g.shape() {
            VectorShape::Text(t) => assert_eq!(t.location, Point::new(20.0, 30.0)),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn text_without_position_is_structural() {
        let err = decoder()
            .decode_text_object(3, &TextObject::new("lost"), &Rect::new())
            .unwrap_err();
        assert_eq!(err, DecodeError::MissingTextPosition { index: 3 });
    }
}
