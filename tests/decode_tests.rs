//! Decoding of whole sequence items
//!
//! Run with: cargo test --features tracing --test decode_tests -- --nocapture
//! and RUST_LOG=debug to see the skipped-item diagnostics.

use dicom_graphic_annotation::graphics::{ControlHandle, InteractionState};
use dicom_graphic_annotation::{
    AnnotationUnits, Color, CoordinateSystem, DecodeError, DecodeOptions, DisplayedArea, Graphic,
    GraphicAnnotationSequenceItem, GraphicObject, GraphicType, MissingTextPolicy, Point,
    SequenceItemBuilder, ShapeKind, Size, TextObject, VectorShape, decode, resolve_source_point,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn area() -> DisplayedArea {
    DisplayedArea::new(Point::new(0.0, 0.0), Size::new(512.0, 256.0))
}

fn pixel(graphic_type: GraphicType, data: Vec<[f32; 2]>) -> GraphicObject {
    GraphicObject::new(graphic_type, AnnotationUnits::Pixel, data)
}

fn display(graphic_type: GraphicType, data: Vec<[f32; 2]>) -> GraphicObject {
    GraphicObject::new(graphic_type, AnnotationUnits::Display, data)
}

#[test]
fn resolution_follows_units() {
    let a = DisplayedArea::new(Point::new(5.0, 7.0), Size::new(40.0, 80.0));
    for &(x, y) in &[(0.0f32, 0.0f32), (0.25, 0.5), (1.0, 1.0), (0.125, 0.875)] {
        let p = resolve_source_point([x, y], AnnotationUnits::Display, &a);
        assert_eq!(p, Point::new(5.0 + 40.0 * x as f64, 7.0 + 80.0 * y as f64));

        let p = resolve_source_point([x, y], AnnotationUnits::Pixel, &a);
        assert_eq!(p, Point::new(x as f64 - 1.0, y as f64 - 1.0));
    }
}

#[test]
fn graphics_keep_sequence_order() {
    let item = SequenceItemBuilder::new("LAYER")
        .graphic_object(pixel(GraphicType::Point, vec![[10.0, 10.0]]))
        .graphic_object(pixel(GraphicType::Interpolated, vec![[1.0, 1.0], [5.0, 9.0], [9.0, 1.0]]))
        .graphic_object(pixel(GraphicType::Polyline, vec![[1.0, 1.0], [5.0, 5.0]]))
        .graphic_object(pixel(GraphicType::Circle, vec![[1.0, 1.0], [4.0, 5.0]]))
        .graphic_object(pixel(
            GraphicType::Ellipse,
            vec![[1.0, 5.0], [21.0, 5.0], [11.0, 1.0], [11.0, 9.0]],
        ))
        .text_object(TextObject::new("note").with_anchor([3.0, 3.0], AnnotationUnits::Pixel))
        .build();

    let ann = decode(&item, &area(), &DecodeOptions::default()).unwrap();
    let kinds: Vec<_> = ann.graphics().iter().map(Graphic::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ShapeKind::Point,
            ShapeKind::Curve,
            ShapeKind::Polyline,
            ShapeKind::Circle,
            ShapeKind::Ellipse,
            ShapeKind::Callout,
        ]
    );
    assert_eq!(ann.layer_id(), "LAYER");
    assert_eq!(ann.coordinate_system(), CoordinateSystem::Destination);
}

#[test]
fn each_object_uses_its_own_units() {
    let item = SequenceItemBuilder::new("L")
        .graphic_object(display(GraphicType::Point, vec![[0.5, 0.5]]))
        .graphic_object(pixel(GraphicType::Point, vec![[0.5, 0.5]]))
        .build();
    let ann = decode(&item, &area(), &DecodeOptions::default()).unwrap();

    let centers: Vec<_> = ann
        .graphics()
        .iter()
        .map(|g| match g.shape() {
            VectorShape::Point(p) => p.center,
            other => panic!("expected point, got {other:?}"),
        })
        .collect();
    assert_eq!(centers, vec![Point::new(256.0, 128.0), Point::new(-0.5, -0.5)]);
}

#[test]
fn polyline_closure() {
    let item = SequenceItemBuilder::new("L")
        .graphic_object(pixel(
            GraphicType::Polyline,
            vec![[1.0, 1.0], [10.0, 1.0], [10.0, 10.0], [1.0, 1.0]],
        ))
        .graphic_object(pixel(GraphicType::Polyline, vec![[1.0, 1.0], [10.0, 1.0], [10.0, 10.0]]))
        .build();
    let ann = decode(&item, &area(), &DecodeOptions::default()).unwrap();

    let closed: Vec<_> = ann
        .graphics()
        .iter()
        .map(|g| match g.shape() {
            VectorShape::Polyline(p) => p.is_closed(),
            other => panic!("expected polyline, got {other:?}"),
        })
        .collect();
    assert_eq!(closed, vec![true, false]);
}

#[test]
fn circle_from_center_and_perimeter_point() {
    let item = SequenceItemBuilder::new("L")
        .graphic_object(pixel(GraphicType::Circle, vec![[1.0, 1.0], [4.0, 5.0]]))
        .build();
    let ann = decode(&item, &area(), &DecodeOptions::default()).unwrap();
    match ann.graphics()[0].shape() {
        VectorShape::Circle(c) => {
            assert_eq!(c.center, Point::new(0.0, 0.0));
            assert_eq!(c.radius, 5.0);
        }
        other => panic!("expected circle, got {other:?}"),
    }
}

#[test]
fn ellipse_axes_match_input_points() {
    let item = SequenceItemBuilder::new("L")
        .graphic_object(pixel(
            GraphicType::Ellipse,
            vec![[11.0, 21.0], [51.0, 21.0], [31.0, 11.0], [31.0, 31.0], [99.0, 99.0]],
        ))
        .build();
    let ann = decode(&item, &area(), &DecodeOptions::default()).unwrap();
    match ann.graphics()[0].shape() {
        VectorShape::Ellipse(e) => {
            assert_eq!(e.major_axis, [Point::new(10.0, 20.0), Point::new(50.0, 20.0)]);
            assert_eq!(e.minor_axis, [Point::new(30.0, 10.0), Point::new(30.0, 30.0)]);
        }
        other => panic!("expected ellipse, got {other:?}"),
    }
}

#[test]
fn malformed_object_is_skipped_and_decoding_continues() {
    init_tracing();
    let item = SequenceItemBuilder::new("L")
        .graphic_object(pixel(GraphicType::Point, vec![]))
        .graphic_object(pixel(GraphicType::Ellipse, vec![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]))
        .graphic_object(pixel(GraphicType::Circle, vec![[1.0, 1.0], [2.0, 1.0]]))
        .build();
    let ann = decode(&item, &area(), &DecodeOptions::default()).unwrap();
    assert_eq!(ann.len(), 1);
    assert_eq!(ann.graphics()[0].kind(), ShapeKind::Circle);
}

#[test]
fn unrecognized_graphic_type_is_ignored() {
    let item = SequenceItemBuilder::new("L")
        .graphic_object(pixel(GraphicType::Other("MULTIPOINT".into()), vec![[1.0, 1.0]]))
        .graphic_object(pixel(GraphicType::Point, vec![[1.0, 1.0]]))
        .build();
    let ann = decode(&item, &area(), &DecodeOptions::default()).unwrap();
    assert_eq!(ann.len(), 1);
}

#[test]
fn unrecognized_graphic_points_still_count_as_bounds() {
    let item = SequenceItemBuilder::new("L")
        .graphic_object(pixel(GraphicType::Other("MULTIPOINT".into()), vec![[101.0, 101.0]]))
        .text_object(TextObject::new("t").with_anchor([1.0, 1.0], AnnotationUnits::Pixel))
        .build();
    let ann = decode(&item, &area(), &DecodeOptions::default()).unwrap();
    match ann.graphics()[0].shape() {
        VectorShape::Callout(c) => {
            assert!(!c.show_arrowhead);
            assert_eq!(c.text_location, Point::new(70.0, 70.0));
        }
        other => panic!("expected callout, got {other:?}"),
    }
}

#[test]
fn failed_objects_do_not_count_as_bounds() {
    let item = SequenceItemBuilder::new("L")
        .graphic_object(pixel(GraphicType::Circle, vec![[50.0, 50.0]]))
        .text_object(TextObject::new("t").with_anchor([41.0, 41.0], AnnotationUnits::Pixel))
        .build();
    let ann = decode(&item, &area(), &DecodeOptions::default()).unwrap();
    assert_eq!(ann.len(), 1);
    match ann.graphics()[0].shape() {
        VectorShape::Callout(c) => {
            assert!(c.show_arrowhead);
            assert_eq!(c.text_location, Point::new(10.0, 10.0));
        }
        other => panic!("expected callout, got {other:?}"),
    }
}

#[test]
fn arrowhead_shown_only_without_graphics() {
    let text = TextObject::new("t").with_anchor([10.0, 10.0], AnnotationUnits::Pixel);

    let alone = SequenceItemBuilder::new("L").text_object(text.clone()).build();
    let with_graphic = SequenceItemBuilder::new("L")
        .graphic_object(pixel(GraphicType::Point, vec![[20.0, 20.0]]))
        .text_object(text)
        .build();

    let arrow = |item: &GraphicAnnotationSequenceItem| {
        let ann = decode(item, &area(), &DecodeOptions::default()).unwrap();
        let last = ann.graphics().last().cloned().unwrap();
        match last.shape() {
            VectorShape::Callout(c) => c.show_arrowhead,
            other => panic!("expected callout, got {other:?}"),
        }
    };
    assert!(arrow(&alone));
    assert!(!arrow(&with_graphic));
}

#[test]
fn text_without_position_aborts_by_default() {
    let item = SequenceItemBuilder::new("L")
        .graphic_object(pixel(GraphicType::Point, vec![[1.0, 1.0]]))
        .text_object(TextObject::new("ok").with_anchor([1.0, 1.0], AnnotationUnits::Pixel))
        .text_object(TextObject::new("nowhere"))
        .build();
    let err = decode(&item, &area(), &DecodeOptions::default()).unwrap_err();
    assert_eq!(err, DecodeError::MissingTextPosition { index: 1 });
    assert!(err.is_structural());
}

#[test]
fn text_without_position_can_be_skipped() {
    init_tracing();
    let item = SequenceItemBuilder::new("L")
        .text_object(TextObject::new("nowhere"))
        .text_object(TextObject::new("label").with_bounding_box(
            [0.0, 0.0],
            [0.5, 0.5],
            AnnotationUnits::Display,
        ))
        .build();
    let options = DecodeOptions::default().with_missing_text(MissingTextPolicy::Skip);
    let ann = decode(&item, &area(), &options).unwrap();
    assert_eq!(ann.len(), 1);
    match ann.graphics()[0].shape() {
        VectorShape::Text(t) => {
            assert_eq!(t.text, "label");
            assert_eq!(t.location, Point::new(128.0, 64.0));
        }
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn non_finite_text_coordinates_skip_only_that_text() {
    let item = SequenceItemBuilder::new("L")
        .text_object(
            TextObject::new("bad").with_anchor([f32::INFINITY, 1.0], AnnotationUnits::Pixel),
        )
        .text_object(TextObject::new("good").with_anchor([1.0, 1.0], AnnotationUnits::Pixel))
        .build();
    let ann = decode(&item, &area(), &DecodeOptions::default()).unwrap();
    assert_eq!(ann.len(), 1);
}

#[test]
fn color_propagates_to_every_graphic() {
    let item = SequenceItemBuilder::new("L")
        .graphic_object(pixel(GraphicType::Point, vec![[1.0, 1.0]]))
        .graphic_object(pixel(GraphicType::Polyline, vec![[1.0, 1.0], [3.0, 3.0]]))
        .text_object(TextObject::new("t").with_anchor([1.0, 1.0], AnnotationUnits::Pixel))
        .build();
    let mut ann = decode(&item, &area(), &DecodeOptions::default().with_editable(true)).unwrap();
    assert_eq!(ann.color(), Color::LEMON_CHIFFON);

    ann.set_color(Color::RED);
    assert_eq!(ann.color(), Color::RED);
    assert!(ann.graphics().iter().all(|g| g.color() == Color::RED));
    match &ann.graphics()[2] {
        Graphic::Stateful(s) => {
            assert_eq!(s.active_color(), Color::RED);
            assert_eq!(s.inactive_color(), Color::RED);
        }
        other => panic!("expected stateful callout, got {other:?}"),
    }

    // Setting the same color again does not touch the graphics
    ann.graphics_mut()[1].set_color(Color::WHITE);
    ann.set_color(Color::RED);
    assert_eq!(ann.graphics()[1].color(), Color::WHITE);
}

#[test]
fn configured_colors_apply_while_decoding() {
    let item = SequenceItemBuilder::new("L")
        .graphic_object(pixel(GraphicType::Point, vec![[1.0, 1.0]]))
        .text_object(TextObject::new("callout").with_anchor([1.0, 1.0], AnnotationUnits::Pixel))
        .text_object(TextObject::new("label").with_bounding_box(
            [1.0, 1.0],
            [9.0, 9.0],
            AnnotationUnits::Pixel,
        ))
        .build();
    let options = DecodeOptions::default()
        .with_color(Color::RED)
        .with_active_color(Color::WHITE);
    let ann = decode(&item, &area(), &options).unwrap();

    assert_eq!(ann.color(), Color::RED);
    assert_eq!(ann.graphics()[0].color(), Color::RED);
    assert_eq!(ann.graphics()[2].color(), Color::RED);

    // Callouts keep the configured active and inactive colors
    match &ann.graphics()[1] {
        Graphic::Stateful(s) => {
            assert_eq!(s.active_color(), Color::WHITE);
            assert_eq!(s.inactive_color(), Color::LEMON_CHIFFON);
            assert_eq!(s.current_color(), Color::LEMON_CHIFFON);
        }
        other => panic!("expected stateful callout, got {other:?}"),
    }
}

#[test]
fn editable_annotation_decorates_graphics() {
    let item = SequenceItemBuilder::new("L")
        .graphic_object(pixel(
            GraphicType::Polyline,
            vec![[1.0, 1.0], [9.0, 1.0], [9.0, 9.0], [1.0, 1.0]],
        ))
        .graphic_object(pixel(GraphicType::Interpolated, vec![[1.0, 1.0], [9.0, 9.0]]))
        .graphic_object(pixel(
            GraphicType::Ellipse,
            vec![[1.0, 5.0], [9.0, 5.0], [5.0, 3.0], [5.0, 7.0]],
        ))
        .text_object(TextObject::new("t").with_anchor([1.0, 1.0], AnnotationUnits::Pixel))
        .build();
    let ann = decode(&item, &area(), &DecodeOptions::default().with_editable(true)).unwrap();

    let handles: Vec<_> = ann.graphics().iter().map(|g| g.handles().to_vec()).collect();
    assert_eq!(
        handles,
        vec![
            vec![ControlHandle::Polygon, ControlHandle::VertexEdit, ControlHandle::Move],
            vec![ControlHandle::VertexEdit, ControlHandle::Move],
            vec![ControlHandle::Stretch, ControlHandle::Move],
            vec![ControlHandle::Move],
        ]
    );

    match &ann.graphics()[3] {
        Graphic::Stateful(s) => assert_eq!(s.state(), InteractionState::Inactive),
        other => panic!("expected stateful callout, got {other:?}"),
    }
}

#[test]
fn empty_item_decodes_to_empty_annotation() {
    let ann = decode(&SequenceItemBuilder::new("L").build(), &area(), &DecodeOptions::default())
        .unwrap();
    assert!(ann.is_empty());
    assert!(ann.bounds().is_empty());
}
