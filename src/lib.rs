//! Decode and encode DICOM Graphic Annotation Sequence items.
//!
//! A presentation state describes overlay graphics as items of the Graphic
//! Annotation Sequence (0070,0001): graphic objects (points, polylines,
//! interpolated curves, circles, ellipses) and text objects, each addressed
//! either in fractions of the displayed area or in 1-based image pixels.
//! This crate turns such an item into a [`DicomGraphicAnnotation`] whose
//! graphics live in 0-based image coordinates, and writes annotations back.
//!
//! ```
//! use dicom_graphic_annotation::{
//!     AnnotationUnits, DecodeOptions, DisplayedArea, GraphicObject, GraphicType,
//!     SequenceItemBuilder, decode,
//! };
//!
//! let item = SequenceItemBuilder::new("MEASUREMENTS")
//!     .graphic_object(GraphicObject::new(
//!         GraphicType::Circle,
//!         AnnotationUnits::Pixel,
//!         vec![[11.0, 11.0], [14.0, 15.0]],
//!     ))
//!     .build();
//!
//! let area = DisplayedArea::whole_image(512, 512);
//! let annotation = decode(&item, &area, &DecodeOptions::default()).unwrap();
//! assert_eq!(annotation.len(), 1);
//! ```

pub mod coords;
pub mod decode;
pub mod encode;
pub mod errors;
pub mod graphics;
pub mod log;
pub mod sequence;
pub mod types;

pub use coords::{DisplayedArea, resolve_source_point};
pub use decode::{AnnotationDecoder, DecodeOptions, DecodedGraphic, MissingTextPolicy};
pub use encode::AnnotationSerializer;
pub use errors::DecodeError;
pub use graphics::{
    CoordinateSystem, DicomGraphicAnnotation, Graphic, InteractionState, Shape, ShapeKind,
    VectorShape,
};
pub use sequence::{
    AnnotationUnits, GraphicAnnotationSequenceItem, GraphicObject, GraphicType,
    SequenceItemBuilder, TextObject,
};
pub use types::{Color, Point, Rect, Size};

/// Decode one Graphic Annotation Sequence item.
///
/// Malformed graphic and text objects are logged and left out. An error is
/// only returned for a text object without anchor point or bounding box, and
/// only under [`MissingTextPolicy::Abort`].
pub fn decode(
    item: &GraphicAnnotationSequenceItem,
    area: &DisplayedArea,
    options: &DecodeOptions,
) -> Result<DicomGraphicAnnotation, DecodeError> {
    DicomGraphicAnnotation::from_sequence_item(item, area, options)
}

/// Encode an annotation into a Graphic Annotation Sequence item
pub fn encode(annotation: &DicomGraphicAnnotation) -> GraphicAnnotationSequenceItem {
    AnnotationSerializer::new().encode(annotation)
}
