//! Serialization of decoded annotations back into sequence items.
//!
//! Every graphic writes its own representation; the serializer only walks the
//! top-level graphics in order.

use crate::graphics::DicomGraphicAnnotation;
use crate::sequence::{GraphicAnnotationSequenceItem, SequenceItemBuilder};

/// Writes annotations into Graphic Annotation Sequence items
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationSerializer;

impl AnnotationSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Append every graphic of `annotation` to `builder`
    pub fn encode_into(
        &self,
        annotation: &DicomGraphicAnnotation,
        builder: &mut SequenceItemBuilder,
    ) {
        for graphic in annotation.graphics() {
            graphic.encode(builder);
        }
        crate::log::debug!(
            layer = annotation.layer_id(),
            graphics = annotation.len(),
            "encoded graphic annotation"
        );
    }

    /// Encode `annotation` into a new item on its own layer
    pub fn encode(&self, annotation: &DicomGraphicAnnotation) -> GraphicAnnotationSequenceItem {
        let mut builder = SequenceItemBuilder::new(annotation.layer_id());
        self.encode_into(annotation, &mut builder);
        builder.build()
    }
}
