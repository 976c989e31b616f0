//! The decoded annotation: an ordered list of primitives on one layer.

use std::ops::Deref;

use crate::encode::AnnotationSerializer;
use crate::sequence::GraphicAnnotationSequenceItem;
use crate::types::{Color, Rect};

use super::Graphic;
use super::defaults;

/// Addressing convention the annotation's geometry is being handled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSystem {
    /// Image pixel space, which is what decoded geometry is expressed in
    Source,
    /// Screen space of whatever view is showing the annotation
    #[default]
    Destination,
}

/// Graphics decoded from one Graphic Annotation Sequence item
#[derive(Debug, Clone, PartialEq)]
pub struct DicomGraphicAnnotation {
    layer_id: String,
    graphics: Vec<Graphic>,
    color: Color,
    coordinate_system: CoordinateSystem,
}

impl DicomGraphicAnnotation {
    /// An empty annotation on `layer_id`
    pub fn new(layer_id: impl Into<String>) -> Self {
        Self {
            layer_id: layer_id.into(),
            graphics: Vec::new(),
            color: defaults::ANNOTATION_COLOR,
            coordinate_system: CoordinateSystem::default(),
        }
    }

    /// An empty annotation on `layer_id` drawn in `color`
    pub fn with_color(layer_id: impl Into<String>, color: Color) -> Self {
        Self {
            color,
            ..Self::new(layer_id)
        }
    }

    pub fn layer_id(&self) -> &str {
        &self.layer_id
    }

    pub fn graphics(&self) -> &[Graphic] {
        &self.graphics
    }

    /// Mutable access for editing layers; adding graphics goes through
    /// [`DicomGraphicAnnotation::source_coordinates`]
    pub fn graphics_mut(&mut self) -> &mut [Graphic] {
        &mut self.graphics
    }

    pub fn len(&self) -> usize {
        self.graphics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphics.is_empty()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the color of the annotation and of every graphic in it.
    ///
    /// Does nothing when `color` is already the annotation's color.
    pub fn set_color(&mut self, color: Color) {
        if self.color == color {
            return;
        }
        self.color = color;
        for graphic in &mut self.graphics {
            graphic.set_color(color);
        }
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }

    /// Switch to source coordinates until the returned guard is dropped
    pub fn source_coordinates(&mut self) -> SourceCoordinates<'_> {
        let previous = self.coordinate_system;
        self.coordinate_system = CoordinateSystem::Source;
        SourceCoordinates {
            annotation: self,
            previous,
        }
    }

    /// Union of the bounds of every graphic
    pub fn bounds(&self) -> Rect {
        let mut rect = Rect::new();
        for graphic in &self.graphics {
            rect.expand_rect(&graphic.bounds());
        }
        rect
    }

    /// Serialize back into a sequence item on the same layer
    pub fn to_sequence_item(&self) -> GraphicAnnotationSequenceItem {
        AnnotationSerializer::new().encode(self)
    }
}

/// Scope in which an annotation is addressed in source coordinates.
///
/// Graphics can only be added while a scope is held. Dropping it restores the
/// previous coordinate system, including on early returns.
pub struct SourceCoordinates<'a> {
    annotation: &'a mut DicomGraphicAnnotation,
    previous: CoordinateSystem,
}

impl SourceCoordinates<'_> {
    pub fn push(&mut self, graphic: Graphic) {
        self.annotation.graphics.push(graphic);
    }
}

impl Deref for SourceCoordinates<'_> {
    type Target = DicomGraphicAnnotation;

    fn deref(&self) -> &Self::Target {
        self.annotation
    }
}

impl Drop for SourceCoordinates<'_> {
    fn drop(&mut self) {
        self.annotation.coordinate_system = self.previous;
    }
}
