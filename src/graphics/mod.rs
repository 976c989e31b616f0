//! Drawable primitives produced by decoding
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and colors
//! - `shapes`: The concrete vector shapes and the `Shape` trait
//! - `controls`: Editing handles attached to shapes of editable annotations
//! - `stateful`: Wrapper switching color with interaction state
//! - `annotation`: The decoded annotation that owns the primitives

pub mod annotation;
pub mod controls;
pub mod defaults;
pub mod shapes;
pub mod stateful;

pub use annotation::{CoordinateSystem, DicomGraphicAnnotation, SourceCoordinates};
pub use controls::{ControlGraphic, ControlHandle};
pub use shapes::{
    CalloutShape, CircleShape, CurveShape, EllipseShape, PointShape, PolylineShape, Shape,
    ShapeKind, TextShape, VectorShape,
};
pub use stateful::{InteractionState, StatefulGraphic};

use crate::sequence::SequenceItemBuilder;
use crate::types::{Color, Rect};

/// One top-level primitive of a decoded annotation
#[derive(Debug, Clone, PartialEq)]
pub enum Graphic {
    /// A bare shape
    Vector(VectorShape),
    /// A shape with editing handles
    Controlled(ControlGraphic),
    /// A graphic whose color follows its interaction state
    Stateful(StatefulGraphic),
}

impl Graphic {
    /// Plain shape, or a shape decorated with editing handles when `editable`
    pub fn from_shape(shape: VectorShape, editable: bool) -> Self {
        if editable {
            Graphic::Controlled(ControlGraphic::decorate(shape))
        } else {
            Graphic::Vector(shape)
        }
    }

    /// The shape at the bottom of any decoration
    pub fn shape(&self) -> &VectorShape {
        match self {
            Graphic::Vector(shape) => shape,
            Graphic::Controlled(control) => control.subject(),
            Graphic::Stateful(stateful) => stateful.subject().shape(),
        }
    }

    pub fn shape_mut(&mut self) -> &mut VectorShape {
        match self {
            Graphic::Vector(shape) => shape,
            Graphic::Controlled(control) => control.subject_mut(),
            Graphic::Stateful(stateful) => stateful.subject_mut().shape_mut(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape().kind()
    }

    /// Color currently shown
    pub fn color(&self) -> Color {
        self.shape().color()
    }

    /// Set the color; stateful graphics take it as both active and inactive color
    pub fn set_color(&mut self, color: Color) {
        match self {
            Graphic::Vector(shape) => shape.set_color(color),
            Graphic::Controlled(control) => control.set_color(color),
            Graphic::Stateful(stateful) => stateful.set_active_and_inactive_color(color),
        }
    }

    /// Editing handles of the outermost control decoration, if any
    pub fn handles(&self) -> &[ControlHandle] {
        match self {
            Graphic::Vector(_) => &[],
            Graphic::Controlled(control) => control.handles(),
            Graphic::Stateful(stateful) => stateful.subject().handles(),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.shape().bounds()
    }

    /// Append this graphic's sequence representation to `builder`.
    /// Decorations carry no encoded state; only the shape is written.
    pub fn encode(&self, builder: &mut SequenceItemBuilder) {
        self.shape().encode(builder);
    }
}

impl From<VectorShape> for Graphic {
    fn from(shape: VectorShape) -> Self {
        Graphic::Vector(shape)
    }
}
