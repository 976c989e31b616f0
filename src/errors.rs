//! Error types for annotation decoding.
//!
//! Most variants describe a fault in a single graphic or text object and are
//! contained by the decoder: the object is logged and skipped. Only
//! [`DecodeError::MissingTextPosition`] is structural, and whether it escapes
//! the decode call is decided by [`crate::MissingTextPolicy`].

use miette::Diagnostic;
use thiserror::Error;

use crate::sequence::GraphicType;
use crate::types::NumericError;

/// Which part of a text object a coordinate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    AnchorPoint,
    BoundingBoxTopLeft,
    BoundingBoxBottomRight,
}

impl std::fmt::Display for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TextField::AnchorPoint => "anchor point",
            TextField::BoundingBoxTopLeft => "bounding box top-left corner",
            TextField::BoundingBoxBottomRight => "bounding box bottom-right corner",
        })
    }
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("{graphic_type} graphic requires at least {required} point(s), found {found}")]
    #[diagnostic(code(dicom_graphic_annotation::graphic::insufficient_points))]
    InsufficientPoints {
        graphic_type: GraphicType,
        required: usize,
        found: usize,
    },

    #[error("{graphic_type} graphic has an invalid coordinate at point {index}: {reason}")]
    #[diagnostic(
        code(dicom_graphic_annotation::graphic::non_finite_coordinate),
        help("graphic data must resolve to finite image coordinates")
    )]
    NonFiniteCoordinate {
        graphic_type: GraphicType,
        index: usize,
        reason: NumericError,
    },

    #[error("text object has an invalid {field}: {reason}")]
    #[diagnostic(code(dicom_graphic_annotation::text::non_finite_coordinate))]
    NonFiniteTextCoordinate {
        field: TextField,
        reason: NumericError,
    },

    #[error("text object {index} has neither an anchor point nor a bounding box")]
    #[diagnostic(
        code(dicom_graphic_annotation::text::missing_position),
        help("a text object must carry an anchor point, a bounding box, or both")
    )]
    MissingTextPosition { index: usize },
}

impl DecodeError {
    /// Whether this fault violates the structure of the annotation as a whole
    /// rather than describing a single malformed object.
    pub fn is_structural(&self) -> bool {
        matches!(self, DecodeError::MissingTextPosition { .. })
    }
}
