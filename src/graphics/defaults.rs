//! Default sizes and colors (all lengths in source pixels)

use crate::types::{Color, Offset};

/// Color of a freshly decoded annotation
pub const ANNOTATION_COLOR: Color = Color::LEMON_CHIFFON;
/// Color stateful graphics show while inactive
pub const INACTIVE_COLOR: Color = Color::LEMON_CHIFFON;
/// Color stateful graphics show while focused or selected
pub const ACTIVE_COLOR: Color = Color::YELLOW;

/// Half the side length of a POINT marker
pub const POINT_HALF_SIZE: f64 = 4.0;
/// Callout text offset from the annotation bounds (or the anchor) when no box is given
pub const CALLOUT_TEXT_OFFSET: Offset = Offset::new(30.0, 30.0);
/// Tolerance for deciding that a polyline ends where it starts
pub const POINT_TOLERANCE: f64 = 1e-4;

/// Character cell used to estimate the box a text object occupies
pub const TEXT_CHAR_WIDTH: f64 = 7.0;
pub const TEXT_LINE_HEIGHT: f64 = 14.0;
