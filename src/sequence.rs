//! Graphic Annotation Sequence item model.
//!
//! These types mirror one item of the Graphic Annotation Sequence (0070,0001)
//! after the data set has been parsed. Values are kept raw: coordinates are
//! still in the units their object declares, and graphic types that this crate
//! does not know are preserved verbatim.

use std::fmt;
use std::str::FromStr;

/// A raw coordinate pair as stored in Graphic Data / anchor / box attributes (FL)
pub type RawPoint = [f32; 2];

/// (0070,0023) Graphic Type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GraphicType {
    Point,
    Polyline,
    Interpolated,
    Circle,
    Ellipse,
    /// Any code string not defined above, kept as found
    Other(String),
}

impl GraphicType {
    pub fn as_str(&self) -> &str {
        match self {
            GraphicType::Point => "POINT",
            GraphicType::Polyline => "POLYLINE",
            GraphicType::Interpolated => "INTERPOLATED",
            GraphicType::Circle => "CIRCLE",
            GraphicType::Ellipse => "ELLIPSE",
            GraphicType::Other(s) => s,
        }
    }

    /// Minimum number of graphic points a well-formed object of this type has
    pub fn min_points(&self) -> usize {
        match self {
            GraphicType::Point => 1,
            GraphicType::Polyline | GraphicType::Interpolated | GraphicType::Circle => 2,
            GraphicType::Ellipse => 4,
            GraphicType::Other(_) => 0,
        }
    }
}

impl FromStr for GraphicType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // CS values are space padded to even length
        Ok(match s.trim() {
            "POINT" => GraphicType::Point,
            "POLYLINE" => GraphicType::Polyline,
            "INTERPOLATED" => GraphicType::Interpolated,
            "CIRCLE" => GraphicType::Circle,
            "ELLIPSE" => GraphicType::Ellipse,
            other => GraphicType::Other(other.to_string()),
        })
    }
}

impl fmt::Display for GraphicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (0070,0005) Graphic Annotation Units and friends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationUnits {
    /// Fractions of the displayed area, 0.0 to 1.0
    Display,
    /// 1-based image pixel coordinates
    Pixel,
}

impl AnnotationUnits {
    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationUnits::Display => "DISPLAY",
            AnnotationUnits::Pixel => "PIXEL",
        }
    }
}

/// Error returned when a units code string is not DISPLAY or PIXEL
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown annotation units: {0:?}")]
pub struct UnknownUnits(pub String);

impl FromStr for AnnotationUnits {
    type Err = UnknownUnits;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "DISPLAY" => Ok(AnnotationUnits::Display),
            "PIXEL" => Ok(AnnotationUnits::Pixel),
            other => Err(UnknownUnits(other.to_string())),
        }
    }
}

impl fmt::Display for AnnotationUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item of the Graphic Object Sequence
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicObject {
    pub graphic_type: GraphicType,
    pub units: AnnotationUnits,
    pub data: Vec<RawPoint>,
}

impl GraphicObject {
    pub fn new(graphic_type: GraphicType, units: AnnotationUnits, data: Vec<RawPoint>) -> Self {
        Self {
            graphic_type,
            units,
            data,
        }
    }
}

impl fmt::Display for GraphicObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "(0070,0005) GraphicAnnotationUnits: {}", self.units)?;
        writeln!(f, "(0070,0020) GraphicDimensions: 2")?;
        writeln!(f, "(0070,0021) NumberOfGraphicPoints: {}", self.data.len())?;
        write!(f, "(0070,0022) GraphicData: [")?;
        for (i, [x, y]) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}, {y}")?;
        }
        writeln!(f, "]")?;
        write!(f, "(0070,0023) GraphicType: {}", self.graphic_type)
    }
}

/// Anchor Point (0070,0014) with its Anchor Point Annotation Units (0070,0004)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    pub point: RawPoint,
    pub units: AnnotationUnits,
}

/// Bounding Box corners (0070,0010)/(0070,0011) with
/// Bounding Box Annotation Units (0070,0003)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub top_left: RawPoint,
    pub bottom_right: RawPoint,
    pub units: AnnotationUnits,
}

/// One item of the Text Object Sequence
#[derive(Debug, Clone, PartialEq)]
pub struct TextObject {
    pub unformatted_text: String,
    pub anchor: Option<AnchorPoint>,
    pub bounding_box: Option<BoundingBox>,
}

impl TextObject {
    pub fn new(unformatted_text: impl Into<String>) -> Self {
        Self {
            unformatted_text: unformatted_text.into(),
            anchor: None,
            bounding_box: None,
        }
    }

    pub fn with_anchor(mut self, point: RawPoint, units: AnnotationUnits) -> Self {
        self.anchor = Some(AnchorPoint { point, units });
        self
    }

    pub fn with_bounding_box(
        mut self,
        top_left: RawPoint,
        bottom_right: RawPoint,
        units: AnnotationUnits,
    ) -> Self {
        self.bounding_box = Some(BoundingBox {
            top_left,
            bottom_right,
            units,
        });
        self
    }
}

impl fmt::Display for TextObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(bbox) = &self.bounding_box {
            writeln!(f, "(0070,0003) BoundingBoxAnnotationUnits: {}", bbox.units)?;
        }
        if let Some(anchor) = &self.anchor {
            writeln!(f, "(0070,0004) AnchorPointAnnotationUnits: {}", anchor.units)?;
        }
        write!(f, "(0070,0006) UnformattedTextValue: {:?}", self.unformatted_text)?;
        if let Some(bbox) = &self.bounding_box {
            let [l, t] = bbox.top_left;
            let [r, b] = bbox.bottom_right;
            write!(f, "\n(0070,0010) BoundingBoxTopLeftHandCorner: [{l}, {t}]")?;
            write!(f, "\n(0070,0011) BoundingBoxBottomRightHandCorner: [{r}, {b}]")?;
        }
        if let Some(anchor) = &self.anchor {
            let [x, y] = anchor.point;
            write!(f, "\n(0070,0014) AnchorPoint: [{x}, {y}]")?;
        }
        Ok(())
    }
}

/// One item of the Graphic Annotation Sequence
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphicAnnotationSequenceItem {
    pub layer: String,
    pub graphic_objects: Vec<GraphicObject>,
    pub text_objects: Vec<TextObject>,
}

impl GraphicAnnotationSequenceItem {
    pub fn new(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.graphic_objects.is_empty() && self.text_objects.is_empty()
    }
}

/// Accumulates graphic and text objects into a sequence item.
///
/// This is the sink the serializer writes into; callers can also use it to
/// assemble items by hand.
#[derive(Debug, Clone, Default)]
pub struct SequenceItemBuilder {
    item: GraphicAnnotationSequenceItem,
}

impl SequenceItemBuilder {
    pub fn new(layer: impl Into<String>) -> Self {
        Self {
            item: GraphicAnnotationSequenceItem::new(layer),
        }
    }

    pub fn add_graphic_object(&mut self, object: GraphicObject) -> &mut Self {
        self.item.graphic_objects.push(object);
        self
    }

    pub fn add_text_object(&mut self, object: TextObject) -> &mut Self {
        self.item.text_objects.push(object);
        self
    }

    pub fn graphic_object(mut self, object: GraphicObject) -> Self {
        self.add_graphic_object(object);
        self
    }

    pub fn text_object(mut self, object: TextObject) -> Self {
        self.add_text_object(object);
        self
    }

    pub fn build(self) -> GraphicAnnotationSequenceItem {
        self.item
    }
}
