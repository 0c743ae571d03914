//! Diagram items as seen by the render core.
//!
//! A [`DiagramItem`] is owned by the application state; shape plugins only
//! read it. Besides raw appearance access it offers the derived accessors
//! that item-backed property sources resolve to (stroke thickness, font
//! size, ...), each with the documented fallback.

use serde::{Deserialize, Serialize};

use crate::{
    appearance::{Appearance, keys},
    color::Color,
    configurable::Configurable,
    geometry::{Bounds, Matrix, Point, Size},
    identifier::Id,
    style::TextAlignment,
};

/// Font size used when neither the item nor the text config provides one.
pub const DEFAULT_FONT_SIZE: f32 = 10.0;

/// Font family used when neither the item nor the text config provides one.
pub const DEFAULT_FONT_FAMILY: &str = "inherit";

/// Placement of an item: center position, size and rotation in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    position: Point,
    size: Size,
    #[serde(default)]
    rotation: f32,
}

impl Transform {
    pub fn new(position: Point, size: Size, rotation: f32) -> Self {
        Self {
            position,
            size,
            rotation,
        }
    }

    /// The center of the item in diagram space
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// The unrotated bounding rectangle in diagram space
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_center(self.position, self.size)
    }

    /// Matrix mapping item-local coordinates into diagram space.
    ///
    /// Local `(0, 0)` lands on the top-left corner and the rotation turns
    /// around the item's center.
    pub fn matrix(&self) -> Matrix {
        let top_left = self.bounds().min_point();
        let translate = Matrix::translate(top_left.x(), top_left.y());
        if self.rotation == 0.0 {
            return translate;
        }

        let local_center = Point::new(self.size.width() / 2.0, self.size.height() / 2.0);
        translate.multiply(&Matrix::rotate_about(self.rotation, local_center))
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

/// A visual entity of a diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramItem {
    id: Id,
    renderer: Id,
    transform: Transform,
    #[serde(default)]
    appearance: Appearance,
    #[serde(default)]
    configurables: Vec<Configurable>,
}

impl DiagramItem {
    /// Creates an item rendered by the shape plugin named `renderer`.
    pub fn new(id: Id, renderer: Id, transform: Transform, appearance: Appearance) -> Self {
        Self {
            id,
            renderer,
            transform,
            appearance,
            configurables: Vec::new(),
        }
    }

    pub fn with_configurables(mut self, configurables: Vec<Configurable>) -> Self {
        self.configurables = configurables;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Identifier of the shape plugin that renders this item
    pub fn renderer(&self) -> Id {
        self.renderer
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    pub fn configurables(&self) -> &[Configurable] {
        &self.configurables
    }

    pub fn foreground_color(&self) -> Option<Color> {
        self.appearance.color(keys::FOREGROUND_COLOR)
    }

    pub fn background_color(&self) -> Option<Color> {
        self.appearance.color(keys::BACKGROUND_COLOR)
    }

    pub fn stroke_color(&self) -> Option<Color> {
        self.appearance.color(keys::STROKE_COLOR)
    }

    /// Stroke thickness, 0 when unset
    pub fn stroke_thickness(&self) -> f32 {
        self.appearance
            .number(keys::STROKE_THICKNESS)
            .map_or(0.0, |value| value as f32)
    }

    /// Opacity as stored, unvalidated
    pub fn opacity(&self) -> Option<f32> {
        self.appearance
            .number(keys::OPACITY)
            .map(|value| value as f32)
    }

    /// Font size, [`DEFAULT_FONT_SIZE`] when unset or zero
    pub fn font_size(&self) -> f32 {
        match self.appearance.number(keys::FONT_SIZE) {
            Some(size) if size > 0.0 => size as f32,
            _ => DEFAULT_FONT_SIZE,
        }
    }

    /// Font family, [`DEFAULT_FONT_FAMILY`] when unset or empty
    pub fn font_family(&self) -> &str {
        match self.appearance.text(keys::FONT_FAMILY) {
            Some(family) if !family.is_empty() => family,
            _ => DEFAULT_FONT_FAMILY,
        }
    }

    /// Text alignment, centered when unset or unknown
    pub fn text_alignment(&self) -> TextAlignment {
        self.appearance
            .text(keys::TEXT_ALIGNMENT)
            .and_then(|alignment| alignment.parse().ok())
            .unwrap_or_default()
    }

    pub fn text(&self) -> &str {
        self.appearance.text(keys::TEXT).unwrap_or_default()
    }

    pub fn is_text_disabled(&self) -> bool {
        self.appearance.bool(keys::TEXT_DISABLED).unwrap_or(false)
    }
}
