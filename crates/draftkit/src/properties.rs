//! Visual properties and their change-tracking.
//!
//! Every primitive call stages its visual state in a short-lived
//! [`Properties`] value. Committing it through a [`ChangeTracker`] compares
//! each property with the snapshot stored on the node by the previous commit
//! and writes only the properties that changed. Re-rendering an unchanged
//! item therefore touches nothing.
//!
//! # Commit order
//!
//! Properties are committed in the fixed order of [`Property::ALL`]. The
//! transform comes last so that placement is written after every other
//! attribute of the node.
//!
//! A path is placed by a matrix that fits the box around its data into the
//! committed transform. The matrix follows both the data and the transform,
//! and is only rewritten when it changes.
//!
//! # Typed properties
//!
//! [`Properties`] is parameterized by a primitive kind marker from [`kind`].
//! Setters exist only where they mean something: a corner radius only on
//! rectangles, path data only on paths, fonts and text only on text. Staging
//! a radius on a path does not compile.
//!
//! # Sources
//!
//! Many setters accept a [`Source`]: either a raw value or a
//! [`DiagramItem`], in which case the value is read from the item's
//! appearance (its background color for a fill, its stroke thickness for a
//! stroke width, and so on).

use std::marker::PhantomData;

use log::{trace, warn};

use draftkit_core::{
    color::Color,
    geometry::{Bounds, Matrix},
    item::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DiagramItem},
    path::path_bounds,
    style::{StrokeCap, StrokeJoin, TextAlignment, VerticalAlignment},
};

use crate::scene::{NodeId, NodeKind, Scene};

/// The visual properties, in commit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Color,
    Fill,
    FontFamily,
    FontSize,
    Image,
    Opacity,
    Radius,
    Stroke,
    StrokeCap,
    StrokeLineJoin,
    StrokeWidth,
    Path,
    Text,
    TextAlignment,
    VerticalAlignment,
    Transform,
}

impl Property {
    /// Every property in commit order; [`Property::Transform`] is last.
    pub const ALL: [Property; 16] = [
        Property::Color,
        Property::Fill,
        Property::FontFamily,
        Property::FontSize,
        Property::Image,
        Property::Opacity,
        Property::Radius,
        Property::Stroke,
        Property::StrokeCap,
        Property::StrokeLineJoin,
        Property::StrokeWidth,
        Property::Path,
        Property::Text,
        Property::TextAlignment,
        Property::VerticalAlignment,
        Property::Transform,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Fill => "fill",
            Self::FontFamily => "font-family",
            Self::FontSize => "font-size",
            Self::Image => "image",
            Self::Opacity => "opacity",
            Self::Radius => "radius",
            Self::Stroke => "stroke",
            Self::StrokeCap => "stroke-cap",
            Self::StrokeLineJoin => "stroke-line-join",
            Self::StrokeWidth => "stroke-width",
            Self::Path => "path",
            Self::Text => "text",
            Self::TextAlignment => "text-alignment",
            Self::VerticalAlignment => "vertical-alignment",
            Self::Transform => "transform",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Properties whose absence keeps the value committed before.
    ///
    /// A missing opacity (never staged, or rejected as non-finite) and a
    /// missing transform leave the node as it is.
    fn is_sticky(self) -> bool {
        matches!(self, Self::Opacity | Self::Transform)
    }
}

/// A staged property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Color(Color),
    Number(f32),
    Text(String),
    Cap(StrokeCap),
    Join(StrokeJoin),
    Alignment(TextAlignment),
    VerticalAlignment(VerticalAlignment),
    Transform(Bounds),
}

/// One optional value per [`Property`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    values: [Option<PropertyValue>; 16],
}

impl PropertySet {
    pub fn get(&self, property: Property) -> Option<&PropertyValue> {
        self.values[property.index()].as_ref()
    }

    pub fn set(&mut self, property: Property, value: Option<PropertyValue>) {
        self.values[property.index()] = value;
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Set properties in commit order
    pub fn iter(&self) -> impl Iterator<Item = (Property, &PropertyValue)> {
        Property::ALL
            .into_iter()
            .filter_map(|property| self.get(property).map(|value| (property, value)))
    }
}

/// Text parameters of a text primitive that is not driven by an item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextConfig {
    pub text: String,
    pub font_size: Option<f32>,
    pub alignment: Option<TextAlignment>,
}

impl TextConfig {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// The font size, [`DEFAULT_FONT_SIZE`] when unset or not positive
    pub fn font_size(&self) -> f32 {
        self.font_size
            .filter(|size| *size > 0.0)
            .unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn alignment(&self) -> TextAlignment {
        self.alignment.unwrap_or_default()
    }
}

/// A setter argument: a raw value or an item whose appearance provides it.
#[derive(Debug, Clone)]
pub enum Source<'a, T> {
    Value(T),
    Item(&'a DiagramItem),
}

impl<'a, T> From<&'a DiagramItem> for Source<'a, T> {
    fn from(item: &'a DiagramItem) -> Self {
        Self::Item(item)
    }
}

impl From<f32> for Source<'_, f32> {
    fn from(value: f32) -> Self {
        Self::Value(value)
    }
}

impl From<Color> for Source<'_, Color> {
    fn from(value: Color) -> Self {
        Self::Value(value)
    }
}

impl From<TextAlignment> for Source<'_, TextAlignment> {
    fn from(value: TextAlignment) -> Self {
        Self::Value(value)
    }
}

impl From<TextConfig> for Source<'_, TextConfig> {
    fn from(value: TextConfig) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Source<'_, String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for Source<'_, String> {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

/// Primitive kind markers for [`Properties`].
pub mod kind {
    use crate::scene::NodeKind;

    /// A primitive kind and the scene node kind it is backed by.
    pub trait PrimitiveKind {
        const NODE: NodeKind;
    }

    /// Kinds that accept stroke properties.
    pub trait Stroked: PrimitiveKind {}

    #[derive(Debug)]
    pub struct Rect;
    #[derive(Debug)]
    pub struct Ellipse;
    #[derive(Debug)]
    pub struct Path;
    #[derive(Debug)]
    pub struct Text;
    #[derive(Debug)]
    pub struct Image;
    #[derive(Debug)]
    pub struct Group;

    impl PrimitiveKind for Rect {
        const NODE: NodeKind = NodeKind::Rect;
    }
    impl PrimitiveKind for Ellipse {
        const NODE: NodeKind = NodeKind::Ellipse;
    }
    impl PrimitiveKind for Path {
        const NODE: NodeKind = NodeKind::Path;
    }
    impl PrimitiveKind for Text {
        const NODE: NodeKind = NodeKind::Text;
    }
    impl PrimitiveKind for Image {
        const NODE: NodeKind = NodeKind::Image;
    }
    impl PrimitiveKind for Group {
        const NODE: NodeKind = NodeKind::Group;
    }

    impl Stroked for Rect {}
    impl Stroked for Ellipse {}
    impl Stroked for Path {}
}

use kind::{PrimitiveKind, Stroked};

/// Staged properties of one primitive call.
#[derive(Debug)]
pub struct Properties<K> {
    pending: PropertySet,
    _kind: PhantomData<K>,
}

impl<K: PrimitiveKind> Default for Properties<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PrimitiveKind> Properties<K> {
    pub fn new() -> Self {
        Self {
            pending: PropertySet::default(),
            _kind: PhantomData,
        }
    }

    pub fn pending(&self) -> &PropertySet {
        &self.pending
    }

    pub fn into_pending(self) -> PropertySet {
        self.pending
    }

    fn stage(&mut self, property: Property, value: Option<PropertyValue>) -> &mut Self {
        self.pending.set(property, value);
        self
    }

    fn stage_color<'a>(
        &mut self,
        property: Property,
        source: Source<'a, Color>,
        from_item: fn(&DiagramItem) -> Option<Color>,
    ) -> &mut Self {
        let color = match source {
            Source::Value(color) => Some(color),
            Source::Item(item) => from_item(item),
        };
        self.stage(property, color.map(PropertyValue::Color))
    }

    /// Text color; items provide their foreground color.
    pub fn set_foreground_color<'a>(&mut self, color: impl Into<Source<'a, Color>>) -> &mut Self {
        self.stage_color(Property::Color, color.into(), DiagramItem::foreground_color)
    }

    /// Fill color; items provide their background color.
    pub fn set_fill<'a>(&mut self, color: impl Into<Source<'a, Color>>) -> &mut Self {
        self.stage_color(Property::Fill, color.into(), DiagramItem::background_color)
    }

    /// Opacity; non-finite values are ignored and the previous opacity stays.
    pub fn set_opacity<'a>(&mut self, opacity: impl Into<Source<'a, f32>>) -> &mut Self {
        let opacity = match opacity.into() {
            Source::Value(opacity) => Some(opacity),
            Source::Item(item) => item.opacity(),
        };
        match opacity {
            Some(opacity) if opacity.is_finite() => {
                self.stage(Property::Opacity, Some(PropertyValue::Number(opacity)))
            }
            _ => self,
        }
    }

    /// Placement of the primitive; `None` leaves the current placement.
    pub fn set_transform(&mut self, bounds: impl Into<Option<Bounds>>) -> &mut Self {
        let bounds = bounds.into();
        self.stage(Property::Transform, bounds.map(PropertyValue::Transform))
    }
}

impl<K: Stroked> Properties<K> {
    /// Stroke color; items provide their stroke color.
    pub fn set_stroke_color<'a>(&mut self, color: impl Into<Source<'a, Color>>) -> &mut Self {
        self.stage_color(Property::Stroke, color.into(), DiagramItem::stroke_color)
    }

    /// Stroke width; items provide their stroke thickness.
    pub fn set_stroke_width<'a>(&mut self, width: impl Into<Source<'a, f32>>) -> &mut Self {
        let width = match width.into() {
            Source::Value(width) => width,
            Source::Item(item) => item.stroke_thickness(),
        };
        self.stage(Property::StrokeWidth, Some(PropertyValue::Number(width)))
    }

    pub fn set_stroke_style(&mut self, cap: StrokeCap, join: StrokeJoin) -> &mut Self {
        self.stage(Property::StrokeCap, Some(PropertyValue::Cap(cap)));
        self.stage(Property::StrokeLineJoin, Some(PropertyValue::Join(join)))
    }
}

impl Properties<kind::Rect> {
    /// Corner radius of a rectangle
    pub fn set_radius(&mut self, radius: f32) -> &mut Self {
        self.stage(Property::Radius, Some(PropertyValue::Number(radius)))
    }
}

impl Properties<kind::Path> {
    /// SVG path data
    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.stage(Property::Path, Some(PropertyValue::Text(path.into())))
    }
}

impl Properties<kind::Image> {
    /// Raster source URL
    pub fn set_image(&mut self, source: impl Into<String>) -> &mut Self {
        self.stage(Property::Image, Some(PropertyValue::Text(source.into())))
    }
}

impl Properties<kind::Text> {
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.stage(Property::Text, Some(PropertyValue::Text(text.into())))
    }

    /// Font size; items provide their font size, text configs theirs.
    pub fn set_font_size<'a>(&mut self, size: impl Into<Source<'a, f32>>) -> &mut Self {
        let size = match size.into() {
            Source::Value(size) if size > 0.0 => size,
            Source::Value(_) => DEFAULT_FONT_SIZE,
            Source::Item(item) => item.font_size(),
        };
        self.stage(Property::FontSize, Some(PropertyValue::Number(size)))
    }

    /// Font family; an empty name falls back to [`DEFAULT_FONT_FAMILY`].
    pub fn set_font_family<'a>(&mut self, family: impl Into<Source<'a, String>>) -> &mut Self {
        let family = match family.into() {
            Source::Value(family) if !family.is_empty() => family,
            Source::Value(_) => DEFAULT_FONT_FAMILY.to_string(),
            Source::Item(item) => item.font_family().to_string(),
        };
        self.stage(Property::FontFamily, Some(PropertyValue::Text(family)))
    }

    pub fn set_text_alignment<'a>(
        &mut self,
        alignment: impl Into<Source<'a, TextAlignment>>,
    ) -> &mut Self {
        let alignment = match alignment.into() {
            Source::Value(alignment) => alignment,
            Source::Item(item) => item.text_alignment(),
        };
        self.stage(Property::TextAlignment, Some(PropertyValue::Alignment(alignment)))
    }

    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) -> &mut Self {
        self.stage(
            Property::VerticalAlignment,
            Some(PropertyValue::VerticalAlignment(alignment)),
        )
    }
}

/// Diffs staged properties against a node's stored snapshot.
pub struct ChangeTracker<'s> {
    scene: &'s mut Scene,
    node: NodeId,
    kind: Option<NodeKind>,
    previous: PropertySet,
}

impl<'s> ChangeTracker<'s> {
    /// Loads the snapshot stored on `node`; empty for a fresh node.
    pub fn begin(scene: &'s mut Scene, node: NodeId) -> Self {
        let previous = scene.properties(node).cloned().unwrap_or_default();
        let kind = scene.kind(node);
        Self {
            scene,
            node,
            kind,
            previous,
        }
    }

    /// Writes every changed property in commit order and stores the new
    /// snapshot. Returns the number of properties written.
    pub fn commit(self, pending: PropertySet) -> usize {
        let Self {
            scene,
            node,
            kind,
            previous,
        } = self;
        let Some(kind) = kind else {
            return 0;
        };

        let mut next = pending;
        let mut written = 0;
        for property in Property::ALL {
            if property.is_sticky() && next.get(property).is_none() {
                next.set(property, previous.get(property).cloned());
                continue;
            }

            let value = next.get(property);
            if value == previous.get(property) {
                continue;
            }

            apply(scene, node, kind, property, value);
            written += 1;
        }

        if kind == NodeKind::Path {
            let placement = path_placement(&next);
            if scene.matrix(node) != placement {
                scene.set_matrix(node, placement);
                written += 1;
            }
        }

        trace!(node:%, kind:%, written; "Committed properties");
        scene.store_properties(node, next);
        written
    }
}

/// Maps the box around the staged path data onto the staged transform.
fn path_placement(properties: &PropertySet) -> Matrix {
    let (Some(PropertyValue::Text(d)), Some(PropertyValue::Transform(bounds))) = (
        properties.get(Property::Path),
        properties.get(Property::Transform),
    ) else {
        return Matrix::IDENTITY;
    };
    match path_bounds(d) {
        Ok(natural) => Matrix::fit(natural, *bounds),
        Err(err) => {
            warn!(err:%; "Leaving unparsable path data unplaced");
            Matrix::IDENTITY
        }
    }
}

fn apply(
    scene: &mut Scene,
    node: NodeId,
    kind: NodeKind,
    property: Property,
    value: Option<&PropertyValue>,
) {
    let text = |value: Option<&PropertyValue>| -> Option<String> {
        value.map(|value| match value {
            PropertyValue::Color(color) => color.to_string(),
            PropertyValue::Number(number) => number.to_string(),
            PropertyValue::Text(text) => text.clone(),
            PropertyValue::Cap(cap) => cap.to_svg_value().to_string(),
            PropertyValue::Join(join) => join.to_svg_value().to_string(),
            PropertyValue::Alignment(alignment) => alignment.to_svg_value().to_string(),
            PropertyValue::VerticalAlignment(alignment) => alignment.to_svg_value().to_string(),
            PropertyValue::Transform(bounds) => format!(
                "{},{},{},{}",
                bounds.x(),
                bounds.y(),
                bounds.width(),
                bounds.height()
            ),
        })
    };

    match property {
        Property::Color => scene.set_attribute(node, "color", text(value)),
        Property::Fill => scene.set_attribute(node, "fill", text(value)),
        Property::Image => scene.set_attribute(node, "href", text(value)),
        Property::Opacity => scene.set_attribute(node, "opacity", text(value)),
        Property::Stroke => scene.set_attribute(node, "stroke", text(value)),
        Property::StrokeCap => scene.set_attribute(node, "stroke-linecap", text(value)),
        Property::StrokeLineJoin => scene.set_attribute(node, "stroke-linejoin", text(value)),
        Property::StrokeWidth => scene.set_attribute(node, "stroke-width", text(value)),
        Property::Path => scene.set_attribute(node, "d", text(value)),
        Property::Radius => {
            let radius = text(value);
            scene.set_attribute(node, "rx", radius.clone());
            scene.set_attribute(node, "ry", radius);
        }
        Property::FontFamily => scene.set_text_style(node, "font-family", text(value)),
        Property::FontSize => scene.set_text_style(
            node,
            "font-size",
            text(value).map(|size| format!("{size}px")),
        ),
        Property::TextAlignment => scene.set_text_style(node, "text-align", text(value)),
        Property::VerticalAlignment => scene.set_text_style(node, "vertical-align", text(value)),
        Property::Text => scene.set_text_content(node, &text(value).unwrap_or_default()),
        Property::Transform => {
            if let Some(PropertyValue::Transform(bounds)) = value {
                apply_transform(scene, node, kind, *bounds);
            }
        }
    }
}

fn apply_transform(scene: &mut Scene, node: NodeId, kind: NodeKind, bounds: Bounds) {
    match kind {
        NodeKind::Rect | NodeKind::Text | NodeKind::Image => {
            scene.set_attribute(node, "x", Some(bounds.x().to_string()));
            scene.set_attribute(node, "y", Some(bounds.y().to_string()));
            scene.set_attribute(node, "width", Some(bounds.width().to_string()));
            scene.set_attribute(node, "height", Some(bounds.height().to_string()));
        }
        NodeKind::Ellipse => {
            let center = bounds.center();
            scene.set_attribute(node, "cx", Some(center.x().to_string()));
            scene.set_attribute(node, "cy", Some(center.y().to_string()));
            scene.set_attribute(node, "rx", Some((bounds.width() / 2.0).to_string()));
            scene.set_attribute(node, "ry", Some((bounds.height() / 2.0).to_string()));
        }
        // Placed by `path_placement` once the data is known
        NodeKind::Path => {}
        NodeKind::Group => {
            scene.set_matrix(node, Matrix::translate(bounds.x(), bounds.y()));
        }
    }
}

#[cfg(test)]
mod tests {
    use draftkit_core::{
        appearance::{Appearance, keys},
        geometry::{Point, Size},
        identifier::Id,
        item::Transform,
    };

    use super::*;
    use crate::scene::Mutation;

    fn item(appearance: Appearance) -> DiagramItem {
        DiagramItem::new(
            Id::new("item-props"),
            Id::new("Rectangle"),
            Transform::new(Point::new(50.0, 50.0), Size::new(100.0, 100.0), 0.0),
            appearance,
        )
    }

    fn commit<K: PrimitiveKind>(
        scene: &mut Scene,
        node: NodeId,
        configure: impl FnOnce(&mut Properties<K>),
    ) -> usize {
        let mut properties = Properties::<K>::new();
        configure(&mut properties);
        ChangeTracker::begin(scene, node).commit(properties.into_pending())
    }

    #[test]
    fn test_property_order_ends_with_transform() {
        assert_eq!(Property::ALL.last(), Some(&Property::Transform));
        assert_eq!(Property::ALL[0], Property::Color);
        for (index, property) in Property::ALL.iter().enumerate() {
            assert_eq!(property.index(), index);
        }
    }

    #[test]
    fn test_commit_writes_once() {
        let mut scene = Scene::new();
        let node = scene.create(NodeKind::Rect);
        let red = Color::new("red").unwrap();

        let first = commit::<kind::Rect>(&mut scene, node, |p| {
            p.set_fill(red).set_stroke_width(2.0_f32).set_radius(4.0);
        });
        assert_eq!(first, 3);
        assert_eq!(scene.attribute(node, "fill"), Some(red.to_string().as_str()));
        assert_eq!(scene.attribute(node, "rx"), Some("4"));

        let before = scene.stats();
        let second = commit::<kind::Rect>(&mut scene, node, |p| {
            p.set_fill(red).set_stroke_width(2.0_f32).set_radius(4.0);
        });
        assert_eq!(second, 0);
        assert_eq!(scene.stats().since(&before).attribute_writes, 0);
    }

    #[test]
    fn test_unstaged_property_is_removed() {
        let mut scene = Scene::new();
        let node = scene.create(NodeKind::Rect);

        let blue = Color::new("blue").unwrap();

        commit::<kind::Rect>(&mut scene, node, |p| {
            p.set_stroke_color(blue);
        });
        assert_eq!(scene.attribute(node, "stroke"), Some(blue.to_string().as_str()));

        commit::<kind::Rect>(&mut scene, node, |_| {});
        assert_eq!(scene.attribute(node, "stroke"), None);
    }

    #[test]
    fn test_transform_is_written_last() {
        let mut scene = Scene::new();
        let node = scene.create(NodeKind::Rect);
        scene.start_journal();

        commit::<kind::Rect>(&mut scene, node, |p| {
            p.set_transform(Bounds::new(10.0, 20.0, 5.0, 5.0));
            p.set_fill(Color::new("#fff").unwrap());
        });

        let names: Vec<_> = scene
            .take_journal()
            .into_iter()
            .filter_map(|mutation| match mutation {
                Mutation::Attribute { name, .. } => Some(name),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["fill", "x", "y", "width", "height"]);
    }

    #[test]
    fn test_non_finite_opacity_keeps_previous() {
        let mut scene = Scene::new();
        let node = scene.create(NodeKind::Ellipse);

        commit::<kind::Ellipse>(&mut scene, node, |p| {
            p.set_opacity(0.5_f32);
        });
        assert_eq!(scene.attribute(node, "opacity"), Some("0.5"));

        let written = commit::<kind::Ellipse>(&mut scene, node, |p| {
            p.set_opacity(1.0_f32 / 0.0);
        });
        assert_eq!(written, 0);
        assert_eq!(scene.attribute(node, "opacity"), Some("0.5"));

        // The carried-over value still diffs correctly
        let written = commit::<kind::Ellipse>(&mut scene, node, |p| {
            p.set_opacity(0.5_f32);
        });
        assert_eq!(written, 0);
    }

    #[test]
    fn test_item_sources() {
        let item = item(
            Appearance::new()
                .with(keys::BACKGROUND_COLOR, 0x00ff00)
                .with(keys::STROKE_THICKNESS, 3.0)
                .with(keys::FONT_SIZE, 14.0)
                .with(keys::FONT_FAMILY, "Arial")
                .with(keys::TEXT_ALIGNMENT, "right"),
        );

        let mut rect = Properties::<kind::Rect>::new();
        rect.set_fill(&item).set_stroke_width(&item);
        assert_eq!(
            rect.pending().get(Property::Fill),
            Some(&PropertyValue::Color(Color::new("#00ff00").unwrap()))
        );
        assert_eq!(
            rect.pending().get(Property::StrokeWidth),
            Some(&PropertyValue::Number(3.0))
        );

        let mut text = Properties::<kind::Text>::new();
        text.set_font_size(&item)
            .set_font_family(&item)
            .set_text_alignment(&item);
        assert_eq!(
            text.pending().get(Property::FontSize),
            Some(&PropertyValue::Number(14.0))
        );
        assert_eq!(
            text.pending().get(Property::FontFamily),
            Some(&PropertyValue::Text("Arial".to_string()))
        );
        assert_eq!(
            text.pending().get(Property::TextAlignment),
            Some(&PropertyValue::Alignment(TextAlignment::Right))
        );
    }

    #[test]
    fn test_missing_item_color_stages_nothing() {
        let item = item(Appearance::new());
        let mut properties = Properties::<kind::Ellipse>::new();
        properties.set_stroke_color(&item);
        assert!(properties.pending().is_empty());
    }

    #[test]
    fn test_text_properties_target_text_block() {
        let mut scene = Scene::new();
        let node = scene.create(NodeKind::Text);

        commit::<kind::Text>(&mut scene, node, |p| {
            p.set_text("Hello")
                .set_font_size(12.0_f32)
                .set_font_family("")
                .set_vertical_alignment(VerticalAlignment::Top);
        });

        let block = scene.text_block(node).unwrap();
        assert_eq!(block.content(), "Hello");
        assert_eq!(block.style("font-size"), Some("12px"));
        assert_eq!(block.style("font-family"), Some(DEFAULT_FONT_FAMILY));
        assert_eq!(block.style("vertical-align"), Some("top"));
    }

    #[test]
    fn test_ellipse_transform_uses_center_and_radii() {
        let mut scene = Scene::new();
        let node = scene.create(NodeKind::Ellipse);

        commit::<kind::Ellipse>(&mut scene, node, |p| {
            p.set_transform(Bounds::new(4.0, 9.0, 18.0, 18.0));
        });

        assert_eq!(scene.attribute(node, "cx"), Some("13"));
        assert_eq!(scene.attribute(node, "cy"), Some("18"));
        assert_eq!(scene.attribute(node, "rx"), Some("9"));
        assert_eq!(scene.local_bounds(node), Bounds::new(4.0, 9.0, 18.0, 18.0));
    }

    #[test]
    fn test_missing_transform_keeps_placement() {
        let mut scene = Scene::new();
        let node = scene.create(NodeKind::Rect);
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);

        commit::<kind::Rect>(&mut scene, node, |p| {
            p.set_transform(bounds);
        });
        let written = commit::<kind::Rect>(&mut scene, node, |p| {
            p.set_transform(None);
        });

        assert_eq!(written, 0);
        assert_eq!(scene.local_bounds(node), bounds);
    }
}
