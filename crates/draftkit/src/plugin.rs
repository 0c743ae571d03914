//! Shape plugins and the catalog they are registered in.
//!
//! A [`ShapePlugin`] describes one kind of wireframe shape: its identifier,
//! the appearance and size new items start with, and how it renders through
//! a [`RenderContext`]. The [`ShapeCatalog`] maps renderer identifiers to
//! plugins, in registration order.
//!
//! # Example
//!
//! ```
//! # use draftkit::{geometry::Point, plugin::ShapeCatalog, identifier::Id};
//! let catalog = ShapeCatalog::with_builtin_shapes();
//! let item = catalog
//!     .create_item(Id::new("button-1"), Id::new("Dropdown"), Point::new(100.0, 50.0))
//!     .unwrap();
//! assert_eq!(item.transform().size().width(), 120.0);
//! ```

use indexmap::IndexMap;
use log::debug;

use draftkit_core::{
    appearance::Appearance,
    configurable::Configurable,
    geometry::{Point, Size},
    identifier::Id,
    item::{DiagramItem, Transform},
};

use crate::{context::RenderContext, error::RenderError, shapes};

/// A renderable shape type.
pub trait ShapePlugin {
    /// Renderer identifier stored on items of this shape.
    fn identifier(&self) -> &'static str;

    /// Appearance of newly created items.
    fn default_appearance(&self) -> Appearance;

    /// Size of newly created items.
    fn default_size(&self) -> Size;

    /// Whether the shape is offered in the gallery.
    fn show_in_gallery(&self) -> bool {
        true
    }

    /// Editable properties offered for items of this shape.
    fn configurables(&self) -> Vec<Configurable> {
        Vec::new()
    }

    /// Requests the shape's primitives, in a deterministic order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Clipping`] if a container is given more than
    /// one clip.
    fn render(&self, ctx: &mut RenderContext<'_, '_>) -> Result<(), RenderError>;
}

/// Registry of shape plugins keyed by identifier.
#[derive(Default)]
pub struct ShapeCatalog {
    plugins: IndexMap<Id, Box<dyn ShapePlugin>>,
}

impl ShapeCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding every built-in shape.
    pub fn with_builtin_shapes() -> Self {
        let mut catalog = Self::new();
        catalog.register(shapes::Rectangle);
        catalog.register(shapes::Dropdown);
        catalog.register(shapes::Icon);
        catalog.register(shapes::RadioButton);
        catalog.register(shapes::ButtonBar);
        catalog.register(shapes::Image);
        catalog
    }

    /// Registers `plugin`, replacing any plugin with the same identifier.
    pub fn register(&mut self, plugin: impl ShapePlugin + 'static) {
        let identifier = Id::new(plugin.identifier());
        debug!(identifier:%; "Registering shape plugin");
        self.plugins.insert(identifier, Box::new(plugin));
    }

    pub fn get(&self, identifier: Id) -> Option<&dyn ShapePlugin> {
        self.plugins.get(&identifier).map(|plugin| plugin.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Plugins shown in the gallery, in registration order.
    pub fn gallery(&self) -> impl Iterator<Item = &dyn ShapePlugin> {
        self.plugins
            .values()
            .map(|plugin| plugin.as_ref())
            .filter(|plugin| plugin.show_in_gallery())
    }

    /// Builds an item of the shape `identifier` centered at `position`, with
    /// the plugin's default size, appearance and configurables.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownRenderer`] if no plugin is registered
    /// under `identifier`.
    pub fn create_item(
        &self,
        id: Id,
        identifier: Id,
        position: Point,
    ) -> Result<DiagramItem, RenderError> {
        let plugin = self
            .get(identifier)
            .ok_or(RenderError::UnknownRenderer(identifier))?;
        let transform = Transform::new(position, plugin.default_size(), 0.0);
        Ok(
            DiagramItem::new(id, identifier, transform, plugin.default_appearance())
                .with_configurables(plugin.configurables()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;

    impl ShapePlugin for Blank {
        fn identifier(&self) -> &'static str {
            "Blank"
        }

        fn default_appearance(&self) -> Appearance {
            Appearance::new().with("TEXT", "blank")
        }

        fn default_size(&self) -> Size {
            Size::new(10.0, 20.0)
        }

        fn show_in_gallery(&self) -> bool {
            false
        }

        fn render(&self, _ctx: &mut RenderContext<'_, '_>) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn test_builtin_gallery_order() {
        let catalog = ShapeCatalog::with_builtin_shapes();
        let gallery: Vec<_> = catalog.gallery().map(|p| p.identifier()).collect();
        assert_eq!(
            gallery,
            ["Rectangle", "Dropdown", "RadioButton", "ButtonBar", "Image"]
        );
        assert!(catalog.get(Id::new("Icon")).is_some());
    }

    #[test]
    fn test_register_replaces_by_identifier() {
        let mut catalog = ShapeCatalog::new();
        catalog.register(Blank);
        catalog.register(Blank);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.gallery().count(), 0);
    }

    #[test]
    fn test_create_item_uses_defaults() {
        let mut catalog = ShapeCatalog::new();
        catalog.register(Blank);

        let item = catalog
            .create_item(Id::new("b1"), Id::new("Blank"), Point::new(5.0, 10.0))
            .unwrap();
        assert_eq!(item.text(), "blank");
        assert_eq!(item.transform().bounds().x(), 0.0);
        assert_eq!(item.transform().bounds().y(), 0.0);
        assert_eq!(item.renderer(), Id::new("Blank"));
    }

    #[test]
    fn test_create_item_unknown_renderer() {
        let catalog = ShapeCatalog::new();
        let err = catalog
            .create_item(Id::new("x"), Id::new("Missing"), Point::new(0.0, 0.0))
            .unwrap_err();
        assert_eq!(err, RenderError::UnknownRenderer(Id::new("Missing")));
    }
}
