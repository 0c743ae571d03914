//! The diagram renderer: one container per item, reconciled on every pass.

use std::{collections::HashSet, path::Path};

use indexmap::IndexMap;
use log::{debug, info};

use draftkit_core::{geometry::Bounds, identifier::Id, item::DiagramItem};

use crate::{
    config::AppConfig,
    context::RenderContext,
    error::{DraftkitError, RenderError},
    export,
    plugin::ShapeCatalog,
    reconciler::Reconciler,
    scene::{NodeId, NodeKind, Scene, SceneStats},
    text,
};

/// Renders diagram items into a retained [`Scene`].
///
/// Each item owns a container group directly under the scene root, found by
/// the item's id. Rendering an item again reconciles its container in place,
/// so unchanged items cost no scene mutations.
///
/// # Examples
///
/// ```
/// # use draftkit::{renderer::DiagramRenderer, geometry::Point, identifier::Id};
/// # fn main() -> Result<(), draftkit::DraftkitError> {
/// let mut renderer = DiagramRenderer::default();
/// let item = renderer.catalog().create_item(
///     Id::new("dropdown-1"),
///     Id::new("Dropdown"),
///     Point::new(60.0, 15.0),
/// )?;
///
/// renderer.render_item(&item)?;
/// let before = renderer.stats();
/// renderer.render_item(&item)?;
/// assert_eq!(renderer.stats().since(&before).mutations(), 0);
///
/// let svg = renderer.to_svg()?;
/// assert!(svg.contains("<svg"));
/// # Ok(())
/// # }
/// ```
pub struct DiagramRenderer {
    scene: Scene,
    catalog: ShapeCatalog,
    config: AppConfig,
    containers: IndexMap<Id, NodeId>,
}

impl Default for DiagramRenderer {
    fn default() -> Self {
        Self::new(ShapeCatalog::with_builtin_shapes(), AppConfig::default())
    }
}

impl DiagramRenderer {
    pub fn new(catalog: ShapeCatalog, config: AppConfig) -> Self {
        info!(shapes = catalog.len(); "Creating diagram renderer");
        Self {
            scene: Scene::new(),
            catalog,
            config,
            containers: IndexMap::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Mutation counters of the underlying scene
    pub fn stats(&self) -> SceneStats {
        self.scene.stats()
    }

    /// Runs one render pass for `item` and returns its container.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownRenderer`] if no plugin is registered for
    /// the item's renderer, and propagates errors raised by the plugin. A
    /// failed pass is not cleaned up; the next pass reconciles from whatever
    /// it left behind.
    pub fn render_item(&mut self, item: &DiagramItem) -> Result<NodeId, RenderError> {
        let plugin = self
            .catalog
            .get(item.renderer())
            .ok_or(RenderError::UnknownRenderer(item.renderer()))?;

        let container = match self.containers.get(&item.id()) {
            Some(container) if self.scene.contains(*container) => *container,
            _ => {
                let container = self.scene.create(NodeKind::Group);
                let root = self.scene.root();
                self.scene.append(root, container);
                self.containers.insert(item.id(), container);
                debug!(item:% = item.id(), container:%; "Created item container");
                container
            }
        };

        let matrix = item.transform().matrix();
        if self.scene.matrix(container) != matrix {
            self.scene.set_matrix(container, matrix);
        }

        let mut ctx = RenderContext::new(item, Reconciler::new(&mut self.scene, container));
        plugin.render(&mut ctx)?;
        ctx.finish();
        Ok(container)
    }

    /// Renders every item of a diagram and drops the containers of items
    /// that are no longer part of it.
    ///
    /// # Errors
    ///
    /// Stops at the first item that fails to render.
    pub fn render_items(&mut self, items: &[DiagramItem]) -> Result<(), RenderError> {
        info!(items = items.len(); "Rendering diagram");
        for item in items {
            self.render_item(item)?;
        }

        let present: HashSet<Id> = items.iter().map(DiagramItem::id).collect();
        let scene = &mut self.scene;
        self.containers.retain(|id, container| {
            let keep = present.contains(id);
            if !keep {
                debug!(item:% = id, container:%; "Removing stale item container");
                scene.remove(*container);
            }
            keep
        });
        Ok(())
    }

    /// Removes the container of item `id`. Returns whether one existed.
    pub fn remove_item(&mut self, id: Id) -> bool {
        match self.containers.shift_remove(&id) {
            Some(container) => {
                self.scene.remove(container);
                true
            }
            None => false,
        }
    }

    pub fn container(&self, id: Id) -> Option<NodeId> {
        self.containers.get(&id).copied()
    }

    /// Bounds of the rendered item in its local coordinates.
    pub fn local_bounds(&self, id: Id) -> Option<Bounds> {
        self.container(id)
            .map(|container| self.scene.local_bounds(container))
    }

    /// Bounds of the rendered item in diagram coordinates.
    pub fn bounds(&self, id: Id) -> Option<Bounds> {
        self.container(id).map(|container| self.scene.bounds(container))
    }

    /// Measures single-line text, see [`text::measure_width`].
    pub fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        text::measure_width(text, font_size, font_family)
    }

    fn exporter(&self) -> Result<export::Svg, DraftkitError> {
        let export = self.config.export();
        let background = export.background_color().map_err(DraftkitError::Config)?;
        Ok(export::Svg::new(export.padding()).with_background(background))
    }

    /// Serializes the scene to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`DraftkitError::Config`] for an invalid background color and
    /// [`DraftkitError::Export`] if the scene cannot be serialized.
    pub fn to_svg(&self) -> Result<String, DraftkitError> {
        let document = self.exporter()?.render_scene(&self.scene)?;
        Ok(document.to_string())
    }

    /// Writes the scene as an SVG file.
    ///
    /// # Errors
    ///
    /// See [`DiagramRenderer::to_svg`]; additionally fails if the file cannot
    /// be written.
    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<(), DraftkitError> {
        let path = path.as_ref();
        let document = self.exporter()?.render_scene(&self.scene)?;
        export::save(path, &document)?;
        info!(path = path.display().to_string(); "SVG exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use draftkit_core::geometry::Point;
    use float_cmp::assert_approx_eq;

    use super::*;

    fn item(renderer: &DiagramRenderer, id: &str, shape: &str, x: f32, y: f32) -> DiagramItem {
        renderer
            .catalog()
            .create_item(Id::new(id), Id::new(shape), Point::new(x, y))
            .unwrap()
    }

    #[test]
    fn test_unknown_renderer() {
        let mut renderer = DiagramRenderer::new(ShapeCatalog::new(), AppConfig::default());
        let item = item(&DiagramRenderer::default(), "a", "Rectangle", 0.0, 0.0);
        assert_eq!(
            renderer.render_item(&item),
            Err(RenderError::UnknownRenderer(Id::new("Rectangle")))
        );
    }

    #[test]
    fn test_container_placed_at_item_bounds() {
        let mut renderer = DiagramRenderer::default();
        let dropdown = item(&renderer, "d", "Dropdown", 100.0, 50.0);
        renderer.render_item(&dropdown).unwrap();

        let bounds = renderer.bounds(Id::new("d")).unwrap();
        assert_approx_eq!(f32, bounds.x(), 40.0);
        assert_approx_eq!(f32, bounds.y(), 35.0);
        assert_approx_eq!(f32, bounds.width(), 120.0);
        assert_approx_eq!(f32, bounds.height(), 30.0);

        let local = renderer.local_bounds(Id::new("d")).unwrap();
        assert_approx_eq!(f32, local.x(), 0.0);
    }

    #[test]
    fn test_moving_item_only_updates_matrix() {
        let mut renderer = DiagramRenderer::default();
        let mut dropdown = item(&renderer, "d", "Dropdown", 100.0, 50.0);
        renderer.render_item(&dropdown).unwrap();

        dropdown.set_transform(dropdown.transform().with_position(Point::new(200.0, 50.0)));
        let before = renderer.stats();
        renderer.render_item(&dropdown).unwrap();

        let delta = renderer.stats().since(&before);
        assert_eq!(delta.created, 0);
        assert_eq!(delta.removed, 0);
        assert_eq!(delta.attribute_writes, 1);
    }

    #[test]
    fn test_render_items_removes_stale_containers() {
        let mut renderer = DiagramRenderer::default();
        let a = item(&renderer, "a", "Rectangle", 0.0, 0.0);
        let b = item(&renderer, "b", "RadioButton", 0.0, 100.0);

        renderer.render_items(&[a.clone(), b]).unwrap();
        let root = renderer.scene().root();
        assert_eq!(renderer.scene().child_count(root), 2);

        renderer.render_items(&[a]).unwrap();
        assert_eq!(renderer.scene().child_count(root), 1);
        assert!(renderer.container(Id::new("b")).is_none());
        assert!(renderer.container(Id::new("a")).is_some());
    }

    #[test]
    fn test_remove_item() {
        let mut renderer = DiagramRenderer::default();
        let a = item(&renderer, "a", "Rectangle", 0.0, 0.0);
        renderer.render_item(&a).unwrap();

        assert!(renderer.remove_item(Id::new("a")));
        assert!(!renderer.remove_item(Id::new("a")));
        assert_eq!(renderer.scene().len(), 1);
    }

    #[test]
    fn test_invalid_background_is_config_error() {
        let config = AppConfig::new(
            crate::config::ExportConfig::new(Some("nope".to_string()), 0.0),
            Default::default(),
        );
        let renderer = DiagramRenderer::new(ShapeCatalog::with_builtin_shapes(), config);
        assert!(matches!(renderer.to_svg(), Err(DraftkitError::Config(_))));
    }
}
