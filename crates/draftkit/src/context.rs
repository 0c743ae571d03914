//! The per-shape bridge between diagram items and the reconciler.

use draftkit_core::{appearance::Appearance, geometry::Bounds, item::DiagramItem};

use crate::{reconciler::Reconciler, text};

/// Everything a [`ShapePlugin`](crate::plugin::ShapePlugin) sees while it
/// renders one item.
///
/// A context lives for a single render pass. Primitives requested through
/// [`RenderContext::reconciler`] land in the item's container, in item-local
/// coordinates where `(0, 0)` is the item's top-left corner.
pub struct RenderContext<'a, 's> {
    item: &'a DiagramItem,
    rect: Bounds,
    reconciler: Reconciler<'s>,
}

impl<'a, 's> RenderContext<'a, 's> {
    pub fn new(item: &'a DiagramItem, reconciler: Reconciler<'s>) -> Self {
        let size = item.transform().size();
        Self {
            item,
            rect: Bounds::new(0.0, 0.0, size.width(), size.height()),
            reconciler,
        }
    }

    pub fn item(&self) -> &'a DiagramItem {
        self.item
    }

    pub fn appearance(&self) -> &'a Appearance {
        self.item.appearance()
    }

    /// The item's bounding rectangle in local coordinates.
    pub fn rect(&self) -> Bounds {
        self.rect
    }

    pub fn reconciler(&mut self) -> &mut Reconciler<'s> {
        &mut self.reconciler
    }

    /// Measures `text`, see [`text::measure_width`].
    pub fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        text::measure_width(text, font_size, font_family)
    }

    /// Ends the pass and cleans up the container.
    pub(crate) fn finish(self) -> usize {
        self.reconciler.finish()
    }
}
