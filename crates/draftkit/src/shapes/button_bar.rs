use draftkit_core::{
    appearance::{Appearance, keys},
    configurable::Configurable,
    geometry::{Bounds, Size},
    item::DiagramItem,
};

use super::theme;
use crate::{
    context::RenderContext,
    error::RenderError,
    plugin::ShapePlugin,
    properties::{Properties, TextConfig, kind},
    reconciler::Reconciler,
};

/// Comma separated segment labels.
pub const ITEMS: &str = "ITEMS";
/// `Horizontal` or `Vertical`.
pub const ORIENTATION: &str = "ORIENTATION";
pub const ORIENTATION_HORIZONTAL: &str = "Horizontal";
pub const ORIENTATION_VERTICAL: &str = "Vertical";

/// A segmented bar of buttons.
///
/// The outer segments are drawn with their outer corners rounded, the inner
/// ones as plain rectangles. A bar with a single item is one rounded box.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Only,
    First,
    Middle,
    Last,
}

impl ButtonBar {
    fn segment(
        reconciler: &mut Reconciler<'_>,
        item: &DiagramItem,
        segment: Segment,
        vertical: bool,
        bounds: Bounds,
    ) -> Result<(), RenderError> {
        let radius = theme::CONTROL_BORDER_RADIUS;
        let style = |p: &mut Properties<kind::Path>| {
            p.set_fill(item).set_stroke_color(item);
        };
        match (segment, vertical) {
            (Segment::Only, _) => {
                reconciler
                    .rectangle(item, radius, bounds)
                    .with(|p| {
                        p.set_fill(item).set_stroke_color(item);
                    })
                    .finish()?;
            }
            (Segment::Middle, _) => {
                reconciler
                    .rectangle(item, 0.0, bounds)
                    .with(|p| {
                        p.set_fill(item).set_stroke_color(item);
                    })
                    .finish()?;
            }
            (Segment::First, false) => {
                reconciler
                    .rounded_rectangle_left(item, radius, bounds)
                    .with(style)
                    .finish()?;
            }
            (Segment::Last, false) => {
                reconciler
                    .rounded_rectangle_right(item, radius, bounds)
                    .with(style)
                    .finish()?;
            }
            (Segment::First, true) => {
                reconciler
                    .rounded_rectangle_top(item, radius, bounds)
                    .with(style)
                    .finish()?;
            }
            (Segment::Last, true) => {
                reconciler
                    .rounded_rectangle_bottom(item, radius, bounds)
                    .with(style)
                    .finish()?;
            }
        }
        Ok(())
    }
}

impl ShapePlugin for ButtonBar {
    fn identifier(&self) -> &'static str {
        "ButtonBar"
    }

    fn default_appearance(&self) -> Appearance {
        Appearance::new()
            .with(keys::FOREGROUND_COLOR, theme::CONTROL_TEXT_COLOR)
            .with(keys::BACKGROUND_COLOR, theme::CONTROL_BACKGROUND_COLOR)
            .with(keys::FONT_SIZE, theme::CONTROL_FONT_SIZE)
            .with(keys::STROKE_COLOR, theme::CONTROL_BORDER_COLOR)
            .with(keys::STROKE_THICKNESS, theme::CONTROL_BORDER_THICKNESS)
            .with(ITEMS, "Day,Week,Month")
            .with(ORIENTATION, ORIENTATION_HORIZONTAL)
    }

    fn default_size(&self) -> Size {
        Size::new(180.0, 30.0)
    }

    fn configurables(&self) -> Vec<Configurable> {
        vec![Configurable::selection(
            ORIENTATION,
            "Orientation",
            [ORIENTATION_HORIZONTAL, ORIENTATION_VERTICAL],
        )]
    }

    fn render(&self, ctx: &mut RenderContext<'_, '_>) -> Result<(), RenderError> {
        let item = ctx.item();
        let rect = ctx.rect();
        let vertical = ctx.appearance().text(ORIENTATION) == Some(ORIENTATION_VERTICAL);
        let labels: Vec<&str> = ctx
            .appearance()
            .text(ITEMS)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .collect();

        if labels.is_empty() {
            ctx.reconciler()
                .rectangle(item, theme::CONTROL_BORDER_RADIUS, rect)
                .with(|p| {
                    p.set_fill(item).set_stroke_color(item);
                })
                .finish()?;
            return Ok(());
        }

        let count = labels.len();
        let step = if vertical {
            rect.height() / count as f32
        } else {
            rect.width() / count as f32
        };

        for (index, label) in labels.into_iter().enumerate() {
            let offset = step * index as f32;
            let bounds = if vertical {
                Bounds::new(0.0, offset, rect.width(), step)
            } else {
                Bounds::new(offset, 0.0, step, rect.height())
            };
            let segment = match index {
                _ if count == 1 => Segment::Only,
                0 => Segment::First,
                i if i == count - 1 => Segment::Last,
                _ => Segment::Middle,
            };

            Self::segment(ctx.reconciler(), item, segment, vertical, bounds)?;

            let config = TextConfig::new(label)
                .with_font_size(item.font_size())
                .with_alignment(item.text_alignment());
            ctx.reconciler()
                .text(config, bounds)
                .with(|p| {
                    p.set_foreground_color(item).set_font_family(item);
                })
                .finish()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        scene::{NodeKind, Scene},
        shapes::testing::{child_kinds, default_item, render_into},
    };

    #[test]
    fn test_horizontal_segments() {
        let item = default_item(&ButtonBar);
        let mut scene = Scene::new();
        let container = render_into(&mut scene, &ButtonBar, &item);

        assert_eq!(
            child_kinds(&scene, container),
            [
                NodeKind::Path,
                NodeKind::Text,
                NodeKind::Rect,
                NodeKind::Text,
                NodeKind::Path,
                NodeKind::Text,
            ]
        );
        let first = scene.child_at(container, 0).unwrap();
        assert_eq!(
            scene.attribute(first, "d"),
            Some("M4,0 L60,0 L60,30 L4,30 A4,4 0 0 1 0,26 L0,4 A4,4 0 0 1 4,0 Z")
        );
        let middle = scene.child_at(container, 3).unwrap();
        assert_eq!(scene.text_block(middle).unwrap().content(), "Week");
    }

    #[test]
    fn test_vertical_uses_top_and_bottom_segments() {
        let mut item = default_item(&ButtonBar);
        item.appearance_mut().set(ORIENTATION, ORIENTATION_VERTICAL);
        item.appearance_mut().set(ITEMS, "Top, Bottom");
        let mut scene = Scene::new();
        let container = render_into(&mut scene, &ButtonBar, &item);

        assert_eq!(
            child_kinds(&scene, container),
            [NodeKind::Path, NodeKind::Text, NodeKind::Path, NodeKind::Text]
        );
        let bottom = scene.child_at(container, 3).unwrap();
        assert_eq!(scene.attribute(bottom, "y"), Some("15"));
        assert_eq!(scene.text_block(bottom).unwrap().content(), "Bottom");
    }

    #[test]
    fn test_shrinking_items_cleans_up() {
        let mut item = default_item(&ButtonBar);
        let mut scene = Scene::new();
        let container = render_into(&mut scene, &ButtonBar, &item);

        item.appearance_mut().set(ITEMS, "Only");
        render_into(&mut scene, &ButtonBar, &item);
        assert_eq!(
            child_kinds(&scene, container),
            [NodeKind::Rect, NodeKind::Text]
        );
    }
}
