use draftkit_core::{
    appearance::{Appearance, keys},
    geometry::Size,
};

use super::theme;
use crate::{context::RenderContext, error::RenderError, plugin::ShapePlugin};

const TEXT_PADDING: f32 = 4.0;

/// A bordered box with a centered label.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rectangle;

impl ShapePlugin for Rectangle {
    fn identifier(&self) -> &'static str {
        "Rectangle"
    }

    fn default_appearance(&self) -> Appearance {
        Appearance::new()
            .with(keys::FOREGROUND_COLOR, theme::CONTROL_TEXT_COLOR)
            .with(keys::BACKGROUND_COLOR, theme::CONTROL_BACKGROUND_COLOR)
            .with(keys::TEXT, "Rectangle")
            .with(keys::TEXT_ALIGNMENT, "center")
            .with(keys::FONT_SIZE, theme::CONTROL_FONT_SIZE)
            .with(keys::STROKE_COLOR, theme::CONTROL_BORDER_COLOR)
            .with(keys::STROKE_THICKNESS, theme::CONTROL_BORDER_THICKNESS)
    }

    fn default_size(&self) -> Size {
        Size::new(100.0, 60.0)
    }

    fn render(&self, ctx: &mut RenderContext<'_, '_>) -> Result<(), RenderError> {
        let item = ctx.item();
        let rect = ctx.rect();

        ctx.reconciler()
            .rectangle(item, 0.0, rect)
            .with(|p| {
                p.set_fill(item).set_stroke_color(item);
            })
            .finish()?;

        if !item.is_text_disabled() {
            ctx.reconciler()
                .text(item, rect.deflate(TEXT_PADDING))
                .with(|p| {
                    p.set_foreground_color(item);
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
    fn test_renders_box_and_label() {
        let item = default_item(&Rectangle);
        let mut scene = Scene::new();
        let container = render_into(&mut scene, &Rectangle, &item);

        assert_eq!(
            child_kinds(&scene, container),
            [NodeKind::Rect, NodeKind::Text]
        );
        let text = scene.child_at(container, 1).unwrap();
        assert_eq!(scene.text_block(text).unwrap().content(), "Rectangle");
        assert_eq!(scene.attribute(text, "x"), Some("4"));
    }

    #[test]
    fn test_disabled_text_drops_label() {
        let mut item = default_item(&Rectangle);
        let mut scene = Scene::new();
        let container = render_into(&mut scene, &Rectangle, &item);

        item.appearance_mut().set(keys::TEXT_DISABLED, true);
        render_into(&mut scene, &Rectangle, &item);

        assert_eq!(child_kinds(&scene, container), [NodeKind::Rect]);
    }
}
