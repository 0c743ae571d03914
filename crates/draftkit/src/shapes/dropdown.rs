use draftkit_core::{
    appearance::{Appearance, keys},
    geometry::{Bounds, Size},
};

use super::theme;
use crate::{context::RenderContext, error::RenderError, plugin::ShapePlugin};

/// A select box with a downward triangle at its right edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dropdown;

impl ShapePlugin for Dropdown {
    fn identifier(&self) -> &'static str {
        "Dropdown"
    }

    fn default_appearance(&self) -> Appearance {
        Appearance::new()
            .with(keys::FOREGROUND_COLOR, theme::CONTROL_TEXT_COLOR)
            .with(keys::BACKGROUND_COLOR, theme::CONTROL_BACKGROUND_COLOR)
            .with(keys::TEXT, "Dropdown")
            .with(keys::TEXT_ALIGNMENT, "left")
            .with(keys::FONT_SIZE, theme::CONTROL_FONT_SIZE)
            .with(keys::STROKE_COLOR, theme::CONTROL_BORDER_COLOR)
            .with(keys::STROKE_THICKNESS, theme::CONTROL_BORDER_THICKNESS)
    }

    fn default_size(&self) -> Size {
        Size::new(120.0, 30.0)
    }

    fn render(&self, ctx: &mut RenderContext<'_, '_>) -> Result<(), RenderError> {
        let item = ctx.item();
        let rect = ctx.rect();
        let click_area = 40.0_f32.min((0.8 * rect.width()).min(rect.height()));

        ctx.reconciler()
            .rectangle(item, theme::CONTROL_BORDER_RADIUS, rect)
            .with(|p| {
                p.set_fill(item).set_stroke_color(item);
            })
            .finish()?;

        let label = Bounds::new(
            14.0,
            4.0,
            (rect.width() - click_area - 6.0).max(0.0),
            (rect.height() - 8.0).max(0.0),
        );
        ctx.reconciler()
            .text(item, label)
            .with(|p| {
                p.set_foreground_color(item);
            })
            .finish()?;

        let x = rect.right() - 0.5 * click_area;
        let y = 0.5 * rect.height();
        let w = 0.3 * click_area;
        let h = 0.2 * click_area;
        let triangle = format!(
            "M{},{} L{},{} L{},{} z",
            x - 0.5 * w,
            y - 0.4 * h,
            x,
            y + 0.6 * h,
            x + 0.5 * w,
            y - 0.4 * h
        );
        ctx.reconciler()
            .path(0.0_f32, triangle, None)
            .with(|p| {
                if let Some(color) = item.stroke_color() {
                    p.set_fill(color);
                }
            })
            .finish()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use draftkit_core::color::Color;
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        scene::{NodeKind, Scene},
        shapes::testing::{child_kinds, default_item, render_into},
    };

    #[test]
    fn test_renders_border_label_and_triangle() {
        let item = default_item(&Dropdown);
        let mut scene = Scene::new();
        let container = render_into(&mut scene, &Dropdown, &item);

        assert_eq!(
            child_kinds(&scene, container),
            [NodeKind::Rect, NodeKind::Text, NodeKind::Path]
        );

        let border = scene.child_at(container, 0).unwrap();
        assert_eq!(scene.attribute(border, "rx"), Some("4"));
        assert_eq!(scene.attribute(border, "stroke-width"), Some("1"));

        let label = scene.child_at(container, 1).unwrap();
        assert_eq!(scene.attribute(label, "width"), Some("84"));
        assert_eq!(
            scene.text_block(label).unwrap().style("text-align"),
            Some("left")
        );

        let triangle = scene.child_at(container, 2).unwrap();
        let expected = Color::from_rgb_number(theme::CONTROL_BORDER_COLOR).to_string();
        assert_eq!(scene.attribute(triangle, "fill"), Some(expected.as_str()));
    }

    #[test]
    fn test_click_area_shrinks_with_height() {
        let mut item = default_item(&Dropdown);
        item.set_transform(item.transform().with_size(Size::new(120.0, 20.0)));
        let mut scene = Scene::new();
        let container = render_into(&mut scene, &Dropdown, &item);

        // Click area is 20 wide, so the triangle is centered at x = 110.
        let triangle = scene.child_at(container, 2).unwrap();
        let bounds = scene.local_bounds(triangle);
        assert_approx_eq!(f32, bounds.center().x(), 110.0, epsilon = 0.001);
    }
}
