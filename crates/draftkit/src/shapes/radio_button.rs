use draftkit_core::{
    appearance::{Appearance, keys},
    configurable::Configurable,
    geometry::{Bounds, Size},
};

use super::theme;
use crate::{context::RenderContext, error::RenderError, plugin::ShapePlugin};

/// Appearance key holding the selection state.
pub const STATE: &str = "STATE";
pub const STATE_NORMAL: &str = "Normal";
pub const STATE_CHECKED: &str = "Checked";

const CIRCLE_MARGIN: f32 = 4.0;
const CIRCLE_RADIUS: f32 = 9.0;
const CIRCLE_POSITION_X: f32 = CIRCLE_MARGIN + CIRCLE_RADIUS;
const CHECK_RADIUS: f32 = CIRCLE_RADIUS - 4.0;
const TEXT_POSITION_X: f32 = 2.0 * CIRCLE_MARGIN + 2.0 * CIRCLE_RADIUS;

/// A labelled radio button; the check dot is drawn when `STATE` is `Checked`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadioButton;

impl ShapePlugin for RadioButton {
    fn identifier(&self) -> &'static str {
        "RadioButton"
    }

    fn default_appearance(&self) -> Appearance {
        Appearance::new()
            .with(keys::FOREGROUND_COLOR, theme::CONTROL_TEXT_COLOR)
            .with(keys::BACKGROUND_COLOR, theme::CONTROL_BACKGROUND_COLOR)
            .with(keys::TEXT, "RadioButton")
            .with(keys::TEXT_ALIGNMENT, "left")
            .with(keys::FONT_SIZE, theme::CONTROL_FONT_SIZE)
            .with(keys::STROKE_COLOR, theme::CONTROL_BORDER_COLOR)
            .with(keys::STROKE_THICKNESS, theme::CONTROL_BORDER_THICKNESS)
            .with(STATE, STATE_NORMAL)
    }

    fn default_size(&self) -> Size {
        Size::new(130.0, 36.0)
    }

    fn configurables(&self) -> Vec<Configurable> {
        vec![Configurable::selection(
            STATE,
            "State",
            [STATE_NORMAL, STATE_CHECKED],
        )]
    }

    fn render(&self, ctx: &mut RenderContext<'_, '_>) -> Result<(), RenderError> {
        let item = ctx.item();
        let rect = ctx.rect();
        let y = 0.5 * rect.height();

        let circle = Bounds::new(
            CIRCLE_POSITION_X - CIRCLE_RADIUS,
            y - CIRCLE_RADIUS,
            2.0 * CIRCLE_RADIUS,
            2.0 * CIRCLE_RADIUS,
        );
        ctx.reconciler()
            .ellipse(item, circle)
            .with(|p| {
                p.set_stroke_color(item).set_fill(item);
            })
            .finish()?;

        if ctx.appearance().text(STATE) == Some(STATE_CHECKED) {
            let check = Bounds::new(
                CIRCLE_POSITION_X - CHECK_RADIUS,
                y - CHECK_RADIUS,
                2.0 * CHECK_RADIUS,
                2.0 * CHECK_RADIUS,
            );
            ctx.reconciler()
                .ellipse(0.0_f32, check)
                .with(|p| {
                    if let Some(color) = item.stroke_color() {
                        p.set_fill(color);
                    }
                })
                .finish()?;
        }

        let label = Bounds::new(
            TEXT_POSITION_X,
            0.0,
            (rect.width() - TEXT_POSITION_X).max(0.0),
            rect.height(),
        );
        ctx.reconciler()
            .text(item, label)
            .with(|p| {
                p.set_foreground_color(item);
            })
            .finish()?;
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
    fn test_normal_state_has_no_check() {
        let item = default_item(&RadioButton);
        let mut scene = Scene::new();
        let container = render_into(&mut scene, &RadioButton, &item);

        assert_eq!(
            child_kinds(&scene, container),
            [NodeKind::Ellipse, NodeKind::Text]
        );
        let circle = scene.child_at(container, 0).unwrap();
        assert_eq!(scene.attribute(circle, "cx"), Some("13"));
        assert_eq!(scene.attribute(circle, "cy"), Some("18"));
        assert_eq!(scene.attribute(circle, "rx"), Some("9"));
        assert_eq!(item.configurables().len(), 1);
    }

    #[test]
    fn test_toggling_state_replaces_text_slot() {
        let mut item = default_item(&RadioButton);
        let mut scene = Scene::new();
        let container = render_into(&mut scene, &RadioButton, &item);
        let label = scene.child_at(container, 1).unwrap();

        item.appearance_mut().set(STATE, STATE_CHECKED);
        render_into(&mut scene, &RadioButton, &item);
        assert_eq!(
            child_kinds(&scene, container),
            [NodeKind::Ellipse, NodeKind::Ellipse, NodeKind::Text]
        );
        assert!(!scene.contains(label));
        let check = scene.child_at(container, 1).unwrap();
        assert_eq!(scene.attribute(check, "rx"), Some("5"));
        assert_eq!(scene.attribute(check, "stroke-width"), Some("0"));

        item.appearance_mut().set(STATE, STATE_NORMAL);
        render_into(&mut scene, &RadioButton, &item);
        assert_eq!(
            child_kinds(&scene, container),
            [NodeKind::Ellipse, NodeKind::Text]
        );
    }
}
