use draftkit_core::{
    appearance::{Appearance, keys},
    geometry::Size,
};

use super::theme;
use crate::{context::RenderContext, error::RenderError, plugin::ShapePlugin};

/// Appearance key holding the image URL.
pub const IMAGE_SOURCE: &str = "IMAGE_SOURCE";

/// A raster image clipped to a rounded frame.
///
/// Without a source the frame shows a crossed placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Image;

impl ShapePlugin for Image {
    fn identifier(&self) -> &'static str {
        "Image"
    }

    fn default_appearance(&self) -> Appearance {
        Appearance::new()
            .with(keys::BACKGROUND_COLOR, theme::CONTROL_BACKGROUND_COLOR)
            .with(keys::STROKE_COLOR, theme::CONTROL_BORDER_COLOR)
            .with(keys::STROKE_THICKNESS, theme::CONTROL_BORDER_THICKNESS)
            .with(IMAGE_SOURCE, "")
    }

    fn default_size(&self) -> Size {
        Size::new(120.0, 80.0)
    }

    fn render(&self, ctx: &mut RenderContext<'_, '_>) -> Result<(), RenderError> {
        let item = ctx.item();
        let rect = ctx.rect();
        let source = ctx
            .appearance()
            .text(IMAGE_SOURCE)
            .filter(|source| !source.is_empty());

        ctx.reconciler()
            .group(|inner| {
                match source {
                    Some(source) => {
                        inner.raster(source, rect).finish()?;
                    }
                    None => {
                        inner
                            .rectangle(item, 0.0, rect)
                            .with(|p| {
                                p.set_fill(item).set_stroke_color(item);
                            })
                            .finish()?;
                        let cross = format!(
                            "M0,0 L{w},{h} M{w},0 L0,{h}",
                            w = rect.width(),
                            h = rect.height()
                        );
                        inner
                            .path(item, cross, None)
                            .with(|p| {
                                p.set_stroke_color(item);
                            })
                            .finish()?;
                    }
                }
                Ok(())
            })
            .clip(|inner| {
                inner
                    .rectangle(0.0_f32, theme::CONTROL_BORDER_RADIUS, rect)
                    .finish()?;
                Ok(())
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
    fn test_placeholder_is_clipped() {
        let item = default_item(&Image);
        let mut scene = Scene::new();
        let container = render_into(&mut scene, &Image, &item);

        let group = scene.child_at(container, 0).unwrap();
        assert_eq!(child_kinds(&scene, group), [NodeKind::Rect, NodeKind::Path]);
        let clip = scene.clip(group).unwrap();
        assert_eq!(scene.attribute(clip, "rx"), Some("4"));
    }

    #[test]
    fn test_source_switches_to_raster_and_keeps_clip() {
        let mut item = default_item(&Image);
        let mut scene = Scene::new();
        let container = render_into(&mut scene, &Image, &item);
        let group = scene.child_at(container, 0).unwrap();
        let clip = scene.clip(group);

        item.appearance_mut()
            .set(IMAGE_SOURCE, "https://example.com/logo.png");
        render_into(&mut scene, &Image, &item);

        assert_eq!(scene.child_at(container, 0), Some(group));
        assert_eq!(child_kinds(&scene, group), [NodeKind::Image]);
        let raster = scene.child_at(group, 0).unwrap();
        assert_eq!(
            scene.attribute(raster, "href"),
            Some("https://example.com/logo.png")
        );
        assert_eq!(scene.clip(group), clip);
    }
}
