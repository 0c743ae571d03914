use draftkit_core::{
    appearance::{Appearance, keys},
    geometry::Size,
    style::TextAlignment,
};

use crate::{
    context::RenderContext, error::RenderError, plugin::ShapePlugin, properties::TextConfig,
};

const DEFAULT_ICON_FONT: &str = "FontAwesome";

/// A single glyph from an icon font, sized to fill the item.
#[derive(Debug, Clone, Copy, Default)]
pub struct Icon;

impl ShapePlugin for Icon {
    fn identifier(&self) -> &'static str {
        "Icon"
    }

    fn default_appearance(&self) -> Appearance {
        Appearance::new()
            .with(keys::FOREGROUND_COLOR, 0)
            .with(keys::TEXT_DISABLED, true)
    }

    fn default_size(&self) -> Size {
        Size::new(40.0, 40.0)
    }

    fn show_in_gallery(&self) -> bool {
        false
    }

    fn render(&self, ctx: &mut RenderContext<'_, '_>) -> Result<(), RenderError> {
        let item = ctx.item();
        let rect = ctx.rect();

        let config = TextConfig::new(item.text())
            .with_font_size(rect.width().min(rect.height()) - 10.0)
            .with_alignment(TextAlignment::Center);
        let family = ctx
            .appearance()
            .text(keys::ICON_FONT_FAMILY)
            .filter(|family| !family.is_empty())
            .unwrap_or(DEFAULT_ICON_FONT);

        ctx.reconciler()
            .text(config, rect)
            .with(|p| {
                p.set_foreground_color(item).set_font_family(family);
            })
            .finish()?;
        Ok(())
    }
}
