//! CLI logic for the Draftkit gallery renderer.
//!
//! The CLI lays out one item per selected shape on a grid, renders the grid
//! for the requested number of passes and writes the resulting scene as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use log::{debug, info, warn};

use draftkit::{
    DraftkitError, RenderError,
    config::GalleryConfig,
    geometry::{Point, Size},
    identifier::Id,
    item::DiagramItem,
    plugin::ShapeCatalog,
    renderer::DiagramRenderer,
};

/// Run the Draftkit CLI application
///
/// This function renders the selected shapes into a retained scene and
/// writes the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `DraftkitError` for:
/// - Configuration loading errors
/// - Unknown shape names
/// - Rendering errors
/// - File I/O and export errors
pub fn run(args: &Args) -> Result<(), DraftkitError> {
    info!(
        output_path = args.output,
        passes = args.passes;
        "Rendering shape gallery"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let mut renderer = DiagramRenderer::new(ShapeCatalog::with_builtin_shapes(), app_config);

    let plugins = select_shapes(renderer.catalog(), &args.shapes)?;
    let items = gallery_items(renderer.catalog(), &plugins, renderer.config().gallery())?;
    debug!(shapes = plugins.len(); "Laid out gallery items");

    for pass in 1..=args.passes {
        let before = renderer.stats();
        renderer.render_items(&items)?;
        let delta = renderer.stats().since(&before);
        info!(
            pass,
            created = delta.created,
            removed = delta.removed,
            attribute_writes = delta.attribute_writes,
            clip_writes = delta.clip_writes;
            "Render pass completed"
        );
        if pass > 1 && delta.mutations() > 0 {
            warn!(pass, mutations = delta.mutations(); "Repeated render pass mutated the scene");
        }
    }

    renderer.save_svg(&args.output)?;
    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

/// Shape identifiers to render: the named ones, or the whole gallery.
fn select_shapes(catalog: &ShapeCatalog, names: &[String]) -> Result<Vec<Id>, RenderError> {
    if names.is_empty() {
        return Ok(catalog
            .gallery()
            .map(|plugin| Id::new(plugin.identifier()))
            .collect());
    }

    names
        .iter()
        .map(|name| {
            let identifier = Id::new(name);
            catalog
                .get(identifier)
                .map(|plugin| Id::new(plugin.identifier()))
                .ok_or(RenderError::UnknownRenderer(identifier))
        })
        .collect()
}

/// One item per shape, centered in equally sized grid cells.
fn gallery_items(
    catalog: &ShapeCatalog,
    shapes: &[Id],
    gallery: &GalleryConfig,
) -> Result<Vec<DiagramItem>, RenderError> {
    let cell = shapes
        .iter()
        .filter_map(|shape| catalog.get(*shape))
        .map(|plugin| plugin.default_size())
        .fold(Size::default(), Size::max);
    let columns = gallery.columns();
    let spacing = gallery.spacing();

    shapes
        .iter()
        .enumerate()
        .map(|(index, shape)| {
            let column = (index % columns) as f32;
            let row = (index / columns) as f32;
            let center = Point::new(
                column * (cell.width() + spacing) + cell.width() / 2.0,
                row * (cell.height() + spacing) + cell.height() / 2.0,
            );
            catalog.create_item(Id::numbered("gallery", index), *shape, center)
        })
        .collect()
}
