//! SVG export of the retained scene.
//!
//! [`Svg`] walks the scene from its root and emits one SVG element per node:
//!
//! - groups become `<g>`, with their matrix as a `transform`,
//! - text nodes become a `<foreignObject>` holding an XHTML `<div>` that
//!   carries the text block's styles and content,
//! - clip nodes are emitted into `<clipPath>` definitions and referenced from
//!   their container through `clip-path`.
//!
//! The document's view box is the scene bounds grown by the configured
//! padding.
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`DraftkitError::Export`](crate::DraftkitError::Export) at the crate
//! boundary.

use std::{fmt::Write as _, path::Path};

use log::debug;
use svg::{
    Node,
    node::{Text as SvgText, element as svg_element},
};

use draftkit_core::{color::Color, geometry::Matrix};

use crate::scene::{NodeId, NodeKind, Scene};

const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Errors that can occur during scene export.
#[derive(Debug)]
pub enum Error {
    /// A node referenced by the scene tree does not exist.
    MissingNode(NodeId),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingNode(node) => write!(f, "Scene node `{node}` does not exist"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingNode(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

/// Serializes a [`Scene`] into an SVG document.
#[derive(Debug, Clone)]
pub struct Svg {
    padding: f32,
    background: Option<Color>,
}

impl Svg {
    pub fn new(padding: f32) -> Self {
        Self {
            padding: padding.max(0.0),
            background: None,
        }
    }

    /// Fills the whole document with `color` behind the scene.
    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    /// Renders the complete scene to an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingNode`] if the scene tree references a node
    /// that is not in the scene.
    pub fn render_scene(&self, scene: &Scene) -> Result<svg::Document, Error> {
        let root = scene.root();
        let bounds = scene.bounds(root);
        let min_x = bounds.x() - self.padding;
        let min_y = bounds.y() - self.padding;
        let width = bounds.width() + 2.0 * self.padding;
        let height = bounds.height() + 2.0 * self.padding;

        let mut doc = svg::Document::new()
            .set("viewBox", format!("{min_x} {min_y} {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(color) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", min_x)
                    .set("y", min_y)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", color),
            );
        }

        let mut defs = svg_element::Definitions::new();
        let mut clip_count = 0;
        let content = self.render_node(scene, root, &mut defs, &mut clip_count)?;
        if clip_count > 0 {
            doc = doc.add(defs);
        }

        debug!(nodes = scene.len(), clip_count; "Rendered scene to SVG");
        Ok(doc.add(content))
    }

    fn render_node(
        &self,
        scene: &Scene,
        node: NodeId,
        defs: &mut svg_element::Definitions,
        clip_count: &mut usize,
    ) -> Result<Box<dyn Node>, Error> {
        let kind = scene.kind(node).ok_or(Error::MissingNode(node))?;

        let element: Box<dyn Node> = match kind {
            NodeKind::Group => {
                let mut group = svg_element::Group::new();
                apply_matrix(&mut group, scene.matrix(node));
                copy_attributes(&mut group, scene, node);

                if let Some(clip) = scene.clip(node) {
                    let clip_id = format!("clip-{node}");
                    let clip_shape = self.render_node(scene, clip, defs, clip_count)?;
                    defs.append(
                        svg_element::ClipPath::new()
                            .set("id", clip_id.as_str())
                            .add(clip_shape),
                    );
                    *clip_count += 1;
                    group.assign("clip-path", format!("url(#{clip_id})"));
                }

                for child in scene.children(node) {
                    group.append(self.render_node(scene, *child, defs, clip_count)?);
                }
                Box::new(group)
            }
            NodeKind::Text => Box::new(render_text(scene, node)),
            NodeKind::Rect => Box::new(with_attributes(svg_element::Rectangle::new(), scene, node)),
            NodeKind::Ellipse => Box::new(with_attributes(svg_element::Ellipse::new(), scene, node)),
            NodeKind::Path => Box::new(with_attributes(svg_element::Path::new(), scene, node)),
            NodeKind::Image => Box::new(with_attributes(svg_element::Image::new(), scene, node)),
        };
        Ok(element)
    }
}

/// Writes `document` to `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn save(path: impl AsRef<Path>, document: &svg::Document) -> Result<(), Error> {
    svg::save(path, document).map_err(Error::Io)
}

fn with_attributes<T: Node>(mut element: T, scene: &Scene, node: NodeId) -> T {
    apply_matrix(&mut element, scene.matrix(node));
    copy_attributes(&mut element, scene, node);
    element
}

fn copy_attributes<T: Node>(element: &mut T, scene: &Scene, node: NodeId) {
    for (name, value) in scene.attributes(node) {
        element.assign(name, value);
    }
}

fn apply_matrix<T: Node>(element: &mut T, matrix: Matrix) {
    if matrix.is_identity() {
        return;
    }
    let [a, b, c, d, e, f] = matrix.components();
    element.assign("transform", format!("matrix({a} {b} {c} {d} {e} {f})"));
}

fn render_text(scene: &Scene, node: NodeId) -> svg_element::ForeignObject {
    let mut wrapper = svg_element::ForeignObject::new();
    apply_matrix(&mut wrapper, scene.matrix(node));

    let mut style = String::new();
    for (name, value) in scene.attributes(node) {
        match name {
            // Text color is applied to the block, not the wrapper.
            "color" => {
                let _ = write!(style, "color: {value}; ");
            }
            _ => wrapper.assign(name, value),
        }
    }

    let mut div = svg_element::Element::new("div");
    div.assign("xmlns", XHTML_NAMESPACE);
    if let Some(block) = scene.text_block(node) {
        for (name, value) in block.styles() {
            let _ = write!(style, "{name}: {value}; ");
        }
        div.append(SvgText::new(block.content()));
    }
    let style = style.trim_end();
    if !style.is_empty() {
        div.assign("style", style);
    }

    wrapper.append(div);
    wrapper
}

#[cfg(test)]
mod tests {
    use draftkit_core::geometry::Bounds;

    use super::*;
    use crate::{
        properties::TextConfig,
        reconciler::Reconciler,
    };

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        let root = scene.root();
        let mut reconciler = Reconciler::new(&mut scene, root);
        reconciler
            .group(|inner| {
                inner
                    .rectangle(1.0_f32, 2.0, Bounds::new(0.0, 0.0, 50.0, 20.0))
                    .finish()?;
                inner
                    .text(TextConfig::new("Hello & bye"), Bounds::new(0.0, 0.0, 50.0, 20.0))
                    .finish()?;
                Ok(())
            })
            .clip(|inner| {
                inner
                    .rectangle(0.0_f32, 4.0, Bounds::new(0.0, 0.0, 50.0, 20.0))
                    .finish()?;
                Ok(())
            })
            .with(|p| {
                p.set_transform(Bounds::new(10.0, 10.0, 50.0, 20.0));
            })
            .finish()
            .unwrap();
        reconciler.finish();
        scene
    }

    #[test]
    fn test_render_scene_structure() {
        let scene = sample_scene();
        let svg = Svg::new(5.0).render_scene(&scene).unwrap().to_string();

        assert!(svg.contains("<clipPath id=\"clip-n"), "{svg}");
        assert!(svg.contains("clip-path=\"url(#clip-n"), "{svg}");
        assert!(svg.contains("transform=\"matrix(1 0 0 1 10 10)\""), "{svg}");
        assert!(svg.contains("<foreignObject"), "{svg}");
        assert!(svg.contains("font-size: 10px"), "{svg}");
        assert!(svg.contains("viewBox=\"5 5 60 30\""), "{svg}");
    }

    #[test]
    fn test_background_rect() {
        let scene = Scene::new();
        let svg = Svg::new(10.0)
            .with_background(Some(Color::new("white").unwrap()))
            .render_scene(&scene)
            .unwrap()
            .to_string();
        assert!(svg.contains("<rect"), "{svg}");
        assert!(svg.contains("width=\"20\""), "{svg}");
    }

    #[test]
    fn test_save_writes_file() {
        let scene = sample_scene();
        let document = Svg::new(0.0).render_scene(&scene).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.svg");

        save(&path, &document).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
    }
}
