//! The retained scene that render passes reconcile against.
//!
//! A [`Scene`] is an arena of nodes addressed by [`NodeId`]. Every node has a
//! [`NodeKind`], string attributes, an optional placement [`Matrix`] and an
//! ordered list of children. Group nodes may additionally own one clip node.
//! Text nodes carry a [`TextBlock`]: the styleable child of the text wrapper
//! that receives font, alignment and content.
//!
//! # Overview
//!
//! - Tree edits: [`Scene::create`], [`Scene::append`], [`Scene::insert_after`],
//!   [`Scene::remove`]
//! - Child access: [`Scene::child_at`], [`Scene::child_count`], [`Scene::children`]
//! - Attributes: [`Scene::attribute`], [`Scene::set_attribute`],
//!   [`Scene::set_text_style`], [`Scene::set_text_content`], [`Scene::set_matrix`]
//! - Clipping: [`Scene::clip`], [`Scene::set_clip`], [`Scene::unclip`]
//! - Geometry: [`Scene::local_bounds`], [`Scene::bounds`]
//!
//! Node ids are never reused, so a stale id simply stops resolving once its
//! node has been removed.
//!
//! # Instrumentation
//!
//! The scene counts its mutations in [`SceneStats`] and can record them in a
//! journal of [`Mutation`]s. Both observe exactly the writes performed, which
//! makes redundant writes visible.

use std::{collections::HashMap, fmt};

use indexmap::IndexMap;
use log::{trace, warn};

use draftkit_core::{
    geometry::{Bounds, Matrix},
    path::path_bounds,
};

use crate::properties::PropertySet;

/// Identity of a node in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// The element type of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Rect,
    Ellipse,
    Path,
    /// A `foreignObject` wrapper around a [`TextBlock`]
    Text,
    Image,
    Group,
}

impl NodeKind {
    /// Returns the SVG tag name of the kind
    pub fn tag(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Ellipse => "ellipse",
            Self::Path => "path",
            Self::Text => "foreignObject",
            Self::Image => "image",
            Self::Group => "g",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The styleable text child of a text node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBlock {
    content: String,
    style: IndexMap<&'static str, String>,
}

impl TextBlock {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    /// Style declarations in insertion order
    pub fn styles(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.style.iter().map(|(name, value)| (*name, value.as_str()))
    }
}

/// A single write performed on the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Created {
        node: NodeId,
        kind: NodeKind,
    },
    Removed {
        node: NodeId,
    },
    Attribute {
        node: NodeId,
        name: &'static str,
        value: Option<String>,
    },
    TextStyle {
        node: NodeId,
        name: &'static str,
        value: Option<String>,
    },
    TextContent {
        node: NodeId,
        content: String,
    },
    Matrix {
        node: NodeId,
        matrix: Matrix,
    },
    Clip {
        container: NodeId,
        clip: Option<NodeId>,
    },
}

/// Mutation counters of a [`Scene`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Nodes created
    pub created: usize,
    /// Nodes removed, counting every node of a removed subtree
    pub removed: usize,
    /// Attribute, text style, text content and matrix writes
    pub attribute_writes: usize,
    /// Clip installs and removals
    pub clip_writes: usize,
}

impl SceneStats {
    /// Total number of mutations
    pub fn mutations(&self) -> usize {
        self.created + self.removed + self.attribute_writes + self.clip_writes
    }

    /// Counter growth since an earlier snapshot
    pub fn since(&self, earlier: &SceneStats) -> SceneStats {
        SceneStats {
            created: self.created.saturating_sub(earlier.created),
            removed: self.removed.saturating_sub(earlier.removed),
            attribute_writes: self.attribute_writes.saturating_sub(earlier.attribute_writes),
            clip_writes: self.clip_writes.saturating_sub(earlier.clip_writes),
        }
    }
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    clip: Option<NodeId>,
    attributes: IndexMap<&'static str, String>,
    text: Option<TextBlock>,
    matrix: Matrix,
    properties: PropertySet,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            clip: None,
            attributes: IndexMap::new(),
            text: (kind == NodeKind::Text).then(TextBlock::default),
            matrix: Matrix::IDENTITY,
            properties: PropertySet::default(),
        }
    }
}

/// An in-memory retained scene graph.
#[derive(Debug)]
pub struct Scene {
    nodes: HashMap<NodeId, NodeData>,
    next_id: u64,
    root: NodeId,
    stats: SceneStats,
    journal: Option<Vec<Mutation>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene holding only an empty root group.
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, NodeData::new(NodeKind::Group));
        Self {
            nodes,
            next_id: 1,
            root,
            stats: SceneStats::default(),
            journal: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Starts recording mutations, discarding any previous journal.
    pub fn start_journal(&mut self) {
        self.journal = Some(Vec::new());
    }

    /// Returns the recorded mutations and stops recording.
    pub fn take_journal(&mut self) -> Vec<Mutation> {
        self.journal.take().unwrap_or_default()
    }

    fn record(&mut self, mutation: Mutation) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(mutation);
        }
    }

    /// Creates a detached node.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        let node = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(node, NodeData::new(kind));
        self.stats.created += 1;
        self.record(Mutation::Created { node, kind });
        trace!(node:%, kind:%; "Created node");
        node
    }

    /// Appends `node` as the last child of `container`.
    pub fn append(&mut self, container: NodeId, node: NodeId) {
        if !self.contains(container) || !self.contains(node) {
            warn!(container:%, node:%; "Ignoring append of unknown node");
            return;
        }
        self.detach(node);
        if let Some(data) = self.nodes.get_mut(&container) {
            data.children.push(node);
        }
        if let Some(data) = self.nodes.get_mut(&node) {
            data.parent = Some(container);
        }
    }

    /// Inserts `node` directly after `sibling` in the sibling's container.
    pub fn insert_after(&mut self, sibling: NodeId, node: NodeId) {
        let Some(container) = self.parent(sibling) else {
            warn!(sibling:%, node:%; "Ignoring insert after a detached node");
            return;
        };
        if !self.contains(node) {
            warn!(node:%; "Ignoring insert of unknown node");
            return;
        }
        self.detach(node);

        let Some(data) = self.nodes.get_mut(&container) else {
            return;
        };
        match data.children.iter().position(|child| *child == sibling) {
            Some(index) => data.children.insert(index + 1, node),
            None => data.children.push(node),
        }
        if let Some(data) = self.nodes.get_mut(&node) {
            data.parent = Some(container);
        }
    }

    /// Removes `node` and its whole subtree, clip nodes included.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.root {
            warn!("Ignoring removal of the scene root");
            return;
        }
        if !self.contains(node) {
            return;
        }
        self.detach(node);
        self.drop_subtree(node);
    }

    // Unlinks a node from its parent's children or clip slot.
    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(&node).and_then(|data| data.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(&parent) {
            if parent.clip == Some(node) {
                parent.clip = None;
            } else {
                parent.children.retain(|child| *child != node);
            }
        }
    }

    fn drop_subtree(&mut self, node: NodeId) {
        let Some(data) = self.nodes.remove(&node) else {
            return;
        };
        self.stats.removed += 1;
        self.record(Mutation::Removed { node });

        for child in data.children.into_iter().chain(data.clip) {
            self.drop_subtree(child);
        }
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(&node).map(|data| data.kind)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|data| data.parent)
    }

    pub fn child_at(&self, container: NodeId, index: usize) -> Option<NodeId> {
        self.children(container).get(index).copied()
    }

    pub fn child_count(&self, container: NodeId) -> usize {
        self.children(container).len()
    }

    /// Children in paint order; empty for unknown nodes
    pub fn children(&self, container: NodeId) -> &[NodeId] {
        self.nodes
            .get(&container)
            .map(|data| data.children.as_slice())
            .unwrap_or_default()
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(&node)
            .and_then(|data| data.attributes.get(name))
            .map(String::as_str)
    }

    /// Attributes in the order they were first written
    pub fn attributes(&self, node: NodeId) -> impl Iterator<Item = (&'static str, &str)> {
        self.nodes
            .get(&node)
            .into_iter()
            .flat_map(|data| data.attributes.iter())
            .map(|(name, value)| (*name, value.as_str()))
    }

    /// Sets an attribute; `None` removes it.
    pub fn set_attribute(&mut self, node: NodeId, name: &'static str, value: Option<String>) {
        let Some(data) = self.nodes.get_mut(&node) else {
            warn!(node:%, name; "Ignoring attribute write on unknown node");
            return;
        };
        match &value {
            Some(value) => {
                data.attributes.insert(name, value.clone());
            }
            None => {
                data.attributes.shift_remove(name);
            }
        }
        self.stats.attribute_writes += 1;
        self.record(Mutation::Attribute { node, name, value });
    }

    pub fn text_block(&self, node: NodeId) -> Option<&TextBlock> {
        self.nodes.get(&node).and_then(|data| data.text.as_ref())
    }

    /// Sets a style declaration of a text node's text block; `None` removes it.
    pub fn set_text_style(&mut self, node: NodeId, name: &'static str, value: Option<String>) {
        let Some(block) = self.nodes.get_mut(&node).and_then(|data| data.text.as_mut()) else {
            warn!(node:%, name; "Ignoring text style on a node without text");
            return;
        };
        match &value {
            Some(value) => {
                block.style.insert(name, value.clone());
            }
            None => {
                block.style.shift_remove(name);
            }
        }
        self.stats.attribute_writes += 1;
        self.record(Mutation::TextStyle { node, name, value });
    }

    pub fn set_text_content(&mut self, node: NodeId, content: &str) {
        let Some(block) = self.nodes.get_mut(&node).and_then(|data| data.text.as_mut()) else {
            warn!(node:%; "Ignoring text content on a node without text");
            return;
        };
        block.content = content.to_string();
        self.stats.attribute_writes += 1;
        self.record(Mutation::TextContent {
            node,
            content: content.to_string(),
        });
    }

    pub fn matrix(&self, node: NodeId) -> Matrix {
        self.nodes
            .get(&node)
            .map_or(Matrix::IDENTITY, |data| data.matrix)
    }

    pub fn set_matrix(&mut self, node: NodeId, matrix: Matrix) {
        let Some(data) = self.nodes.get_mut(&node) else {
            warn!(node:%; "Ignoring matrix write on unknown node");
            return;
        };
        data.matrix = matrix;
        self.stats.attribute_writes += 1;
        self.record(Mutation::Matrix { node, matrix });
    }

    /// The clip node installed on `container`
    pub fn clip(&self, container: NodeId) -> Option<NodeId> {
        self.nodes.get(&container).and_then(|data| data.clip)
    }

    /// Installs `clip` as the clip of `container`, removing a previous clip.
    pub fn set_clip(&mut self, container: NodeId, clip: NodeId) {
        if !self.contains(container) || !self.contains(clip) {
            warn!(container:%, clip:%; "Ignoring clip of unknown node");
            return;
        }
        if self.clip(container) == Some(clip) {
            return;
        }
        self.unclip(container);
        self.detach(clip);

        if let Some(data) = self.nodes.get_mut(&container) {
            data.clip = Some(clip);
        }
        if let Some(data) = self.nodes.get_mut(&clip) {
            data.parent = Some(container);
        }
        self.stats.clip_writes += 1;
        self.record(Mutation::Clip {
            container,
            clip: Some(clip),
        });
    }

    /// Removes the clip of `container`, if any.
    pub fn unclip(&mut self, container: NodeId) {
        let Some(clip) = self.clip(container) else {
            return;
        };
        self.remove(clip);
        self.stats.clip_writes += 1;
        self.record(Mutation::Clip {
            container,
            clip: None,
        });
    }

    /// The property snapshot stored by the last commit on `node`
    pub fn properties(&self, node: NodeId) -> Option<&PropertySet> {
        self.nodes.get(&node).map(|data| &data.properties)
    }

    pub(crate) fn store_properties(&mut self, node: NodeId, properties: PropertySet) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.properties = properties;
        }
    }

    /// Bounds in the node's own coordinate space, before its matrix.
    ///
    /// Returns [`Bounds::EMPTY`] for nodes without geometry.
    pub fn local_bounds(&self, node: NodeId) -> Bounds {
        self.geometry(node).unwrap_or(Bounds::EMPTY)
    }

    /// Bounds transformed by the node's own matrix.
    pub fn bounds(&self, node: NodeId) -> Bounds {
        self.placed_geometry(node).unwrap_or(Bounds::EMPTY)
    }

    fn placed_geometry(&self, node: NodeId) -> Option<Bounds> {
        self.geometry(node)
            .map(|bounds| self.matrix(node).transform_bounds(bounds))
    }

    fn geometry(&self, node: NodeId) -> Option<Bounds> {
        let data = self.nodes.get(&node)?;
        let number = |name: &str| {
            data.attributes
                .get(name)
                .and_then(|value| value.parse::<f32>().ok())
        };

        match data.kind {
            NodeKind::Rect | NodeKind::Text | NodeKind::Image => {
                let width = number("width")?;
                let height = number("height")?;
                Some(Bounds::new(
                    number("x").unwrap_or(0.0),
                    number("y").unwrap_or(0.0),
                    width,
                    height,
                ))
            }
            NodeKind::Ellipse => {
                let rx = number("rx")?;
                let ry = number("ry")?;
                Some(Bounds::new(
                    number("cx").unwrap_or(0.0) - rx,
                    number("cy").unwrap_or(0.0) - ry,
                    2.0 * rx,
                    2.0 * ry,
                ))
            }
            NodeKind::Path => {
                let d = data.attributes.get("d")?;
                match path_bounds(d) {
                    Ok(bounds) => Some(bounds),
                    Err(err) => {
                        warn!(node:%, err:%; "Path data has no measurable bounds");
                        None
                    }
                }
            }
            NodeKind::Group => data
                .children
                .iter()
                .filter_map(|child| self.placed_geometry(*child))
                .reduce(|acc, bounds| acc.merge(&bounds)),
        }
    }
}
