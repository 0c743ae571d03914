//! Positional reconciliation of primitives against a container.
//!
//! A [`Reconciler`] walks one container of the [`Scene`] during a render
//! pass. Every primitive request consumes the next child slot:
//!
//! - an empty slot gets a freshly created node appended,
//! - a slot holding a node of another kind gets a new node inserted right
//!   after the stale one, which is then removed,
//! - a slot holding a node of the requested kind is reused as is.
//!
//! The staged properties are then committed through the
//! [`ChangeTracker`], so reused nodes only see the writes that actually
//! change something. [`Reconciler::finish`] removes the children the pass did
//! not reach.
//!
//! # Clipping
//!
//! A group may carry one clip shape. The clip function of a
//! [`GroupPrimitive`] runs with the nested reconciler in clipping state:
//! its primitive is matched against the container's current clip instead of
//! a child slot. A second primitive requested in that state fails with
//! [`RenderError::Clipping`] and leaves the installed clip untouched.
//!
//! # Example
//!
//! ```
//! # use draftkit::{geometry::Bounds, reconciler::Reconciler, scene::Scene};
//! # fn main() -> Result<(), draftkit::RenderError> {
//! let mut scene = Scene::new();
//! let root = scene.root();
//!
//! let mut reconciler = Reconciler::new(&mut scene, root);
//! reconciler
//!     .rectangle(1.0_f32, 4.0, Bounds::new(0.0, 0.0, 100.0, 30.0))
//!     .finish()?;
//! reconciler
//!     .group(|inner| {
//!         inner.ellipse(0.0_f32, Bounds::new(0.0, 0.0, 10.0, 10.0)).finish()?;
//!         Ok(())
//!     })
//!     .clip(|inner| {
//!         inner.rectangle(0.0_f32, 0.0, Bounds::new(0.0, 0.0, 5.0, 5.0)).finish()?;
//!         Ok(())
//!     })
//!     .finish()?;
//! reconciler.finish();
//!
//! assert_eq!(scene.child_count(root), 2);
//! # Ok(())
//! # }
//! ```

use log::debug;

use draftkit_core::{color::Color, geometry::Bounds, path, style::VerticalAlignment};

use crate::{
    error::RenderError,
    properties::{
        ChangeTracker, Properties, Source, TextConfig,
        kind::{self, PrimitiveKind},
    },
    scene::{NodeId, NodeKind, Scene},
};

/// Progress of a pass over one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    /// Primitives fill child slots; `cursor` is the next slot.
    Normal { cursor: usize },
    /// Primitives replace the container's clip; at most one is accepted.
    Clipping { cursor: usize, installed: bool },
}

impl PassState {
    /// Number of child slots consumed so far
    pub fn cursor(self) -> usize {
        match self {
            Self::Normal { cursor } | Self::Clipping { cursor, .. } => cursor,
        }
    }

    /// Whether a clip was installed during this pass
    pub fn is_clipped(self) -> bool {
        matches!(self, Self::Clipping { installed: true, .. })
    }
}

/// Reconciles primitive requests against the children of one container.
pub struct Reconciler<'s> {
    scene: &'s mut Scene,
    container: NodeId,
    state: PassState,
}

impl<'s> Reconciler<'s> {
    /// Starts a pass over `container` at slot zero.
    pub fn new(scene: &'s mut Scene, container: NodeId) -> Self {
        Self {
            scene,
            container,
            state: PassState::Normal { cursor: 0 },
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn state(&self) -> PassState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// A rectangle with an optional corner radius.
    pub fn rectangle<'a>(
        &mut self,
        stroke_width: impl Into<Source<'a, f32>>,
        radius: f32,
        bounds: impl Into<Option<Bounds>>,
    ) -> Primitive<'_, 's, kind::Rect> {
        let mut properties = Properties::new();
        properties
            .set_fill(Color::transparent())
            .set_stroke_width(stroke_width)
            .set_radius(radius)
            .set_transform(bounds);
        Primitive::new(self, properties)
    }

    pub fn ellipse<'a>(
        &mut self,
        stroke_width: impl Into<Source<'a, f32>>,
        bounds: impl Into<Option<Bounds>>,
    ) -> Primitive<'_, 's, kind::Ellipse> {
        let mut properties = Properties::new();
        properties
            .set_fill(Color::transparent())
            .set_stroke_width(stroke_width)
            .set_transform(bounds);
        Primitive::new(self, properties)
    }

    /// A rectangle whose two left corners are rounded.
    ///
    /// The outline is drawn directly inside `bounds`, like the other
    /// rounded variants.
    pub fn rounded_rectangle_left<'a>(
        &mut self,
        stroke_width: impl Into<Source<'a, f32>>,
        radius: f32,
        bounds: Bounds,
    ) -> Primitive<'_, 's, kind::Path> {
        self.outline(stroke_width, path::rounded_rectangle_left(bounds, radius), None)
    }

    /// A rectangle whose two right corners are rounded.
    pub fn rounded_rectangle_right<'a>(
        &mut self,
        stroke_width: impl Into<Source<'a, f32>>,
        radius: f32,
        bounds: Bounds,
    ) -> Primitive<'_, 's, kind::Path> {
        self.outline(stroke_width, path::rounded_rectangle_right(bounds, radius), None)
    }

    /// A rectangle whose two top corners are rounded.
    pub fn rounded_rectangle_top<'a>(
        &mut self,
        stroke_width: impl Into<Source<'a, f32>>,
        radius: f32,
        bounds: Bounds,
    ) -> Primitive<'_, 's, kind::Path> {
        self.outline(stroke_width, path::rounded_rectangle_top(bounds, radius), None)
    }

    /// A rectangle whose two bottom corners are rounded.
    pub fn rounded_rectangle_bottom<'a>(
        &mut self,
        stroke_width: impl Into<Source<'a, f32>>,
        radius: f32,
        bounds: Bounds,
    ) -> Primitive<'_, 's, kind::Path> {
        self.outline(stroke_width, path::rounded_rectangle_bottom(bounds, radius), None)
    }

    /// Arbitrary SVG path data.
    ///
    /// With `bounds`, the box around the data is scaled and moved onto
    /// `bounds`. Without, the data is drawn in item-local coordinates.
    pub fn path<'a>(
        &mut self,
        stroke_width: impl Into<Source<'a, f32>>,
        d: impl Into<String>,
        bounds: impl Into<Option<Bounds>>,
    ) -> Primitive<'_, 's, kind::Path> {
        self.outline(stroke_width, d.into(), bounds)
    }

    fn outline<'a>(
        &mut self,
        stroke_width: impl Into<Source<'a, f32>>,
        d: String,
        bounds: impl Into<Option<Bounds>>,
    ) -> Primitive<'_, 's, kind::Path> {
        let mut properties = Properties::new();
        properties
            .set_fill(Color::transparent())
            .set_stroke_width(stroke_width)
            .set_path(d)
            .set_transform(bounds);
        Primitive::new(self, properties)
    }

    /// Single-line text, vertically centered.
    pub fn text<'a>(
        &mut self,
        config: impl Into<Source<'a, TextConfig>>,
        bounds: impl Into<Option<Bounds>>,
    ) -> Primitive<'_, 's, kind::Text> {
        let properties = text_properties(config.into(), VerticalAlignment::Middle, bounds.into());
        Primitive::new(self, properties)
    }

    /// Multi-line text, starting at the top.
    pub fn text_multiline<'a>(
        &mut self,
        config: impl Into<Source<'a, TextConfig>>,
        bounds: impl Into<Option<Bounds>>,
    ) -> Primitive<'_, 's, kind::Text> {
        let properties = text_properties(config.into(), VerticalAlignment::Top, bounds.into());
        Primitive::new(self, properties)
    }

    /// A raster image loaded from `source`.
    pub fn raster(
        &mut self,
        source: impl Into<String>,
        bounds: impl Into<Option<Bounds>>,
    ) -> Primitive<'_, 's, kind::Image> {
        let mut properties = Properties::new();
        properties
            .set_fill(Color::transparent())
            .set_image(source)
            .set_transform(bounds);
        Primitive::new(self, properties)
    }

    /// A group whose children are produced by `content`.
    ///
    /// `content` receives a reconciler bound to the group, starting at slot
    /// zero. The group is cleaned up before [`GroupPrimitive::finish`]
    /// returns.
    pub fn group<F>(&mut self, content: F) -> GroupPrimitive<'_, 's, F>
    where
        F: FnOnce(&mut Reconciler<'_>) -> Result<(), RenderError>,
    {
        GroupPrimitive {
            reconciler: self,
            content,
            clip: None,
            properties: Properties::new(),
        }
    }

    /// Finds or creates the node for the next request of `kind`.
    fn resolve(&mut self, kind: NodeKind) -> Result<NodeId, RenderError> {
        match self.state {
            PassState::Clipping {
                installed: true, ..
            } => Err(RenderError::Clipping),
            PassState::Clipping {
                cursor,
                installed: false,
            } => {
                let node = match self.scene.clip(self.container) {
                    Some(clip) if self.scene.kind(clip) == Some(kind) => clip,
                    previous => {
                        let node = self.scene.create(kind);
                        debug!(
                            container:% = self.container,
                            previous:? = previous,
                            node:%,
                            kind:%;
                            "Installing clip"
                        );
                        self.scene.set_clip(self.container, node);
                        node
                    }
                };
                self.state = PassState::Clipping {
                    cursor,
                    installed: true,
                };
                Ok(node)
            }
            PassState::Normal { cursor } => {
                let node = match self.scene.child_at(self.container, cursor) {
                    None => {
                        let node = self.scene.create(kind);
                        self.scene.append(self.container, node);
                        node
                    }
                    Some(existing) if self.scene.kind(existing) == Some(kind) => existing,
                    Some(stale) => {
                        let node = self.scene.create(kind);
                        debug!(
                            container:% = self.container,
                            slot = cursor,
                            stale:%,
                            node:%,
                            kind:%;
                            "Replacing node of another kind"
                        );
                        self.scene.insert_after(stale, node);
                        self.scene.remove(stale);
                        node
                    }
                };
                self.state = PassState::Normal { cursor: cursor + 1 };
                Ok(node)
            }
        }
    }

    fn begin_clipping(&mut self) {
        self.state = PassState::Clipping {
            cursor: self.state.cursor(),
            installed: false,
        };
    }

    /// Ends the pass: removes every child beyond the cursor and, unless a
    /// clip was installed during the pass, the container's clip.
    ///
    /// Returns the number of children removed.
    pub fn finish(self) -> usize {
        let cursor = self.state.cursor();
        let mut removed = 0;
        while self.scene.child_count(self.container) > cursor {
            let Some(last) = self.scene.children(self.container).last().copied() else {
                break;
            };
            self.scene.remove(last);
            removed += 1;
        }

        if !self.state.is_clipped() && self.scene.clip(self.container).is_some() {
            debug!(container:% = self.container; "Removing stale clip");
            self.scene.unclip(self.container);
        }

        if removed > 0 {
            debug!(container:% = self.container, removed; "Removed stale children");
        }
        removed
    }
}

fn text_properties(
    config: Source<'_, TextConfig>,
    vertical: VerticalAlignment,
    bounds: Option<Bounds>,
) -> Properties<kind::Text> {
    let mut properties = Properties::new();
    properties.set_fill(Color::transparent());
    match config {
        Source::Item(item) => {
            properties
                .set_text(item.text())
                .set_font_size(item)
                .set_font_family(item)
                .set_text_alignment(item);
        }
        Source::Value(config) => {
            properties
                .set_font_size(config.font_size())
                .set_font_family("")
                .set_text_alignment(config.alignment())
                .set_text(config.text);
        }
    }
    properties
        .set_vertical_alignment(vertical)
        .set_transform(bounds);
    properties
}

/// A pending primitive request.
///
/// The kind defaults are staged when the request is made;
/// [`Primitive::with`] stages caller properties on top of them and
/// [`Primitive::finish`] places the node and commits.
#[must_use = "a primitive is only placed by calling `finish`"]
pub struct Primitive<'r, 's, K> {
    reconciler: &'r mut Reconciler<'s>,
    properties: Properties<K>,
}

impl<'r, 's, K: PrimitiveKind> Primitive<'r, 's, K> {
    fn new(reconciler: &'r mut Reconciler<'s>, properties: Properties<K>) -> Self {
        Self {
            reconciler,
            properties,
        }
    }

    /// Stages caller properties after the kind defaults.
    pub fn with(mut self, customize: impl FnOnce(&mut Properties<K>)) -> Self {
        customize(&mut self.properties);
        self
    }

    /// Places the primitive and commits its properties.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Clipping`] if the container already received
    /// its clip during this pass.
    pub fn finish(self) -> Result<NodeId, RenderError> {
        let node = self.reconciler.resolve(K::NODE)?;
        ChangeTracker::begin(self.reconciler.scene, node).commit(self.properties.into_pending());
        Ok(node)
    }
}

type ClipFn = fn(&mut Reconciler<'_>) -> Result<(), RenderError>;

/// A pending group request, see [`Reconciler::group`].
#[must_use = "a group is only placed by calling `finish`"]
pub struct GroupPrimitive<'r, 's, F, C = ClipFn> {
    reconciler: &'r mut Reconciler<'s>,
    content: F,
    clip: Option<C>,
    properties: Properties<kind::Group>,
}

impl<'r, 's, F, C> GroupPrimitive<'r, 's, F, C>
where
    F: FnOnce(&mut Reconciler<'_>) -> Result<(), RenderError>,
    C: FnOnce(&mut Reconciler<'_>) -> Result<(), RenderError>,
{
    /// Sets the function producing the group's single clip shape.
    pub fn clip<G>(self, clip: G) -> GroupPrimitive<'r, 's, F, G>
    where
        G: FnOnce(&mut Reconciler<'_>) -> Result<(), RenderError>,
    {
        GroupPrimitive {
            reconciler: self.reconciler,
            content: self.content,
            clip: Some(clip),
            properties: self.properties,
        }
    }

    /// Stages properties of the group node itself.
    pub fn with(mut self, customize: impl FnOnce(&mut Properties<kind::Group>)) -> Self {
        customize(&mut self.properties);
        self
    }

    /// Places the group, renders its content and clip, cleans it up and
    /// commits the group's own properties.
    ///
    /// # Errors
    ///
    /// Propagates errors of the content and clip functions, and returns
    /// [`RenderError::Clipping`] if the enclosing container already received
    /// its clip during this pass.
    pub fn finish(self) -> Result<NodeId, RenderError> {
        let Self {
            reconciler,
            content,
            clip,
            properties,
        } = self;

        let node = reconciler.resolve(NodeKind::Group)?;

        let mut nested = Reconciler::new(&mut *reconciler.scene, node);
        content(&mut nested)?;
        if let Some(clip) = clip {
            nested.begin_clipping();
            clip(&mut nested)?;
        }
        nested.finish();

        ChangeTracker::begin(reconciler.scene, node).commit(properties.into_pending());
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use draftkit_core::geometry::Matrix;
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::scene::Mutation;

    fn bounds() -> Bounds {
        Bounds::new(0.0, 0.0, 20.0, 10.0)
    }

    fn pass(scene: &mut Scene, render: impl FnOnce(&mut Reconciler<'_>) -> Result<(), RenderError>) {
        let root = scene.root();
        let mut reconciler = Reconciler::new(scene, root);
        render(&mut reconciler).unwrap();
        reconciler.finish();
    }

    #[test]
    fn test_second_identical_pass_is_mutation_free() {
        let mut scene = Scene::new();
        let render = |r: &mut Reconciler<'_>| -> Result<(), RenderError> {
            r.rectangle(1.0_f32, 2.0, bounds()).finish()?;
            r.text(TextConfig::new("Label"), bounds()).finish()?;
            r.group(|inner| {
                inner.ellipse(1.0_f32, bounds()).finish()?;
                Ok(())
            })
            .clip(|inner| {
                inner.rectangle(0.0_f32, 0.0, bounds()).finish()?;
                Ok(())
            })
            .finish()?;
            Ok(())
        };

        pass(&mut scene, render);
        let before = scene.stats();
        pass(&mut scene, render);

        assert_eq!(scene.stats().since(&before).mutations(), 0);
    }

    #[test]
    fn test_matching_kind_is_reused() {
        let mut scene = Scene::new();
        let root = scene.root();

        pass(&mut scene, |r| {
            r.rectangle(1.0_f32, 0.0, bounds()).finish()?;
            Ok(())
        });
        let first = scene.child_at(root, 0);

        pass(&mut scene, |r| {
            r.rectangle(3.0_f32, 5.0, Bounds::new(1.0, 1.0, 5.0, 5.0))
                .with(|p| {
                    p.set_fill(Color::new("red").unwrap());
                })
                .finish()?;
            Ok(())
        });

        assert_eq!(scene.child_at(root, 0), first);
        assert_eq!(scene.stats().created, 1);
        assert_eq!(scene.stats().removed, 0);
        let red = Color::new("red").unwrap().to_string();
        assert_eq!(scene.attribute(first.unwrap(), "fill"), Some(red.as_str()));
    }

    #[test]
    fn test_mismatched_kind_is_replaced_in_place() {
        let mut scene = Scene::new();
        let root = scene.root();

        pass(&mut scene, |r| {
            r.rectangle(1.0_f32, 0.0, bounds()).finish()?;
            r.text(TextConfig::new("After"), bounds()).finish()?;
            Ok(())
        });
        let rect = scene.child_at(root, 0).unwrap();
        let text = scene.child_at(root, 1).unwrap();

        pass(&mut scene, |r| {
            r.ellipse(1.0_f32, bounds()).finish()?;
            r.text(TextConfig::new("After"), bounds()).finish()?;
            Ok(())
        });

        assert_eq!(scene.child_count(root), 2);
        let ellipse = scene.child_at(root, 0).unwrap();
        assert_eq!(scene.kind(ellipse), Some(NodeKind::Ellipse));
        assert!(!scene.contains(rect));
        assert_eq!(scene.child_at(root, 1), Some(text));
    }

    #[test]
    fn test_replacement_is_inserted_before_removal() {
        let mut scene = Scene::new();
        pass(&mut scene, |r| {
            r.rectangle(1.0_f32, 0.0, bounds()).finish()?;
            Ok(())
        });

        scene.start_journal();
        pass(&mut scene, |r| {
            r.ellipse(1.0_f32, bounds()).finish()?;
            Ok(())
        });
        let journal = scene.take_journal();

        let created = journal
            .iter()
            .position(|m| matches!(m, Mutation::Created { .. }))
            .unwrap();
        let removed = journal
            .iter()
            .position(|m| matches!(m, Mutation::Removed { .. }))
            .unwrap();
        assert!(created < removed);
    }

    #[test]
    fn test_cleanup_removes_surplus_children() {
        let mut scene = Scene::new();
        let root = scene.root();

        pass(&mut scene, |r| {
            r.rectangle(1.0_f32, 0.0, bounds()).finish()?;
            r.ellipse(1.0_f32, bounds()).finish()?;
            r.path(1.0_f32, "M0,0 L10,10", None).finish()?;
            Ok(())
        });
        assert_eq!(scene.child_count(root), 3);

        pass(&mut scene, |r| {
            r.rectangle(1.0_f32, 0.0, bounds()).finish()?;
            Ok(())
        });
        assert_eq!(scene.child_count(root), 1);
        assert_eq!(scene.kind(scene.child_at(root, 0).unwrap()), Some(NodeKind::Rect));
    }

    #[test]
    fn test_second_clip_fails_and_keeps_first() {
        let mut scene = Scene::new();
        let root = scene.root();
        let mut reconciler = Reconciler::new(&mut scene, root);

        let result = reconciler
            .group(|_| Ok(()))
            .clip(|inner| {
                inner.rectangle(0.0_f32, 0.0, bounds()).finish()?;
                inner.ellipse(0.0_f32, bounds()).finish()?;
                Ok(())
            })
            .finish();
        assert_eq!(result, Err(RenderError::Clipping));

        let group = scene.child_at(root, 0).unwrap();
        let clip = scene.clip(group).unwrap();
        assert_eq!(scene.kind(clip), Some(NodeKind::Rect));
        assert_eq!(scene.attribute(clip, "width"), Some("20"));
    }

    #[test]
    fn test_clip_reused_replaced_and_removed() {
        let mut scene = Scene::new();
        let root = scene.root();
        let clipped = |kind: NodeKind| {
            move |r: &mut Reconciler<'_>| -> Result<(), RenderError> {
                r.group(|_| Ok(()))
                    .clip(move |inner| {
                        match kind {
                            NodeKind::Rect => inner.rectangle(0.0_f32, 0.0, bounds()).finish()?,
                            _ => inner.ellipse(0.0_f32, bounds()).finish()?,
                        };
                        Ok(())
                    })
                    .finish()?;
                Ok(())
            }
        };

        pass(&mut scene, clipped(NodeKind::Rect));
        let group = scene.child_at(root, 0).unwrap();
        let first = scene.clip(group).unwrap();

        pass(&mut scene, clipped(NodeKind::Rect));
        assert_eq!(scene.clip(group), Some(first));

        pass(&mut scene, clipped(NodeKind::Ellipse));
        let second = scene.clip(group).unwrap();
        assert_ne!(second, first);
        assert!(!scene.contains(first));
        assert_eq!(scene.kind(second), Some(NodeKind::Ellipse));

        pass(&mut scene, |r| {
            r.group(|_| Ok(())).finish()?;
            Ok(())
        });
        assert_eq!(scene.child_at(root, 0), Some(group));
        assert_eq!(scene.clip(group), None);
        assert!(!scene.contains(second));
    }

    #[test]
    fn test_nested_group_restores_outer_cursor() {
        let mut scene = Scene::new();
        let root = scene.root();

        pass(&mut scene, |r| {
            r.rectangle(1.0_f32, 0.0, bounds()).finish()?;
            r.group(|inner| {
                inner.ellipse(1.0_f32, bounds()).finish()?;
                inner.ellipse(1.0_f32, bounds()).finish()?;
                Ok(())
            })
            .finish()?;
            r.path(1.0_f32, "M0,0 L1,1", None).finish()?;
            assert_eq!(r.state(), PassState::Normal { cursor: 3 });
            Ok(())
        });

        assert_eq!(scene.child_count(root), 3);
        let group = scene.child_at(root, 1).unwrap();
        assert_eq!(scene.child_count(group), 2);
    }

    #[test]
    fn test_group_transform_sets_matrix() {
        let mut scene = Scene::new();
        let root = scene.root();

        pass(&mut scene, |r| {
            r.group(|inner| {
                inner.rectangle(0.0_f32, 0.0, bounds()).finish()?;
                Ok(())
            })
            .with(|p| {
                p.set_transform(Bounds::new(10.0, 5.0, 20.0, 10.0));
            })
            .finish()?;
            Ok(())
        });

        let group = scene.child_at(root, 0).unwrap();
        assert_eq!(scene.bounds(group), Bounds::new(10.0, 5.0, 20.0, 10.0));
    }

    #[test]
    fn test_path_is_fitted_into_bounds() {
        let mut scene = Scene::new();
        let root = scene.root();
        let target = Bounds::new(50.0, 60.0, 100.0, 100.0);
        let render = |r: &mut Reconciler<'_>| -> Result<(), RenderError> {
            r.path(1.0_f32, "M0,0 L10,10", target).finish()?;
            Ok(())
        };

        pass(&mut scene, render);
        let node = scene.child_at(root, 0).unwrap();
        let placed = scene.bounds(node);
        assert_approx_eq!(f32, placed.x(), 50.0, epsilon = 0.0001);
        assert_approx_eq!(f32, placed.y(), 60.0, epsilon = 0.0001);
        assert_approx_eq!(f32, placed.width(), 100.0, epsilon = 0.0001);
        assert_approx_eq!(f32, placed.height(), 100.0, epsilon = 0.0001);
        assert_eq!(scene.local_bounds(node), Bounds::new(0.0, 0.0, 10.0, 10.0));

        let before = scene.stats();
        pass(&mut scene, render);
        assert_eq!(scene.stats().since(&before).mutations(), 0);
    }

    #[test]
    fn test_path_placement_follows_data() {
        let mut scene = Scene::new();
        let root = scene.root();
        let target = Bounds::new(0.0, 0.0, 40.0, 40.0);

        pass(&mut scene, |r| {
            r.path(1.0_f32, "M0,0 L10,10", target).finish()?;
            Ok(())
        });
        pass(&mut scene, |r| {
            r.path(1.0_f32, "M0,0 L20,20", target).finish()?;
            Ok(())
        });

        let node = scene.child_at(root, 0).unwrap();
        assert_approx_eq!(f32, scene.bounds(node).width(), 40.0, epsilon = 0.0001);

        // Dropping the bounds keeps the sticky placement
        pass(&mut scene, |r| {
            r.path(1.0_f32, "M0,0 L20,20", None).finish()?;
            Ok(())
        });
        assert_approx_eq!(f32, scene.bounds(node).width(), 40.0, epsilon = 0.0001);
    }

    #[test]
    fn test_unplaced_path_and_outlines_keep_identity() {
        let mut scene = Scene::new();
        let root = scene.root();

        pass(&mut scene, |r| {
            r.path(1.0_f32, "M0,0 L10,10", None).finish()?;
            r.rounded_rectangle_left(1.0_f32, 4.0, bounds()).finish()?;
            Ok(())
        });

        for node in scene.children(root).to_vec() {
            assert_eq!(scene.matrix(node), Matrix::IDENTITY);
        }
    }

    #[test]
    fn test_text_config_defaults() {
        let mut scene = Scene::new();
        let root = scene.root();

        pass(&mut scene, |r| {
            r.text_multiline(TextConfig::new("Lines"), bounds()).finish()?;
            Ok(())
        });

        let node = scene.child_at(root, 0).unwrap();
        let block = scene.text_block(node).unwrap();
        assert_eq!(block.content(), "Lines");
        assert_eq!(block.style("font-size"), Some("10px"));
        assert_eq!(block.style("font-family"), Some("inherit"));
        assert_eq!(block.style("text-align"), Some("center"));
        assert_eq!(block.style("vertical-align"), Some("top"));
        let transparent = Color::transparent().to_string();
        assert_eq!(scene.attribute(node, "fill"), Some(transparent.as_str()));
    }
}
