//! Draftkit Core Types and Definitions
//!
//! This crate provides the data model that wireframe shape plugins read while
//! rendering. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes, bounds and affine matrices ([`geometry`] module)
//! - **Style**: Stroke caps/joins and text alignments ([`style`] module)
//! - **Appearance**: The ordered key-value styling bag of an item ([`appearance`] module)
//! - **Items**: Diagram items and their transforms ([`item`] module)
//! - **Configurables**: Editable property descriptors ([`configurable`] module)
//! - **Paths**: Rounded outline builders and path bounds ([`path`] module)

pub mod appearance;
pub mod color;
pub mod configurable;
pub mod geometry;
pub mod identifier;
pub mod item;
pub mod path;
pub mod style;
