//! Built-in wireframe shapes.
//!
//! Each shape is a unit struct implementing [`ShapePlugin`](crate::plugin::ShapePlugin).
//! Shared colors and metrics live in [`theme`].

mod button_bar;
mod dropdown;
mod icon;
mod image;
mod radio_button;
mod rectangle;
pub mod theme;

pub use button_bar::ButtonBar;
pub use dropdown::Dropdown;
pub use icon::Icon;
pub use image::Image;
pub use radio_button::RadioButton;
pub use rectangle::Rectangle;
