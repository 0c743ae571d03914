//! Colors and metrics shared by the built-in controls.

/// Text color of controls, as a packed `0xRRGGBB` value.
pub const CONTROL_TEXT_COLOR: u32 = 0x292929;
pub const CONTROL_BACKGROUND_COLOR: u32 = 0xffffff;
pub const CONTROL_BORDER_COLOR: u32 = 0x9a9a9a;
pub const CONTROL_BORDER_THICKNESS: f32 = 1.0;
pub const CONTROL_BORDER_RADIUS: f32 = 4.0;
pub const CONTROL_FONT_SIZE: f32 = 16.0;
