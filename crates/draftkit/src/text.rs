//! Text measurement backed by cosmic-text.
//!
//! Shapes measure text while rendering to size themselves around their
//! labels. The shared [`FontSystem`] is created on first use and reused for
//! every measurement afterwards.

use std::sync::{Arc, Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use draftkit_core::item::DEFAULT_FONT_FAMILY;

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

/// Measures the rendered width of `text` in pixels.
///
/// The result includes one extra pixel of slack so that text placed in a box
/// of exactly the measured width does not wrap. Returns `None` for empty text.
///
/// # Arguments
///
/// * `text` - The text content to measure
/// * `font_size` - Font size in pixels
/// * `font_family` - Font family name; [`DEFAULT_FONT_FAMILY`] resolves to sans-serif
pub fn measure_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() {
        return None;
    }
    let width = TEXT_MANAGER
        .get_or_init(TextManager::new)
        .text_width(text, font_size, font_family);
    Some(width + 1.0)
}

/// TextManager keeps one FontSystem alive across measurements
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Width of the widest layout run of `text`.
    fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        let font_size = if font_size > 0.0 { font_size } else { 1.0 };
        let metrics = Metrics::new(font_size, font_size * 1.2);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let family = if font_family.is_empty() || font_family == DEFAULT_FONT_FAMILY {
            Family::SansSerif
        } else {
            Family::Name(font_family)
        };
        let attrs = Attrs::new().family(family);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(0.0_f32, f32::max);

        if width > 0.0 {
            width
        } else {
            // No glyphs shaped, e.g. no fonts installed.
            text.chars().count() as f32 * font_size * 0.55
        }
    }
}
