//! Text objects as the canvas sees them.
//!
//! Shaping, layout and glyph rasterization belong to the text backend; the
//! canvas only caches [`Text`] values per region and checks that their font
//! has been realized before queueing them.

mod font;

pub use font::{Font, FontId, Justification};

/// A string with the font and alignment it should be laid out with.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    string: String,
    font: Font,
    justification: Justification,
}

impl Text {
    pub fn new(string: impl Into<String>, font: Font, justification: Justification) -> Self {
        Self { string: string.into(), font, justification }
    }

    #[inline]
    pub fn string(&self) -> &str {
        &self.string
    }

    #[inline]
    pub fn font(&self) -> &Font {
        &self.font
    }

    #[inline]
    pub fn justification(&self) -> Justification {
        self.justification
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.string.is_empty()
    }
}
