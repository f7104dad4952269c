use std::sync::Arc;

/// Handle to a font the text backend has packed into its glyph atlas.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub u32);

/// Font request: family name and size in logical pixels.
///
/// A font is usable for drawing only once the backend has realized it and
/// assigned a [`FontId`].
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    family: Arc<str>,
    size: f32,
    packed: Option<FontId>,
}

impl Font {
    pub fn new(family: impl Into<Arc<str>>, size: f32) -> Self {
        Self { family: family.into(), size, packed: None }
    }

    /// Same font, marked as realized by the backend.
    pub fn with_packed(mut self, id: FontId) -> Self {
        self.packed = Some(id);
        self
    }

    #[inline]
    pub fn family(&self) -> &str {
        &self.family
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn packed_font(&self) -> Option<FontId> {
        self.packed
    }
}

/// Placement of laid-out text inside its box.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Justification {
    #[default]
    Center,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}
