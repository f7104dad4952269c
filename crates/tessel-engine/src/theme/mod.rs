//! Theme identifiers and the palette the canvas forwards lookups to.
//!
//! The canvas only carries an [`OverrideId`] in its drawing state; colors and
//! values are resolved here on demand.

use std::collections::HashMap;

use crate::paint::Brush;

/// Identifies a themed color slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ColorId(pub u32);

/// Identifies a themed scalar (sizes, roundings, ...).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ValueId(pub u32);

/// Selects an alternate set of palette entries. `OverrideId::DEFAULT` is the base set.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct OverrideId(pub u32);

impl OverrideId {
    pub const DEFAULT: OverrideId = OverrideId(0);
}

/// Palette of themed brushes and values, keyed by override.
///
/// Lookups under a non-default override fall back to the default set.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: HashMap<(OverrideId, ColorId), Brush>,
    values: HashMap<(OverrideId, ValueId), f32>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_color(&mut self, override_id: OverrideId, id: ColorId, brush: impl Into<Brush>) {
        self.colors.insert((override_id, id), brush.into());
    }

    pub fn set_value(&mut self, override_id: OverrideId, id: ValueId, value: f32) {
        self.values.insert((override_id, id), value);
    }

    pub fn color(&self, override_id: OverrideId, id: ColorId) -> Option<&Brush> {
        self.colors
            .get(&(override_id, id))
            .or_else(|| self.colors.get(&(OverrideId::DEFAULT, id)))
    }

    pub fn value(&self, override_id: OverrideId, id: ValueId) -> Option<f32> {
        self.values
            .get(&(override_id, id))
            .or_else(|| self.values.get(&(OverrideId::DEFAULT, id)))
            .copied()
    }
}
