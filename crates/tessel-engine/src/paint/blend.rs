/// How a shape's output combines with what is already in the target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BlendMode {
    /// Overwrites the destination.
    Opaque,
    /// Premultiplied source-over.
    #[default]
    Alpha,
    Add,
    Sub,
    Mult,
    /// Adds coverage to the destination alpha only.
    MaskAdd,
    /// Removes coverage from the destination alpha only.
    MaskRemove,
}
