/// Construction-time settings for a [`Canvas`](super::Canvas).
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Texels per gradient row in the gradient atlas.
    pub gradient_resolution: u32,
    /// Initial edge length of the gradient atlas; it grows on demand.
    pub gradient_atlas_size: u32,
    /// Initial edge length of the image atlas; it grows on demand.
    pub image_atlas_size: u32,
    /// Gap kept between packed atlas entries.
    pub atlas_padding: u32,
    /// Initial edge length of intermediate layers.
    pub layer_size: u32,
    /// Gap kept between regions packed into an intermediate layer.
    pub layer_padding: u32,
    pub dpi_scale: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            gradient_resolution: 64,
            gradient_atlas_size: 128,
            image_atlas_size: 512,
            atlas_padding: 1,
            layer_size: 256,
            layer_padding: 1,
            dpi_scale: 1.0,
        }
    }
}
