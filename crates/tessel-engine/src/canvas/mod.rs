//! The drawing context.
//!
//! [`Canvas`] owns the drawing-state stack, the region tree, the layer table
//! and both atlases. Drawing methods are thin wrappers: each builds a shape
//! through [`crate::geometry`] from the current [`DrawState`] and hands it to
//! [`Canvas::submit_shape`], which culls and queues it into the active region.
//!
//! Typical frame:
//! 1. `update_time(t)`
//! 2. for each region to redraw: `begin_region(id)`, draw calls, `end_region()`
//! 3. `submit(&mut backend, pass)`

mod config;
mod draw;
mod regions;
mod state;
mod submit;

pub use config::CanvasConfig;
pub use state::DrawState;

use crate::atlas::{GradientAtlas, ImageAtlas};
use crate::backend::Screenshot;
use crate::coords::{ClampBounds, Rect};
use crate::layer::Layer;
use crate::paint::{BlendMode, Brush, Color};
use crate::region::{Region, RegionArena, RegionId};
use crate::scene::Shape;
use crate::theme::{ColorId, OverrideId, Palette, ValueId};
use crate::time::FrameTime;

pub struct Canvas {
    config: CanvasConfig,
    palette: Option<Palette>,

    width_scale: f32,
    height_scale: f32,
    dpi_scale: f32,
    time: FrameTime,

    state: DrawState,
    state_memory: Vec<DrawState>,

    gradient_atlas: GradientAtlas,
    image_atlas: ImageAtlas,

    regions: RegionArena,
    window_region: RegionId,
    default_region: RegionId,
    /// Index 0 is the composite layer; intermediate layers follow densely.
    layers: Vec<Layer>,

    screenshot_requested: bool,
    screenshot: Screenshot,
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        let mut regions = RegionArena::new();
        let window_region = regions.insert(Region::new(0, 0));

        let mut default = Region::new(0, 0);
        default.parent = Some(window_region);
        let default_region = regions.insert(default);
        if let Some(window) = regions.get_mut(window_region) {
            window.sub_regions.push(default_region);
        }

        let state = DrawState { region: Some(default_region), ..DrawState::default() };

        log::debug!(
            "canvas created (gradient resolution {}, dpi {})",
            config.gradient_resolution,
            config.dpi_scale
        );

        Self {
            gradient_atlas: GradientAtlas::new(
                config.gradient_resolution,
                config.gradient_atlas_size,
                config.atlas_padding,
            ),
            image_atlas: ImageAtlas::new(config.image_atlas_size, config.atlas_padding),
            width_scale: 1.0,
            height_scale: 1.0,
            dpi_scale: config.dpi_scale,
            time: FrameTime::new(),
            palette: None,
            state,
            state_memory: Vec::new(),
            regions,
            window_region,
            default_region,
            layers: vec![Layer::composite()],
            screenshot_requested: false,
            screenshot: Screenshot::default(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    // ── dimensions ────────────────────────────────────────────────────────

    /// Resizes the window and default regions and the composite layer.
    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        let (w, h) = (width as i32, height as i32);
        for id in [self.window_region, self.default_region] {
            self.region_mut(id).set_bounds(0, 0, w, h);
        }
        self.layers[0].set_dimensions(width, height);
        if self.state.region == Some(self.default_region) {
            self.state.clamp = ClampBounds::from_rect(0.0, 0.0, width as f32, height as f32);
        }
        log::debug!("canvas resized to {width}x{height}");
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.layers[0].width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.layers[0].height()
    }

    #[inline]
    pub fn width_scale(&self) -> f32 {
        self.width_scale
    }

    #[inline]
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    #[inline]
    pub fn dpi_scale(&self) -> f32 {
        self.dpi_scale
    }

    pub fn set_width_scale(&mut self, scale: f32) {
        self.width_scale = scale;
    }

    pub fn set_height_scale(&mut self, scale: f32) {
        self.height_scale = scale;
    }

    pub fn set_dpi_scale(&mut self, scale: f32) {
        self.dpi_scale = scale;
    }

    // ── time ──────────────────────────────────────────────────────────────

    pub fn update_time(&mut self, time: f64) {
        self.time.update(time);
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time.time()
    }

    #[inline]
    pub fn delta_time(&self) -> f64 {
        self.time.delta()
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.time.frame_count()
    }

    #[inline]
    pub fn refresh_rate(&self) -> f64 {
        self.time.refresh_rate()
    }

    // ── state stack ───────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn save_state(&mut self) {
        self.state_memory.push(self.state);
    }

    /// Pops the state pushed by the matching [`save_state`](Self::save_state).
    ///
    /// # Panics
    /// When no state was saved.
    pub fn restore_state(&mut self) {
        match self.state_memory.pop() {
            Some(state) => self.state = state,
            None => panic!("restore_state called without a matching save_state"),
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.state.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.state.y
    }

    /// Moves the drawing origin by `(x, y)`.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.state.x += x;
        self.state.y += y;
    }

    // ── clamp ─────────────────────────────────────────────────────────────

    /// Replaces the clamp with a rectangle relative to the drawing origin.
    ///
    /// # Panics
    /// When `width` or `height` is negative.
    pub fn set_clamp_bounds(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let origin = self.state.origin();
        self.state.clamp = ClampBounds::from_rect(origin.x + x, origin.y + y, width, height);
    }

    /// Replaces the clamp with bounds already in region space.
    pub fn set_clamp(&mut self, clamp: ClampBounds) {
        self.state.clamp = clamp;
    }

    /// Intersects the clamp with a rectangle relative to the drawing origin.
    pub fn trim_clamp_bounds(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let origin = self.state.origin();
        self.state.clamp = self.state.clamp.clamp(origin.x + x, origin.y + y, width, height);
    }

    pub fn move_clamp_bounds(&mut self, x_offset: f32, y_offset: f32) {
        self.state.clamp = self.state.clamp.moved(x_offset, y_offset);
    }

    #[inline]
    pub fn current_clamp_bounds(&self) -> ClampBounds {
        self.state.clamp
    }

    #[inline]
    pub fn totally_clamped(&self) -> bool {
        self.state.clamp.totally_clamped()
    }

    // ── paint ─────────────────────────────────────────────────────────────

    pub fn set_blend_mode(&mut self, blend_mode: BlendMode) {
        self.state.blend_mode = blend_mode;
    }

    /// Resolves `brush` through the active region and makes it current.
    pub fn set_brush(&mut self, brush: &Brush) {
        let id = self.current_region_id();
        let region = expect_region(&mut self.regions, id);
        self.state.brush = Some(region.add_brush(&mut self.gradient_atlas, brush));
    }

    pub fn set_color(&mut self, color: Color) {
        self.set_brush(&Brush::solid(color));
    }

    /// Sets a solid color from `0xAARRGGBB`.
    pub fn set_color_argb(&mut self, argb: u32) {
        self.set_brush(&Brush::from_argb(argb));
    }

    pub fn set_color_id(&mut self, id: ColorId) {
        let brush = self.color(id);
        self.set_brush(&brush);
    }

    pub fn set_blended_color(&mut self, from: ColorId, to: ColorId, t: f32) {
        let brush = self.blended_color(from, to, t);
        self.set_brush(&brush);
    }

    // ── theme ─────────────────────────────────────────────────────────────

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = Some(palette);
    }

    #[inline]
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    pub fn set_palette_override(&mut self, id: OverrideId) {
        self.state.palette_override = id;
    }

    /// Palette brush for `id` under the current override.
    ///
    /// Unknown ids resolve to transparent.
    pub fn color(&self, id: ColorId) -> Brush {
        let found = self
            .palette
            .as_ref()
            .and_then(|p| p.color(self.state.palette_override, id));
        match found {
            Some(brush) => brush.clone(),
            None => {
                log::warn!("no palette color for {:?}", id);
                Brush::solid(Color::transparent())
            }
        }
    }

    pub fn blended_color(&self, from: ColorId, to: ColorId, t: f32) -> Brush {
        self.color(from).interpolate_with(&self.color(to), t)
    }

    /// Palette value for `id`; unknown ids resolve to 0.
    pub fn value(&self, id: ValueId) -> f32 {
        let found = self
            .palette
            .as_ref()
            .and_then(|p| p.value(self.state.palette_override, id));
        found.unwrap_or_else(|| {
            log::warn!("no palette value for {:?}", id);
            0.0
        })
    }

    // ── atlases ───────────────────────────────────────────────────────────

    #[inline]
    pub fn gradient_atlas(&self) -> &GradientAtlas {
        &self.gradient_atlas
    }

    #[inline]
    pub fn image_atlas(&self) -> &ImageAtlas {
        &self.image_atlas
    }

    // ── shapes ────────────────────────────────────────────────────────────

    /// Queues `shape` into the active region. Shapes with nothing inside their
    /// clamp are dropped.
    ///
    /// # Panics
    /// When no region is active or the active region was removed.
    pub fn submit_shape(&mut self, shape: Shape) {
        if shape.visible_bounds().is_none() {
            log::trace!("culled {:?} at ({}, {})", shape.tag(), shape.x, shape.y);
            return;
        }
        self.current_region_mut().add_shape(shape);
    }

    /// Drops every queued shape of every region. Atlases are kept, but
    /// gradient rows only those regions referenced become reclaimable.
    ///
    /// Brushes are cleared from the current and every saved state, since
    /// their indices no longer name anything.
    pub fn clear_drawn_shapes(&mut self) {
        for (_, region) in self.regions.iter_mut() {
            region.clear(&mut self.gradient_atlas);
        }
        self.state.brush = None;
        for saved in &mut self.state_memory {
            saved.brush = None;
        }
    }

    // ── screenshot ────────────────────────────────────────────────────────

    /// Asks the next [`submit`](Self::submit) to capture the composite target.
    pub fn request_screenshot(&mut self) {
        self.screenshot_requested = true;
    }

    /// Most recent capture; empty until a requested submit has run.
    #[inline]
    pub fn screenshot(&self) -> &Screenshot {
        &self.screenshot
    }

    // ── diagnostics ───────────────────────────────────────────────────────

    /// Human-readable description of batching, atlas and layer state.
    pub fn debug_info(&self) -> Vec<String> {
        let mut info = vec![
            format!(
                "canvas {}x{} dpi {:.2} frame {} ({:.1} fps)",
                self.width(),
                self.height(),
                self.dpi_scale,
                self.frame_count(),
                self.refresh_rate()
            ),
            format!(
                "gradient atlas {}x{}: {} gradients",
                self.gradient_atlas.width(),
                self.gradient_atlas.height(),
                self.gradient_atlas.len()
            ),
            format!(
                "image atlas {}x{}: {} images, {} pending",
                self.image_atlas.width(),
                self.image_atlas.height(),
                self.image_atlas.len(),
                self.image_atlas.pending_len()
            ),
        ];

        let (shapes, batches) = self
            .regions
            .iter()
            .fold((0, 0), |(s, b), (_, r)| (s + r.shape_count(), b + r.batcher().batches().len()));
        info.push(format!(
            "{} regions: {} shapes in {} batches",
            self.regions.len(),
            shapes,
            batches
        ));

        for layer in &self.layers {
            info.push(format!(
                "layer {} {}x{}: {} packed regions, {} invalid rects",
                layer.index(),
                layer.width(),
                layer.height(),
                layer.packed_len(),
                layer.invalid_rects().len()
            ));
        }
        info
    }

    // ── region lookup ─────────────────────────────────────────────────────

    fn current_region_id(&self) -> RegionId {
        match self.state.region {
            Some(id) => id,
            None => panic!("drawing with no active region"),
        }
    }

    fn current_region_mut(&mut self) -> &mut Region {
        let id = self.current_region_id();
        expect_region(&mut self.regions, id)
    }

    /// # Panics
    /// When `id` refers to a removed region.
    pub fn region(&self, id: RegionId) -> &Region {
        match self.regions.get(id) {
            Some(region) => region,
            None => panic!("stale region handle {:?}", id),
        }
    }

    fn region_mut(&mut self, id: RegionId) -> &mut Region {
        expect_region(&mut self.regions, id)
    }

    /// Region bounds in window coordinates, ignoring layer packing.
    fn absolute_bounds(&self, id: RegionId) -> Rect {
        let region = self.region(id);
        let mut bounds = region.bounds();
        let mut parent = region.parent();
        while let Some(p) = parent {
            let r = self.region(p);
            bounds = bounds.translated(r.position());
            parent = r.parent();
        }
        bounds
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

fn expect_region(regions: &mut RegionArena, id: RegionId) -> &mut Region {
    match regions.get_mut(id) {
        Some(region) => region,
        None => panic!("stale region handle {:?}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Palette;

    fn canvas(width: u32, height: u32) -> Canvas {
        let mut canvas = Canvas::new();
        canvas.set_dimensions(width, height);
        canvas
    }

    #[test]
    fn save_restore_round_trips_every_field() {
        let mut c = canvas(100, 100);
        c.set_position(3, 4);
        c.set_color(Color::white());
        c.set_blend_mode(BlendMode::Add);
        c.set_palette_override(OverrideId(7));
        c.set_clamp_bounds(1.0, 2.0, 30.0, 40.0);
        let before = *c.state();

        c.save_state();
        c.restore_state();
        assert_eq!(*c.state(), before);
    }

    #[test]
    fn clear_drops_brushes_from_saved_states() {
        let mut c = canvas(100, 100);
        c.set_color(Color::white());
        c.save_state();
        c.clear_drawn_shapes();
        c.set_color(Color::black());
        c.restore_state();
        assert_eq!(c.state().brush, None);
    }

    #[test]
    fn per_frame_colors_do_not_grow_gradient_atlas() {
        let mut c = canvas(100, 100);
        let id = c.create_region(0, 0, 50, 50);
        c.add_region(id);
        let size = (c.gradient_atlas().width(), c.gradient_atlas().height());

        for frame in 0..2000u32 {
            c.begin_region(id);
            c.set_color_argb(0xff000000 | frame);
            c.rectangle(0.0, 0.0, 10.0, 10.0);
            c.end_region();
            c.clear_drawn_shapes();
        }

        let atlas = c.gradient_atlas();
        assert_eq!((atlas.width(), atlas.height()), size);
        assert_eq!(atlas.live_len(), 0);
    }

    #[test]
    fn nested_state_restores_in_order() {
        let mut c = canvas(100, 100);
        c.save_state();
        c.set_position(10, 0);
        c.save_state();
        c.set_position(5, 0);
        assert_eq!(c.x(), 15);
        c.restore_state();
        assert_eq!(c.x(), 10);
        c.restore_state();
        assert_eq!(c.x(), 0);
    }

    #[test]
    #[should_panic(expected = "without a matching save_state")]
    fn unbalanced_restore_panics() {
        let mut c = canvas(10, 10);
        c.restore_state();
    }

    #[test]
    fn clamp_bounds_keep_requested_extent() {
        let mut c = canvas(100, 100);
        c.set_position(5, 5);
        c.set_clamp_bounds(2.0, 3.0, 20.0, 10.0);
        let clamp = c.current_clamp_bounds();
        assert_eq!(clamp.right - clamp.left, 20.0);
        assert_eq!(clamp.bottom - clamp.top, 10.0);
        assert_eq!(clamp.left, 7.0);
        assert!(!c.totally_clamped());
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn negative_clamp_panics() {
        let mut c = canvas(10, 10);
        c.set_clamp_bounds(0.0, 0.0, -1.0, 5.0);
    }

    #[test]
    fn trim_never_widens() {
        let mut c = canvas(100, 100);
        c.set_clamp_bounds(10.0, 10.0, 20.0, 20.0);
        c.trim_clamp_bounds(0.0, 0.0, 200.0, 15.0);
        assert_eq!(c.current_clamp_bounds(), ClampBounds::new(10.0, 10.0, 30.0, 15.0));
        c.move_clamp_bounds(5.0, 0.0);
        assert_eq!(c.current_clamp_bounds(), ClampBounds::new(15.0, 10.0, 35.0, 15.0));
    }

    #[test]
    fn resize_resets_default_clamp() {
        let c = canvas(64, 32);
        assert_eq!(c.current_clamp_bounds(), ClampBounds::new(0.0, 0.0, 64.0, 32.0));
        assert_eq!((c.width(), c.height()), (64, 32));
    }

    #[test]
    fn palette_lookup_honours_override() {
        let mut palette = Palette::new();
        palette.set_color(OverrideId::DEFAULT, ColorId(1), Color::black());
        palette.set_color(OverrideId(2), ColorId(1), Color::white());
        palette.set_value(OverrideId::DEFAULT, ValueId(3), 4.5);

        let mut c = canvas(10, 10);
        c.set_palette(palette);
        assert_eq!(c.color(ColorId(1)), Brush::solid(Color::black()));
        c.set_palette_override(OverrideId(2));
        assert_eq!(c.color(ColorId(1)), Brush::solid(Color::white()));
        assert_eq!(c.value(ValueId(3)), 4.5);
        assert_eq!(c.value(ValueId(9)), 0.0);
        assert_eq!(c.color(ColorId(9)), Brush::solid(Color::transparent()));
    }

    #[test]
    fn blended_color_interpolates() {
        let mut palette = Palette::new();
        palette.set_color(OverrideId::DEFAULT, ColorId(0), Color::black());
        palette.set_color(OverrideId::DEFAULT, ColorId(1), Color::white());
        let mut c = canvas(10, 10);
        c.set_palette(palette);
        assert_eq!(c.blended_color(ColorId(0), ColorId(1), 0.0), Brush::solid(Color::black()));
        assert_eq!(c.blended_color(ColorId(0), ColorId(1), 1.0), Brush::solid(Color::white()));
    }

    #[test]
    fn time_accessors_follow_updates() {
        let mut c = Canvas::new();
        c.update_time(1.0);
        c.update_time(1.25);
        assert_eq!(c.time(), 1.25);
        assert_eq!(c.delta_time(), 0.25);
        assert_eq!(c.frame_count(), 2);
    }

    #[test]
    fn debug_info_mentions_every_layer() {
        let mut c = canvas(10, 10);
        c.ensure_layer_exists(2);
        let info = c.debug_info();
        assert!(info.iter().any(|l| l.starts_with("layer 2")));
        assert!(info.iter().any(|l| l.contains("gradient atlas")));
    }
}
