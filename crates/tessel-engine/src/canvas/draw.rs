//! Drawing operations.
//!
//! Each method builds its shape(s) from the current state through
//! [`crate::geometry`] and queues them with [`Canvas::submit_shape`].

use crate::atlas::{Image, ImageFormat};
use crate::coords::Vec2;
use crate::geometry;
use crate::scene::{Direction, Line, ShaderId, ShapeKind};
use crate::text::{Font, Justification, Text};

use super::Canvas;

impl Canvas {
    // ── rectangles ────────────────────────────────────────────────────────

    pub fn fill(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.submit_shape(geometry::fill(&self.state, x, y, width, height));
    }

    pub fn rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.submit_shape(geometry::rectangle(&self.state, x, y, width, height));
    }

    pub fn rectangle_border(&mut self, x: f32, y: f32, width: f32, height: f32, thickness: f32) {
        self.submit_shape(geometry::rectangle_border(&self.state, x, y, width, height, thickness));
    }

    pub fn rounded_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, rounding: f32) {
        self.submit_shape(geometry::rounded_rectangle(&self.state, x, y, width, height, rounding));
    }

    pub fn left_rounded_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, rounding: f32) {
        let shape = geometry::left_rounded_rectangle(&self.state, x, y, width, height, rounding);
        self.submit_shape(shape);
    }

    pub fn right_rounded_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, rounding: f32) {
        let shape = geometry::right_rounded_rectangle(&self.state, x, y, width, height, rounding);
        self.submit_shape(shape);
    }

    pub fn top_rounded_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, rounding: f32) {
        let shape = geometry::top_rounded_rectangle(&self.state, x, y, width, height, rounding);
        self.submit_shape(shape);
    }

    pub fn bottom_rounded_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, rounding: f32) {
        let shape = geometry::bottom_rounded_rectangle(&self.state, x, y, width, height, rounding);
        self.submit_shape(shape);
    }

    /// Border of a rounded rectangle, drawn as four clamped strips so the
    /// corners are not covered twice.
    pub fn rounded_rectangle_border(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rounding: f32,
        thickness: f32,
    ) {
        let strips =
            geometry::rounded_rectangle_border(&self.state, x, y, width, height, rounding, thickness);
        for strip in strips {
            self.submit_shape(strip);
        }
    }

    pub fn rectangle_shadow(&mut self, x: f32, y: f32, width: f32, height: f32, blur_radius: f32) {
        if let Some(shape) = geometry::rectangle_shadow(&self.state, x, y, width, height, blur_radius) {
            self.submit_shape(shape);
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rounded_rectangle_shadow(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rounding: f32,
        blur_radius: f32,
    ) {
        let shape = geometry::rounded_rectangle_shadow(
            &self.state,
            x,
            y,
            width,
            height,
            rounding,
            blur_radius,
        );
        if let Some(shape) = shape {
            self.submit_shape(shape);
        }
    }

    // ── round shapes ──────────────────────────────────────────────────────

    pub fn circle(&mut self, x: f32, y: f32, width: f32) {
        self.submit_shape(geometry::circle(&self.state, x, y, width));
    }

    /// Circle whose edge fades out over `fade` pixels.
    pub fn fade_circle(&mut self, x: f32, y: f32, width: f32, fade: f32) {
        self.submit_shape(geometry::fade_circle(&self.state, x, y, width, fade));
    }

    pub fn ring(&mut self, x: f32, y: f32, width: f32, thickness: f32) {
        self.submit_shape(geometry::ring(&self.state, x, y, width, thickness));
    }

    pub fn squircle(&mut self, x: f32, y: f32, width: f32, power: f32) {
        self.submit_shape(geometry::squircle(&self.state, x, y, width, power));
    }

    pub fn squircle_border(&mut self, x: f32, y: f32, width: f32, power: f32, thickness: f32) {
        self.submit_shape(geometry::squircle_border(&self.state, x, y, width, power, thickness));
    }

    pub fn super_ellipse(&mut self, x: f32, y: f32, width: f32, height: f32, power: f32) {
        self.submit_shape(geometry::super_ellipse(&self.state, x, y, width, height, power));
    }

    pub fn diamond(&mut self, x: f32, y: f32, width: f32, rounding: f32) {
        self.submit_shape(geometry::diamond(&self.state, x, y, width, rounding));
    }

    // ── arcs, segments, curves ────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn rounded_arc(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
        center_radians: f32,
        radians: f32,
        pixel_width: f32,
    ) {
        let shape = geometry::rounded_arc(
            &self.state,
            x,
            y,
            width,
            thickness,
            center_radians,
            radians,
            pixel_width,
        );
        self.submit_shape(shape);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn flat_arc(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
        center_radians: f32,
        radians: f32,
        pixel_width: f32,
    ) {
        let shape = geometry::flat_arc(
            &self.state,
            x,
            y,
            width,
            thickness,
            center_radians,
            radians,
            pixel_width,
        );
        self.submit_shape(shape);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
        center_radians: f32,
        radians: f32,
        rounded: bool,
        pixel_width: f32,
    ) {
        let shape = geometry::arc(
            &self.state,
            x,
            y,
            width,
            thickness,
            center_radians,
            radians,
            rounded,
            pixel_width,
        );
        self.submit_shape(shape);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rounded_arc_shadow(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
        center_radians: f32,
        radians: f32,
        shadow_width: f32,
    ) {
        let shape = geometry::rounded_arc_shadow(
            &self.state,
            x,
            y,
            width,
            thickness,
            center_radians,
            radians,
            shadow_width,
        );
        self.submit_shape(shape);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn flat_arc_shadow(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
        center_radians: f32,
        radians: f32,
        shadow_width: f32,
    ) {
        let shape = geometry::flat_arc_shadow(
            &self.state,
            x,
            y,
            width,
            thickness,
            center_radians,
            radians,
            shadow_width,
        );
        self.submit_shape(shape);
    }

    pub fn segment(&mut self, a: Vec2, b: Vec2, thickness: f32, rounded: bool, pixel_width: f32) {
        self.submit_shape(geometry::segment(&self.state, a, b, thickness, rounded, pixel_width));
    }

    /// Quadratic bézier through control point `b`. Nearly straight curves are
    /// drawn as a rounded segment from `a` to `c`.
    pub fn quadratic(&mut self, a: Vec2, b: Vec2, c: Vec2, thickness: f32, pixel_width: f32) {
        self.submit_shape(geometry::quadratic(&self.state, a, b, c, thickness, pixel_width));
    }

    // ── triangles ─────────────────────────────────────────────────────────

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
        self.submit_shape(geometry::triangle(&self.state, a, b, c));
    }

    pub fn triangle_border(&mut self, a: Vec2, b: Vec2, c: Vec2, thickness: f32) {
        self.submit_shape(geometry::triangle_border(&self.state, a, b, c, thickness));
    }

    pub fn rounded_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, rounding: f32) {
        self.submit_shape(geometry::rounded_triangle(&self.state, a, b, c, rounding));
    }

    /// Rounding is clamped to the triangle's inradius.
    pub fn rounded_triangle_border(
        &mut self,
        a: Vec2,
        b: Vec2,
        c: Vec2,
        rounding: f32,
        thickness: f32,
    ) {
        let shape = geometry::rounded_triangle_border(&self.state, a, b, c, rounding, thickness);
        self.submit_shape(shape);
    }

    pub fn triangle_left(&mut self, x: f32, y: f32, width: f32) {
        self.submit_shape(geometry::triangle_left(&self.state, x, y, width));
    }

    pub fn triangle_right(&mut self, x: f32, y: f32, width: f32) {
        self.submit_shape(geometry::triangle_right(&self.state, x, y, width));
    }

    pub fn triangle_up(&mut self, x: f32, y: f32, width: f32) {
        self.submit_shape(geometry::triangle_up(&self.state, x, y, width));
    }

    pub fn triangle_down(&mut self, x: f32, y: f32, width: f32) {
        self.submit_shape(geometry::triangle_down(&self.state, x, y, width));
    }

    // ── text, images, shaders, lines ──────────────────────────────────────

    /// Caches `string` in the active region and draws it. Empty strings draw
    /// nothing.
    ///
    /// # Panics
    /// When `font` has no packed glyph atlas.
    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        string: &str,
        font: &Font,
        justification: Justification,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        direction: Direction,
    ) {
        if string.is_empty() {
            return;
        }
        let text = Text::new(string, font.clone(), justification);
        self.text_block(text, x, y, width, height, direction);
    }

    /// Draws a pre-built text block.
    ///
    /// # Panics
    /// When the text's font has no packed glyph atlas.
    pub fn text_block(&mut self, text: Text, x: f32, y: f32, width: f32, height: f32, direction: Direction) {
        assert!(
            text.font().packed_font().is_some(),
            "text drawn with font '{}' that has no packed glyphs",
            text.font().family()
        );
        if text.is_empty() || !self.box_visible(x, y, width, height) {
            return;
        }
        let id = self.current_region_mut().add_text(text);
        self.submit_shape(geometry::text(&self.state, id, x, y, width, height, direction));
    }

    /// Draws a raster image at its own size.
    pub fn image(&mut self, image: &Image, x: f32, y: f32) {
        let (width, height) = (image.width as f32, image.height as f32);
        if !self.box_visible(x, y, width, height) {
            return;
        }
        let handle = self.image_atlas.add_image(image);
        self.submit_shape(geometry::image(&self.state, handle, x, y, width, height));
    }

    /// Draws an SVG rasterized at its target size; blur is applied by the rasterizer.
    pub fn svg(&mut self, svg: &Image, x: f32, y: f32) {
        debug_assert_eq!(svg.format, ImageFormat::Svg, "svg() expects an SVG image");
        self.image(svg, x, y);
    }

    pub fn shader(&mut self, shader: ShaderId, x: f32, y: f32, width: f32, height: f32) {
        self.submit_shape(geometry::shader(&self.state, shader, x, y, width, height));
    }

    /// Polyline through `line`'s points, scaled into the given box.
    #[allow(clippy::too_many_arguments)]
    pub fn line(&mut self, line: &Line, x: f32, y: f32, width: f32, height: f32, line_width: f32) {
        if !self.box_visible(x, y, width, height) {
            return;
        }
        let id = self.current_region_mut().add_line(line.clone());
        self.submit_shape(geometry::line(&self.state, id, x, y, width, height, line_width));
    }

    /// Area between `line` and the horizontal at `fill_position` (0 top, 1 bottom).
    #[allow(clippy::too_many_arguments)]
    pub fn line_fill(&mut self, line: &Line, x: f32, y: f32, width: f32, height: f32, fill_position: f32) {
        if !self.box_visible(x, y, width, height) {
            return;
        }
        let id = self.current_region_mut().add_line(line.clone());
        self.submit_shape(geometry::line_fill(&self.state, id, x, y, width, height, fill_position));
    }

    /// Whether a shape over this box would survive culling. Checked before
    /// anything is cached so clamped-out draws leave no trace.
    fn box_visible(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        self.state.shape(ShapeKind::Fill, x, y, width, height).visible_bounds().is_some()
    }
}
