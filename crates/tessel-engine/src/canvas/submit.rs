//! Presentation targets and submission to the backend.

use anyhow::Context;
use raw_window_handle::RawWindowHandle;

use crate::backend::{LayerSubmission, RenderBackend};
use crate::coords::{ClampBounds, Rect, Vec2};
use crate::layer::LayerTarget;
use crate::paint::{BlendMode, PackedBrush};
use crate::region::RegionId;
use crate::render::{shape_params, BrushInstance, ParamContext, ShapeInstance};
use crate::scene::{Shape, ShapeKind, ShapeTag};

use super::Canvas;

impl Canvas {
    /// Whether this build can present to native windows.
    pub fn swap_chain_supported() -> bool {
        cfg!(any(
            target_os = "windows",
            target_os = "macos",
            target_os = "linux",
            target_os = "ios",
            target_os = "android"
        ))
    }

    /// Presents the composite layer to `handle`.
    ///
    /// # Panics
    /// When the build has no swap chain support.
    pub fn pair_to_window(&mut self, handle: RawWindowHandle, width: u32, height: u32) {
        assert!(Self::swap_chain_supported(), "no swap chain support on this platform");
        self.layers[0].pair_to_window(handle, width, height);
        self.set_dimensions(width, height);
        log::debug!("canvas paired to window ({width}x{height})");
    }

    /// Renders the composite layer off screen instead of to a window.
    pub fn set_windowless(&mut self, width: u32, height: u32) {
        self.layers[0].set_headless(width, height);
        self.set_dimensions(width, height);
        log::debug!("canvas set windowless ({width}x{height})");
    }

    pub fn remove_from_window(&mut self) {
        self.layers[0].unbind();
        log::debug!("canvas removed from window");
    }

    #[inline]
    pub fn target(&self) -> LayerTarget {
        self.layers[0].target()
    }

    /// Sends every layer with invalid area to `backend`, intermediate layers
    /// from the highest index down and the composite layer last. Pass numbers
    /// start at `submit_pass`.
    ///
    /// Returns the number of layers submitted.
    pub fn submit(&mut self, backend: &mut dyn RenderBackend, submit_pass: usize) -> anyhow::Result<usize> {
        self.upload_atlases(backend)?;

        let mut passes = 0;
        for index in (1..self.layers.len()).rev() {
            let layer = &self.layers[index];
            if !layer.has_invalid_rects() {
                continue;
            }
            if layer.packed_len() == 0 {
                self.layers[index].clear_invalid_rects();
                continue;
            }

            let submission = self.build_submission(index, submit_pass + passes);
            backend
                .submit_layer(&submission)
                .with_context(|| format!("submitting layer {index}"))?;
            self.layers[index].clear_invalid_rects();
            passes += 1;

            let packed: Vec<RegionId> = self.layers[index].packed_regions().collect();
            for id in packed {
                self.invalidate_destination(id);
            }
        }

        let target = self.layers[0].target();
        if target.is_bound() {
            if self.layers[0].has_invalid_rects() {
                let submission = self.build_submission(0, submit_pass + passes);
                backend
                    .submit_layer(&submission)
                    .context("submitting composite layer 0")?;
                self.layers[0].clear_invalid_rects();
                passes += 1;
            }

            if self.screenshot_requested {
                self.screenshot = backend
                    .capture(target, self.width(), self.height())
                    .context("capturing screenshot")?;
                self.screenshot_requested = false;
            }
        }

        log::trace!("submitted {passes} passes starting at {submit_pass}");
        Ok(passes)
    }

    fn upload_atlases(&mut self, backend: &mut dyn RenderBackend) -> anyhow::Result<()> {
        if self.gradient_atlas.take_dirty() {
            let atlas = &self.gradient_atlas;
            backend
                .upload_gradients(atlas.width(), atlas.height(), atlas.texels())
                .context("uploading gradient atlas")?;
        }

        let uploads = self.image_atlas.take_pending_uploads();
        if !uploads.is_empty() {
            backend
                .upload_images(self.image_atlas.width(), self.image_atlas.height(), &uploads)
                .context("uploading images")?;
        }
        Ok(())
    }

    fn build_submission(&self, index: usize, pass: usize) -> LayerSubmission {
        let layer = &self.layers[index];
        let mut submission =
            LayerSubmission::new(pass, index, layer.target(), layer.width(), layer.height());
        submission.invalid_rects = layer.invalid_rects().to_vec();

        if layer.is_composite() {
            self.collect_region(self.window_region, Vec2::zero(), layer.bounds(), &mut submission);
        } else {
            for id in layer.packed_regions() {
                if let Some(rect) = layer.packed_rect(id) {
                    self.collect_region(id, rect.origin, rect, &mut submission);
                }
            }
        }
        submission
    }

    /// Appends `id`'s batches and then its children's, in paint order.
    /// Children packed into an intermediate layer are sampled from it instead.
    fn collect_region(&self, id: RegionId, origin: Vec2, clip: Rect, submission: &mut LayerSubmission) {
        let Some(region) = self.regions.get(id) else { return };
        if !region.is_visible() {
            return;
        }
        let Some(clip) = clip.intersect(region.local_bounds().translated(origin)) else { return };

        let ctx = ParamContext {
            text_base: submission.texts.len() as u32,
            line_base: submission.lines.len() as u32,
            image_atlas: &self.image_atlas,
        };
        submission.texts.extend_from_slice(region.texts());
        submission.lines.extend_from_slice(region.lines());

        for batch in region.batcher().batches() {
            let key = batch.key();
            let brush = key
                .brush
                .and_then(|b| region.brush(b))
                .map(|b| self.brush_instance(b))
                .unwrap_or_default();
            let instances = batch
                .shapes()
                .iter()
                .filter_map(|shape| {
                    let params = shape_params(&shape.kind, &ctx);
                    ShapeInstance::from_shape(shape, origin, clip, brush, params)
                })
                .collect();
            submission.push(key.blend_mode, key.tag, instances);
        }

        for &child_id in region.sub_regions() {
            let Some(child) = self.regions.get(child_id) else { continue };
            let child_origin = origin + child.position();
            let packed = child
                .packed_layer()
                .and_then(|l| Some((l, self.layers.get(l)?.packed_rect(child_id)?)));

            match packed {
                Some((layer, source)) if child.is_visible() => {
                    self.composite(layer, source, child_origin, clip, &ctx, submission);
                }
                Some(_) => {}
                None => self.collect_region(child_id, child_origin, clip, submission),
            }
        }
    }

    fn composite(
        &self,
        layer: usize,
        source: Rect,
        at: Vec2,
        clip: Rect,
        ctx: &ParamContext<'_>,
        submission: &mut LayerSubmission,
    ) {
        let shape = Shape::new(
            ShapeKind::Composite { layer, source },
            ClampBounds::new(clip.x(), clip.y(), clip.right(), clip.bottom()),
            None,
            BlendMode::Alpha,
            at.x,
            at.y,
            source.width(),
            source.height(),
        );
        let params = shape_params(&shape.kind, ctx);
        if let Some(instance) =
            ShapeInstance::from_shape(&shape, Vec2::zero(), clip, BrushInstance::default(), params)
        {
            submission.push(BlendMode::Alpha, ShapeTag::Composite, vec![instance]);
        }
    }

    fn brush_instance(&self, packed: &PackedBrush) -> BrushInstance {
        let atlas = &self.gradient_atlas;
        let uv = match atlas.resolve(packed.gradient) {
            Some(rect) => rect.uv(atlas.width(), atlas.height()),
            None => {
                log::warn!("gradient {:?} is no longer in the atlas", packed.gradient.key);
                [0.0; 4]
            }
        };
        BrushInstance { uv, start: packed.start, end: packed.end, spread: packed.spread as u32 }
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::RecordingBackend;
    use crate::canvas::Canvas;
    use crate::paint::{BlendMode, Color};
    use crate::scene::ShapeTag;

    fn canvas() -> Canvas {
        let mut canvas = Canvas::new();
        canvas.set_windowless(100, 80);
        canvas
    }

    #[test]
    fn unbound_canvas_submits_nothing() {
        let mut c = Canvas::new();
        c.set_dimensions(10, 10);
        c.rectangle(0.0, 0.0, 5.0, 5.0);
        let mut backend = RecordingBackend::new();
        assert_eq!(c.submit(&mut backend, 0).unwrap(), 0);
        assert!(backend.submissions.is_empty());
    }

    #[test]
    fn composite_submits_once_until_invalidated() {
        let mut c = canvas();
        c.set_color(Color::white());
        c.rectangle(1.0, 2.0, 10.0, 10.0);

        let mut backend = RecordingBackend::new();
        assert_eq!(c.submit(&mut backend, 0).unwrap(), 1);
        assert_eq!(backend.gradient_uploads, 1);
        let sub = &backend.submissions[0];
        assert_eq!(sub.layer, 0);
        assert_eq!(sub.instance_count(), 1);
        assert_eq!(sub.batches[0].instances[0].bounds, [1.0, 2.0, 10.0, 10.0]);

        assert_eq!(c.submit(&mut backend, 1).unwrap(), 0);
        assert_eq!(backend.gradient_uploads, 1);

        c.invalidate_region(c.default_region());
        assert_eq!(c.submit(&mut backend, 1).unwrap(), 1);
    }

    #[test]
    fn region_shapes_are_offset_into_window() {
        let mut c = canvas();
        let id = c.create_region(10, 20, 30, 30);
        c.add_region(id);
        c.begin_region(id);
        c.rectangle(1.0, 1.0, 5.0, 5.0);
        c.end_region();

        let mut backend = RecordingBackend::new();
        c.submit(&mut backend, 0).unwrap();
        let inst = backend.submissions[0].batches[0].instances[0];
        assert_eq!(&inst.bounds[..2], &[11.0, 21.0]);
    }

    #[test]
    fn regions_in_a_layer_render_in_pack_order() {
        let mut c = canvas();
        let ids: Vec<_> = (0..3).map(|i| c.create_region(i * 20, 0, 15, 15)).collect();
        for id in &ids {
            c.add_region(*id);
        }
        for i in [2, 0, 1] {
            c.set_region_layer(ids[i], 1);
        }
        for id in &ids {
            c.begin_region(*id);
            c.rectangle(0.0, 0.0, 5.0, 5.0);
            c.end_region();
        }

        let mut backend = RecordingBackend::new();
        c.submit(&mut backend, 0).unwrap();
        let sub = backend.submissions.iter().find(|s| s.layer == 1).unwrap();
        let drawn: Vec<[f32; 2]> = sub
            .batches
            .iter()
            .flat_map(|b| b.instances.iter())
            .map(|inst| [inst.bounds[0], inst.bounds[1]])
            .collect();

        let layer = c.layer(1);
        let packed: Vec<_> = layer.packed_regions().collect();
        assert_eq!(packed, vec![ids[2], ids[0], ids[1]]);
        let expected: Vec<[f32; 2]> = packed
            .iter()
            .map(|id| {
                let origin = layer.packed_rect(*id).unwrap().origin;
                [origin.x, origin.y]
            })
            .collect();
        assert_eq!(drawn, expected);
    }

    #[test]
    fn packed_layers_submit_before_their_consumers() {
        let mut c = canvas();
        let outer = c.create_region(0, 0, 50, 50);
        let inner = c.create_region(5, 5, 20, 20);
        c.add_region(outer);
        c.add_sub_region(outer, inner);
        c.set_region_layer(outer, 1);
        c.set_region_layer(inner, 2);

        c.begin_region(outer);
        c.rectangle(0.0, 0.0, 50.0, 50.0);
        c.end_region();
        c.begin_region(inner);
        c.circle(0.0, 0.0, 20.0);
        c.end_region();

        let mut backend = RecordingBackend::new();
        assert_eq!(c.submit(&mut backend, 7).unwrap(), 3);
        assert_eq!(backend.layer_order(), vec![2, 1, 0]);
        let passes: Vec<_> = backend.submissions.iter().map(|s| s.pass).collect();
        assert_eq!(passes, vec![7, 8, 9]);

        let composites = |layer: usize| {
            let sub = backend.submissions.iter().find(|s| s.layer == layer).unwrap();
            sub.batches.iter().filter(|b| b.tag == ShapeTag::Composite).count()
        };
        // layer 1 samples layer 2, layer 0 samples layer 1
        assert_eq!(composites(2), 0);
        assert_eq!(composites(1), 1);
        assert_eq!(composites(0), 1);
    }

    #[test]
    fn hidden_regions_are_skipped() {
        let mut c = canvas();
        let id = c.create_region(0, 0, 30, 30);
        c.add_region(id);
        c.begin_region(id);
        c.rectangle(0.0, 0.0, 5.0, 5.0);
        c.end_region();
        c.set_region_visible(id, false);

        let mut backend = RecordingBackend::new();
        c.submit(&mut backend, 0).unwrap();
        assert_eq!(backend.submissions[0].instance_count(), 0);
    }

    #[test]
    fn different_brushes_share_a_draw_call() {
        let mut c = canvas();
        c.set_color(Color::white());
        c.circle(0.0, 0.0, 10.0);
        c.set_color(Color::black());
        c.circle(20.0, 0.0, 10.0);
        c.set_blend_mode(BlendMode::Add);
        c.circle(40.0, 0.0, 10.0);

        let mut backend = RecordingBackend::new();
        c.submit(&mut backend, 0).unwrap();
        let batches = &backend.submissions[0].batches;
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].instances.len(), 2);
        assert_ne!(batches[0].instances[0].brush_uv, batches[0].instances[1].brush_uv);
        assert_eq!(batches[1].blend_mode, BlendMode::Add);
    }

    #[test]
    fn backend_failure_names_the_layer() {
        let mut c = canvas();
        c.rectangle(0.0, 0.0, 5.0, 5.0);
        let mut backend = RecordingBackend { fail_on_layer: Some(0), ..RecordingBackend::default() };
        let err = c.submit(&mut backend, 0).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("layer 0"), "{message}");
        assert!(message.contains("device lost"), "{message}");
    }

    #[test]
    fn screenshot_is_captured_on_request() {
        let mut c = canvas();
        let mut backend = RecordingBackend::new();
        c.submit(&mut backend, 0).unwrap();
        assert!(c.screenshot().is_empty());

        c.request_screenshot();
        c.submit(&mut backend, 1).unwrap();
        assert_eq!((c.screenshot().width(), c.screenshot().height()), (100, 80));
        c.submit(&mut backend, 2).unwrap();
        assert_eq!(backend.captures, 1);
    }

    #[test]
    fn texts_travel_with_submission() {
        use crate::scene::Direction;
        use crate::text::{Font, FontId, Justification};

        let mut c = canvas();
        let font = Font::new("mono", 10.0).with_packed(FontId(0));
        c.text("a", &font, Justification::Left, 0.0, 0.0, 20.0, 10.0, Direction::Up);
        c.text("b", &font, Justification::Left, 0.0, 20.0, 20.0, 10.0, Direction::Up);

        let mut backend = RecordingBackend::new();
        c.submit(&mut backend, 0).unwrap();
        let sub = &backend.submissions[0];
        assert_eq!(sub.texts.len(), 2);
        let indices: Vec<f32> = sub.batches[0].instances.iter().map(|i| i.params[0]).collect();
        assert_eq!(indices, vec![0.0, 1.0]);
    }

    #[test]
    fn removing_from_window_stops_composite() {
        let mut c = canvas();
        c.remove_from_window();
        let mut backend = RecordingBackend::new();
        assert_eq!(c.submit(&mut backend, 0).unwrap(), 0);
    }
}
