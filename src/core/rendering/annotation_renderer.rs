use font8x8::{UnicodeFonts, BASIC_FONTS};

use crate::core::models::{AnnotationKind, AnnotationStyle, LocalPoint, MarkerShape, PixelBuffer};
use crate::global_constants::LOG_TAG_RENDER;

/// Composites a translucent marker plus a status glyph onto a copy of the
/// captured frame. Pure pixel math: identical inputs always produce
/// byte-identical output.
pub struct AnnotationRenderer;

impl AnnotationRenderer {
    pub fn initialize() -> Self {
        log::debug!("{} initializing annotation renderer", LOG_TAG_RENDER);
        Self
    }

    /// Never mutates `frame`; a caller holding the original keeps the
    /// pre-annotation pixels. A marker entirely outside the frame is skipped
    /// rather than failing the capture: the bare screenshot is still evidence.
    pub fn annotate(
        &self,
        frame: &PixelBuffer,
        at: LocalPoint,
        style: &AnnotationStyle,
    ) -> PixelBuffer {
        let mut annotated = frame.clone();

        if style.kind == AnnotationKind::None {
            return annotated;
        }

        let Some(marker_box) = self.clamped_marker_box(frame, at, style.marker_radius) else {
            log::warn!(
                "{} marker at ({}, {}) lies outside the {}x{} frame, keeping raw screenshot",
                LOG_TAG_RENDER,
                at.x,
                at.y,
                frame.width,
                frame.height
            );
            return annotated;
        };

        self.composite_marker(&mut annotated, at, marker_box, style);
        self.draw_symbol_glyph(&mut annotated, at, style);

        annotated
    }

    /// Intersects the marker's bounding box with the frame. `None` means the
    /// clamped box has zero area.
    fn clamped_marker_box(
        &self,
        frame: &PixelBuffer,
        at: LocalPoint,
        radius: u32,
    ) -> Option<(u32, u32, u32, u32)> {
        let radius = radius as i32;
        let left = (at.x - radius).max(0);
        let top = (at.y - radius).max(0);
        let right = (at.x + radius).min(frame.width as i32);
        let bottom = (at.y + radius).min(frame.height as i32);

        if left >= right || top >= bottom {
            return None;
        }

        Some((left as u32, top as u32, right as u32, bottom as u32))
    }

    fn composite_marker(
        &self,
        annotated: &mut PixelBuffer,
        at: LocalPoint,
        marker_box: (u32, u32, u32, u32),
        style: &AnnotationStyle,
    ) {
        let (left, top, right, bottom) = marker_box;
        let [red, green, blue] = style.marker_color;
        let source = [red, green, blue, style.marker_alpha];
        let radius_squared = (style.marker_radius as i64) * (style.marker_radius as i64);

        for y in top..bottom {
            for x in left..right {
                if style.marker_shape == MarkerShape::Circle {
                    let dx = x as i64 - at.x as i64;
                    let dy = y as i64 - at.y as i64;
                    if dx * dx + dy * dy > radius_squared {
                        continue;
                    }
                }
                let blended = blend_pixel(annotated.pixel_at(x, y), source);
                annotated.put_pixel(x, y, blended);
            }
        }
    }

    /// Draws the status glyph at `at + symbol_offset`, re-clamped so the
    /// offset never pushes the glyph box off-canvas.
    fn draw_symbol_glyph(&self, annotated: &mut PixelBuffer, at: LocalPoint, style: &AnnotationStyle) {
        let glyph = match BASIC_FONTS
            .get(style.symbol_glyph)
            .or_else(|| BASIC_FONTS.get('?'))
        {
            Some(glyph) => glyph,
            None => return,
        };

        let box_size = style.glyph_box_size() as i32;
        let max_x = (annotated.width as i32 - box_size).max(0);
        let max_y = (annotated.height as i32 - box_size).max(0);
        let origin_x = (at.x + style.symbol_offset.0).clamp(0, max_x);
        let origin_y = (at.y + style.symbol_offset.1).clamp(0, max_y);

        let scale = style.symbol_scale.max(1) as i32;
        let [red, green, blue] = style.symbol_color;
        let color = [red, green, blue, 255];

        for (row_index, row) in glyph.iter().enumerate() {
            let row_bits = *row;
            for column_index in 0..8 {
                if (row_bits >> column_index) & 1 == 0 {
                    continue;
                }
                let cell_x = origin_x + column_index * scale;
                let cell_y = origin_y + row_index as i32 * scale;
                self.fill_glyph_cell(annotated, cell_x, cell_y, scale, color);
            }
        }
    }

    fn fill_glyph_cell(
        &self,
        annotated: &mut PixelBuffer,
        cell_x: i32,
        cell_y: i32,
        scale: i32,
        color: [u8; 4],
    ) {
        for offset_y in 0..scale {
            for offset_x in 0..scale {
                let x = cell_x + offset_x;
                let y = cell_y + offset_y;
                if x < 0 || y < 0 || x >= annotated.width as i32 || y >= annotated.height as i32 {
                    continue;
                }
                annotated.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Straight source-over alpha blend, rounded to the nearest channel value.
fn blend_pixel(destination: [u8; 4], source: [u8; 4]) -> [u8; 4] {
    let alpha = f64::from(source[3]) / 255.0;
    if alpha <= 0.0 {
        return destination;
    }
    let inverse = 1.0 - alpha;

    let channel = |dst: u8, src: u8| -> u8 {
        (f64::from(dst) * inverse + f64::from(src) * alpha)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    let out_alpha = (f64::from(destination[3]) + f64::from(source[3]) * inverse)
        .round()
        .clamp(0.0, 255.0) as u8;

    [
        channel(destination[0], source[0]),
        channel(destination[1], source[1]),
        channel(destination[2], source[2]),
        out_alpha,
    ]
}
