use image::imageops::FilterType;

use crate::core::errors::CaptureError;
use crate::core::models::PixelBuffer;
use crate::global_constants::LOG_TAG_SCALE;

/// Fits an annotated frame to the document's usable page width. Downscale
/// only: a frame already narrow enough passes through without a copy.
pub struct OutputScaler;

impl OutputScaler {
    pub fn initialize() -> Self {
        log::debug!("{} initializing output scaler", LOG_TAG_SCALE);
        Self
    }

    pub fn fit(&self, image: PixelBuffer, max_width: f32) -> Result<PixelBuffer, CaptureError> {
        if max_width <= 0.0 {
            return Err(CaptureError::InvalidTargetWidth(max_width));
        }

        if image.width as f32 <= max_width {
            return Ok(image);
        }

        let ratio = max_width / image.width as f32;
        let target_width = (image.width as f32 * ratio).round().max(1.0) as u32;
        let target_height = (image.height as f32 * ratio).round().max(1.0) as u32;

        log::debug!(
            "{} scaling {}x{} by ratio {:.4} to {}x{}",
            LOG_TAG_SCALE,
            image.width,
            image.height,
            ratio,
            target_width,
            target_height
        );

        let source = image
            .into_rgba_image()
            .map_err(|e| CaptureError::CaptureUnavailable(e.to_string()))?;
        let resized = image::imageops::resize(&source, target_width, target_height, FilterType::Lanczos3);

        Ok(PixelBuffer::from_rgba_image(resized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_buffer(width: u32, height: u32) -> PixelBuffer {
        let mut raw = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                raw.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 128, 255]);
            }
        }
        PixelBuffer::build_from_raw_data(width, height, raw)
    }

    #[test]
    fn test_fit_rejects_non_positive_target_width() {
        let scaler = OutputScaler::initialize();

        assert!(matches!(
            scaler.fit(gradient_buffer(10, 10), 0.0),
            Err(CaptureError::InvalidTargetWidth(_))
        ));
        assert!(matches!(
            scaler.fit(gradient_buffer(10, 10), -5.0),
            Err(CaptureError::InvalidTargetWidth(_))
        ));
    }

    #[test]
    fn test_fit_never_upscales_narrow_images() {
        let scaler = OutputScaler::initialize();
        let buffer = gradient_buffer(800, 600);
        let original = buffer.clone();

        let result = scaler.fit(buffer, 1280.0).unwrap();

        assert_eq!(result, original);
    }

    #[test]
    fn test_fit_halves_both_dimensions_exactly() {
        let scaler = OutputScaler::initialize();
        let buffer = gradient_buffer(2400, 1350);

        let result = scaler.fit(buffer, 1200.0).unwrap();

        assert_eq!(result.width, 1200);
        assert_eq!(result.height, 675);
    }

    #[test]
    fn test_fit_preserves_aspect_ratio_within_rounding() {
        let scaler = OutputScaler::initialize();
        let buffer = gradient_buffer(1920, 1080);

        let result = scaler.fit(buffer, 1000.0).unwrap();

        assert_eq!(result.width, 1000);
        let expected_height = (1080.0 * (1000.0 / 1920.0_f32)).round() as u32;
        assert!((result.height as i64 - expected_height as i64).abs() <= 1);
    }

    #[test]
    fn test_fit_is_idempotent() {
        let scaler = OutputScaler::initialize();
        let buffer = gradient_buffer(2400, 1200);

        let once = scaler.fit(buffer, 1200.0).unwrap();
        let twice = scaler.fit(once.clone(), 1200.0).unwrap();

        assert_eq!(once, twice);
    }
}
