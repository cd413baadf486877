use std::sync::mpsc;
use std::time::Duration;

use crate::core::errors::CaptureError;
use crate::core::interfaces::ports::FrameGrabber;
use crate::core::models::{PixelBuffer, ScreenRect};
use crate::global_constants::{CAPTURE_TIMEOUT_SECONDS, LOG_TAG_CAPTURE};

/// Screen reads through xcap. The OS call runs on a worker thread with a
/// fixed upper bound; a hung capture surfaces as `CaptureUnavailable` instead
/// of freezing the trigger thread.
pub struct XcapFrameGrabber {
    capture_timeout: Duration,
}

impl XcapFrameGrabber {
    pub fn initialize() -> Self {
        log::debug!("{} initializing xcap frame grabber", LOG_TAG_CAPTURE);
        Self {
            capture_timeout: Duration::from_secs(CAPTURE_TIMEOUT_SECONDS),
        }
    }

    fn capture_monitor_at(center_x: i32, center_y: i32) -> Result<xcap::image::RgbaImage, String> {
        let monitor = xcap::Monitor::from_point(center_x, center_y)
            .map_err(|e| format!("no monitor at ({}, {}): {}", center_x, center_y, e))?;
        monitor.capture_image().map_err(|e| e.to_string())
    }
}

impl FrameGrabber for XcapFrameGrabber {
    fn capture(&self, bounds: ScreenRect) -> Result<PixelBuffer, CaptureError> {
        if bounds.width == 0 || bounds.height == 0 {
            return Err(CaptureError::CaptureUnavailable(
                "zero-sized capture region".to_string(),
            ));
        }

        let center_x = bounds.x + bounds.width as i32 / 2;
        let center_y = bounds.y + bounds.height as i32 / 2;

        log::debug!(
            "{} capturing {}x{} region at ({}, {})",
            LOG_TAG_CAPTURE,
            bounds.width,
            bounds.height,
            bounds.x,
            bounds.y
        );

        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = sender.send(Self::capture_monitor_at(center_x, center_y));
        });

        let captured = receiver
            .recv_timeout(self.capture_timeout)
            .map_err(|_| {
                CaptureError::CaptureUnavailable(format!(
                    "screen read timed out after {}s",
                    self.capture_timeout.as_secs()
                ))
            })?
            .map_err(CaptureError::CaptureUnavailable)?;

        let width_pixels = captured.width();
        let height_pixels = captured.height();

        log::info!(
            "{} captured {}x{} screenshot",
            LOG_TAG_CAPTURE,
            width_pixels,
            height_pixels
        );

        Ok(PixelBuffer::build_from_raw_data(
            width_pixels,
            height_pixels,
            captured.into_raw(),
        ))
    }
}
