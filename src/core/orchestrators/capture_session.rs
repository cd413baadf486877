use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::errors::CaptureError;
use crate::core::interfaces::ports::{DisplayTopology, DocumentSink, FrameGrabber};
use crate::core::models::{
    AnnotatedImage, AnnotationKind, DisplayDescriptor, GlobalPoint, UserSettings,
};
use crate::core::rendering::{AnnotationRenderer, OutputScaler};
use crate::global_constants::{LOG_TAG_SESSION, MESSAGE_NO_DISPLAY_FALLBACK};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionStage {
    ResolvingDisplay,
    Capturing,
    Annotating,
    Scaling,
    Delivered,
}

/// One capture request runs synchronously through
/// resolve -> capture -> annotate -> scale -> deliver, terminal on the first
/// failure. The session owns no per-request state; the only cross-call field
/// is the in-flight flag enforcing the sink's single-writer contract.
pub struct CaptureSession {
    display_topology: Arc<dyn DisplayTopology>,
    frame_grabber: Arc<dyn FrameGrabber>,
    document_sink: Arc<dyn DocumentSink>,
    annotation_renderer: AnnotationRenderer,
    output_scaler: OutputScaler,
    settings: UserSettings,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CaptureSession {
    pub fn build(
        display_topology: Arc<dyn DisplayTopology>,
        frame_grabber: Arc<dyn FrameGrabber>,
        document_sink: Arc<dyn DocumentSink>,
        settings: UserSettings,
    ) -> Self {
        Self {
            display_topology,
            frame_grabber,
            document_sink,
            annotation_renderer: AnnotationRenderer::initialize(),
            output_scaler: OutputScaler::initialize(),
            settings,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Single entry point: captures the display under `cursor`, stamps the
    /// marker for `kind`, fits the result to the document width, and hands
    /// image plus caption to the document sink in order caption, separator,
    /// image. A second call while one is in progress is rejected with
    /// `SessionBusy`; callers queue or drop, never interleave.
    pub fn capture_and_annotate(
        &self,
        cursor: GlobalPoint,
        kind: AnnotationKind,
        caption: &str,
    ) -> Result<AnnotatedImage, CaptureError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            log::warn!(
                "{} rejecting trigger at ({}, {}): capture already in progress",
                LOG_TAG_SESSION,
                cursor.x,
                cursor.y
            );
            return Err(CaptureError::SessionBusy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.transition(SessionStage::ResolvingDisplay);
        let display = self.resolve_display_with_fallback(cursor)?;
        let annotation_point = display.bounds.to_local(cursor);

        self.transition(SessionStage::Capturing);
        let frame = self.frame_grabber.capture(display.bounds)?;

        self.transition(SessionStage::Annotating);
        let style = self.settings.resolve_style(kind);
        let annotated = self
            .annotation_renderer
            .annotate(&frame, annotation_point, &style);

        self.transition(SessionStage::Scaling);
        let fitted = self
            .output_scaler
            .fit(annotated, self.settings.output_max_width)?;

        self.deliver(&fitted, caption)?;
        self.transition(SessionStage::Delivered);

        log::info!(
            "{} delivered {} capture from display {} ({}x{})",
            LOG_TAG_SESSION,
            kind,
            display.id,
            fitted.width,
            fitted.height
        );

        Ok(AnnotatedImage {
            buffer: fitted,
            source_display_id: display.id,
            annotation_point,
        })
    }

    /// The trigger fires from a hidden hotkey context with no error channel
    /// back to the user, so an off-screen cursor falls back to the first
    /// enumerated display instead of failing the capture.
    fn resolve_display_with_fallback(
        &self,
        cursor: GlobalPoint,
    ) -> Result<DisplayDescriptor, CaptureError> {
        match self.display_topology.display_containing(cursor) {
            Ok(display) => Ok(display),
            Err(CaptureError::NoDisplayFound { x, y }) => {
                log::warn!(
                    "{} {} (cursor at ({}, {}))",
                    LOG_TAG_SESSION,
                    MESSAGE_NO_DISPLAY_FALLBACK,
                    x,
                    y
                );
                let displays = self
                    .display_topology
                    .list_displays()
                    .map_err(|e| CaptureError::CaptureUnavailable(e.to_string()))?;
                displays
                    .into_iter()
                    .next()
                    .ok_or(CaptureError::NoDisplayFound { x, y })
            }
            Err(other) => Err(other),
        }
    }

    fn deliver(&self, image: &crate::core::models::PixelBuffer, caption: &str) -> Result<(), CaptureError> {
        let max_width = self.settings.output_max_width;

        self.document_sink
            .append_caption(caption)
            .map_err(|e| CaptureError::DeliveryFailed(e.to_string()))?;
        self.document_sink
            .append_separator()
            .map_err(|e| CaptureError::DeliveryFailed(e.to_string()))?;
        self.document_sink
            .append_image(image, max_width)
            .map_err(|e| CaptureError::DeliveryFailed(e.to_string()))
    }

    fn transition(&self, stage: SessionStage) {
        log::debug!("{} stage: {:?}", LOG_TAG_SESSION, stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::sync::{Barrier, Mutex};

    use crate::core::models::{PixelBuffer, ScreenRect};

    struct StubTopology {
        displays: Vec<DisplayDescriptor>,
    }

    impl DisplayTopology for StubTopology {
        fn list_displays(&self) -> Result<Vec<DisplayDescriptor>> {
            Ok(self.displays.clone())
        }
    }

    struct StubGrabber {
        fail: bool,
        barrier: Option<Arc<Barrier>>,
    }

    impl FrameGrabber for StubGrabber {
        fn capture(&self, bounds: ScreenRect) -> Result<PixelBuffer, CaptureError> {
            if let Some(barrier) = &self.barrier {
                barrier.wait();
                barrier.wait();
            }
            if self.fail {
                return Err(CaptureError::CaptureUnavailable("device lost".to_string()));
            }
            let raw = vec![0u8; (bounds.width * bounds.height * 4) as usize];
            Ok(PixelBuffer::build_from_raw_data(bounds.width, bounds.height, raw))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<String>>,
    }

    impl DocumentSink for RecordingSink {
        fn append_caption(&self, text: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("caption:{}", text));
            Ok(())
        }

        fn append_separator(&self) -> Result<()> {
            self.calls.lock().unwrap().push("separator".to_string());
            Ok(())
        }

        fn append_image(&self, image: &PixelBuffer, _max_width: f32) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("image:{}x{}", image.width, image.height));
            Ok(())
        }
    }

    fn small_settings() -> UserSettings {
        let mut settings = UserSettings::default();
        settings.output_max_width = 4000.0;
        settings
    }

    fn build_session(
        displays: Vec<DisplayDescriptor>,
        grabber: StubGrabber,
        sink: Arc<RecordingSink>,
    ) -> CaptureSession {
        CaptureSession::build(
            Arc::new(StubTopology { displays }),
            Arc::new(grabber),
            sink,
            small_settings(),
        )
    }

    fn dual_displays() -> Vec<DisplayDescriptor> {
        vec![
            DisplayDescriptor::with_bounds(1, ScreenRect::new(0, 0, 64, 48)),
            DisplayDescriptor::with_bounds(2, ScreenRect::new(64, 0, 64, 48)),
        ]
    }

    #[test]
    fn test_successful_capture_delivers_caption_separator_image_in_order() {
        let sink = Arc::new(RecordingSink::default());
        let session = build_session(
            dual_displays(),
            StubGrabber {
                fail: false,
                barrier: None,
            },
            sink.clone(),
        );

        let result = session
            .capture_and_annotate(
                GlobalPoint::at_coordinates(70, 10),
                AnnotationKind::Pass,
                "login succeeded",
            )
            .unwrap();

        assert_eq!(result.source_display_id, 2);
        assert_eq!(result.annotation_point.x, 6);

        let calls = sink.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[
                "caption:login succeeded".to_string(),
                "separator".to_string(),
                "image:64x48".to_string(),
            ]
        );
    }

    #[test]
    fn test_off_screen_cursor_falls_back_to_first_display() {
        let sink = Arc::new(RecordingSink::default());
        let session = build_session(
            dual_displays(),
            StubGrabber {
                fail: false,
                barrier: None,
            },
            sink.clone(),
        );

        let result = session
            .capture_and_annotate(
                GlobalPoint::at_coordinates(-500, -500),
                AnnotationKind::Info,
                "detached monitor",
            )
            .unwrap();

        assert_eq!(result.source_display_id, 1);
        assert_eq!(sink.calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_capture_failure_is_terminal_and_leaves_sink_untouched() {
        let sink = Arc::new(RecordingSink::default());
        let session = build_session(
            dual_displays(),
            StubGrabber {
                fail: true,
                barrier: None,
            },
            sink.clone(),
        );

        let result = session.capture_and_annotate(
            GlobalPoint::at_coordinates(10, 10),
            AnnotationKind::Fail,
            "should not appear",
        );

        assert!(matches!(result, Err(CaptureError::CaptureUnavailable(_))));
        assert!(sink.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_no_displays_at_all_reports_no_display_found() {
        let sink = Arc::new(RecordingSink::default());
        let session = build_session(
            vec![],
            StubGrabber {
                fail: false,
                barrier: None,
            },
            sink.clone(),
        );

        let result = session.capture_and_annotate(
            GlobalPoint::at_coordinates(0, 0),
            AnnotationKind::Info,
            "",
        );

        assert!(matches!(result, Err(CaptureError::NoDisplayFound { .. })));
        assert!(sink.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_second_trigger_while_in_flight_is_rejected() {
        let barrier = Arc::new(Barrier::new(2));
        let sink = Arc::new(RecordingSink::default());
        let session = Arc::new(build_session(
            dual_displays(),
            StubGrabber {
                fail: false,
                barrier: Some(barrier.clone()),
            },
            sink.clone(),
        ));

        let background_session = session.clone();
        let first_capture = std::thread::spawn(move || {
            background_session.capture_and_annotate(
                GlobalPoint::at_coordinates(10, 10),
                AnnotationKind::Pass,
                "first",
            )
        });

        // First capture is now blocked inside the grabber.
        barrier.wait();
        let second = session.capture_and_annotate(
            GlobalPoint::at_coordinates(10, 10),
            AnnotationKind::Pass,
            "second",
        );
        assert!(matches!(second, Err(CaptureError::SessionBusy)));

        barrier.wait();
        let first = first_capture.join().unwrap();
        assert!(first.is_ok());

        // Only the first capture's blocks reached the sink.
        assert_eq!(sink.calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_session_accepts_new_trigger_after_failure() {
        let sink = Arc::new(RecordingSink::default());
        let displays = dual_displays();
        let session = CaptureSession::build(
            Arc::new(StubTopology {
                displays: displays.clone(),
            }),
            Arc::new(StubGrabber {
                fail: true,
                barrier: None,
            }),
            sink.clone(),
            small_settings(),
        );

        assert!(session
            .capture_and_annotate(GlobalPoint::at_coordinates(1, 1), AnnotationKind::Info, "a")
            .is_err());

        // The in-flight flag was released on the failure path.
        let retry = session.capture_and_annotate(
            GlobalPoint::at_coordinates(1, 1),
            AnnotationKind::Info,
            "b",
        );
        assert!(matches!(retry, Err(CaptureError::CaptureUnavailable(_))));
    }
}
