use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;

use crate::core::interfaces::ports::DocumentSink;
use crate::core::models::PixelBuffer;
use crate::global_constants::{
    LOG_TAG_SINK, REPORT_DIR_PREFIX, REPORT_FILE_NAME, REPORT_IMAGE_DIR,
};

struct SinkState {
    report_file: File,
    image_count: u32,
}

/// Append-only report document: a timestamped directory holding `report.md`
/// plus the captured PNGs. One sink instance per session; the session's
/// single-writer contract means appends never interleave. Flushed on every
/// append and again on drop so each exit path releases the document.
pub struct MarkdownReportSink {
    report_dir: PathBuf,
    state: Mutex<SinkState>,
}

impl MarkdownReportSink {
    pub fn open(base_folder: &Path) -> Result<Self> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let dir_name = sanitize_file_name(&format!("{}_{}", REPORT_DIR_PREFIX, timestamp));
        let report_dir = base_folder.join(dir_name);

        fs::create_dir_all(report_dir.join(REPORT_IMAGE_DIR))
            .with_context(|| format!("failed to create report directory {:?}", report_dir))?;

        let report_path = report_dir.join(REPORT_FILE_NAME);
        let mut report_file = File::create(&report_path)
            .with_context(|| format!("failed to create report file {:?}", report_path))?;
        writeln!(
            report_file,
            "# Evidence report {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;

        log::info!("{} opened report at {:?}", LOG_TAG_SINK, report_path);

        Ok(Self {
            report_dir,
            state: Mutex::new(SinkState {
                report_file,
                image_count: 0,
            }),
        })
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    pub fn finalize(&self) -> Result<()> {
        let mut state = self.lock_state()?;
        state.report_file.flush()?;
        state.report_file.sync_all()?;
        log::info!("{} report finalized at {:?}", LOG_TAG_SINK, self.report_dir);
        Ok(())
    }

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, SinkState>> {
        self.state
            .lock()
            .map_err(|_| anyhow::anyhow!("report sink lock poisoned"))
    }
}

impl DocumentSink for MarkdownReportSink {
    fn append_caption(&self, text: &str) -> Result<()> {
        let mut state = self.lock_state()?;
        writeln!(state.report_file, "{}\n", text)?;
        state.report_file.flush()?;
        Ok(())
    }

    fn append_separator(&self) -> Result<()> {
        let mut state = self.lock_state()?;
        writeln!(state.report_file, "---\n")?;
        state.report_file.flush()?;
        Ok(())
    }

    fn append_image(&self, image: &PixelBuffer, max_width: f32) -> Result<()> {
        let mut state = self.lock_state()?;
        state.image_count += 1;
        let file_name = format!("capture_{:03}.png", state.image_count);
        let image_path = self.report_dir.join(REPORT_IMAGE_DIR).join(&file_name);

        let rgba = image.clone().into_rgba_image()?;
        rgba.save(&image_path)
            .with_context(|| format!("failed to save capture image {:?}", image_path))?;

        // The engine pre-fits the frame, so its width is already <= max_width.
        let display_width = (image.width as f32).min(max_width).round() as u32;
        writeln!(
            state.report_file,
            "<img src=\"{}/{}\" width=\"{}\">\n",
            REPORT_IMAGE_DIR, file_name, display_width
        )?;
        state.report_file.flush()?;

        log::info!(
            "{} appended {} ({}x{})",
            LOG_TAG_SINK,
            file_name,
            image.width,
            image.height
        );
        Ok(())
    }
}

impl Drop for MarkdownReportSink {
    fn drop(&mut self) {
        if let Ok(state) = self.state.get_mut() {
            let _ = state.report_file.flush();
        }
    }
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_report_base(label: &str) -> PathBuf {
        let base = std::env::temp_dir().join(format!(
            "evidence-capture-test-{}-{}",
            label,
            std::process::id()
        ));
        fs::create_dir_all(&base).unwrap();
        base
    }

    fn tiny_buffer() -> PixelBuffer {
        PixelBuffer::build_from_raw_data(2, 2, vec![255u8; 16])
    }

    #[test]
    fn test_open_creates_report_skeleton() {
        let base = temp_report_base("skeleton");
        let sink = MarkdownReportSink::open(&base).unwrap();

        assert!(sink.report_dir().join(REPORT_FILE_NAME).exists());
        assert!(sink.report_dir().join(REPORT_IMAGE_DIR).is_dir());

        fs::remove_dir_all(&base).ok();
    }

    #[test]
    fn test_appends_arrive_in_document_order() {
        let base = temp_report_base("order");
        let sink = MarkdownReportSink::open(&base).unwrap();

        sink.append_caption("step one passed").unwrap();
        sink.append_separator().unwrap();
        sink.append_image(&tiny_buffer(), 1280.0).unwrap();
        sink.finalize().unwrap();

        let report = fs::read_to_string(sink.report_dir().join(REPORT_FILE_NAME)).unwrap();
        let caption_at = report.find("step one passed").unwrap();
        let separator_at = report.find("---").unwrap();
        let image_at = report.find("capture_001.png").unwrap();

        assert!(caption_at < separator_at);
        assert!(separator_at < image_at);
        assert!(sink
            .report_dir()
            .join(REPORT_IMAGE_DIR)
            .join("capture_001.png")
            .exists());

        fs::remove_dir_all(&base).ok();
    }

    #[test]
    fn test_image_files_are_numbered_sequentially() {
        let base = temp_report_base("numbering");
        let sink = MarkdownReportSink::open(&base).unwrap();

        sink.append_image(&tiny_buffer(), 1280.0).unwrap();
        sink.append_image(&tiny_buffer(), 1280.0).unwrap();

        let images = sink.report_dir().join(REPORT_IMAGE_DIR);
        assert!(images.join("capture_001.png").exists());
        assert!(images.join("capture_002.png").exists());

        fs::remove_dir_all(&base).ok();
    }

    #[test]
    fn test_sanitize_file_name_replaces_reserved_characters() {
        assert_eq!(sanitize_file_name("a/b:c*d"), "a_b_c_d");
        assert_eq!(sanitize_file_name("evidence_20260829"), "evidence_20260829");
    }
}
