#![allow(dead_code)]

pub const APPLICATION_NAME: &str = "Evidence Capture";

pub const LOG_TAG_MAIN: &str = "[MAIN]";
pub const LOG_TAG_SESSION: &str = "[SESSION]";
pub const LOG_TAG_TOPOLOGY: &str = "[TOPOLOGY]";
pub const LOG_TAG_CAPTURE: &str = "[CAPTURE]";
pub const LOG_TAG_RENDER: &str = "[RENDER]";
pub const LOG_TAG_SCALE: &str = "[SCALE]";
pub const LOG_TAG_SINK: &str = "[SINK]";
pub const LOG_TAG_SETTINGS: &str = "[SETTINGS]";
pub const LOG_TAG_MOUSE: &str = "[MOUSE]";
pub const LOG_TAG_INSTANCE: &str = "[INSTANCE]";

pub const MESSAGE_MOUSE_POSITION_FAILED: &str = "failed to get mouse position, using (0,0)";
pub const MESSAGE_NO_DISPLAY_FALLBACK: &str = "cursor outside every display, using first display";

pub const ERROR_CONTEXT_ENUMERATE_DISPLAYS: &str = "Unable to enumerate displays";
pub const ERROR_CONTEXT_CAPTURE_MONITOR: &str = "Unable to capture monitor";

pub const DEFAULT_MOUSE_POSITION_X: i32 = 0;
pub const DEFAULT_MOUSE_POSITION_Y: i32 = 0;

pub const DEFAULT_OUTPUT_MAX_WIDTH: f32 = 1280.0;
pub const DEFAULT_MARKER_RADIUS: u32 = 20;
pub const DEFAULT_MARKER_COLOR: [u8; 3] = [0, 0, 255];
pub const DEFAULT_MARKER_ALPHA: u8 = 128;
pub const DEFAULT_SYMBOL_OFFSET_X: i32 = 20;
pub const DEFAULT_SYMBOL_OFFSET_Y: i32 = 20;
pub const DEFAULT_SYMBOL_SCALE: u32 = 3;

pub const DEFAULT_INFO_GLYPH: char = 'i';
pub const DEFAULT_INFO_COLOR: [u8; 3] = [255, 255, 255];
pub const DEFAULT_PASS_GLYPH: char = '+';
pub const DEFAULT_PASS_COLOR: [u8; 3] = [0, 160, 0];
pub const DEFAULT_FAIL_GLYPH: char = 'x';
pub const DEFAULT_FAIL_COLOR: [u8; 3] = [220, 0, 0];

// Seconds to wait for the OS screen read before giving up on the attempt.
pub const CAPTURE_TIMEOUT_SECONDS: u64 = 5;

pub const REPORT_DIR_PREFIX: &str = "evidence";
pub const REPORT_FILE_NAME: &str = "report.md";
pub const REPORT_IMAGE_DIR: &str = "images";

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const CONFIG_DIR_NAME: &str = "evidence-capture";

pub const LOCK_FILE_NAME: &str = "evidence-capture.lock";
