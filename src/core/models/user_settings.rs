use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::errors::CaptureError;
use crate::core::models::{AnnotationKind, AnnotationStyle, MarkerShape};
use crate::global_constants;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolSettings {
    pub glyph: char,
    pub color: [u8; 3],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSettings {
    pub shape: MarkerShape,
    pub radius: u32,
    pub color: [u8; 3],
    pub alpha: u8,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            shape: MarkerShape::Rectangle,
            radius: global_constants::DEFAULT_MARKER_RADIUS,
            color: global_constants::DEFAULT_MARKER_COLOR,
            alpha: global_constants::DEFAULT_MARKER_ALPHA,
        }
    }
}

fn default_info_symbol() -> SymbolSettings {
    SymbolSettings {
        glyph: global_constants::DEFAULT_INFO_GLYPH,
        color: global_constants::DEFAULT_INFO_COLOR,
    }
}

fn default_pass_symbol() -> SymbolSettings {
    SymbolSettings {
        glyph: global_constants::DEFAULT_PASS_GLYPH,
        color: global_constants::DEFAULT_PASS_COLOR,
    }
}

fn default_fail_symbol() -> SymbolSettings {
    SymbolSettings {
        glyph: global_constants::DEFAULT_FAIL_GLYPH,
        color: global_constants::DEFAULT_FAIL_COLOR,
    }
}

fn default_output_max_width() -> f32 {
    global_constants::DEFAULT_OUTPUT_MAX_WIDTH
}

fn default_symbol_offset() -> (i32, i32) {
    (
        global_constants::DEFAULT_SYMBOL_OFFSET_X,
        global_constants::DEFAULT_SYMBOL_OFFSET_Y,
    )
}

fn default_symbol_scale() -> u32 {
    global_constants::DEFAULT_SYMBOL_SCALE
}

/// Typed configuration surface. Every field has a hardcoded fallback so a
/// missing or partial settings file never blocks a capture; `validate` runs
/// once at startup so malformed values fail there instead of mid-render.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub report_folder: Option<PathBuf>,
    #[serde(default = "default_output_max_width")]
    pub output_max_width: f32,
    #[serde(default)]
    pub marker: MarkerSettings,
    #[serde(default = "default_symbol_offset")]
    pub symbol_offset: (i32, i32),
    #[serde(default = "default_symbol_scale")]
    pub symbol_scale: u32,
    #[serde(default = "default_info_symbol")]
    pub info_symbol: SymbolSettings,
    #[serde(default = "default_pass_symbol")]
    pub pass_symbol: SymbolSettings,
    #[serde(default = "default_fail_symbol")]
    pub fail_symbol: SymbolSettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            report_folder: None,
            output_max_width: default_output_max_width(),
            marker: MarkerSettings::default(),
            symbol_offset: default_symbol_offset(),
            symbol_scale: default_symbol_scale(),
            info_symbol: default_info_symbol(),
            pass_symbol: default_pass_symbol(),
            fail_symbol: default_fail_symbol(),
        }
    }
}

impl UserSettings {
    pub fn load() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_file_path()?;

        if !settings_path.exists() {
            log::info!(
                "{} No settings file found, using defaults",
                global_constants::LOG_TAG_SETTINGS
            );
            let default_settings = Self::default();
            default_settings.save()?;
            return Ok(default_settings);
        }

        let contents = std::fs::read_to_string(&settings_path)?;
        let settings: UserSettings = serde_json::from_str(&contents)?;

        log::info!(
            "{} Loaded settings from {:?}",
            global_constants::LOG_TAG_SETTINGS,
            settings_path
        );

        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let settings_path = Self::get_settings_file_path()?;

        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&settings_path, contents)?;

        log::info!(
            "{} Saved settings to {:?}",
            global_constants::LOG_TAG_SETTINGS,
            settings_path
        );
        Ok(())
    }

    fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::CONFIG_DIR_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }

    /// Startup validation: a capture triggered later must never fail on a
    /// configuration value we could have rejected here.
    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.output_max_width <= 0.0 {
            return Err(CaptureError::InvalidTargetWidth(self.output_max_width));
        }
        if self.marker.radius == 0 {
            return Err(CaptureError::InvalidMarkerRadius);
        }
        Ok(())
    }

    /// Resolves the per-kind style table into one immutable style instance
    /// for a single capture request.
    pub fn resolve_style(&self, kind: AnnotationKind) -> AnnotationStyle {
        let symbol = match kind {
            AnnotationKind::Pass => &self.pass_symbol,
            AnnotationKind::Fail => &self.fail_symbol,
            AnnotationKind::Info | AnnotationKind::None => &self.info_symbol,
        };

        AnnotationStyle {
            kind,
            marker_shape: self.marker.shape,
            marker_radius: self.marker.radius,
            marker_color: self.marker.color,
            marker_alpha: self.marker.alpha,
            symbol_glyph: symbol.glyph,
            symbol_color: symbol.color,
            symbol_scale: self.symbol_scale,
            symbol_offset: self.symbol_offset,
        }
    }
}
