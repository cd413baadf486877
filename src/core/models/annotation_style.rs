use serde::{Deserialize, Serialize};

/// Outcome the tester is recording. `None` means a plain screenshot with no
/// marker or symbol drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    None,
    Info,
    Pass,
    Fail,
}

impl std::fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotationKind::None => write!(f, "none"),
            AnnotationKind::Info => write!(f, "info"),
            AnnotationKind::Pass => write!(f, "pass"),
            AnnotationKind::Fail => write!(f, "fail"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Circle,
    Rectangle,
}

/// Fully resolved styling for one capture request. Built from `UserSettings`
/// at the trigger boundary; nothing here is shared or mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationStyle {
    pub kind: AnnotationKind,
    pub marker_shape: MarkerShape,
    pub marker_radius: u32,
    pub marker_color: [u8; 3],
    pub marker_alpha: u8,
    pub symbol_glyph: char,
    pub symbol_color: [u8; 3],
    /// Integer scale applied to the 8x8 bitmap glyph; the drawn glyph box is
    /// `8 * symbol_scale` pixels square.
    pub symbol_scale: u32,
    pub symbol_offset: (i32, i32),
}

impl AnnotationStyle {
    pub fn glyph_box_size(&self) -> u32 {
        8 * self.symbol_scale.max(1)
    }
}
