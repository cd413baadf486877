use mouse_position::mouse_position::Mouse;

use crate::core::interfaces::ports::MousePositionProvider;
use crate::core::models::GlobalPoint;
use crate::global_constants::{LOG_TAG_MOUSE, MESSAGE_MOUSE_POSITION_FAILED};

pub struct SystemMousePositionProvider;

impl SystemMousePositionProvider {
    pub fn initialize() -> Self {
        log::debug!("{} initializing mouse position provider", LOG_TAG_MOUSE);
        Self
    }

    fn convert_mouse_result_to_point(&self, mouse_result: Mouse) -> Result<GlobalPoint, String> {
        match mouse_result {
            Mouse::Position { x, y } => {
                log::debug!("{} current position: ({}, {})", LOG_TAG_MOUSE, x, y);
                Ok(GlobalPoint::at_coordinates(x, y))
            }
            Mouse::Error => {
                log::warn!("{} {}", LOG_TAG_MOUSE, MESSAGE_MOUSE_POSITION_FAILED);
                Err(MESSAGE_MOUSE_POSITION_FAILED.to_string())
            }
        }
    }
}

impl MousePositionProvider for SystemMousePositionProvider {
    fn get_current_mouse_position(&self) -> Result<GlobalPoint, String> {
        let mouse_position_result = Mouse::get_mouse_position();
        self.convert_mouse_result_to_point(mouse_position_result)
    }
}
