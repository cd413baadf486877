use crate::core::models::GlobalPoint;

pub trait MousePositionProvider: Send + Sync {
    fn get_current_mouse_position(&self) -> Result<GlobalPoint, String>;
}
