mod coordinator;
mod display_state;
mod mode;
mod popup;
mod ui_state;

pub use coordinator::PlayerCoordinator;
pub use display_state::DisplayState;
pub use mode::Mode;
pub use popup::{PopupState, PopupType};
pub use ui_state::UiState;
