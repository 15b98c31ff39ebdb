pub mod advertisement;
pub mod auth;
pub mod playback;
pub mod preview;
pub mod screen;
pub mod storage;
pub mod view;

pub use advertisement::Advertisement;
pub use playback::Playback;
pub use screen::{Screen, ScreenType};
pub use view::{AdView, Overview, UNKNOWN_SCREEN};
