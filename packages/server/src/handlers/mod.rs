pub mod advertisement;
pub mod auth;
pub mod media;
pub mod overview;
pub mod playback;
pub mod screen;
pub mod upload;
