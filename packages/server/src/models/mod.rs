pub mod advertisement;
pub mod auth;
pub mod screen;
pub mod shared;
