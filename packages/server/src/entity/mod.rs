pub mod advertisement;
pub mod operator;
pub mod screen;
