pub mod assets;
pub mod config;
pub mod theme_loader;
