pub mod cover_renderer;
pub mod dominant_color;
