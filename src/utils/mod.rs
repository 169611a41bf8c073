pub mod input;
pub mod text;
