mod app;
mod commands;
mod effects;
mod persistence;
mod render;
mod theme;

pub use app::run_app;
