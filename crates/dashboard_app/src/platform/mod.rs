pub mod app;
pub mod config;
pub mod effects;
pub mod logging;
mod persistence;
pub mod render;
pub mod tables;
