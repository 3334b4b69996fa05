// Dioxus UI module - web renderer
pub mod app;
pub mod components;

#[cfg(test)]
mod app_test;

pub use app::App;
