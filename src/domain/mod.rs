pub mod image;
pub mod slot;
pub mod watcher_options;
