pub mod dom_watcher;
pub mod error_handling;
pub mod intersection;
pub mod lazy_loader;

pub use dom_watcher::DomWatcher;
pub use error_handling::{GalleryError, LogHelper};
pub use intersection::{IntersectionNotification, IntersectionWatcher};
pub use lazy_loader::{BatchReport, LazyLoader};
