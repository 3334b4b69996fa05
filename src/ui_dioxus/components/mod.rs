pub mod image_gallery;

pub use image_gallery::ImageGallery;
