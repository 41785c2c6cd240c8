pub mod files;
pub mod images;
pub mod upload;
