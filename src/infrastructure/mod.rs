pub mod error;
pub mod filesystem;
pub mod image_store;
pub mod json_file;
pub mod month_index;
pub mod repository;

#[cfg(test)]
pub mod test_utils;

pub use error::*;
pub use filesystem::*;
pub use image_store::*;
pub use json_file::*;
pub use month_index::*;
pub use repository::*;
