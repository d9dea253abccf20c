//! Infrastructure layer
//!
//! Concrete implementations of the domain repository traits plus
//! file-system helpers.

pub mod image_store;
pub mod persistence;

pub use image_store::ImageStore;
