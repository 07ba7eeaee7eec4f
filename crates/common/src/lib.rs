//! Common types and errors shared across `filedrop` crates.

pub mod error;

pub use error::UploadError;
