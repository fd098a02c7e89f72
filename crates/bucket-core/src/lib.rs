pub mod actions;
pub mod cluster;
pub mod conditions;
pub mod config;
pub mod error;
pub mod fetch;
pub mod timeline;
pub mod types;

pub use error::{BucketError, Result};
