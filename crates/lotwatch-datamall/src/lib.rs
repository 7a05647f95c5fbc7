pub mod client;
pub mod error;

pub use client::{DatamallClient, PAGE_SIZE};
pub use error::DatamallError;
