pub mod cache;
pub mod client;

pub use cache::ResponseCache;
pub use client::{BackendClient, BackendError};
