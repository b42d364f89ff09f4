mod client;

pub use client::{CwaClient, DEFAULT_BASE_URL};
